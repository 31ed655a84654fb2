//! 序列化器解析模块
//!
//! 把任意对象映射到用于渲染它的序列化器：已是序列化器的原样返回，
//! 其次使用调用方指定的类型，最后按 `<TypeName>Serializer` 约定在
//! 可替换的命名空间中查找。

pub mod registry;
pub mod resolver;

pub use registry::{
    convention_name, lookup, register_serializer, register_serializer_for,
    registered_serializers, reset_constant_lookup, serializer_type, set_constant_lookup, LookupFn,
    SerializerType, PRIMITIVE_SERIALIZER,
};
pub use resolver::{
    infer_serializer_type, list_serializer_for, serializer_for, serializer_type_for, ObjectRef,
    Target,
};
