use serde_json::Value;
use std::any::{type_name, Any};
use std::fmt;

use super::registry::{convention_name, lookup, SerializerType};
use crate::error::SerializerError;
use crate::serializer::{
    is_primitive, short_type_name, ListSerializer, PrimitiveSerializer, Serializer,
};

/// 对任意领域对象的类型擦除引用，保留对象的类型名用于约定查找
#[derive(Clone, Copy)]
pub struct ObjectRef<'a> {
    object: &'a dyn Any,
    type_name: &'static str,
}

impl<'a> ObjectRef<'a> {
    pub fn new<T: Any>(object: &'a T) -> Self {
        Self {
            object,
            type_name: type_name::<T>(),
        }
    }

    pub fn as_any(&self) -> &'a dyn Any {
        self.object
    }

    /// 不含模块路径的类型名，例如 `Person`
    pub fn type_name(&self) -> String {
        short_type_name(self.type_name)
    }

    pub fn full_type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is_primitive(&self) -> bool {
        is_primitive(self.object)
    }
}

impl fmt::Debug for ObjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectRef").field(&self.type_name).finish()
    }
}

/// 待序列化的目标
pub enum Target<'a> {
    /// 已经解析好的序列化器，原样使用
    Serializer(Box<dyn Serializer + 'a>),
    /// 单个领域对象
    Object(ObjectRef<'a>),
    /// 同类对象的有序序列
    List(Vec<ObjectRef<'a>>),
    /// 原始属性树
    Value(Value),
}

impl<'a> Target<'a> {
    pub fn object<T: Any>(object: &'a T) -> Self {
        Target::Object(ObjectRef::new(object))
    }

    pub fn list<T, I>(items: I) -> Self
    where
        T: Any,
        I: IntoIterator<Item = &'a T>,
    {
        Target::List(items.into_iter().map(ObjectRef::new).collect())
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Target::Value(value.into())
    }

    pub fn serializer<S: Serializer + 'a>(serializer: S) -> Self {
        Target::Serializer(Box::new(serializer))
    }
}

impl<'a> From<Box<dyn Serializer + 'a>> for Target<'a> {
    fn from(serializer: Box<dyn Serializer + 'a>) -> Self {
        Target::Serializer(serializer)
    }
}

impl<'a> From<ListSerializer<'a>> for Target<'a> {
    fn from(serializer: ListSerializer<'a>) -> Self {
        Target::Serializer(Box::new(serializer))
    }
}

impl From<Value> for Target<'_> {
    fn from(value: Value) -> Self {
        Target::Value(value)
    }
}

impl<'a, T: Any> From<&'a [T]> for Target<'a> {
    fn from(items: &'a [T]) -> Self {
        Target::list(items)
    }
}

impl<'a, T: Any> From<&'a Vec<T>> for Target<'a> {
    fn from(items: &'a Vec<T>) -> Self {
        Target::list(items)
    }
}

/// 按约定推断对象的序列化器类型
///
/// 没有对象（空列表）或对象是原始类型时返回原始类型序列化器，
/// 否则在命名空间中查找 `<TypeName>Serializer`
pub fn infer_serializer_type(object: Option<&ObjectRef<'_>>) -> Result<SerializerType, SerializerError> {
    match object {
        None => Ok(SerializerType::primitive()),
        Some(object) if object.is_primitive() => Ok(SerializerType::primitive()),
        Some(object) => lookup(&convention_name(&object.type_name())),
    }
}

/// 推断目标的序列化器类型；目标已经是序列化器时返回 None
pub fn serializer_type_for(target: &Target<'_>) -> Result<Option<SerializerType>, SerializerError> {
    match target {
        Target::Serializer(_) => Ok(None),
        Target::Value(_) => Ok(Some(SerializerType::primitive())),
        Target::Object(object) => infer_serializer_type(Some(object)).map(Some),
        Target::List(items) => infer_serializer_type(items.first()).map(Some),
    }
}

/// 为一组对象创建列表序列化器
///
/// 指定了 `with` 时用它包装每个元素，否则根据第一个元素推断
pub fn list_serializer_for<'a>(
    items: &[ObjectRef<'a>],
    with: Option<&SerializerType>,
) -> Result<ListSerializer<'a>, SerializerError> {
    let serializer_type = match with {
        Some(serializer_type) => serializer_type.clone(),
        None => infer_serializer_type(items.first())?,
    };
    log::debug!(
        "resolved {} for a list of {} item(s)",
        serializer_type.name(),
        items.len()
    );
    serializer_type.list(items)
}

/// 返回渲染目标所用的序列化器
///
/// 解析顺序：
/// 1. 目标已经是序列化器时原样返回，忽略 `with`
/// 2. 使用调用方指定的 `with`
/// 3. 按约定推断，原始值使用 `PrimitiveSerializer`
///
/// 列表目标总是得到 `ListSerializer`
pub fn serializer_for<'a>(
    target: Target<'a>,
    with: Option<&SerializerType>,
) -> Result<Box<dyn Serializer + 'a>, SerializerError> {
    match target {
        Target::Serializer(serializer) => Ok(serializer),
        Target::Value(value) => match with {
            Some(serializer_type) => serializer_type.build_value(value),
            None => Ok(Box::new(PrimitiveSerializer::new(value))),
        },
        Target::Object(object) => {
            let serializer_type = match with {
                Some(serializer_type) => serializer_type.clone(),
                None => infer_serializer_type(Some(&object))?,
            };
            log::debug!("resolved {} for {}", serializer_type.name(), object.type_name());
            serializer_type.build(object)
        }
        Target::List(items) => Ok(Box::new(list_serializer_for(&items, with)?)),
    }
}
