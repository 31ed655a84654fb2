// 序列化器类型注册表与命名空间查找

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use super::resolver::ObjectRef;
use crate::error::SerializerError;
use crate::render::{Output, RenderOptions};
use crate::serializer::{short_type_name, ListSerializer, PrimitiveSerializer, Serializer};

pub const PRIMITIVE_SERIALIZER: &str = "PrimitiveSerializer";

// 类型擦除的构造函数，对象类型不匹配时返回 None
type Constructor = Arc<
    dyn for<'a> Fn(&'a dyn Any) -> Option<Box<dyn Serializer + 'a>> + Send + Sync,
>;

/// 命名空间查找函数：序列化器名 -> 序列化器类型
pub type LookupFn = dyn Fn(&str) -> Result<SerializerType, SerializerError> + Send + Sync;

fn constructor<F>(f: F) -> Constructor
where
    F: for<'a> Fn(&'a dyn Any) -> Option<Box<dyn Serializer + 'a>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// 一个可以构造序列化器的类型描述
///
/// 相当于动态语言里的“序列化器类”：有名字，能把某种对象包装成序列化器
#[derive(Clone)]
pub struct SerializerType {
    name: String,
    object_type: &'static str,
    construct: Constructor,
}

impl SerializerType {
    /// 为对象类型 `T` 创建序列化器类型
    ///
    /// # 示例
    /// ```ignore
    /// let person_type = SerializerType::new::<Person, _>("PersonSerializer", |person| {
    ///     Box::new(PersonSerializer::new(person))
    /// });
    /// ```
    pub fn new<T, F>(name: &str, f: F) -> Self
    where
        T: Any,
        F: for<'a> Fn(&'a T) -> Box<dyn Serializer + 'a> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            object_type: type_name::<T>(),
            construct: constructor(move |object| object.downcast_ref::<T>().map(|typed| f(typed))),
        }
    }

    /// 原样输出原始值的序列化器类型
    pub fn primitive() -> Self {
        Self {
            name: PRIMITIVE_SERIALIZER.to_string(),
            object_type: "primitive",
            construct: constructor(|object| {
                PrimitiveSerializer::from_any(object)
                    .map(|serializer| Box::new(serializer) as Box<dyn Serializer + '_>)
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 能处理的对象类型名
    pub fn object_type(&self) -> &'static str {
        self.object_type
    }

    pub fn is_primitive(&self) -> bool {
        self.name == PRIMITIVE_SERIALIZER
    }

    /// 包装单个对象
    pub fn build<'a>(&self, object: ObjectRef<'a>) -> Result<Box<dyn Serializer + 'a>, SerializerError> {
        (self.construct)(object.as_any()).ok_or_else(|| self.mismatch(object.full_type_name()))
    }

    /// 包装一棵自有的原始属性树，序列化器接管它的所有权
    pub fn build_value(&self, value: Value) -> Result<Box<dyn Serializer>, SerializerError> {
        if self.is_primitive() {
            return Ok(Box::new(PrimitiveSerializer::new(value)));
        }
        if (self.construct)(&value as &dyn Any).is_none() {
            return Err(self.mismatch(type_name::<Value>()));
        }
        Ok(Box::new(OwnedValueSerializer {
            value,
            serializer_type: self.clone(),
        }))
    }

    fn mismatch(&self, actual: &str) -> SerializerError {
        SerializerError::ObjectMismatch {
            serializer: self.name.clone(),
            expected: self.object_type.to_string(),
            actual: actual.to_string(),
        }
    }

    /// 包装一组对象，每个元素都用这个类型构造
    pub fn list<'a>(&self, items: &[ObjectRef<'a>]) -> Result<ListSerializer<'a>, SerializerError> {
        let items = items
            .iter()
            .map(|item| self.build(*item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ListSerializer::new(items, self.name.clone()))
    }
}

// 持有属性树，每次调用时临时构造借用它的序列化器
struct OwnedValueSerializer {
    value: Value,
    serializer_type: SerializerType,
}

impl OwnedValueSerializer {
    fn inner(&self) -> Result<Box<dyn Serializer + '_>, SerializerError> {
        (self.serializer_type.construct)(&self.value as &dyn Any)
            .ok_or_else(|| self.serializer_type.mismatch(type_name::<Value>()))
    }
}

impl Serializer for OwnedValueSerializer {
    fn data(&self) -> Result<Value, SerializerError> {
        self.inner()?.data()
    }

    fn cache_key(&self) -> Option<String> {
        self.inner().ok()?.cache_key()
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.inner().ok()?.last_modified()
    }

    fn name(&self) -> String {
        self.inner()
            .map(|serializer| serializer.name())
            .unwrap_or_else(|_| self.serializer_type.name.clone())
    }

    fn render(&self, format: &str, options: &RenderOptions) -> Result<Output, SerializerError> {
        self.inner()?.render(format, options)
    }

    fn mime_type(&self, format: &str) -> Result<String, SerializerError> {
        self.inner()?.mime_type(format)
    }
}

impl fmt::Debug for SerializerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerType")
            .field("name", &self.name)
            .field("object_type", &self.object_type)
            .finish_non_exhaustive()
    }
}

impl PartialEq for SerializerType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.object_type == other.object_type
    }
}

// 全局命名空间
static SERIALIZERS: Lazy<RwLock<HashMap<String, SerializerType>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

static CONSTANT_LOOKUP: Lazy<ArcSwap<Box<LookupFn>>> =
    Lazy::new(|| ArcSwap::from_pointee(Box::new(serializer_type) as Box<LookupFn>));

/// 以指定名字注册序列化器类型，同名会覆盖
pub fn register_serializer<T, F>(name: &str, f: F) -> SerializerType
where
    T: Any,
    F: for<'a> Fn(&'a T) -> Box<dyn Serializer + 'a> + Send + Sync + 'static,
{
    let serializer_type = SerializerType::new::<T, F>(name, f);
    log::debug!("registering serializer {} for {}", name, serializer_type.object_type);

    SERIALIZERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.to_string(), serializer_type.clone());
    serializer_type
}

/// 按约定注册：`Person` 的序列化器注册为 `PersonSerializer`
pub fn register_serializer_for<T, F>(f: F) -> SerializerType
where
    T: Any,
    F: for<'a> Fn(&'a T) -> Box<dyn Serializer + 'a> + Send + Sync + 'static,
{
    let name = convention_name(&short_type_name(type_name::<T>()));
    register_serializer::<T, F>(&name, f)
}

/// 对象类型名对应的约定序列化器名
pub fn convention_name(type_name: &str) -> String {
    format!("{}Serializer", type_name)
}

/// 在全局命名空间中按名字查找序列化器类型
///
/// 这是默认的命名空间查找函数
pub fn serializer_type(name: &str) -> Result<SerializerType, SerializerError> {
    if name == PRIMITIVE_SERIALIZER {
        return Ok(SerializerType::primitive());
    }
    SERIALIZERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .cloned()
        .ok_or_else(|| SerializerError::SerializerNotFound(name.to_string()))
}

/// 已注册的序列化器名，按字母排序
pub fn registered_serializers() -> Vec<String> {
    let mut names: Vec<String> = SERIALIZERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}

/// 通过当前的命名空间查找函数解析序列化器名
pub fn lookup(name: &str) -> Result<SerializerType, SerializerError> {
    let lookup = CONSTANT_LOOKUP.load_full();
    (**lookup)(name)
}

/// 替换命名空间查找函数，用于从自定义命名空间解析序列化器
///
/// # 示例
/// ```ignore
/// // 在 "serializers::Foo" 而不是 "FooSerializer" 下查找
/// set_constant_lookup(|name| {
///     serializer_type(&format!("serializers::{}", name.trim_end_matches("Serializer")))
/// });
/// ```
pub fn set_constant_lookup<F>(f: F)
where
    F: Fn(&str) -> Result<SerializerType, SerializerError> + Send + Sync + 'static,
{
    CONSTANT_LOOKUP.store(Arc::new(Box::new(f)));
}

/// 恢复默认的命名空间查找函数
pub fn reset_constant_lookup() {
    CONSTANT_LOOKUP.store(Arc::new(Box::new(serializer_type)));
}
