use serde_json::{Map, Value};
use std::any::Any;
use std::borrow::Cow;

use super::core::Serializer;
use crate::error::SerializerError;

/// 原样输出原始值的序列化器
///
/// 处理 null、布尔、数字、字符串以及无类型的键值对象，不需要按约定查找
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSerializer<'a> {
    value: Cow<'a, Value>,
}

impl<'a> PrimitiveSerializer<'a> {
    pub fn new(value: Value) -> Self {
        Self {
            value: Cow::Owned(value),
        }
    }

    pub fn borrowed(value: &'a Value) -> Self {
        Self {
            value: Cow::Borrowed(value),
        }
    }

    /// 对象是可识别的原始类型时创建序列化器，否则返回 None
    pub fn from_any(object: &'a dyn Any) -> Option<Self> {
        if let Some(value) = object.downcast_ref::<Value>() {
            return Some(Self::borrowed(value));
        }
        primitive_value(object).map(Self::new)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Serializer for PrimitiveSerializer<'_> {
    fn data(&self) -> Result<Value, SerializerError> {
        Ok(self.value.clone().into_owned())
    }
}

/// 判断对象是否为原始类型
pub fn is_primitive(object: &dyn Any) -> bool {
    object.is::<Value>() || primitive_value(object).is_some()
}

macro_rules! downcast_primitive {
    ($object:expr, $($ty:ty),+ $(,)?) => {
        $(
            if let Some(v) = $object.downcast_ref::<$ty>() {
                return Some(Value::from(v.clone()));
            }
        )+
    };
}

fn primitive_value(object: &dyn Any) -> Option<Value> {
    if object.is::<()>() {
        return Some(Value::Null);
    }
    if let Some(v) = object.downcast_ref::<Option<Value>>() {
        return Some(v.clone().unwrap_or(Value::Null));
    }
    if let Some(v) = object.downcast_ref::<Map<String, Value>>() {
        return Some(Value::Object(v.clone()));
    }
    if let Some(v) = object.downcast_ref::<&'static str>() {
        return Some(Value::from(*v));
    }
    downcast_primitive!(
        object, bool, String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitives_pass_through() {
        let cases: Vec<(Box<dyn Any>, Value)> = vec![
            (Box::new(()), Value::Null),
            (Box::new(true), json!(true)),
            (Box::new(false), json!(false)),
            (Box::new(10i64), json!(10)),
            (Box::new(5.0f64), json!(5.0)),
            (Box::new("foo".to_string()), json!("foo")),
            (Box::new("bar"), json!("bar")),
            (Box::new(None::<Value>), Value::Null),
        ];

        for (object, expected) in cases {
            let serializer = PrimitiveSerializer::from_any(object.as_ref()).unwrap();
            assert_eq!(serializer.data().unwrap(), expected);
        }
    }

    #[test]
    fn test_value_is_borrowed() {
        let value = json!({"b": [1, 2], "a": null});
        let serializer = PrimitiveSerializer::from_any(&value).unwrap();
        assert!(matches!(serializer.value, Cow::Borrowed(_)));
        assert_eq!(serializer.data().unwrap(), value);
    }

    #[test]
    fn test_untyped_map() {
        let mut map = Map::new();
        map.insert("name".to_string(), json!("John Doe"));
        assert!(is_primitive(&map));
        assert_eq!(
            PrimitiveSerializer::from_any(&map).unwrap().data().unwrap(),
            json!({"name": "John Doe"})
        );
    }

    #[test]
    fn test_structs_are_not_primitive() {
        struct Person;
        assert!(!is_primitive(&Person));
        assert!(PrimitiveSerializer::from_any(&Person).is_none());
    }
}
