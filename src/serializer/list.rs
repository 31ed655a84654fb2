use chrono::{DateTime, Utc};
use serde_json::Value;

use super::core::Serializer;
use crate::error::SerializerError;

/// 列表元素 cache_key 的连接符
pub const CACHE_KEY_DELIMITER: &str = "-";

/// 包装一组同类对象的序列化器
///
/// 推荐通过 `Wrap::list` 或解析器创建，而不是直接构造
pub struct ListSerializer<'a> {
    items: Vec<Box<dyn Serializer + 'a>>,
    item_serializer: String,
}

impl<'a> ListSerializer<'a> {
    pub fn new(items: Vec<Box<dyn Serializer + 'a>>, item_serializer: impl Into<String>) -> Self {
        Self {
            items,
            item_serializer: item_serializer.into(),
        }
    }

    /// 元素序列化器的类型名
    pub fn item_serializer(&self) -> &str {
        &self.item_serializer
    }

    pub fn items(&self) -> &[Box<dyn Serializer + 'a>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Serializer for ListSerializer<'_> {
    fn data(&self) -> Result<Value, SerializerError> {
        self.items
            .iter()
            .map(|item| item.data())
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn cache_key(&self) -> Option<String> {
        let keys: Vec<String> = self.items.iter().filter_map(|item| item.cache_key()).collect();
        (!keys.is_empty()).then(|| keys.join(CACHE_KEY_DELIMITER))
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.items.iter().filter_map(|item| item.last_modified()).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    struct Fixed {
        value: Value,
        cache_key: Option<&'static str>,
        last_modified: Option<i64>,
    }

    impl Serializer for Fixed {
        fn data(&self) -> Result<Value, SerializerError> {
            Ok(self.value.clone())
        }

        fn cache_key(&self) -> Option<String> {
            self.cache_key.map(str::to_string)
        }

        fn last_modified(&self) -> Option<DateTime<Utc>> {
            self.last_modified
                .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        }
    }

    fn fixed(
        value: Value,
        cache_key: Option<&'static str>,
        last_modified: Option<i64>,
    ) -> Box<dyn Serializer> {
        Box::new(Fixed {
            value,
            cache_key,
            last_modified,
        })
    }

    #[test]
    fn test_data_preserves_order() {
        let list = ListSerializer::new(
            vec![fixed(json!("b"), None, None), fixed(json!("a"), None, None)],
            "Fixed",
        );
        assert_eq!(list.data().unwrap(), json!(["b", "a"]));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_empty_list() {
        let list = ListSerializer::new(Vec::new(), "PrimitiveSerializer");
        assert!(list.is_empty());
        assert_eq!(list.data().unwrap(), json!([]));
        assert_eq!(list.cache_key(), None);
        assert_eq!(list.last_modified(), None);
    }

    #[test]
    fn test_cache_key_skips_absent_keys() {
        let list = ListSerializer::new(
            vec![
                fixed(json!(1), Some("one"), None),
                fixed(json!(2), None, None),
                fixed(json!(3), Some("three"), None),
            ],
            "Fixed",
        );
        assert_eq!(list.cache_key().as_deref(), Some("one-three"));

        let list = ListSerializer::new(vec![fixed(json!(1), None, None)], "Fixed");
        assert_eq!(list.cache_key(), None);
    }

    #[test]
    fn test_last_modified_is_latest() {
        let list = ListSerializer::new(
            vec![
                fixed(json!(1), None, Some(100)),
                fixed(json!(2), None, None),
                fixed(json!(3), None, Some(300)),
                fixed(json!(4), None, Some(200)),
            ],
            "Fixed",
        );
        assert_eq!(list.last_modified(), Utc.timestamp_opt(300, 0).single());
    }

    #[test]
    fn test_item_error_propagates() {
        struct Broken;
        impl Serializer for Broken {}

        let list = ListSerializer::new(
            vec![fixed(json!(1), None, None), Box::new(Broken) as Box<dyn Serializer>],
            "Mixed",
        );
        assert!(matches!(list.data(), Err(SerializerError::NotImplemented(_))));
    }
}
