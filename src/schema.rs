//! JSON Schema 支持
//!
//! 序列化器实现 [`Schema`] 后可以用自己的 schema 校验 `data()` 的输出，
//! [`SchemaSerializer`] 用于把 schema 本身渲染给客户端。

use serde_json::{Map, Value};

use crate::error::SerializerError;
use crate::serializer::Serializer;

pub const SCHEMA_DRAFT: &str = "http://json-schema.org/schema#";
pub const SCHEMA_CONTENT_TYPE: &str = "application/schema+json";

/// 为序列化器声明输出结构
pub trait Schema: Serializer + Sized {
    /// 该序列化器输出实体的 JSON Schema
    fn schema() -> Value;

    /// 校验 `data()` 的输出，返回所有错误描述
    fn validation_errors(&self) -> Result<Vec<String>, SerializerError> {
        let schema = Self::schema();
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| SerializerError::InvalidSchema(e.to_string()))?;
        let data = self.data()?;
        Ok(validator.iter_errors(&data).map(|e| e.to_string()).collect())
    }

    fn is_valid(&self) -> Result<bool, SerializerError> {
        Ok(self.validation_errors()?.is_empty())
    }
}

/// 渲染 schema 文档的序列化器
///
/// # 示例
/// ```ignore
/// let schema = PersonSerializer::schema();
/// let response = respond(Target::serializer(SchemaSerializer::new(&schema)), &headers)?;
/// // Content-Type: application/schema+json
/// ```
pub struct SchemaSerializer<'a> {
    schema: &'a Value,
}

impl<'a> SchemaSerializer<'a> {
    pub fn new(schema: &'a Value) -> Self {
        Self { schema }
    }
}

impl Serializer for SchemaSerializer<'_> {
    fn data(&self) -> Result<Value, SerializerError> {
        let definition = self
            .schema
            .as_object()
            .ok_or_else(|| SerializerError::InvalidSchema("schema must be an object".to_string()))?;

        let mut document = Map::new();
        document.insert("$schema".to_string(), Value::from(SCHEMA_DRAFT));
        document.insert("type".to_string(), Value::from("object"));
        for (key, value) in definition {
            document.insert(key.clone(), value.clone());
        }
        Ok(Value::Object(document))
    }

    fn mime_type(&self, format: &str) -> Result<String, SerializerError> {
        let content_type = crate::render::renderer(format)?.content_type().to_string();
        if format == "json" {
            return Ok(SCHEMA_CONTENT_TYPE.to_string());
        }
        Ok(content_type)
    }
}
