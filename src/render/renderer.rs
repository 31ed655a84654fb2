use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::error::SerializerError;

/// 调用方传给渲染后端的选项（例如 `{"pretty": true}`）
pub type RenderOptions = Map<String, Value>;

/// 渲染后端：把原始属性树编码成某种格式
///
/// 后端只会收到 `Serializer::data()` 的结果，不会接触序列化器或被包装的对象
pub type Backend =
    Arc<dyn Fn(&Value, &RenderOptions) -> Result<Output, SerializerError> + Send + Sync>;

/// 渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Text(String),
    Binary(Vec<u8>),
}

impl Output {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Output::Text(text) => text.as_bytes(),
            Output::Binary(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Output::Text(text) => text.into_bytes(),
            Output::Binary(bytes) => bytes,
        }
    }

    /// 文本输出返回字符串，二进制输出返回 None
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            Output::Binary(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for Output {
    fn from(text: String) -> Self {
        Output::Text(text)
    }
}

impl From<&str> for Output {
    fn from(text: &str) -> Self {
        Output::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Output {
    fn from(bytes: Vec<u8>) -> Self {
        Output::Binary(bytes)
    }
}

/// 一种已注册的输出格式：格式名、后端与 Content-Type
#[derive(Clone)]
pub struct Renderer {
    format: String,
    backend: Backend,
    content_type: String,
}

impl Renderer {
    pub fn new(format: impl Into<String>, backend: Backend, content_type: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            backend,
            content_type: content_type.into(),
        }
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// 渲染一棵原始属性树
    pub fn render(&self, data: &Value, options: &RenderOptions) -> Result<Output, SerializerError> {
        (self.backend)(data, options)
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("format", &self.format)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}
