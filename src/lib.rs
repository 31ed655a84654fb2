//! RustX Render - 对象序列化与 HTTP 条件响应
//!
//! 把领域对象转换为原始属性树，通过可插拔的格式注册表渲染，
//! 并根据 ETag / Last-Modified 决定是否需要返回响应体。
//!
//! ## 模块
//!
//! - **serializer**: 序列化器契约、列表序列化器、原始值序列化器
//! - **render**: 渲染器注册表、内置后端（JSON / YAML / MessagePack）与内容协商
//! - **resolve**: 按约定或显式指定解析对象的序列化器
//! - **response**: 条件请求判断与 HTTP 响应构建
//! - **cfg**: 基于配置文件注册渲染格式
//! - **schema**: JSON Schema 校验（`schema` feature）
//!
//! ## 快速开始
//!
//! ```ignore
//! use rustx_render::*;
//!
//! struct PersonSerializer<'a> {
//!     person: &'a Person,
//! }
//!
//! impl Serializer for PersonSerializer<'_> {
//!     fn data(&self) -> Result<serde_json::Value, SerializerError> {
//!         Ok(serde_json::json!({ "name": self.person.name, "age": self.person.age }))
//!     }
//! }
//!
//! register_serializer_for::<Person, _>(|person| Box::new(PersonSerializer { person }));
//!
//! let response = respond(Target::object(&person), &request_headers)?;
//! let (status, headers, body) = response.into_parts();
//! ```

pub mod cfg;
pub mod error;
pub mod render;
pub mod resolve;
pub mod response;
#[cfg(feature = "schema")]
pub mod schema;
pub mod serializer;

// 重新导出主要的公共 API
pub use error::SerializerError;

pub use serializer::{
    ListSerializer, PrimitiveSerializer, RenderExt, Serializer, Wrap, CACHE_KEY_DELIMITER,
};

pub use render::{
    register_builtin_renderers, register_renderer, renderable_formats, renderer, Backend, Output,
    RenderOptions, Renderer,
};

pub use resolve::{
    register_serializer, register_serializer_for, reset_constant_lookup, serializer_for,
    serializer_type, set_constant_lookup, ObjectRef, SerializerType, Target,
};

pub use response::{respond, ConditionalRequest, Response, ResponseBuilder, StaleCheck};

pub use cfg::{RendererConfig, RenderingConfig};

#[cfg(feature = "schema")]
pub use schema::{Schema, SchemaSerializer};
