//! cfg 模块 - 渲染配置
//!
//! 通过 `{"format": ..., "type": ..., "options": ...}` 形式的配置创建并注册渲染格式，
//! 支持 JSON5 / YAML / TOML 配置文件

pub mod registry;
pub mod rendering;

pub use registry::{create_backend, register_backend_factory};
pub use rendering::{RendererConfig, RenderingConfig};
