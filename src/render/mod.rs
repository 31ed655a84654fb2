//! 渲染模块
//!
//! 维护进程级的格式注册表，把序列化器产出的原始属性树编码为 JSON、YAML、
//! MessagePack 或任意自定义格式，并根据 Accept 头做内容协商。

pub mod backends;
pub mod negotiate;
pub mod registry;
pub mod renderer;

pub use backends::{
    json_backend, msgpack_backend, yaml_backend, JsonBackendConfig, MsgPackBackendConfig,
    YamlBackendConfig,
};
pub use negotiate::{best_format_for, best_format_in, q_values};
pub use registry::{
    register_builtin_renderers, register_renderer, renderable_formats, renderer, renderers,
    DEFAULT_FORMAT,
};
pub use renderer::{Backend, Output, RenderOptions, Renderer};
