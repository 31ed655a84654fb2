// 进程级渲染器注册表

use once_cell::sync::Lazy;
use std::sync::{Arc, PoisonError, RwLock};

use super::backends::{
    json_backend, msgpack_backend, yaml_backend, JsonBackendConfig, MsgPackBackendConfig,
    YamlBackendConfig, JSON_CONTENT_TYPE, MSGPACK_CONTENT_TYPE, YAML_CONTENT_TYPE,
};
use super::renderer::{Backend, Renderer};
use crate::error::SerializerError;

pub const DEFAULT_FORMAT: &str = "json";

// 按注册顺序保存
static RENDERERS: Lazy<RwLock<Vec<Arc<Renderer>>>> = Lazy::new(|| {
    RwLock::new(vec![Arc::new(Renderer::new(
        DEFAULT_FORMAT,
        json_backend(JsonBackendConfig::default()),
        JSON_CONTENT_TYPE,
    ))])
});

/// 注册一种渲染格式
///
/// 同名格式会被覆盖，并保留它第一次注册时的位置。注册对所有序列化器生效，
/// 应在进程初始化阶段完成。
///
/// # 示例
/// ```ignore
/// register_renderer("msgpack", msgpack_backend(Default::default()), "application/x-msgpack");
/// let bytes = serializer.render("msgpack", &RenderOptions::new())?;
/// ```
pub fn register_renderer(format: &str, backend: Backend, content_type: &str) {
    let renderer = Arc::new(Renderer::new(format, backend, content_type));
    let mut renderers = RENDERERS.write().unwrap_or_else(PoisonError::into_inner);

    match renderers.iter_mut().find(|r| r.format() == format) {
        Some(existing) => {
            log::debug!("replacing renderer {:?} ({})", format, content_type);
            *existing = renderer;
        }
        None => {
            log::debug!("registering renderer {:?} ({})", format, content_type);
            renderers.push(renderer);
        }
    }
}

/// 注册内置的 yaml 与 msgpack 渲染器，可重复调用
pub fn register_builtin_renderers() {
    register_renderer(
        "yaml",
        yaml_backend(YamlBackendConfig::default()),
        YAML_CONTENT_TYPE,
    );
    register_renderer(
        "msgpack",
        msgpack_backend(MsgPackBackendConfig::default()),
        MSGPACK_CONTENT_TYPE,
    );
}

/// 获取已注册的渲染器
pub fn renderer(format: &str) -> Result<Arc<Renderer>, SerializerError> {
    let renderers = RENDERERS.read().unwrap_or_else(PoisonError::into_inner);
    renderers
        .iter()
        .find(|r| r.format() == format)
        .cloned()
        .ok_or_else(|| SerializerError::RendererNotFound(format.to_string()))
}

/// 按注册顺序返回所有格式名
pub fn renderable_formats() -> Vec<String> {
    let renderers = RENDERERS.read().unwrap_or_else(PoisonError::into_inner);
    renderers.iter().map(|r| r.format().to_string()).collect()
}

/// 按注册顺序返回所有渲染器的快照
pub fn renderers() -> Vec<Arc<Renderer>> {
    RENDERERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
