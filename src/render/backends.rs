use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::renderer::{Backend, Output, RenderOptions};
use crate::error::SerializerError;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const YAML_CONTENT_TYPE: &str = "text/x-yaml";
pub const MSGPACK_CONTENT_TYPE: &str = "application/x-msgpack";

/// JSON 后端配置
#[derive(Deserialize, Debug, Clone, Default)]
pub struct JsonBackendConfig {
    /// 是否格式化输出，可被调用时的 `pretty` 选项覆盖
    #[serde(default)]
    pub pretty: bool,
}

/// YAML 后端配置
#[derive(Deserialize, Debug, Clone, Default)]
pub struct YamlBackendConfig {}

/// MessagePack 后端配置
#[derive(Deserialize, Debug, Clone, Default)]
pub struct MsgPackBackendConfig {}

pub fn json_backend(config: JsonBackendConfig) -> Backend {
    Arc::new(move |data: &Value, options: &RenderOptions| {
        let pretty = options
            .get("pretty")
            .and_then(Value::as_bool)
            .unwrap_or(config.pretty);
        let rendered = if pretty {
            serde_json::to_string_pretty(data)
        } else {
            serde_json::to_string(data)
        };
        rendered
            .map(Output::Text)
            .map_err(|e| SerializerError::RenderFailed(e.to_string()))
    })
}

pub fn yaml_backend(_config: YamlBackendConfig) -> Backend {
    Arc::new(|data: &Value, _options: &RenderOptions| {
        serde_yaml::to_string(data)
            .map(Output::Text)
            .map_err(|e| SerializerError::RenderFailed(e.to_string()))
    })
}

pub fn msgpack_backend(_config: MsgPackBackendConfig) -> Backend {
    Arc::new(|data: &Value, _options: &RenderOptions| {
        rmp_serde::to_vec(data)
            .map(Output::Binary)
            .map_err(|e| SerializerError::RenderFailed(e.to_string()))
    })
}
