// 渲染后端工厂注册表

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::render::backends::{
    json_backend, msgpack_backend, yaml_backend, JsonBackendConfig, MsgPackBackendConfig,
    YamlBackendConfig, JSON_CONTENT_TYPE, MSGPACK_CONTENT_TYPE, YAML_CONTENT_TYPE,
};
use crate::render::Backend;

// 工厂函数：从 JSON 配置创建后端
type Factory = Box<dyn Fn(JsonValue) -> Result<Backend> + Send + Sync>;

struct BackendFactory {
    factory: Factory,
    content_type: String,
}

static BACKEND_FACTORIES: Lazy<RwLock<HashMap<String, BackendFactory>>> = Lazy::new(|| {
    let mut factories = HashMap::new();
    factories.insert(
        "JsonBackend".to_string(),
        backend_factory::<JsonBackendConfig, _>(JSON_CONTENT_TYPE, json_backend),
    );
    factories.insert(
        "YamlBackend".to_string(),
        backend_factory::<YamlBackendConfig, _>(YAML_CONTENT_TYPE, yaml_backend),
    );
    factories.insert(
        "MsgPackBackend".to_string(),
        backend_factory::<MsgPackBackendConfig, _>(MSGPACK_CONTENT_TYPE, msgpack_backend),
    );
    RwLock::new(factories)
});

fn backend_factory<Config, F>(content_type: &str, f: F) -> BackendFactory
where
    Config: DeserializeOwned + 'static,
    F: Fn(Config) -> Backend + Send + Sync + 'static,
{
    BackendFactory {
        factory: Box::new(move |options| {
            // 省略 options 等价于空对象
            let options = match options {
                JsonValue::Null => JsonValue::Object(Default::default()),
                other => other,
            };
            let config: Config = serde_json::from_value(options)?;
            Ok(f(config))
        }),
        content_type: content_type.to_string(),
    }
}

/// 注册一个后端类型，之后可以在配置中通过 `type` 引用
///
/// # 示例
/// ```ignore
/// #[derive(Deserialize)]
/// struct CsvBackendConfig { delimiter: char }
///
/// register_backend_factory::<CsvBackendConfig, _>("CsvBackend", "text/csv", csv_backend)?;
/// ```
pub fn register_backend_factory<Config, F>(type_name: &str, content_type: &str, f: F) -> Result<()>
where
    Config: DeserializeOwned + 'static,
    F: Fn(Config) -> Backend + Send + Sync + 'static,
{
    let mut factories = BACKEND_FACTORIES
        .write()
        .map_err(|_| anyhow!("Failed to acquire write lock"))?;
    factories.insert(type_name.to_string(), backend_factory::<Config, F>(content_type, f));
    Ok(())
}

/// 根据类型名和配置创建后端，同时返回该后端默认的 Content-Type
pub fn create_backend(type_name: &str, options: JsonValue) -> Result<(Backend, String)> {
    let factories = BACKEND_FACTORIES
        .read()
        .map_err(|_| anyhow!("Failed to acquire read lock"))?;

    let entry = factories
        .get(type_name)
        .ok_or_else(|| anyhow!("Backend type '{}' not registered", type_name))?;

    let backend = (entry.factory)(options)?;
    Ok((backend, entry.content_type.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Output, RenderOptions};
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_create_builtin_backends() -> Result<()> {
        let (backend, content_type) = create_backend("JsonBackend", json!({"pretty": true}))?;
        assert_eq!(content_type, "application/json");
        let output = backend(&json!({"a": 1}), &RenderOptions::new())?;
        assert!(output.as_text().unwrap().contains('\n'));

        let (_, content_type) = create_backend("YamlBackend", JsonValue::Null)?;
        assert_eq!(content_type, "text/x-yaml");

        let (_, content_type) = create_backend("MsgPackBackend", json!({}))?;
        assert_eq!(content_type, "application/x-msgpack");
        Ok(())
    }

    #[test]
    fn test_unregistered_backend() {
        let err = create_backend("XmlBackend", json!({})).err().unwrap();
        assert!(err.to_string().contains("not registered"));
        assert!(err.to_string().contains("XmlBackend"));
    }

    #[test]
    fn test_invalid_backend_options() {
        let result = create_backend("JsonBackend", json!({"pretty": "very"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_register_custom_backend() -> Result<()> {
        #[derive(Deserialize)]
        struct PrefixBackendConfig {
            prefix: String,
        }

        register_backend_factory::<PrefixBackendConfig, _>("PrefixBackend", "text/plain", |config| {
            Arc::new(move |data, _| Ok(Output::Text(format!("{}{}", config.prefix, data))))
        })?;

        let (backend, content_type) = create_backend("PrefixBackend", json!({"prefix": "> "}))?;
        assert_eq!(content_type, "text/plain");
        assert_eq!(
            backend(&json!([1]), &RenderOptions::new())?,
            Output::from("> [1]")
        );
        Ok(())
    }
}
