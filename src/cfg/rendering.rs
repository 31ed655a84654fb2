// 渲染格式的配置加载

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::Path;

use super::registry::create_backend;
use crate::render::register_renderer;

/// 单个渲染格式的配置
///
/// ```json5
/// {
///     format: "json",
///     type: "JsonBackend",
///     options: { pretty: true },
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RendererConfig {
    /// 注册的格式名
    pub format: String,
    /// 后端类型名
    #[serde(rename = "type")]
    pub backend: String,
    /// 缺省时使用后端默认的 Content-Type
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub options: JsonValue,
}

/// 一组渲染格式的配置
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RenderingConfig {
    #[serde(default)]
    pub renderers: Vec<RendererConfig>,
}

impl RenderingConfig {
    /// 从 JSON 字符串创建（支持 JSON5 格式）
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(json5::from_str(json_str)?)
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// 按扩展名选择解析方式：json / json5 / yaml / yml / toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" | "json5" => Self::from_json(&content),
            "yaml" | "yml" => Self::from_yaml(&content),
            "toml" => Self::from_toml(&content),
            other => Err(anyhow!("Unsupported config format '{}': {}", other, path.display())),
        }
    }

    /// 把所有格式注册到全局渲染器注册表
    ///
    /// 所有后端先全部创建成功才会注册，任何一项失败都不会改动注册表
    pub fn install(&self) -> Result<()> {
        let mut prepared = Vec::with_capacity(self.renderers.len());
        for renderer in &self.renderers {
            let (backend, default_content_type) =
                create_backend(&renderer.backend, renderer.options.clone())?;
            let content_type = renderer.content_type.clone().unwrap_or(default_content_type);
            prepared.push((renderer.format.as_str(), backend, content_type));
        }

        for (format, backend, content_type) in prepared {
            register_renderer(format, backend, &content_type);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{renderer, RenderOptions};
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_from_json5() -> Result<()> {
        let config = RenderingConfig::from_json(
            r#"
            {
                // 注释和尾随逗号
                renderers: [
                    { format: "pretty-json", type: "JsonBackend", options: { pretty: true } },
                ],
            }
        "#,
        )?;

        assert_eq!(config.renderers.len(), 1);
        assert_eq!(config.renderers[0].format, "pretty-json");
        assert_eq!(config.renderers[0].backend, "JsonBackend");
        assert_eq!(config.renderers[0].content_type, None);
        assert_eq!(config.renderers[0].options, json!({"pretty": true}));
        Ok(())
    }

    #[test]
    fn test_from_yaml_and_toml() -> Result<()> {
        let yaml = RenderingConfig::from_yaml(
            r#"
renderers:
  - format: cfg-yaml
    type: YamlBackend
    content_type: application/yaml
"#,
        )?;
        assert_eq!(yaml.renderers[0].content_type.as_deref(), Some("application/yaml"));

        let toml = RenderingConfig::from_toml(
            r#"
[[renderers]]
format = "cfg-msgpack"
type = "MsgPackBackend"
"#,
        )?;
        assert_eq!(toml.renderers[0].backend, "MsgPackBackend");
        Ok(())
    }

    #[test]
    fn test_install() -> Result<()> {
        let config = RenderingConfig::from_json(
            r#"{
                renderers: [
                    { format: "cfg-pretty", type: "JsonBackend", options: { pretty: true } },
                    { format: "cfg-yml", type: "YamlBackend", content_type: "application/yaml" },
                ]
            }"#,
        )?;
        config.install()?;

        let pretty = renderer("cfg-pretty")?;
        assert_eq!(pretty.content_type(), "application/json");
        let output = pretty.render(&json!({"a": 1}), &RenderOptions::new())?;
        assert!(output.as_text().unwrap().contains('\n'));

        assert_eq!(renderer("cfg-yml")?.content_type(), "application/yaml");
        Ok(())
    }

    #[test]
    fn test_install_is_all_or_nothing() -> Result<()> {
        let config = RenderingConfig::from_json(
            r#"{
                renderers: [
                    { format: "cfg-ok", type: "JsonBackend" },
                    { format: "cfg-broken", type: "NoSuchBackend" },
                ]
            }"#,
        )?;

        assert!(config.install().is_err());
        assert!(renderer("cfg-ok").is_err());
        assert!(renderer("cfg-broken").is_err());
        Ok(())
    }

    #[test]
    fn test_from_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
        writeln!(file, "renderers:\n  - format: cfg-file\n    type: JsonBackend")?;

        let config = RenderingConfig::from_file(file.path())?;
        assert_eq!(config.renderers[0].format, "cfg-file");

        let unsupported = tempfile::Builder::new().suffix(".ini").tempfile()?;
        assert!(RenderingConfig::from_file(unsupported.path()).is_err());
        Ok(())
    }
}
