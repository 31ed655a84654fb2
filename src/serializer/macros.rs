//! 格式便捷方法
//!
//! 为某个格式生成扩展 trait，并对所有序列化器做 blanket 实现，
//! 这样注册格式后，新旧序列化器类型都能直接调用 `to_<format>`。

/// 为格式生成 `to_<format>` 便捷方法
///
/// 用法：`define_format!(RenderCsv, to_csv, "csv");`
///
/// 生成的方法等价于 `serializer.render("csv", options)`，格式未注册时返回
/// `SerializerError::RendererNotFound`。
#[macro_export]
macro_rules! define_format {
    ($(#[$meta:meta])* $trait_name:ident, $method:ident, $format:literal) => {
        $(#[$meta])*
        pub trait $trait_name: $crate::Serializer {
            fn $method(
                &self,
                options: &$crate::RenderOptions,
            ) -> ::std::result::Result<$crate::Output, $crate::SerializerError> {
                self.render($format, options)
            }
        }

        impl<S: $crate::Serializer + ?Sized> $trait_name for S {}
    };
}

use crate::error::SerializerError;
use crate::render::RenderOptions;
use crate::serializer::core::Serializer;

/// 内置格式 json / yaml / msgpack 的便捷方法
pub trait RenderExt: Serializer {
    /// 渲染为 JSON 字符串
    fn to_json(&self, options: &RenderOptions) -> Result<String, SerializerError> {
        let output = self.render("json", options)?;
        String::from_utf8(output.into_bytes())
            .map_err(|e| SerializerError::RenderFailed(e.to_string()))
    }

    /// 渲染为 YAML 字符串，需要先调用 `register_builtin_renderers`
    fn to_yaml(&self, options: &RenderOptions) -> Result<String, SerializerError> {
        let output = self.render("yaml", options)?;
        String::from_utf8(output.into_bytes())
            .map_err(|e| SerializerError::RenderFailed(e.to_string()))
    }

    /// 渲染为 MessagePack 字节，需要先调用 `register_builtin_renderers`
    fn to_msgpack(&self, options: &RenderOptions) -> Result<Vec<u8>, SerializerError> {
        Ok(self.render("msgpack", options)?.into_bytes())
    }
}

impl<S: Serializer + ?Sized> RenderExt for S {}
