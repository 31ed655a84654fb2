use thiserror::Error;

/// 序列化、渲染与响应构建过程中的错误
#[derive(Error, Debug)]
pub enum SerializerError {
    /// 序列化器没有实现 `data()`，属于编程错误
    #[error("{0} does not implement data()")]
    NotImplemented(String),

    /// 请求了未注册的渲染格式
    #[error("No renderer registered for {0:?}")]
    RendererNotFound(String),

    /// 按约定查找序列化器失败
    #[error("No serializer found named {0:?}")]
    SerializerNotFound(String),

    /// 显式指定的序列化器与对象类型不匹配
    #[error("{serializer} expects {expected}, got {actual}")]
    ObjectMismatch {
        serializer: String,
        expected: String,
        actual: String,
    },

    #[error("Rendering failed: {0}")]
    RenderFailed(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

impl SerializerError {
    /// 调用方传入了无效参数（格式名或对象类型）
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            SerializerError::RendererNotFound(_) | SerializerError::ObjectMismatch { .. }
        )
    }
}
