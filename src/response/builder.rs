use http::header::{ACCEPT, CONTENT_TYPE, ETAG, LAST_MODIFIED};
use http::{HeaderMap, HeaderValue, StatusCode};
use serde_json::Value;

use super::conditional::{etag_for, format_http_date, ConditionalRequest, StaleCheck};
use crate::error::SerializerError;
use crate::render::{best_format_for, renderer, Output, RenderOptions, DEFAULT_FORMAT};
use crate::resolve::{serializer_for, SerializerType, Target};

/// HTTP 响应三元组
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<Output>,
}

impl Response {
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Vec<Output>) {
        (self.status, self.headers, self.body)
    }

    pub fn is_not_modified(&self) -> bool {
        self.status == StatusCode::NOT_MODIFIED
    }
}

/// 构建带缓存元数据的响应
///
/// 客户端缓存仍然新鲜时直接返回空的 304，否则渲染序列化器并设置
/// `Content-Type`、`Last-Modified` 与 `ETag`。
///
/// # 示例
/// ```ignore
/// let response = ResponseBuilder::new(Target::object(&user))
///     .with_status(StatusCode::CREATED)
///     .with_request_headers(&request_headers)
///     .build()?;
/// ```
pub struct ResponseBuilder<'a> {
    target: Target<'a>,
    serializer_type: Option<SerializerType>,
    format: Option<String>,
    status: StatusCode,
    headers: HeaderMap,
    request_headers: Option<&'a HeaderMap>,
    options: RenderOptions,
}

impl<'a> ResponseBuilder<'a> {
    pub fn new(target: impl Into<Target<'a>>) -> Self {
        Self {
            target: target.into(),
            serializer_type: None,
            format: None,
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            request_headers: None,
            options: RenderOptions::new(),
        }
    }

    /// 指定序列化器类型（目标已经是序列化器时无效）
    pub fn with_serializer(mut self, serializer_type: SerializerType) -> Self {
        self.serializer_type = Some(serializer_type);
        self
    }

    /// 指定输出格式，跳过内容协商
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// 非 304 响应的状态码，默认 200
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// 默认响应头
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// 请求头，用于条件请求判断和内容协商
    pub fn with_request_headers(mut self, request_headers: &'a HeaderMap) -> Self {
        self.request_headers = Some(request_headers);
        self
    }

    /// 透传给渲染后端的选项
    pub fn with_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<Response, SerializerError> {
        let serializer = serializer_for(self.target, self.serializer_type.as_ref())?;
        let last_modified = serializer.last_modified();
        let etag = serializer.cache_key().map(|key| etag_for(&key));

        if let Some(format) = &self.format {
            renderer(format)?;
        }

        let conditional = self
            .request_headers
            .map(ConditionalRequest::from_headers)
            .unwrap_or_default();
        let mut headers = self.headers;

        if StaleCheck::new(&conditional, last_modified, etag.as_deref()).fresh() {
            log::debug!("{} not modified, responding 304", serializer.name());
            return Ok(Response {
                status: StatusCode::NOT_MODIFIED,
                headers,
                body: Vec::new(),
            });
        }

        let format = match self.format {
            Some(format) => format,
            None => self
                .request_headers
                .and_then(|request| best_format_for(&accept_header(request)))
                .unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
        };

        let content_type = serializer.mime_type(&format)?;
        let body = serializer.render(&format, &self.options)?;

        headers.insert(CONTENT_TYPE, HeaderValue::from_str(&content_type)?);
        if let Some(last_modified) = last_modified {
            headers.insert(
                LAST_MODIFIED,
                HeaderValue::from_str(&format_http_date(&last_modified))?,
            );
        }
        if let Some(etag) = etag {
            headers.insert(ETAG, HeaderValue::from_str(&etag)?);
        }

        Ok(Response {
            status: self.status,
            headers,
            body: vec![body],
        })
    }
}

// 多行 Accept 合并为一个列表
fn accept_header(request: &HeaderMap) -> String {
    request
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join(",")
}

/// 以默认选项响应一个目标
pub fn respond<'a>(
    target: impl Into<Target<'a>>,
    request_headers: &'a HeaderMap,
) -> Result<Response, SerializerError> {
    ResponseBuilder::new(target)
        .with_request_headers(request_headers)
        .build()
}
