//! 条件响应模块
//!
//! 把解析出的序列化器、它的缓存元数据与请求中的条件头组合成 HTTP 响应，
//! 客户端缓存仍然新鲜时短路为不带 body 的 304。

pub mod builder;
pub mod conditional;

pub use builder::{respond, Response, ResponseBuilder};
pub use conditional::{
    etag_for, format_http_date, parse_http_date, ConditionalRequest, StaleCheck, HTTP_DATE_FORMAT,
};
