// 条件请求（If-Modified-Since / If-None-Match）与新鲜度判断

use chrono::{DateTime, NaiveDateTime, Utc};
use http::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use http::HeaderMap;

/// IMF-fixdate，例如 `Thu, 19 Apr 2001 04:25:21 GMT`
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

const RFC850_DATE_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S GMT";
const ASCTIME_DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

pub fn format_http_date(time: &DateTime<Utc>) -> String {
    time.format(HTTP_DATE_FORMAT).to_string()
}

/// 解析 HTTP-date，支持 IMF-fixdate、RFC 850 与 asctime 三种格式
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(time) = DateTime::parse_from_rfc2822(value) {
        return Some(time.with_timezone(&Utc));
    }
    [RFC850_DATE_FORMAT, ASCTIME_DATE_FORMAT]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// cache key 对应的 ETag：md5 的十六进制小写摘要
pub fn etag_for(cache_key: &str) -> String {
    format!("{:x}", md5::compute(cache_key.as_bytes()))
}

/// 从请求头中提取的条件请求信息
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionalRequest {
    pub if_modified_since: Option<DateTime<Utc>>,
    pub if_none_match: Vec<String>,
}

impl ConditionalRequest {
    /// 无法解析的 If-Modified-Since 视为不存在
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let if_modified_since = headers
            .get(IF_MODIFIED_SINCE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_http_date);

        let if_none_match = headers
            .get_all(IF_NONE_MATCH)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            if_modified_since,
            if_none_match,
        }
    }

    pub fn is_conditional(&self) -> bool {
        self.if_modified_since.is_some() || !self.if_none_match.is_empty()
    }
}

/// 判断客户端缓存的副本是否仍然有效
#[derive(Debug, Clone)]
pub struct StaleCheck<'a> {
    request: &'a ConditionalRequest,
    last_modified: Option<DateTime<Utc>>,
    etag: Option<&'a str>,
}

impl<'a> StaleCheck<'a> {
    pub fn new(
        request: &'a ConditionalRequest,
        last_modified: Option<DateTime<Utc>>,
        etag: Option<&'a str>,
    ) -> Self {
        Self {
            request,
            last_modified,
            etag,
        }
    }

    /// 任一条件命中即为新鲜
    pub fn fresh(&self) -> bool {
        self.not_modified_since() || self.etag_matches()
    }

    pub fn stale(&self) -> bool {
        !self.fresh()
    }

    // 精确到秒比较，相等也算新鲜
    fn not_modified_since(&self) -> bool {
        match (self.last_modified, self.request.if_modified_since) {
            (Some(last_modified), Some(since)) => last_modified.timestamp() <= since.timestamp(),
            _ => false,
        }
    }

    fn etag_matches(&self) -> bool {
        match self.etag {
            Some(etag) => self
                .request
                .if_none_match
                .iter()
                .any(|token| token == "*" || token == etag),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use http::HeaderValue;

    const MODIFIED: i64 = 987654321;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn request(modified_since: Option<&'static str>, none_match: Option<&'static str>) -> ConditionalRequest {
        let mut headers = HeaderMap::new();
        if let Some(value) = modified_since {
            headers.insert(IF_MODIFIED_SINCE, HeaderValue::from_static(value));
        }
        if let Some(value) = none_match {
            headers.insert(IF_NONE_MATCH, HeaderValue::from_static(value));
        }
        ConditionalRequest::from_headers(&headers)
    }

    #[test]
    fn test_http_date_round_trip() {
        let formatted = format_http_date(&at(MODIFIED));
        assert_eq!(formatted, "Thu, 19 Apr 2001 04:25:21 GMT");
        assert_eq!(parse_http_date(&formatted), Some(at(MODIFIED)));
    }

    #[test]
    fn test_parse_obsolete_http_dates() {
        assert_eq!(parse_http_date("Thursday, 19-Apr-01 04:25:21 GMT"), Some(at(MODIFIED)));
        assert_eq!(parse_http_date("Thu Apr 19 04:25:21 2001"), Some(at(MODIFIED)));
        assert_eq!(parse_http_date("yesterday"), None);
    }

    #[test]
    fn test_etag_is_md5_hex() {
        assert_eq!(etag_for(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(etag_for("John Doe|987654321").len(), 32);
    }

    #[test]
    fn test_from_headers() {
        let parsed = request(Some("Thu, 19 Apr 2001 04:25:21 GMT"), Some("abcdef, ghijkl"));
        assert_eq!(parsed.if_modified_since, Some(at(MODIFIED)));
        assert_eq!(parsed.if_none_match, vec!["abcdef", "ghijkl"]);
        assert!(parsed.is_conditional());

        let invalid = request(Some("not a date"), None);
        assert_eq!(invalid, ConditionalRequest::default());
        assert!(!invalid.is_conditional());
    }

    #[test]
    fn test_stale_without_caching_data() {
        let req = request(Some("Thu, 19 Apr 2001 04:25:21 GMT"), Some("abcdef"));
        assert!(StaleCheck::new(&req, None, None).stale());
    }

    #[test]
    fn test_stale_without_headers() {
        let req = ConditionalRequest::default();
        assert!(StaleCheck::new(&req, Some(at(MODIFIED + 1)), Some("abcdef")).stale());
    }

    #[test]
    fn test_if_modified_since() {
        let req = request(Some("Thu, 19 Apr 2001 04:25:21 GMT"), None);
        assert!(StaleCheck::new(&req, Some(at(MODIFIED - 1)), None).fresh());
        assert!(StaleCheck::new(&req, Some(at(MODIFIED)), None).fresh());
        assert!(StaleCheck::new(&req, Some(at(MODIFIED + 1)), None).stale());
    }

    #[test]
    fn test_if_modified_since_ignores_subseconds() {
        let req = request(Some("Thu, 19 Apr 2001 04:25:21 GMT"), None);
        let with_millis = Utc.timestamp_opt(MODIFIED, 500_000_000).unwrap();
        assert!(StaleCheck::new(&req, Some(with_millis), None).fresh());
    }

    #[test]
    fn test_if_none_match() {
        let req = request(None, Some("abcdef, ghijkl"));
        assert!(StaleCheck::new(&req, None, Some("abcdef")).fresh());
        assert!(StaleCheck::new(&req, None, Some("ghijkl")).fresh());
        assert!(StaleCheck::new(&req, None, Some("zyxwvu")).stale());
        assert!(StaleCheck::new(&req, None, Some("ABCDEF")).stale());

        let wildcard = request(None, Some("*"));
        assert!(StaleCheck::new(&wildcard, None, Some("zyxwvu")).fresh());
        assert!(StaleCheck::new(&wildcard, None, None).stale());
    }

    #[test]
    fn test_both_conditions() {
        let req = request(Some("Thu, 19 Apr 2001 04:25:21 GMT"), Some("abcdef, ghijkl"));
        assert!(StaleCheck::new(&req, Some(at(MODIFIED - 1)), Some("abcdef")).fresh());
        assert!(StaleCheck::new(&req, Some(at(MODIFIED + 1)), Some("abcdef")).fresh());
        assert!(StaleCheck::new(&req, Some(at(MODIFIED - 1)), Some("zyxwvu")).fresh());
        assert!(StaleCheck::new(&req, Some(at(MODIFIED + 1)), Some("zyxwvu")).stale());
    }
}
