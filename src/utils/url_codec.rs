//! URL编解码工具
//! 百分号解码（支持多重编码）、encodeURIComponent 兼容编码、查询参数序列化

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::{Url, form_urlencoded};

/// encodeURIComponent 保留的字符：字母数字与 `-_.!~*'()`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// 与 encodeURIComponent 行为一致的编码
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// 单次百分号解码，`+` 不视为空格；解码结果不是合法 UTF-8 时返回 None
pub fn decode_uri_component(value: &str) -> Option<Cow<'_, str>> {
    percent_decode_str(value).decode_utf8().ok()
}

/// 解码重定向目标：反复解码直到结果不再变化，缺少 http 前缀时补 `http://`
pub fn decode_url(raw: &str) -> String {
    let mut decoded = raw.to_string();

    loop {
        let next = match decode_uri_component(&decoded) {
            Some(next) if next != decoded.as_str() => next.into_owned(),
            _ => break,
        };
        decoded = next;
    }

    if !decoded.starts_with("http") {
        decoded.insert_str(0, "http://");
    }

    decoded
}

/// 去掉查询串与片段后的URL（scheme + authority + path）
pub fn url_without_params_and_hash(url: &Url) -> String {
    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.set_fragment(None);
    stripped.to_string()
}

/// 按 application/x-www-form-urlencoded 解析查询参数（保持顺序）
pub fn parse_query(url: &Url) -> Vec<(String, String)> {
    url.query_pairs().into_owned().collect()
}

/// 表单编码序列化（空格编码为 `+`），用于日志快照
pub fn serialize_query_form(fields: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

/// 最终URL拼装用的序列化：值按 encodeURIComponent 编码，空值只保留键名
pub fn serialize_query(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            if value.is_empty() {
                key.clone()
            } else {
                format!("{}={}", key, encode_uri_component(value))
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_uri_component("keep-_.!~*'()"), "keep-_.!~*'()");
        assert_eq!(encode_uri_component("中"), "%E4%B8%AD");
    }

    #[test]
    fn test_decode_url_multiple_layers() {
        assert_eq!(decode_url("http%253A%252F%252Fdest.test%252Fa"), "http://dest.test/a");
        assert_eq!(decode_url("http%3A%2F%2Fdest.test%2Fa"), "http://dest.test/a");
    }

    #[test]
    fn test_decode_url_repairs_scheme() {
        assert_eq!(decode_url("dest.test%2Fpath"), "http://dest.test/path");
        assert_eq!(decode_url("%2F%2Fcdn.test%2Fx"), "http:////cdn.test/x");
    }

    #[test]
    fn test_decode_stops_on_invalid_utf8() {
        assert_eq!(decode_url("https://a.test/%FF"), "https://a.test/%FF");
        assert!(decode_uri_component("%FF").is_none());
        assert_eq!(decode_uri_component("a+b").as_deref(), Some("a+b"));
    }

    #[test]
    fn test_query_helpers() {
        let url = Url::parse("https://example.com/p?id=1&q=a+b&flag#frag").unwrap();
        let fields = parse_query(&url);

        assert_eq!(url_without_params_and_hash(&url), "https://example.com/p");
        assert_eq!(serialize_query(&fields), "id=1&q=a%20b&flag");
        assert_eq!(serialize_query_form(&fields), "id=1&q=a+b&flag=");
    }
}
