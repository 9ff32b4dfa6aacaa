//! URL helpers for the request layer: path/query split, path segment decoding,
//! and the list route's integer query parameters.

use percent_encoding::percent_decode_str;
use serde::Deserialize;

/// Split a request target into (path, query). The query excludes the `?`.
pub fn split_url(url: &str) -> (&str, &str) {
    let url = url.split('#').next().unwrap_or(url);
    match url.split_once('?') {
        Some((path, query)) => (path, query),
        None => (url, ""),
    }
}

/// Decode `%XX` escapes in one path segment. `+` stays literal; invalid UTF-8 is
/// replaced lossily.
pub fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// Query parameters of the list route, kept as raw strings so a bad integer can
/// be reported with the parameter's name.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    pub fn parse(query: &str) -> Result<Self, String> {
        serde_urlencoded::from_str(query).map_err(|e| format!("Invalid query string: {}", e))
    }

    pub fn page_or(&self, default: i64) -> Result<i64, String> {
        int_param("page", self.page.as_deref(), default)
    }

    pub fn limit_or(&self, default: i64) -> Result<i64, String> {
        int_param("limit", self.limit.as_deref(), default)
    }
}

/// Absent -> `default`. Present but unparseable -> message for a 400 body.
fn int_param(name: &str, raw: Option<&str>, default: i64) -> Result<i64, String> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("Invalid '{}' value '{}': must be an integer", name, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_with_and_without_query() {
        assert_eq!(split_url("/api/players?page=2"), ("/api/players", "page=2"));
        assert_eq!(split_url("/health"), ("/health", ""));
        assert_eq!(split_url("/a?b=1#frag"), ("/a", "b=1"));
    }

    #[test]
    fn segment_escapes() {
        assert_eq!(decode_segment("abc%20def"), "abc def");
        assert_eq!(decode_segment("a+b"), "a+b");
        assert_eq!(decode_segment("caf%C3%A9"), "café");
        assert_eq!(decode_segment("100%"), "100%");
        assert_eq!(decode_segment("%zz1"), "%zz1");
    }

    #[test]
    fn list_params_and_defaults() {
        let q = ListParams::parse("page=3&x&limit=").unwrap();
        assert_eq!(q.page_or(1), Ok(3));
        assert!(q.limit_or(100).is_err());

        let q = ListParams::parse("").unwrap();
        assert_eq!(q.page_or(1), Ok(1));
        assert_eq!(q.limit_or(100), Ok(100));

        let q = ListParams::parse("limit=%2B7&page=+2").unwrap();
        assert_eq!(q.limit_or(100), Ok(7));
        assert_eq!(q.page_or(1), Ok(2));
    }

    #[test]
    fn negative_and_garbage_ints() {
        let q = ListParams::parse("page=-1&limit=ten").unwrap();
        assert_eq!(q.page_or(1), Ok(-1));
        let err = q.limit_or(100).unwrap_err();
        assert!(err.contains("limit"), "{err}");
    }
}
