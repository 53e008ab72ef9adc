//! Request target parsing
//!
//! Splits a request URI into its path and decoded query parameters.

use hyper::Uri;

use crate::routing::Request;

/// Parse a hyper request URI into a router [`Request`]
pub fn parse_request_target(uri: &Uri) -> Request {
    let path = match uri.path() {
        "" => "/",
        p => p,
    };
    parse_parts(path, uri.query())
}

/// Build a [`Request`] from a raw path and optional raw query string
///
/// Pairs are split on `&` and `=`, then `%XX` escapes are decoded. A literal
/// `+` stays a `+`, so `eval=1+1` reaches the executor as `1+1`. A key with
/// no `=` gets an empty value. When a key repeats, the first value is kept.
pub fn parse_parts(path: &str, query: Option<&str>) -> Request {
    let mut request = Request::new(path);
    let Some(query) = query else {
        return request;
    };

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        request = request.with_param(decode(key), decode(value));
    }
    request
}

/// Percent-decode, replacing invalid UTF-8 with U+FFFD
fn decode(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(target: &str) -> Request {
        parse_request_target(&target.parse::<Uri>().unwrap())
    }

    #[test]
    fn test_path_only() {
        let req = parse("/cmd");
        assert_eq!(req.path, "/cmd");
        assert!(req.query.is_empty());
    }

    #[test]
    fn test_query_is_percent_decoded() {
        let req = parse("/cmd?eval=1%2B1&note=a%20b");
        assert_eq!(req.path, "/cmd");
        assert_eq!(req.param("eval"), Some("1+1"));
        assert_eq!(req.param("note"), Some("a b"));
    }

    #[test]
    fn test_plus_is_kept_literally() {
        let req = parse("/cmd?eval=1+1");
        assert_eq!(req.param("eval"), Some("1+1"));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let req = parse("/cmd?eval=a=b");
        assert_eq!(req.param("eval"), Some("a=b"));
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let req = parse("/cmd?eval=1&eval=2");
        assert_eq!(req.param("eval"), Some("1"));
        assert_eq!(req.query.len(), 1);
    }

    #[test]
    fn test_empty_and_valueless_params() {
        let req = parse("/cmd?&eval&x=");
        assert_eq!(req.param("eval"), Some(""));
        assert_eq!(req.param("x"), Some(""));
        assert_eq!(req.query.len(), 2);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let req = parse_parts("/cmd", Some("eval=%FF1"));
        assert_eq!(req.param("eval"), Some("\u{FFFD}1"));
    }

    #[test]
    fn test_absolute_form_uri() {
        let req = parse("http://device.local/?eval=2");
        assert_eq!(req.path, "/");
        assert_eq!(req.param("eval"), Some("2"));
    }

    #[test]
    fn test_parse_parts_without_query() {
        assert_eq!(parse_parts("/foo", None), Request::new("/foo"));
    }
}
