//! Path extraction: turns a URL or path token into the canonical path used
//! as a rewrite-map key or value.
//!
//! Tokens in redirect lists are frequently half-encoded or otherwise not
//! valid URIs, so parsing is done by a small permissive splitter instead of
//! a full URI parser. Nothing here fails; odd characters pass through.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use std::sync::LazyLock;

pub(crate) static RE_SCHEME_AUTHORITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^/?#]*").unwrap());

/// Characters escaped in re-encoded query values. Reserved URI characters
/// stay literal except the ones that would change how the query re-parses.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A token split into its URI components. Borrowed from the input; nothing
/// is decoded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriParts<'a> {
    /// Token carried a `scheme://authority` prefix, now stripped.
    pub absolute: bool,
    pub path: &'a str,
    /// Text after the first `?`, without the `?`.
    pub query: Option<&'a str>,
    /// Text after the first `#`, without the `#`.
    pub fragment: Option<&'a str>,
}

impl<'a> UriParts<'a> {
    pub fn parse(token: &'a str) -> UriParts<'a> {
        let (absolute, rest) = match RE_SCHEME_AUTHORITY.find(token) {
            Some(m) => (true, &token[m.end()..]),
            None => (false, token),
        };

        let (rest, fragment) = match rest.split_once('#') {
            Some((before, frag)) => (before, Some(frag)),
            None => (rest, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((before, q)) => (before, Some(q)),
            None => (rest, None),
        };

        // `http://host` and `http://host?x` address the root
        let path = if absolute && path.is_empty() { "/" } else { path };

        UriParts {
            absolute,
            path,
            query,
            fragment,
        }
    }
}

/// Canonicalizes a URL or path token.
///
/// - scheme and host are stripped from absolute URLs
/// - a trailing `/` is added unless the token has a query or fragment
/// - the path is percent-decoded, one level only
///
/// With `encode_query` the query string is kept and each value re-escaped;
/// without it the query (and anything after it) is dropped and the path
/// before the `?` is returned as-is, without a trailing slash.
///
/// Output is stable under a second pass except where decoding produced a
/// new `%xx` sequence: `/a%2541/` gives `/a%41/`, which decodes again.
pub fn extract_path(token: &str, encode_query: bool) -> String {
    let parts = UriParts::parse(token);

    match parts.query {
        Some(query) if encode_query => {
            let mut out = decode_path(parts.path);
            out.push('?');
            out.push_str(&encode_query_string(query));
            push_fragment(&mut out, parts.fragment);
            out
        }
        Some(_) if parts.path.is_empty() => "/".to_string(),
        Some(_) => decode_path(parts.path),
        None => match parts.fragment {
            Some(_) => {
                let mut out = decode_path(parts.path);
                push_fragment(&mut out, parts.fragment);
                out
            }
            None => with_trailing_slash(decode_path(parts.path)),
        },
    }
}

fn with_trailing_slash(mut path: String) -> String {
    if !path.ends_with('/') {
        path.push('/');
    }
    path
}

fn push_fragment(out: &mut String, fragment: Option<&str>) {
    if let Some(frag) = fragment {
        out.push('#');
        out.push_str(&decode_path(frag));
    }
}

fn decode_path(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Form-style decoding used for query keys and values: `+` is a space.
fn decode_form(s: &str) -> String {
    decode_path(&s.replace('+', " "))
}

/// Re-serializes a raw query string as `key=escaped(value)` pairs joined by
/// `&`. Pair order and repeated keys are kept as-is; a pair without `=` is
/// written back as its bare decoded key.
pub fn encode_query_string(query: &str) -> String {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => format!(
                "{}={}",
                decode_form(key),
                utf8_percent_encode(&decode_form(value), QUERY_VALUE)
            ),
            None => decode_form(pair),
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relative() {
        let parts = UriParts::parse("/a/b?x=1#top");
        assert!(!parts.absolute);
        assert_eq!(parts.path, "/a/b");
        assert_eq!(parts.query, Some("x=1"));
        assert_eq!(parts.fragment, Some("top"));
    }

    #[test]
    fn test_parse_absolute() {
        let parts = UriParts::parse("https://www.example.com:8080/Foo/Bar?q");
        assert!(parts.absolute);
        assert_eq!(parts.path, "/Foo/Bar");
        assert_eq!(parts.query, Some("q"));
        assert_eq!(parts.fragment, None);
    }

    #[test]
    fn test_parse_bare_host() {
        let parts = UriParts::parse("http://example.com");
        assert!(parts.absolute);
        assert_eq!(parts.path, "/");
    }

    #[test]
    fn test_parse_malformed_is_permissive() {
        let parts = UriParts::parse("/50%_off/{promo}|x");
        assert!(!parts.absolute);
        assert_eq!(parts.path, "/50%_off/{promo}|x");
    }

    #[test]
    fn test_trailing_slash_added() {
        assert_eq!(extract_path("/old", false), "/old/");
        assert_eq!(extract_path("/new", true), "/new/");
        assert_eq!(extract_path("/already/", false), "/already/");
    }

    #[test]
    fn test_host_stripped() {
        assert_eq!(extract_path("http://example.com/Foo", false), "/Foo/");
        assert_eq!(extract_path("https://example.com", true), "/");
    }

    #[test]
    fn test_query_reencoded() {
        assert_eq!(extract_path("/Bar?x=1 y", true), "/Bar?x=1%20y");
        assert_eq!(
            extract_path("/search?q=a+b&page=2&q=c", true),
            "/search?q=a%20b&page=2&q=c"
        );
    }

    #[test]
    fn test_query_value_decoded_then_escaped() {
        assert_eq!(extract_path("/p?name=caf%C3%A9", true), "/p?name=caf%C3%A9");
        assert_eq!(extract_path("/p?path=/a/b", true), "/p?path=/a/b");
        assert_eq!(extract_path("/p?x=%26%23", true), "/p?x=%26%23");
        assert_eq!(extract_path("/p?x=%26%23%2B", true), "/p?x=%26%23%2B");
        assert_eq!(extract_path("/p?x=a+b", true), "/p?x=a%20b");
    }

    #[test]
    fn test_query_key_without_value() {
        assert_eq!(extract_path("/p?print&x=1", true), "/p?print&x=1");
    }

    #[test]
    fn test_query_dropped_for_source() {
        assert_eq!(extract_path("/old.aspx?id=4", false), "/old.aspx");
        assert_eq!(extract_path("/old/?id=4#x", false), "/old/");
        assert_eq!(extract_path("http://example.com?id=4", false), "/");
    }

    #[test]
    fn test_fragment_gets_no_slash() {
        assert_eq!(extract_path("/page#section", false), "/page#section");
        assert_eq!(extract_path("/page#section", true), "/page#section");
    }

    #[test]
    fn test_path_percent_decoded() {
        assert_eq!(extract_path("/caf%C3%A9/menu", false), "/café/menu/");
        assert_eq!(extract_path("/a%20b?x=1", true), "/a b?x=1");
    }

    #[test]
    fn test_decodes_one_level() {
        let once = extract_path("/a%2541/", false);
        assert_eq!(once, "/a%41/");
        assert_eq!(extract_path(&once, false), "/aA/");
    }

    #[test]
    fn test_idempotent_on_canonical_paths() {
        for token in ["/a/b/", "/Bar?x=1%20y", "/page#top", "/p?x=%26%23&y=2"] {
            let once = extract_path(token, true);
            assert_eq!(extract_path(&once, true), once, "token {}", token);
        }
        for token in ["/Foo/", "/deep/path/here/"] {
            let once = extract_path(token, false);
            assert_eq!(extract_path(&once, false), once, "token {}", token);
        }
    }
}
