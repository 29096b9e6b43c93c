//! Request-target assembly.
//!
//! Endpoints are built as plain strings from a base URL plus path
//! segments and query-string name/value pairs. The base is an opaque
//! prefix: nothing here parses scheme, host, or an existing query.

use serde::Serialize;
use urlencoding::encode;

use crate::error::RestError;

/// Append path segments to a base URL.
///
/// The base and every segment are trimmed of surrounding whitespace and
/// then of surrounding `/`. Segments that are blank after trimming are
/// skipped entirely. Each kept segment is percent-encoded as one opaque
/// token, so an embedded `/` becomes `%2F` rather than a new path part.
/// The result always carries a single trailing `/`.
///
/// Segments can come from any iterable: a slice, an array, a `Vec`, or
/// an iterator. Order is preserved.
///
/// ```
/// # use rest_sdk::append;
/// let url = append("http://service.com/", ["channels", "general messages"]).unwrap();
/// assert_eq!(url, "http://service.com/channels/general%20messages/");
/// ```
pub fn append<I, S>(base: &str, segments: I) -> Result<String, RestError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut url = trimmed_base(base)?.to_string();

    for segment in segments {
        let segment = segment.as_ref().trim().trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(&encode(segment));
    }

    url.push('/');
    Ok(url)
}

/// Append a query string built from a flat list of name/value entries.
///
/// Entries alternate name, value, name, value, … and the list must hold
/// an even number of them. `None` entries stand for values the caller
/// never had (see [`param`]):
///
/// * a pair whose name is `None` or blank is dropped, whatever its value;
/// * a pair whose value is `None` is dropped;
/// * a pair whose value is empty (or blank, after trimming) is kept as
///   `name=`.
///
/// Kept names and values are trimmed and percent-encoded independently
/// (RFC 3986, space as `%20`), joined with `&` in input order, and
/// appended to the slash-trimmed base after a `?`.
///
/// Two degenerate shapes are deliberate:
///
/// * an empty list behaves exactly like [`append`] with no segments,
///   yielding `base/`;
/// * a non-empty list whose pairs are all dropped yields the trimmed base
///   with any dangling `?`/`&` stripped, and no trailing `/`.
///
/// ```
/// # use rest_sdk::append_query;
/// let url = append_query("http://service.com", [Some("a"), Some("1"), Some("b"), Some("2")]).unwrap();
/// assert_eq!(url, "http://service.com?a=1&b=2");
/// ```
pub fn append_query<I, S>(base: &str, pairs: I) -> Result<String, RestError>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let pairs: Vec<Option<S>> = pairs.into_iter().collect();

    if pairs.is_empty() {
        return append(base, std::iter::empty::<&str>());
    }
    if pairs.len() % 2 != 0 {
        return Err(RestError::invalid_argument(
            "pairs",
            "must be an even-numbered collection of strings representing name/value pairs",
        ));
    }

    let base = trimmed_base(base)?;
    let mut kept = Vec::new();

    for pair in pairs.chunks_exact(2) {
        let name = match &pair[0] {
            Some(name) => name.as_ref().trim(),
            None => continue,
        };
        if name.is_empty() {
            continue;
        }
        let value = match &pair[1] {
            Some(value) => value.as_ref().trim(),
            None => continue,
        };
        kept.push(format!("{}={}", encode(name), encode(value)));
    }

    if kept.is_empty() {
        let stripped =
            base.trim_end_matches(|c: char| c == '?' || c == '&' || c.is_whitespace());
        return Ok(stripped.to_string());
    }

    Ok(format!("{}?{}", base, kept.join("&")))
}

/// Append a typed options struct as a query string.
///
/// Serializes `options` with `serde_urlencoded`, i.e. the form-encoding
/// convention (space as `+`, `Option` fields skipped when `None`). Use
/// [`append_query`] for strict percent-encoding. An options struct that
/// serializes to nothing degrades to the no-query shape, `base/`.
pub fn append_query_serialized<T: Serialize>(base: &str, options: &T) -> Result<String, RestError> {
    let base = trimmed_base(base)?;
    let query = serde_urlencoded::to_string(options)?;

    if query.is_empty() {
        return Ok(format!("{base}/"));
    }
    Ok(format!("{base}?{query}"))
}

/// Convert an optional value into query-value text.
///
/// `None` passes through, so the pair it feeds is dropped by
/// [`append_query`]'s missing-value rule. Booleans render as the
/// lowercase `true`/`false` a query string expects.
pub fn param<T: ToString>(value: Option<T>) -> Option<String> {
    value.map(|value| value.to_string())
}

/// Trimmed base, or the usage error shared by every builder.
fn trimmed_base(base: &str) -> Result<&str, RestError> {
    let trimmed = base.trim();
    if trimmed.is_empty() {
        return Err(RestError::invalid_argument(
            "base",
            "value cannot be empty or whitespace",
        ));
    }
    Ok(trimmed.trim_matches('/'))
}
