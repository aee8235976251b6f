//! Query-parameter codec for share links.
//!
//! The note travels in the `t` query parameter. Its value is the note text
//! percent-encoded once by [`encode`] and then form-urlencoded again when it
//! is placed in the query string, which keeps links interchangeable with the
//! ones the page has always produced (`?t=hello` for plain words).

use std::borrow::Cow;

use url::form_urlencoded;
use url::Url;

use crate::error::{NoteError, Result};

pub const QUERY_PARAM_KEY: &str = "t";

/// What an address says about shared text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareParam {
    Absent,
    /// The key is present but the URL or its value cannot be decoded.
    Malformed,
    Text(String),
}

impl ShareParam {
    pub fn is_present(&self) -> bool {
        !matches!(self, ShareParam::Absent)
    }
}

pub fn encode(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

/// Strict percent-decoding: every `%` must start a two-digit hex escape and
/// the decoded bytes must be UTF-8.
pub fn decode(param: &str) -> Result<String> {
    if let Some(stray) = param
        .split('%')
        .skip(1)
        .find(|chunk| !starts_with_hex_pair(chunk))
    {
        return Err(NoteError::Decode(format!(
            "invalid percent escape before {:?}",
            stray.chars().take(2).collect::<String>()
        )));
    }

    urlencoding::decode(param)
        .map(Cow::into_owned)
        .map_err(|e| NoteError::Decode(e.to_string()))
}

fn starts_with_hex_pair(chunk: &str) -> bool {
    chunk
        .as_bytes()
        .get(..2)
        .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit))
}

/// Returns `base` with the share parameter set to `text`, or removed when
/// `text` is empty. Other query pairs keep their order and raw form.
pub fn build_url(base: &str, text: &str) -> Result<String> {
    let mut url = Url::parse(base).map_err(|e| NoteError::InvalidUrl(e.to_string()))?;

    let mut replacement = (!text.is_empty()).then(|| share_pair(text));
    let mut pairs: Vec<String> = Vec::new();
    let mut seen_key = false;

    for segment in url.query().unwrap_or_default().split('&') {
        if segment.is_empty() {
            continue;
        }
        if segment_key(segment) == QUERY_PARAM_KEY {
            // First occurrence is replaced in place, later ones are dropped.
            if !seen_key {
                seen_key = true;
                if let Some(pair) = replacement.take() {
                    pairs.push(pair);
                }
            }
            continue;
        }
        pairs.push(segment.to_string());
    }

    if let Some(pair) = replacement {
        pairs.push(pair);
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&pairs.join("&")));
    }

    Ok(url.into())
}

/// Convenience for [`build_url`] with empty text.
pub fn strip_share_param(base: &str) -> Result<String> {
    build_url(base, "")
}

pub fn read_share_param(url: &str) -> ShareParam {
    let Ok(url) = Url::parse(url) else {
        return ShareParam::Absent;
    };

    // Raw segments, not `query_pairs`, which would decode invalid UTF-8 lossily.
    let Some(raw) = url
        .query()
        .unwrap_or_default()
        .split('&')
        .find(|segment| !segment.is_empty() && segment_key(segment) == QUERY_PARAM_KEY)
        .map(|segment| segment.split_once('=').map_or("", |(_, value)| value))
    else {
        return ShareParam::Absent;
    };

    // Query layer first (`+` is a space there), then the component layer.
    match decode(&raw.replace('+', " ")).and_then(|value| decode(&value)) {
        Ok(text) => ShareParam::Text(text),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed share parameter");
            ShareParam::Malformed
        }
    }
}

/// Decoded shared text, or `None` for absent and malformed parameters.
pub fn shared_text(url: &str) -> Option<String> {
    match read_share_param(url) {
        ShareParam::Text(text) => Some(text),
        ShareParam::Absent | ShareParam::Malformed => None,
    }
}

fn share_pair(text: &str) -> String {
    let value: String = form_urlencoded::byte_serialize(encode(text).as_bytes()).collect();
    format!("{QUERY_PARAM_KEY}={value}")
}

fn segment_key(segment: &str) -> Cow<'_, str> {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(key, _)| key)
        .unwrap_or(Cow::Borrowed(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_text() {
        for sample in [
            "hello",
            "hello world",
            "a+b=c&d",
            "100% sure?",
            "line one\nline two\r\n\ttabbed",
            "emoji 🦀 and ünïcödé",
            "#fragment-looking ?query=looking",
        ] {
            assert_eq!(decode(&encode(sample)).unwrap(), sample);
        }
    }

    #[test]
    fn decode_accepts_encode_uri_component_output() {
        // encodeURIComponent leaves !'()* unescaped
        assert_eq!(decode("it's%20(fine)!").unwrap(), "it's (fine)!");
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let err = decode("%FF%FE").expect_err("must fail");
        assert!(matches!(err, NoteError::Decode(_)));
    }

    #[test]
    fn decode_rejects_broken_escapes() {
        for param in ["100%", "%zz", "%E0%A4%A", "50%-off"] {
            let err = decode(param).expect_err(param);
            assert!(matches!(err, NoteError::Decode(_)), "{param}");
        }
    }

    #[test]
    fn build_url_sets_plain_word() {
        let url = build_url("https://notes.example/", "hello").unwrap();
        assert_eq!(url, "https://notes.example/?t=hello");
    }

    #[test]
    fn build_url_with_empty_text_removes_key() {
        let url = build_url("https://notes.example/page?t=old&lang=en#top", "").unwrap();
        assert_eq!(url, "https://notes.example/page?lang=en#top");

        let url = build_url("https://notes.example/?t=old", "").unwrap();
        assert_eq!(url, "https://notes.example/");
        assert!(!url.contains("t="));
    }

    #[test]
    fn build_url_preserves_other_parts() {
        let url = build_url("https://notes.example/a/b?x=1&t=old&y=%20z#frag", "new").unwrap();
        assert_eq!(url, "https://notes.example/a/b?x=1&t=new&y=%20z#frag");
    }

    #[test]
    fn build_url_collapses_duplicate_keys() {
        let url = build_url("https://notes.example/?t=a&k=v&t=b", "c").unwrap();
        assert_eq!(url, "https://notes.example/?t=c&k=v");
    }

    #[test]
    fn build_url_rejects_relative_base() {
        let err = build_url("/just/a/path", "x").expect_err("must fail");
        assert!(matches!(err, NoteError::InvalidUrl(_)));
    }

    #[test]
    fn share_link_round_trips_through_query() {
        let text = "50% off & free shipping?\nyes";
        let url = build_url("https://notes.example/?ref=mail", text).unwrap();
        assert_eq!(shared_text(&url).as_deref(), Some(text));
        assert!(url.starts_with("https://notes.example/?ref=mail&t="));
    }

    #[test]
    fn reads_links_from_single_encoding() {
        assert_eq!(
            shared_text("https://notes.example/?t=hello%20world").as_deref(),
            Some("hello world")
        );
    }

    #[test]
    fn read_share_param_classifies_inputs() {
        assert_eq!(read_share_param("https://notes.example/"), ShareParam::Absent);
        assert_eq!(read_share_param("not a url"), ShareParam::Absent);
        assert_eq!(
            read_share_param("https://notes.example/?t=%25FF"),
            ShareParam::Malformed
        );
        assert_eq!(
            read_share_param("https://notes.example/?t="),
            ShareParam::Text(String::new())
        );
        assert_eq!(
            read_share_param("https://notes.example/?t=hello+world&lang=en"),
            ShareParam::Text("hello world".to_string())
        );
    }

    #[test]
    fn undecodable_values_are_malformed() {
        for query in ["t=%FF", "t=%zz", "t=100%", "t=%E0%A4%A", "x=1&t=%C3%28"] {
            let url = format!("https://notes.example/?{query}");
            assert_eq!(read_share_param(&url), ShareParam::Malformed, "{query}");
            assert_eq!(shared_text(&url), None, "{query}");
        }
    }

    #[test]
    fn first_share_key_wins() {
        assert_eq!(
            read_share_param("https://notes.example/?t=one&t=%FF"),
            ShareParam::Text("one".to_string())
        );
    }
}
