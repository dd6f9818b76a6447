use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{AuthorInfo, ConvertError, ConvertOutput, DownloadLink, FailureKind, MediaFormat};

// Field names mirror the service's payload; every field is optional and a
// field with an unexpected type reads as empty instead of failing the parse.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireResponse {
    #[serde(deserialize_with = "lenient_string")]
    status: String,
    data: Option<WireData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireData {
    #[serde(deserialize_with = "lenient_string")]
    status: String,
    #[serde(deserialize_with = "lenient_string")]
    mess: String,
    #[serde(deserialize_with = "lenient_string")]
    cover: String,
    #[serde(deserialize_with = "lenient_string")]
    desc: String,
    #[serde(deserialize_with = "lenient_string")]
    author: String,
    #[serde(deserialize_with = "lenient_string")]
    author_name: String,
    #[serde(deserialize_with = "lenient_string")]
    author_a: String,
    #[serde(deserialize_with = "lenient_links")]
    links: Vec<WireLink>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireLink {
    #[serde(deserialize_with = "lenient_string")]
    t: String,
    #[serde(deserialize_with = "lenient_format")]
    ft: FormatField,
    #[serde(deserialize_with = "lenient_string")]
    s: String,
    #[serde(deserialize_with = "lenient_string")]
    a: String,
}

/// Format code as sent, remembering whether it arrived as a JSON string.
#[derive(Debug, Default)]
struct FormatField {
    code: String,
    quoted: bool,
}

impl FormatField {
    fn media_format(&self) -> MediaFormat {
        if self.quoted {
            MediaFormat::from_code(&self.code)
        } else {
            MediaFormat::Video
        }
    }
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_format<'de, D>(deserializer: D) -> Result<FormatField, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(code) => FormatField { code, quoted: true },
        other => FormatField {
            code: scalar_text(other),
            quoted: false,
        },
    })
}

fn lenient_links<'de, D>(deserializer: D) -> Result<Vec<WireLink>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    // Keep one entry per array element so the link count matches the payload.
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}

fn is_error_status(status: &str) -> bool {
    status.trim().eq_ignore_ascii_case("error")
}

/// Parses a success-class response body into a [`ConvertOutput`].
///
/// Fails with `MalformedBody` when the body is not a JSON object or carries
/// no `data` object, and with `Rejected` when the service marks the response
/// (or its `data`) with status `"error"`.
pub fn parse_response(body: &[u8]) -> Result<ConvertOutput, ConvertError> {
    let response: WireResponse = serde_json::from_slice(body)
        .map_err(|err| ConvertError::new(FailureKind::MalformedBody, err.to_string()))?;

    let data_rejected = response
        .data
        .as_ref()
        .is_some_and(|data| is_error_status(&data.status));
    if is_error_status(&response.status) || data_rejected {
        let message = response
            .data
            .map(|data| data.mess)
            .unwrap_or_default();
        return Err(ConvertError::new(
            FailureKind::Rejected {
                message: message.clone(),
            },
            message,
        ));
    }

    let data = response
        .data
        .ok_or_else(|| ConvertError::new(FailureKind::MalformedBody, "response has no data"))?;

    Ok(ConvertOutput {
        author: AuthorInfo {
            name: data.author_name,
            handle: data.author,
            avatar_url: data.author_a,
        },
        description: data.desc,
        cover_url: data.cover,
        links: data
            .links
            .into_iter()
            .map(|link| DownloadLink {
                format: link.ft.media_format(),
                type_tag: link.t,
                format_code: link.ft.code,
                quality: link.s,
                url: link.a,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_terse_fields_to_descriptive_ones() {
        let body = br#"{
            "status": "success",
            "data": {
                "status": "success",
                "mess": "",
                "cover": "https://cdn.example.com/cover.jpg",
                "desc": "dance #fyp",
                "author": "dancer42",
                "author_name": "The Dancer",
                "author_a": "https://cdn.example.com/avatar.jpg",
                "links": [
                    { "t": "nwm", "ft": "1", "s": "HD", "a": "https://dl.example.com/hd.mp4" },
                    { "t": "mp3", "ft": "3", "s": "", "a": "https://dl.example.com/a.mp3" }
                ]
            }
        }"#;

        let output = parse_response(body).expect("parse ok");
        assert_eq!(output.author.name, "The Dancer");
        assert_eq!(output.author.handle, "dancer42");
        assert_eq!(output.author.avatar_url, "https://cdn.example.com/avatar.jpg");
        assert_eq!(output.description, "dance #fyp");
        assert_eq!(output.cover_url, "https://cdn.example.com/cover.jpg");
        assert_eq!(output.links.len(), 2);
        assert_eq!(output.links[0].type_tag, "nwm");
        assert_eq!(output.links[0].format, MediaFormat::Video);
        assert_eq!(output.links[0].quality, "HD");
        assert_eq!(output.links[0].url, "https://dl.example.com/hd.mp4");
        assert_eq!(output.links[1].format, MediaFormat::Audio);
    }

    #[test]
    fn only_the_exact_string_three_is_audio() {
        let body = br#"{"data": {"links": [
            {"ft": 3, "s": "HD"},
            {"ft": " 3", "s": "SD"},
            {"ft": "3"},
            {"ft": "30"},
            {"ft": 1}
        ]}}"#;
        let output = parse_response(body).expect("parse ok");
        let formats: Vec<_> = output.links.iter().map(|link| link.format).collect();
        assert_eq!(
            formats,
            vec![
                MediaFormat::Video,
                MediaFormat::Video,
                MediaFormat::Audio,
                MediaFormat::Video,
                MediaFormat::Video,
            ]
        );
        // Numeric codes keep their text for display.
        assert_eq!(output.links[0].format_code, "3");
        assert_eq!(output.links[0].quality, "HD");
    }

    #[test]
    fn missing_and_mistyped_fields_read_as_empty() {
        let body = br#"{"data": {"author_name": null, "desc": ["x"], "links": [{"a": 7}, "junk"]}}"#;
        let output = parse_response(body).expect("parse ok");
        assert_eq!(output.author, AuthorInfo::default());
        assert!(output.description.is_empty());
        assert_eq!(output.links.len(), 2);
        assert_eq!(output.links[0].url, "7");
        assert!(output.links[1].url.is_empty());
        assert_eq!(output.links[1].format, MediaFormat::Video);
    }

    #[test]
    fn links_that_are_not_an_array_yield_no_links() {
        let output = parse_response(br#"{"data": {"links": "none"}}"#).expect("parse ok");
        assert!(output.links.is_empty());
    }

    #[test]
    fn nested_error_status_is_a_rejection() {
        let body = br#"{"status": "success", "data": {"status": "error", "mess": "Video not found"}}"#;
        let err = parse_response(body).unwrap_err();
        assert_eq!(
            err.kind,
            FailureKind::Rejected {
                message: "Video not found".to_string()
            }
        );
    }

    #[test]
    fn top_level_error_status_without_data_is_a_rejection() {
        let err = parse_response(br#"{"status": "ERROR"}"#).unwrap_err();
        assert_eq!(
            err.kind,
            FailureKind::Rejected {
                message: String::new()
            }
        );
    }

    #[test]
    fn body_without_data_is_malformed() {
        let err = parse_response(br#"{"status": "success"}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedBody);
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = parse_response(b"<html>oops</html>").unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedBody);
        let err = parse_response(b"[1, 2]").unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedBody);
    }
}
