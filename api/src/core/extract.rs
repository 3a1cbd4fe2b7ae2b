//! Best-effort extraction of an embedded JSON object from free-form model
//! text.
//!
//! Even with structured output requested, the model is only *asked* to emit
//! JSON. This module locates the first balanced `{...}` span (aware of
//! strings and escapes) and verifies it parses. The two failure modes share
//! one external error class but stay distinguishable in logs.

use thiserror::Error;

/// Why no usable JSON object came out of the model text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The text contains no balanced `{...}` span at all.
    #[error("no JSON object found in model output")]
    NoObject,

    /// A span was found but is not valid JSON.
    #[error("embedded JSON failed to parse: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Returns the first balanced `{...}` span of `text`, verified to parse as
/// JSON. The caller relays this exact substring, not a re-serialization.
///
/// # Errors
/// [`ExtractError::NoObject`] when no balanced span exists,
/// [`ExtractError::Invalid`] when the span is not valid JSON.
pub fn extract_json_object(text: &str) -> Result<&str, ExtractError> {
    let span = first_object_span(text).ok_or(ExtractError::NoObject)?;
    serde_json::from_str::<serde_json::Value>(span)?;
    Ok(span)
}

/// Scans for the first `{` and walks to its matching `}`, skipping braces
/// inside string literals. Returns `None` when the braces never balance.
fn first_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_with_leading_prose() {
        let text = r#"Sure! {"displayText":"x","speechText":"x"} hope that helps"#;
        let span = extract_json_object(text).unwrap();
        assert_eq!(span, r#"{"displayText":"x","speechText":"x"}"#);
    }

    #[test]
    fn extracts_nested_objects_whole() {
        let text = r#"{"a":{"b":1},"c":2}"#;
        assert_eq!(extract_json_object(text).unwrap(), text);
    }

    #[test]
    fn braces_inside_strings_do_not_close_the_span() {
        let text = r#"{"displayText":"use } carefully","speechText":"ok"}"#;
        assert_eq!(extract_json_object(text).unwrap(), text);
    }

    #[test]
    fn no_object_at_all() {
        assert!(matches!(
            extract_json_object("the cat is asleep"),
            Err(ExtractError::NoObject)
        ));
    }

    #[test]
    fn unbalanced_braces_count_as_no_object() {
        assert!(matches!(
            extract_json_object(r#"{"displayText":"x""#),
            Err(ExtractError::NoObject)
        ));
    }

    #[test]
    fn balanced_but_invalid_json_is_distinguished() {
        assert!(matches!(
            extract_json_object("{displayText: x}"),
            Err(ExtractError::Invalid(_))
        ));
    }
}
