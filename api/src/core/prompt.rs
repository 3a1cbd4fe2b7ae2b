//! Prompt assembly: instruction blocks plus ordered content parts.
//!
//! The model sees the instruction block first (as the system instruction),
//! then the reference document, then the target cat's image when one
//! matched, and the raw user question last.

use ai_llm_service::Part;

/// Instruction block for the buffered JSON contract.
///
/// Keep this short: it consistently improves steering without wasting
/// tokens.
const ANSWER_CONTRACT: &str = r#"
You are the concierge of a small cat café. Answer questions about the cats
using only the attached reference material and images.
Respond with exactly one JSON object and nothing else, shaped as
{"displayText": "...", "speechText": "..."}.
- displayText: the answer as normal written text.
- speechText: the same answer as a kana-only reading (hiragana or katakana).
  The only punctuation allowed is "。", "、" and the quote pair 「」.
"#;

/// Instruction block for the streamed plain-text contract.
const STREAM_CONTRACT: &str = r#"
You are the concierge of a small cat café. Answer questions about the cats
using only the attached reference material and images.
Answer in plain text, no markup, no JSON.
"#;

fn with_role_play(contract: &str, target: Option<&str>) -> String {
    match target {
        Some(name) => format!(
            "{contract}\nThe question is about the cat named \"{name}\"; answer in first person, as that cat would."
        ),
        None => contract.to_string(),
    }
}

/// System instructions for `POST /ask`, with role-play framing when a
/// target cat matched.
pub fn answer_system(target: Option<&str>) -> String {
    with_role_play(ANSWER_CONTRACT, target)
}

/// System instructions for `POST /ask/stream`.
pub fn stream_system(target: Option<&str>) -> String {
    with_role_play(STREAM_CONTRACT, target)
}

/// Ordered user parts: reference document, optional image, question last.
pub fn build_parts(reference: Part, image: Option<Part>, question: &str) -> Vec<Part> {
    let mut parts = Vec::with_capacity(3);
    parts.push(reference);
    if let Some(image) = image {
        parts.push(image);
    }
    parts.push(Part::Text {
        text: question.to_string(),
    });
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_llm_service::InlineData;

    fn text(s: &str) -> Part {
        Part::Text { text: s.into() }
    }

    fn image() -> Part {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/jpeg".into(),
                data: "Zm9v".into(),
            },
        }
    }

    #[test]
    fn question_is_always_the_last_part() {
        let parts = build_parts(text("facts"), Some(image()), "who is tama?");
        assert_eq!(parts.len(), 3);
        match parts.last().unwrap() {
            Part::Text { text } => assert_eq!(text, "who is tama?"),
            other => panic!("expected text part, got {other:?}"),
        }
    }

    #[test]
    fn image_is_omitted_when_no_target() {
        let parts = build_parts(text("facts"), None, "hello");
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn role_play_line_names_the_target() {
        let system = answer_system(Some("tama"));
        assert!(system.contains("\"tama\""));
        assert!(answer_system(None).ends_with('\n'));
    }
}
