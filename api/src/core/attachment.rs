//! Inline file parts for the model prompt.
//!
//! Cat images and PDF fact sheets travel to the model as base64 inline data
//! with a MIME type derived from the file extension. Plain-text reference
//! documents become an ordinary text part instead. Files are read from disk
//! on every request; the filesystem is the only cache.

use std::io;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use ai_llm_service::{InlineData, Part};

/// MIME type for an attachment, by file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Reads a file and wraps it as a base64 inline part.
pub async fn load_inline_part(path: &Path) -> io::Result<Part> {
    let bytes = tokio::fs::read(path).await?;
    Ok(Part::InlineData {
        inline_data: InlineData {
            mime_type: mime_for_path(path).to_string(),
            data: BASE64.encode(bytes),
        },
    })
}

/// Loads the reference document as a prompt part.
///
/// Text files (`.txt`, `.md`) become a text part with their UTF-8 contents;
/// anything else (PDF) is attached as inline data.
pub async fn load_reference_part(path: &Path) -> io::Result<Part> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_default();

    if matches!(ext.as_str(), "txt" | "md") {
        let text = tokio::fs::read_to_string(path).await?;
        Ok(Part::Text { text })
    } else {
        load_inline_part(path).await
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn mime_mapping_matches_extension() {
        assert_eq!(mime_for_path(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("a.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("facts.pdf")), "application/pdf");
        assert_eq!(mime_for_path(Path::new("mystery.bin")), "application/octet-stream");
        assert_eq!(mime_for_path(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn inline_part_is_base64_of_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&[1, 2, 3])
            .unwrap();

        let part = load_inline_part(&path).await.unwrap();
        match part {
            Part::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "image/png");
                assert_eq!(inline_data.data, BASE64.encode([1, 2, 3]));
            }
            other => panic!("expected inline data, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn text_reference_becomes_text_part() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cats.txt");
        std::fs::write(&path, "tama is shy").unwrap();

        match load_reference_part(&path).await.unwrap() {
            Part::Text { text } => assert_eq!(text, "tama is shy"),
            other => panic!("expected text part, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_file_surfaces_io_error() {
        let err = load_reference_part(Path::new("no/such/cats.txt"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
