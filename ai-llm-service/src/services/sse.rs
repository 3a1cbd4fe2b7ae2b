//! Minimal server-sent-events line reassembly.
//!
//! `:streamGenerateContent?alt=sse` delivers one JSON frame per `data:`
//! line. Network chunks can split a line anywhere, so the buffer accumulates
//! bytes and releases only complete `data:` payloads.

/// Accumulates raw bytes and yields complete `data:` payloads.
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    buf: Vec<u8>,
}

impl SseLineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one network chunk and returns every `data:` payload completed
    /// by it, in order. Non-data lines (comments, blank keep-alives) are
    /// dropped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut out = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(payload) = line.strip_prefix("data:") {
                let payload = payload.trim();
                if !payload.is_empty() {
                    out.push(payload.to_string());
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_payload_per_complete_line() {
        let mut buf = SseLineBuffer::new();
        let got = buf.push(b"data: {\"a\":1}\n\ndata: {\"b\":2}\n");
        assert_eq!(got, vec![r#"{"a":1}"#, r#"{"b":2}"#]);
    }

    #[test]
    fn reassembles_lines_split_across_chunks() {
        let mut buf = SseLineBuffer::new();
        assert!(buf.push(b"data: {\"text\":").is_empty());
        let got = buf.push(b"\"hi\"}\r\n");
        assert_eq!(got, vec![r#"{"text":"hi"}"#]);
    }

    #[test]
    fn ignores_comments_and_blank_lines() {
        let mut buf = SseLineBuffer::new();
        let got = buf.push(b": keep-alive\n\ndata: x\n");
        assert_eq!(got, vec!["x"]);
    }
}
