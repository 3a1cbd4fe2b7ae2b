use serde::{Deserialize, Serialize};

/// Request payload for /ask and /ask/stream.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural language question. Absent and empty are treated alike.
    #[serde(default)]
    pub question: String,
}

/// The answer contract the model is asked to honor.
///
/// The handler relays the model's own JSON substring verbatim; this type
/// exists to validate that both fields are present before relaying.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatAnswer {
    /// Answer as normal written text.
    pub display_text: String,
    /// Kana-only reading of the answer for speech synthesis.
    pub speech_text: String,
}
