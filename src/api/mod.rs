use serde::{Deserialize, Serialize};

pub mod client;

/// Fallback text for a non-success reply that carries no `message`.
pub const NO_RESPONSE_CONTENT: &str = "No response content found";

/// Fallback detail for a transport failure with an empty description.
pub const FAILED_TO_GET_RESPONSE: &str = "Failed to get response";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub message: String,
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
}

#[derive(Debug, Deserialize)]
pub struct GenerateData {
    pub message: String,
}

/// Raw response envelope. Both the success shape (`{status, data: {message}}`)
/// and the failure shape (`{status, message}`) land here.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<GenerateData>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of one request/response cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The server produced a reply.
    Success { message: String },

    /// The server answered but reported a non-success status. Rendered like a
    /// normal reply.
    Failure { message: String },

    /// The request never produced a usable body: network error, non-2xx
    /// status, or a body that does not match the envelope.
    TransportError { detail: String },
}

impl GenerateResponse {
    pub fn into_outcome(self) -> GenerateOutcome {
        if self.status.as_deref() == Some("success") {
            return match self.data {
                Some(data) => GenerateOutcome::Success {
                    message: data.message.trim().to_string(),
                },
                None => GenerateOutcome::TransportError {
                    detail: "response is missing data.message".to_string(),
                },
            };
        }

        let message = self
            .message
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| NO_RESPONSE_CONTENT.to_string());
        GenerateOutcome::Failure { message }
    }
}

impl GenerateOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, GenerateOutcome::TransportError { .. })
    }

    /// Text shown in the assistant bubble for this outcome.
    pub fn display_text(&self) -> String {
        match self {
            GenerateOutcome::Success { message } | GenerateOutcome::Failure { message } => {
                message.clone()
            }
            GenerateOutcome::TransportError { detail } => {
                let detail = if detail.trim().is_empty() {
                    FAILED_TO_GET_RESPONSE
                } else {
                    detail.as_str()
                };
                format!("Error: {detail}")
            }
        }
    }
}
