use serde::{Deserialize, Serialize};

/// Inbound envelope on the client → gateway channel.
///
/// `heartbeat` is a liveness marker some clients emit on an interval; it is
/// recognized so it can be ignored instead of rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "codeAnalysis")]
    CodeAnalysis { data: CodeAnalysisPayload },
    #[serde(rename = "heartbeat")]
    Heartbeat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeAnalysisPayload {
    pub code: String,
    pub language: String,
}
