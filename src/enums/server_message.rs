use serde::{Deserialize, Serialize};

use crate::structs::analysis_result::AnalysisResult;
use crate::structs::dashboard_snapshot::DashboardSnapshot;

/// Outbound envelope on the gateway → client channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "analysisResult")]
    AnalysisResult { data: AnalysisResultPayload },
    #[serde(rename = "error")]
    Error { message: String },
    #[serde(rename = "dashboardUpdate")]
    DashboardUpdate { data: DashboardSnapshot },
    #[serde(rename = "heartbeat")]
    Heartbeat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResultPayload {
    pub ai: AnalysisResult,
}

impl ServerMessage {
    pub fn analysis_result(result: AnalysisResult) -> Self {
        ServerMessage::AnalysisResult {
            data: AnalysisResultPayload { ai: result },
        }
    }

    pub fn error(message: &str) -> Self {
        ServerMessage::Error {
            message: message.to_string(),
        }
    }
}
