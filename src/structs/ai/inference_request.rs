use serde::Serialize;

/// Request body for a hosted-inference model call.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest {
    pub inputs: String,
}
