use serde::Deserialize;

/// One generation from a hosted-inference model. The endpoint returns a
/// list; the first entry is used.
#[derive(Debug, Deserialize)]
pub struct InferenceGeneration {
    pub generated_text: String,
}
