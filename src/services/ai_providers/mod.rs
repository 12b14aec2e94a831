pub mod anthropic;
pub mod hugging_face;
