pub mod ai_providers;
pub mod analysis_cache;
pub mod analysis_pipeline;
pub mod code_segmenter;
pub mod fallback_analyzer;
pub mod request_coalescer;
pub mod response_normalizer;
pub mod session_hub;
