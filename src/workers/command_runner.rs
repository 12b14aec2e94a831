use std::sync::Arc;
use std::time::Duration;

use crate::config::config_manager::ConfigManager;
use crate::config::constants::SUPPORTED_FALLBACK_LANGUAGES;
use crate::enums::commands::Commands;
use crate::errors::{DevpulseError, DevpulseResult};
use crate::services::ai_providers::anthropic::AnthropicProvider;
use crate::services::ai_providers::hugging_face::HuggingFaceScorer;
use crate::services::analysis_cache::AnalysisCache;
use crate::services::analysis_pipeline::{AnalysisPipeline, RemoteProviderSource};
use crate::services::fallback_analyzer::FallbackAnalyzer;
use crate::services::session_hub::SessionHub;
use crate::server::gateway_server::GatewayServer;

pub struct CommandRunner;

impl CommandRunner {
    pub async fn run_command(command: Commands) -> DevpulseResult<()> {
        match command {
            Commands::Start { port } => Self::start_command(port).await,
            Commands::Validate => Self::validate_command().await,
        }
    }

    async fn start_command(port: u16) -> DevpulseResult<()> {
        log::info!("🚀 Starting devpulse gateway...");

        let mut config = ConfigManager::load()?;
        config.port = port;
        ConfigManager::validate_config(&config)?;

        let provider = AnthropicProvider::new(config.api_key.clone(), &config.provider)
            .map_err(|e| DevpulseError::provider_error("anthropic", &e.to_string()))?;
        let scorer = HuggingFaceScorer::new(config.hf_api_token.clone());
        let fallback = FallbackAnalyzer::new(Arc::new(scorer));

        let pipeline = AnalysisPipeline::new(vec![
            Box::new(RemoteProviderSource::new(provider)),
            Box::new(fallback),
        ]);
        let cache = AnalysisCache::new(
            config.cache.capacity,
            Duration::from_secs(config.cache.ttl_secs),
        );
        let hub = SessionHub::new(
            pipeline,
            cache,
            Duration::from_secs(config.heartbeat_interval_secs),
        );
        let heartbeat = hub.spawn_heartbeat();

        let mut server = GatewayServer::new(Arc::clone(&hub), config.port);
        let addr = server.start().await?;

        log::info!("✅ Gateway ready at ws://{}", addr);
        log::info!("⏹️ Press Ctrl+C to stop");

        tokio::signal::ctrl_c()
            .await
            .map_err(|e| DevpulseError::system_error("signal handling", &e.to_string()))?;

        log::info!("🛑 Shutting down...");
        heartbeat.abort();
        server.shutdown();

        Ok(())
    }

    async fn validate_command() -> DevpulseResult<()> {
        log::info!("🔍 Validating devpulse configuration...");

        let config = ConfigManager::load()?;
        ConfigManager::validate_config(&config)?;

        log::info!("✅ Configuration is valid");
        log::info!("   🌐 Port: {}", config.port);
        log::info!("   🤖 Provider model: {}", config.provider.model);
        log::info!(
            "   📦 Cache: {} entries, {}s TTL",
            config.cache.capacity,
            config.cache.ttl_secs
        );
        log::info!(
            "   🛟 Fallback languages: {}",
            SUPPORTED_FALLBACK_LANGUAGES.join(", ")
        );

        Ok(())
    }
}
