//! neutts-server - 带声音克隆的 TTS HTTP 服务

use std::sync::Arc;

use neutts_server::application::{ModelError, SpeechModelPort};
use neutts_server::config::{load_config, print_config, AppConfig, ModelBackend};
use neutts_server::domain::voice::VoiceName;
use neutts_server::infrastructure::adapters::{
    FakeSpeechModel, FsVoiceAssetStore, FsVoiceStoreConfig, HoundWavEncoder, HttpSpeechModel,
    HttpSpeechModelConfig,
};
use neutts_server::infrastructure::http::{AppState, HttpServer, ServerConfig};
use neutts_server::infrastructure::memory::InMemoryReferenceCache;

/// 加载模型（构建客户端并通过健康检查）
async fn load_model(config: &AppConfig) -> Result<Arc<dyn SpeechModelPort>, ModelError> {
    match config.model.backend {
        ModelBackend::Fake => Ok(Arc::new(FakeSpeechModel::with_defaults())),
        ModelBackend::Http => {
            let model_config = HttpSpeechModelConfig::new(config.model.url.clone())
                .with_timeout(config.model.timeout_secs);
            let model = HttpSpeechModel::new(model_config)?;
            if !model.health_check().await {
                return Err(ModelError::Unavailable(format!(
                    "health check failed for {}",
                    config.model.url
                )));
            }
            Ok(Arc::new(model))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},neutts_server={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("neutts-server v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    let default_voice = VoiceName::new(&config.voices.default_voice)
        .map_err(|e| anyhow::anyhow!("Invalid default voice: {}", e))?;

    // 参考音色素材与缓存
    let assets = Arc::new(FsVoiceAssetStore::new(FsVoiceStoreConfig {
        dir: config.voices.dir.clone(),
        audio_extension: config.voices.audio_extension.clone(),
        transcript_extension: config.voices.transcript_extension.clone(),
    }));
    let cache = Arc::new(InMemoryReferenceCache::new());

    // 加载模型，失败时服务仍启动，合成请求返回 503
    tracing::info!(backend = %config.model.backend, "Loading TTS model...");
    let model = match load_model(&config).await {
        Ok(model) => {
            tracing::info!("Model loaded successfully");
            Some(model)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load TTS model");
            None
        }
    };

    let state = AppState::new(
        cache,
        assets,
        model,
        Arc::new(HoundWavEncoder::new()),
        &default_voice,
    );

    // 预加载已知音色
    if let Some(resolver) = &state.resolver {
        let report = resolver
            .preload(&config.voices.preload_with_default())
            .await;
        if !report
            .loaded
            .iter()
            .any(|key| key == resolver.default_voice())
        {
            tracing::warn!(
                voice = %resolver.default_voice(),
                "Default voice not loaded; unknown voices will return 404"
            );
        }
    }

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
