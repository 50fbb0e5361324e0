//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, ModelBackend};
use crate::domain::voice::VoiceName;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `NEUTTS_SERVER__PORT=8080`
/// - `NEUTTS_MODEL__URL=http://model-server:9000`
/// - `NEUTTS_MODEL__BACKEND=fake`
/// - `NEUTTS_VOICES__DIR=/data/samples`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// `config_path` 为 None 时搜索默认配置文件
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("model.backend", "http")?
        .set_default("model.url", "http://localhost:9000")?
        .set_default("model.timeout_secs", 300)?
        .set_default("voices.dir", "samples")?
        .set_default("voices.audio_extension", "wav")?
        .set_default("voices.transcript_extension", "txt")?
        .set_default("voices.default_voice", "MALE")?
        .set_default("voices.preload", vec!["MALE", "FEMALE"])?
        .set_default("log.level", "info")?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 前缀: NEUTTS_，层级分隔符: __
    builder = builder.add_source(
        Environment::with_prefix("NEUTTS")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("voices.preload")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.model.backend == ModelBackend::Http && config.model.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Model URL cannot be empty for the http backend".to_string(),
        ));
    }

    VoiceName::new(&config.voices.default_voice).map_err(|e| {
        ConfigError::ValidationError(format!("Invalid default voice: {}", e))
    })?;

    if config.voices.audio_extension.is_empty() || config.voices.transcript_extension.is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice file extensions cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Model Backend: {}", config.model.backend);
    if config.model.backend == ModelBackend::Http {
        tracing::info!("Model URL: {}", config.model.url);
        tracing::info!("Model Timeout: {}s", config.model.timeout_secs);
    }
    tracing::info!("Voices Directory: {:?}", config.voices.dir);
    tracing::info!("Default Voice: {}", config.voices.default_voice);
    tracing::info!("Preload Voices: {:?}", config.voices.preload);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
