//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 模型配置
    #[serde(default)]
    pub model: ModelConfig,

    /// 参考音色配置
    #[serde(default)]
    pub voices: VoicesConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 模型后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelBackend {
    /// 外部 HTTP 推理服务
    #[default]
    Http,
    /// 进程内假模型（开发/测试）
    Fake,
}

impl std::fmt::Display for ModelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelBackend::Http => write!(f, "http"),
            ModelBackend::Fake => write!(f, "fake"),
        }
    }
}

/// 模型配置
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub backend: ModelBackend,

    /// 推理服务基础 URL
    #[serde(default = "default_model_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,
}

fn default_model_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_model_timeout() -> u64 {
    300
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backend: ModelBackend::default(),
            url: default_model_url(),
            timeout_secs: default_model_timeout(),
        }
    }
}

/// 参考音色配置
#[derive(Debug, Clone, Deserialize)]
pub struct VoicesConfig {
    /// 素材目录
    #[serde(default = "default_voices_dir")]
    pub dir: PathBuf,

    /// 参考音频扩展名
    #[serde(default = "default_audio_extension")]
    pub audio_extension: String,

    /// 转写文本扩展名
    #[serde(default = "default_transcript_extension")]
    pub transcript_extension: String,

    /// 默认（回退）音色
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// 启动时预加载的音色
    #[serde(default = "default_preload")]
    pub preload: Vec<String>,
}

fn default_voices_dir() -> PathBuf {
    PathBuf::from("samples")
}

fn default_audio_extension() -> String {
    "wav".to_string()
}

fn default_transcript_extension() -> String {
    "txt".to_string()
}

fn default_voice() -> String {
    "MALE".to_string()
}

fn default_preload() -> Vec<String> {
    vec!["MALE".to_string(), "FEMALE".to_string()]
}

impl Default for VoicesConfig {
    fn default() -> Self {
        Self {
            dir: default_voices_dir(),
            audio_extension: default_audio_extension(),
            transcript_extension: default_transcript_extension(),
            default_voice: default_voice(),
            preload: default_preload(),
        }
    }
}

impl VoicesConfig {
    /// 预加载列表，保证包含默认音色
    pub fn preload_with_default(&self) -> Vec<String> {
        let mut names = self.preload.clone();
        if !names
            .iter()
            .any(|n| n.trim().eq_ignore_ascii_case(self.default_voice.trim()))
        {
            names.insert(0, self.default_voice.clone());
        }
        names
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
