//! neutts-server - 带声音克隆的 TTS HTTP 服务
//!
//! 架构设计: Hexagonal Architecture + CQRS
//!
//! 领域层 (domain/):
//! - Voice Context: 音色名称、参考音色
//!
//! 应用层 (application/):
//! - Ports: SpeechModel, VoiceAssetStore, ReferenceCache, AudioEncoder
//! - Services: VoiceResolver（缓存 → 磁盘 → 默认音色）, Synthesizer
//! - Commands / Queries: 合成语音、列出音色
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: 参考音色缓存
//! - Adapters: 模型客户端、文件系统素材、WAV 编码

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
