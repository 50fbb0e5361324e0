//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechModel、VoiceAssetStore、ReferenceCache、AudioEncoder）
//! - services: 参考音色解析器、语音合成器
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use commands::{
    handlers::SynthesizeSpeechHandler, SynthesizeSpeech, SynthesizeSpeechResponse,
    MAX_TEXT_CHARS, MIN_TEXT_CHARS,
};

pub use error::ApplicationError;

pub use ports::{
    AssetStoreError, AudioEncodeError, AudioEncoderPort, AudioInfo, ModelError,
    ReferenceCachePort, SpeechModelPort, VoiceAssetStorePort, VoiceAssets, Waveform,
    MODEL_SAMPLE_RATE,
};

pub use queries::{
    handlers::{ListVoicesHandler, VoiceSummary},
    ListVoices,
};

pub use services::{
    EncodedAudio, FallbackReason, PreloadReport, Resolution, ResolveOutcome, Synthesizer,
    VoiceResolver,
};
