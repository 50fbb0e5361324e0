//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_encoder;
mod reference_cache;
mod speech_model;
mod voice_assets;

pub use audio_encoder::{AudioEncodeError, AudioEncoderPort, AudioInfo};
pub use reference_cache::ReferenceCachePort;
pub use speech_model::{ModelError, SpeechModelPort, Waveform, MODEL_SAMPLE_RATE};
pub use voice_assets::{AssetStoreError, VoiceAssetStorePort, VoiceAssets};
