//! Application Services
//!
//! - VoiceResolver: 参考音色解析（缓存 → 磁盘 → 默认音色）
//! - Synthesizer: 调用模型推理并封装为 WAV

mod synthesizer;
mod voice_resolver;

pub use synthesizer::{EncodedAudio, Synthesizer};
pub use voice_resolver::{
    FallbackReason, PreloadReport, Resolution, ResolveOutcome, VoiceResolver,
};
