//! TTS Adapter - 模型客户端实现

mod fake_speech_model;
mod http_speech_model;

pub use fake_speech_model::{FakeSpeechModel, FakeSpeechModelConfig};
pub use http_speech_model::*;
