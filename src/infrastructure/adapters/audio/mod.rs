//! Audio Adapter - WAV 编码

mod wav_encoder;

pub use wav_encoder::HoundWavEncoder;
