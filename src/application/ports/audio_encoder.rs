//! Audio Encoder Port - 波形 → WAV 容器

use thiserror::Error;

/// 编码错误
#[derive(Debug, Error)]
pub enum AudioEncodeError {
    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Audio Encoder Port
pub trait AudioEncoderPort: Send + Sync {
    /// 将单声道 f32 样本编码为内存中的 WAV
    fn encode_wav(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, AudioEncodeError>;

    /// 读取 WAV 信息（不解码样本）
    fn get_audio_info(&self, wav_data: &[u8]) -> Result<AudioInfo, AudioEncodeError>;
}

/// 音频信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioInfo {
    /// 时长（毫秒）
    pub duration_ms: u64,
    /// 采样率
    pub sample_rate: u32,
    /// 声道数
    pub channels: u16,
    /// 位深度
    pub bits_per_sample: u16,
}
