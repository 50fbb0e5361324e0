//! Speech Model Port - TTS 模型抽象
//!
//! 模型加载、分词、神经网络推理、音频 codec 全部由外部提供，
//! 本服务只依赖两个能力：编码参考音频、根据参考音色合成语音

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::domain::voice::ReferenceCodes;

/// 模型输出采样率（Hz），由模型固定
pub const MODEL_SAMPLE_RATE: u32 = 24_000;

/// 模型错误
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model unavailable: {0}")]
    Unavailable(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Reference encoding failed: {0}")]
    EncodeFailed(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 模型输出的波形
#[derive(Debug, Clone)]
pub struct Waveform {
    /// 单声道 f32 样本，范围约 [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// 模型报告的采样率
    pub sample_rate: u32,
}

impl Waveform {
    /// 时长（毫秒）
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }
}

/// Speech Model Port
#[async_trait]
pub trait SpeechModelPort: Send + Sync {
    /// 编码参考音频，返回 codec codes
    async fn encode_reference(&self, audio_path: &Path) -> Result<ReferenceCodes, ModelError>;

    /// 以参考音色合成文本
    async fn infer(
        &self,
        text: &str,
        ref_codes: &ReferenceCodes,
        ref_text: &str,
    ) -> Result<Waveform, ModelError>;

    /// 检查模型是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
