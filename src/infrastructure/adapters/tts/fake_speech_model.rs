//! Fake Speech Model - 用于测试和本地开发的模型
//!
//! 不加载任何神经网络：
//! - encode_reference: 解析参考 WAV，每 20ms 帧的 RMS 量化为一个 code
//! - infer: 生成正弦音，时长与文本长度成正比，音高由参考 codes 决定

use async_trait::async_trait;
use std::f32::consts::PI;
use std::path::Path;

use crate::application::ports::{ModelError, SpeechModelPort, Waveform, MODEL_SAMPLE_RATE};
use crate::domain::voice::ReferenceCodes;

/// Fake 模型配置
#[derive(Debug, Clone)]
pub struct FakeSpeechModelConfig {
    /// 每个字符对应的时长（毫秒）
    pub ms_per_char: u32,
    /// 振幅
    pub amplitude: f32,
}

impl Default for FakeSpeechModelConfig {
    fn default() -> Self {
        Self {
            ms_per_char: 60,
            amplitude: 0.3,
        }
    }
}

/// Fake 模型
pub struct FakeSpeechModel {
    config: FakeSpeechModelConfig,
}

impl FakeSpeechModel {
    pub fn new(config: FakeSpeechModelConfig) -> Self {
        tracing::info!(
            ms_per_char = config.ms_per_char,
            "FakeSpeechModel initialized"
        );
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeSpeechModelConfig::default())
    }
}

/// 每帧 RMS 量化到 0..=1023
fn frame_codes(samples: &[f32], frame_len: usize) -> Vec<i32> {
    samples
        .chunks(frame_len.max(1))
        .map(|frame| {
            let energy: f32 = frame.iter().map(|s| s * s).sum::<f32>() / frame.len() as f32;
            (energy.sqrt().clamp(0.0, 1.0) * 1023.0).round() as i32
        })
        .collect()
}

#[async_trait]
impl SpeechModelPort for FakeSpeechModel {
    async fn encode_reference(&self, audio_path: &Path) -> Result<ReferenceCodes, ModelError> {
        let bytes = tokio::fs::read(audio_path)
            .await
            .map_err(|e| ModelError::EncodeFailed(format!("{}: {}", audio_path.display(), e)))?;

        let mut reader = hound::WavReader::new(std::io::Cursor::new(bytes))
            .map_err(|e| ModelError::EncodeFailed(format!("malformed audio: {}", e)))?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| ModelError::EncodeFailed(e.to_string()))?,
            hound::SampleFormat::Int => {
                let scale = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()
                    .map_err(|e| ModelError::EncodeFailed(e.to_string()))?
            }
        };

        let frame_len = (spec.sample_rate as usize / 50) * spec.channels as usize;
        let codes = frame_codes(&samples, frame_len);

        tracing::debug!(
            path = %audio_path.display(),
            codes = codes.len(),
            "FakeSpeechModel: reference encoded"
        );

        Ok(ReferenceCodes::new(codes))
    }

    async fn infer(
        &self,
        text: &str,
        ref_codes: &ReferenceCodes,
        _ref_text: &str,
    ) -> Result<Waveform, ModelError> {
        let chars = text.chars().count() as u64;
        let num_samples =
            (chars * self.config.ms_per_char as u64 * MODEL_SAMPLE_RATE as u64 / 1000) as usize;

        let code_sum: i64 = ref_codes.as_slice().iter().map(|&c| c as i64).sum();
        let frequency = 180.0 + (code_sum.rem_euclid(120)) as f32;

        let samples = (0..num_samples)
            .map(|i| {
                let t = i as f32 / MODEL_SAMPLE_RATE as f32;
                self.config.amplitude * (2.0 * PI * frequency * t).sin()
            })
            .collect();

        Ok(Waveform {
            samples,
            sample_rate: MODEL_SAMPLE_RATE,
        })
    }
}
