//! Synthesizer - 推理 + WAV 封装

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{AudioEncoderPort, SpeechModelPort, MODEL_SAMPLE_RATE};
use crate::domain::voice::VoiceReference;

/// 编码后的音频
#[derive(Debug, Clone)]
pub struct EncodedAudio {
    /// WAV 容器字节
    pub audio_data: Vec<u8>,
    pub sample_rate: u32,
    pub duration_ms: u64,
}

/// 语音合成器
pub struct Synthesizer {
    model: Arc<dyn SpeechModelPort>,
    encoder: Arc<dyn AudioEncoderPort>,
}

impl Synthesizer {
    pub fn new(model: Arc<dyn SpeechModelPort>, encoder: Arc<dyn AudioEncoderPort>) -> Self {
        Self { model, encoder }
    }

    /// 以参考音色合成文本，返回内存中的 WAV
    ///
    /// 推理失败只返回通用错误，原因写入日志
    pub async fn synthesize(
        &self,
        text: &str,
        reference: &VoiceReference,
    ) -> Result<EncodedAudio, ApplicationError> {
        tracing::info!(
            text_len = text.chars().count(),
            preview = %preview(text),
            "Synthesizing audio"
        );

        let waveform = self
            .model
            .infer(text, reference.codes(), reference.text())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "TTS inference failed");
                ApplicationError::InferenceFailure("Failed to generate audio.".to_string())
            })?;

        if waveform.sample_rate != MODEL_SAMPLE_RATE {
            tracing::warn!(
                reported = waveform.sample_rate,
                expected = MODEL_SAMPLE_RATE,
                "Model reported unexpected sample rate, writing at fixed rate"
            );
        }

        let audio_data = self
            .encoder
            .encode_wav(&waveform.samples, MODEL_SAMPLE_RATE)
            .map_err(|e| {
                tracing::error!(error = %e, "WAV encoding failed");
                ApplicationError::internal("Failed to generate audio.")
            })?;

        let duration_ms = waveform.samples.len() as u64 * 1000 / MODEL_SAMPLE_RATE as u64;

        tracing::info!(
            duration_ms = duration_ms,
            audio_size = audio_data.len(),
            "Successfully generated audio"
        );

        Ok(EncodedAudio {
            audio_data,
            sample_rate: MODEL_SAMPLE_RATE,
            duration_ms,
        })
    }
}

/// 日志中的文本预览（前 30 个字符）
fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(30).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::StubModel;
    use crate::infrastructure::adapters::HoundWavEncoder;

    fn synthesizer(model: StubModel) -> Synthesizer {
        Synthesizer::new(Arc::new(model), Arc::new(HoundWavEncoder::new()))
    }

    #[tokio::test]
    async fn test_synthesize_returns_wav_at_24k() {
        let synth = synthesizer(StubModel::new());
        let reference = VoiceReference::new("reference text", vec![1, 2, 3]);

        let audio = synth.synthesize("Hello, world.", &reference).await.unwrap();

        assert_eq!(&audio.audio_data[0..4], b"RIFF");
        assert_eq!(&audio.audio_data[8..12], b"WAVE");
        let info = HoundWavEncoder::new().get_audio_info(&audio.audio_data).unwrap();
        assert_eq!(info.sample_rate, 24000);
        assert_eq!(audio.sample_rate, 24000);
        assert_eq!(audio.duration_ms, 100);
    }

    #[tokio::test]
    async fn test_inference_failure_is_generic() {
        let synth = synthesizer(StubModel::new().failing_infer());
        let reference = VoiceReference::new("reference text", vec![1]);

        let err = synth.synthesize("Hello, world.", &reference).await.unwrap_err();
        match err {
            ApplicationError::InferenceFailure(msg) => {
                assert!(!msg.contains("CUDA"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("short"), "short");
        let long = "a".repeat(40);
        assert_eq!(preview(&long), format!("{}...", "a".repeat(30)));
    }
}
