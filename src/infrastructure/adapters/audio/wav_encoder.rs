//! WAV Encoder - 基于 hound 的内存 WAV 封装
//!
//! 输出：单声道、16 位 PCM

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::Cursor;

use crate::application::ports::{AudioEncodeError, AudioEncoderPort, AudioInfo};

const BITS_PER_SAMPLE: u16 = 16;

/// WAV 编码器
#[derive(Debug, Clone, Default)]
pub struct HoundWavEncoder;

impl HoundWavEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl AudioEncoderPort for HoundWavEncoder {
    fn encode_wav(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, AudioEncodeError> {
        if sample_rate == 0 {
            return Err(AudioEncodeError::InvalidInput(
                "Sample rate cannot be 0".to_string(),
            ));
        }

        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: BITS_PER_SAMPLE,
            sample_format: SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
        {
            let mut writer = WavWriter::new(&mut cursor, spec)
                .map_err(|e| AudioEncodeError::EncodingError(e.to_string()))?;
            for &sample in samples {
                let sample = if sample.is_finite() { sample } else { 0.0 };
                let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                writer
                    .write_sample(value)
                    .map_err(|e| AudioEncodeError::EncodingError(e.to_string()))?;
            }
            writer
                .finalize()
                .map_err(|e| AudioEncodeError::EncodingError(e.to_string()))?;
        }

        Ok(cursor.into_inner())
    }

    fn get_audio_info(&self, wav_data: &[u8]) -> Result<AudioInfo, AudioEncodeError> {
        let reader = WavReader::new(Cursor::new(wav_data))
            .map_err(|e| AudioEncodeError::InvalidInput(format!("Invalid WAV: {}", e)))?;
        let spec = reader.spec();

        // duration() 返回每声道的帧数
        let frames = reader.duration() as u64;
        let duration_ms = if spec.sample_rate > 0 {
            frames * 1000 / spec.sample_rate as u64
        } else {
            0
        };

        Ok(AudioInfo {
            duration_ms,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
        })
    }
}
