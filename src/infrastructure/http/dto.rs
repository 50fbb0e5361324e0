//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{SynthesizeSpeech, SynthesizeSpeechResponse, VoiceSummary};

// ============================================================================
// TTS DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    /// 音色名称，大小写不敏感
    pub voice_type: String,
}

impl From<TtsRequest> for SynthesizeSpeech {
    fn from(req: TtsRequest) -> Self {
        Self {
            text: req.text,
            voice: req.voice_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TtsResponse {
    /// Base64 编码的 WAV
    pub audio_base64: String,
    pub input_text: String,
    /// 实际使用的音色
    pub voice_type: String,
    pub requested_voice: String,
    pub sample_rate: u32,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl TtsResponse {
    pub fn new(input_text: String, result: SynthesizeSpeechResponse) -> Self {
        use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

        Self {
            audio_base64: BASE64.encode(&result.audio_data),
            input_text,
            voice_type: result.voice,
            requested_voice: result.requested_voice,
            sample_rate: result.sample_rate,
            duration_ms: result.duration_ms,
            warning: result.warning,
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoiceResponse {
    pub name: String,
    pub cached: bool,
    pub on_disk: bool,
    pub is_default: bool,
}

impl From<VoiceSummary> for VoiceResponse {
    fn from(v: VoiceSummary) -> Self {
        Self {
            name: v.name,
            cached: v.cached,
            on_disk: v.on_disk,
            is_default: v.is_default,
        }
    }
}
