//! Synthesize Command Handlers

use std::sync::Arc;

use crate::application::commands::{
    SynthesizeSpeech, SynthesizeSpeechResponse, MAX_TEXT_CHARS, MIN_TEXT_CHARS,
};
use crate::application::error::ApplicationError;
use crate::application::services::{Synthesizer, VoiceResolver};

/// SynthesizeSpeech Handler
///
/// 解析参考音色 → 推理 → WAV
pub struct SynthesizeSpeechHandler {
    resolver: Arc<VoiceResolver>,
    synthesizer: Arc<Synthesizer>,
}

impl SynthesizeSpeechHandler {
    pub fn new(resolver: Arc<VoiceResolver>, synthesizer: Arc<Synthesizer>) -> Self {
        Self {
            resolver,
            synthesizer,
        }
    }

    pub async fn handle(
        &self,
        cmd: SynthesizeSpeech,
    ) -> Result<SynthesizeSpeechResponse, ApplicationError> {
        let text_len = cmd.text.chars().count();
        if !(MIN_TEXT_CHARS..=MAX_TEXT_CHARS).contains(&text_len) {
            return Err(ApplicationError::validation(format!(
                "text must be between {} and {} characters, got {}",
                MIN_TEXT_CHARS, MAX_TEXT_CHARS, text_len
            )));
        }

        let resolution = self.resolver.resolve(&cmd.voice).await?;
        let warning = resolution.warning();

        let audio = self
            .synthesizer
            .synthesize(&cmd.text, &resolution.reference)
            .await?;

        tracing::info!(
            requested_voice = %cmd.voice,
            voice = %resolution.voice,
            outcome = ?resolution.outcome,
            duration_ms = audio.duration_ms,
            "Speech synthesized"
        );

        Ok(SynthesizeSpeechResponse {
            audio_data: audio.audio_data,
            sample_rate: audio.sample_rate,
            duration_ms: audio.duration_ms,
            voice: resolution.voice.to_string(),
            requested_voice: cmd.voice,
            warning,
        })
    }
}
