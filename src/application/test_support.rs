//! 测试用的端口替身（计数调用次数）

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{
    AssetStoreError, ModelError, SpeechModelPort, VoiceAssetStorePort, VoiceAssets, Waveform,
    MODEL_SAMPLE_RATE,
};
use crate::domain::voice::{ReferenceCodes, VoiceName};

/// 内存模型：codes 由文件名派生，推理输出 0.1 秒静音
#[derive(Default)]
pub struct StubModel {
    pub encode_calls: AtomicUsize,
    pub infer_calls: AtomicUsize,
    failing_encode: Vec<String>,
    failing_infer: bool,
}

impl StubModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_encode_for(mut self, stem: &str) -> Self {
        self.failing_encode.push(stem.to_uppercase());
        self
    }

    pub fn failing_infer(mut self) -> Self {
        self.failing_infer = true;
        self
    }
}

#[async_trait]
impl SpeechModelPort for StubModel {
    async fn encode_reference(&self, audio_path: &Path) -> Result<ReferenceCodes, ModelError> {
        self.encode_calls.fetch_add(1, Ordering::SeqCst);
        let stem = audio_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_uppercase();
        if self.failing_encode.contains(&stem) {
            return Err(ModelError::EncodeFailed(format!("corrupt audio: {}", stem)));
        }
        Ok(ReferenceCodes::new(stem.bytes().map(i32::from).collect()))
    }

    async fn infer(
        &self,
        _text: &str,
        _ref_codes: &ReferenceCodes,
        _ref_text: &str,
    ) -> Result<Waveform, ModelError> {
        self.infer_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_infer {
            return Err(ModelError::InferenceFailed("CUDA out of memory".to_string()));
        }
        Ok(Waveform {
            samples: vec![0.0; (MODEL_SAMPLE_RATE / 10) as usize],
            sample_rate: MODEL_SAMPLE_RATE,
        })
    }
}

/// 内存素材库：key 为大写名称
#[derive(Default)]
pub struct StubAssetStore {
    pub locate_calls: AtomicUsize,
    pub read_calls: AtomicUsize,
    voices: HashMap<String, (String, String)>,
}

impl StubAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voice(mut self, name: &str, transcript: &str) -> Self {
        self.voices.insert(
            name.to_uppercase(),
            (name.to_string(), transcript.to_string()),
        );
        self
    }
}

#[async_trait]
impl VoiceAssetStorePort for StubAssetStore {
    async fn locate(&self, name: &VoiceName) -> Result<Option<VoiceAssets>, AssetStoreError> {
        self.locate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .voices
            .get(&name.as_str().to_uppercase())
            .map(|(stored, _)| VoiceAssets {
                name: stored.clone(),
                audio_path: PathBuf::from(format!("/voices/{}.wav", stored)),
                transcript_path: PathBuf::from(format!("/voices/{}.txt", stored)),
            }))
    }

    async fn read_transcript(&self, assets: &VoiceAssets) -> Result<String, AssetStoreError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.voices
            .get(&assets.name.to_uppercase())
            .map(|(_, text)| text.clone())
            .ok_or_else(|| AssetStoreError::IoError(format!("missing {}", assets.name)))
    }

    async fn list(&self) -> Result<Vec<String>, AssetStoreError> {
        let mut names: Vec<String> = self.voices.values().map(|(n, _)| n.clone()).collect();
        names.sort();
        Ok(names)
    }
}
