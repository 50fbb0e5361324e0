//! Filesystem Voice Store - 文件系统参考音色素材
//!
//! 实现 VoiceAssetStorePort trait
//!
//! 目录布局: {dir}/{name}.{audio_ext} + {dir}/{name}.{transcript_ext}

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{AssetStoreError, VoiceAssetStorePort, VoiceAssets};
use crate::domain::voice::VoiceName;

/// 文件系统素材配置
#[derive(Debug, Clone)]
pub struct FsVoiceStoreConfig {
    pub dir: PathBuf,
    pub audio_extension: String,
    pub transcript_extension: String,
}

impl Default for FsVoiceStoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("samples"),
            audio_extension: "wav".to_string(),
            transcript_extension: "txt".to_string(),
        }
    }
}

/// 文件系统音色素材（只读）
pub struct FsVoiceAssetStore {
    config: FsVoiceStoreConfig,
}

impl FsVoiceAssetStore {
    pub fn new(config: FsVoiceStoreConfig) -> Self {
        Self { config }
    }

    fn paths_for(&self, stem: &str) -> (PathBuf, PathBuf) {
        (
            self.config
                .dir
                .join(format!("{}.{}", stem, self.config.audio_extension)),
            self.config
                .dir
                .join(format!("{}.{}", stem, self.config.transcript_extension)),
        )
    }
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

#[async_trait]
impl VoiceAssetStorePort for FsVoiceAssetStore {
    async fn locate(&self, name: &VoiceName) -> Result<Option<VoiceAssets>, AssetStoreError> {
        // 原始大小写优先，其次小写、大写
        let mut candidates: Vec<String> = Vec::with_capacity(3);
        for stem in [
            name.as_str().to_string(),
            name.as_str().to_lowercase(),
            name.as_str().to_uppercase(),
        ] {
            if !candidates.contains(&stem) {
                candidates.push(stem);
            }
        }

        for stem in candidates {
            let (audio_path, transcript_path) = self.paths_for(&stem);
            if is_file(&audio_path).await && is_file(&transcript_path).await {
                tracing::debug!(
                    voice = %name,
                    audio = %audio_path.display(),
                    "Voice assets found on disk"
                );
                return Ok(Some(VoiceAssets {
                    name: stem,
                    audio_path,
                    transcript_path,
                }));
            }
        }

        tracing::debug!(voice = %name, dir = %self.config.dir.display(), "No voice assets on disk");
        Ok(None)
    }

    async fn read_transcript(&self, assets: &VoiceAssets) -> Result<String, AssetStoreError> {
        let bytes = fs::read(&assets.transcript_path)
            .await
            .map_err(|e| AssetStoreError::IoError(e.to_string()))?;

        String::from_utf8(bytes).map_err(|e| {
            AssetStoreError::InvalidTranscript(format!(
                "{}: {}",
                assets.transcript_path.display(),
                e
            ))
        })
    }

    async fn list(&self) -> Result<Vec<String>, AssetStoreError> {
        let mut entries = match fs::read_dir(&self.config.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(dir = %self.config.dir.display(), "Voice directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(AssetStoreError::IoError(e.to_string())),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AssetStoreError::IoError(e.to_string()))?
        {
            let path = entry.path();
            let is_audio = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(&self.config.audio_extension))
                .unwrap_or(false);
            if !is_audio {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let (_, transcript_path) = self.paths_for(stem);
            if is_file(&transcript_path).await {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}
