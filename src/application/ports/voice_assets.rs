//! Voice Asset Store Port - 参考音色素材（只读）
//!
//! 每个音色对应一个音频文件和一个同名转写文本文件

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::voice::VoiceName;

/// 素材存储错误
#[derive(Debug, Error)]
pub enum AssetStoreError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid transcript encoding: {0}")]
    InvalidTranscript(String),
}

/// 磁盘上找到的一组音色素材
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceAssets {
    /// 文件名中的音色名称（原始大小写）
    pub name: String,
    pub audio_path: PathBuf,
    pub transcript_path: PathBuf,
}

/// Voice Asset Store Port
#[async_trait]
pub trait VoiceAssetStorePort: Send + Sync {
    /// 查找音色素材，音频和转写文本必须同时存在
    async fn locate(&self, name: &VoiceName) -> Result<Option<VoiceAssets>, AssetStoreError>;

    /// 读取转写文本（原样返回，不做校验）
    async fn read_transcript(&self, assets: &VoiceAssets) -> Result<String, AssetStoreError>;

    /// 列出所有素材完整的音色名称
    async fn list(&self) -> Result<Vec<String>, AssetStoreError>;
}
