//! Voice Query Handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ReferenceCachePort, VoiceAssetStorePort};
use crate::application::queries::ListVoices;
use crate::domain::voice::{VoiceKey, VoiceName};

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色概要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSummary {
    /// 归一化名称
    pub name: String,
    /// 是否已在缓存中
    pub cached: bool,
    /// 磁盘上是否有素材
    pub on_disk: bool,
    /// 是否为默认回退音色
    pub is_default: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListVoices Handler
///
/// 缓存中的音色 + 磁盘上可发现的音色，按归一化名称去重排序
pub struct ListVoicesHandler {
    cache: Arc<dyn ReferenceCachePort>,
    assets: Arc<dyn VoiceAssetStorePort>,
    default_voice: VoiceKey,
}

impl ListVoicesHandler {
    pub fn new(
        cache: Arc<dyn ReferenceCachePort>,
        assets: Arc<dyn VoiceAssetStorePort>,
        default_voice: &VoiceName,
    ) -> Self {
        Self {
            cache,
            assets,
            default_voice: default_voice.key(),
        }
    }

    pub async fn handle(&self, _query: ListVoices) -> Result<Vec<VoiceSummary>, ApplicationError> {
        let mut voices: BTreeMap<VoiceKey, VoiceSummary> = BTreeMap::new();

        for key in self.cache.keys() {
            voices.insert(
                key.clone(),
                VoiceSummary {
                    name: key.to_string(),
                    cached: true,
                    on_disk: false,
                    is_default: key == self.default_voice,
                },
            );
        }

        for name in self.assets.list().await? {
            // 不合法的文件名无法被请求到，忽略
            let Ok(name) = VoiceName::new(&name) else {
                continue;
            };
            let key = name.key();
            voices
                .entry(key.clone())
                .and_modify(|v| v.on_disk = true)
                .or_insert_with(|| VoiceSummary {
                    name: key.to_string(),
                    cached: false,
                    on_disk: true,
                    is_default: key == self.default_voice,
                });
        }

        Ok(voices.into_values().collect())
    }
}
