//! Voice Resolver - 参考音色解析
//!
//! 解析顺序:
//! 1. 归一化音色名称（大小写不敏感）
//! 2. 命中缓存直接返回（无 IO）
//! 3. 磁盘上存在同名音频 + 转写文本：编码后写入缓存
//! 4. 否则回退到默认音色（附带警告）；默认音色也不存在则返回 ReferenceNotFound
//!
//! 缓存写入不加额外的锁：同一新音色的并发请求可能各自编码一次，后写覆盖，
//! 两次结果等价。

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ReferenceCachePort, SpeechModelPort, VoiceAssetStorePort};
use crate::domain::voice::{VoiceKey, VoiceName, VoiceReference};

/// 回退原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// 音色名称不合法，视为不存在
    InvalidName(String),
    /// 磁盘上没有完整的素材
    NotOnDisk,
    /// 素材存在但读取失败
    AssetUnreadable(String),
    /// 参考音频编码失败
    EncodeFailed(String),
}

/// 解析结果类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    CacheHit,
    /// 从磁盘加载并写入缓存
    Loaded,
    Fallback {
        requested: String,
        reason: FallbackReason,
    },
}

/// 解析结果
#[derive(Debug, Clone)]
pub struct Resolution {
    /// 实际使用的音色
    pub voice: VoiceKey,
    pub reference: Arc<VoiceReference>,
    pub outcome: ResolveOutcome,
}

impl Resolution {
    /// 回退时返回给调用方的警告
    pub fn warning(&self) -> Option<String> {
        match &self.outcome {
            ResolveOutcome::Fallback { requested, reason } => Some(match reason {
                FallbackReason::EncodeFailed(err) => format!(
                    "Voice '{}' could not be encoded ({}); using fallback voice '{}'",
                    requested, err, self.voice
                ),
                FallbackReason::AssetUnreadable(err) => format!(
                    "Voice '{}' could not be read ({}); using fallback voice '{}'",
                    requested, err, self.voice
                ),
                FallbackReason::InvalidName(_) | FallbackReason::NotOnDisk => format!(
                    "Voice '{}' not found; using fallback voice '{}'",
                    requested, self.voice
                ),
            }),
            _ => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, ResolveOutcome::Fallback { .. })
    }
}

/// 启动预加载结果
#[derive(Debug, Default)]
pub struct PreloadReport {
    pub loaded: Vec<VoiceKey>,
    /// (名称, 失败原因)
    pub failed: Vec<(String, String)>,
}

/// 参考音色解析器
///
/// 进程启动时创建一次，通过 AppState 共享给请求处理器
pub struct VoiceResolver {
    cache: Arc<dyn ReferenceCachePort>,
    assets: Arc<dyn VoiceAssetStorePort>,
    model: Arc<dyn SpeechModelPort>,
    default_voice: VoiceKey,
}

impl VoiceResolver {
    pub fn new(
        cache: Arc<dyn ReferenceCachePort>,
        assets: Arc<dyn VoiceAssetStorePort>,
        model: Arc<dyn SpeechModelPort>,
        default_voice: &VoiceName,
    ) -> Self {
        Self {
            cache,
            assets,
            model,
            default_voice: default_voice.key(),
        }
    }

    pub fn default_voice(&self) -> &VoiceKey {
        &self.default_voice
    }

    /// 已缓存的音色
    pub fn cached_voices(&self) -> Vec<VoiceKey> {
        self.cache.keys()
    }

    /// 解析音色
    pub async fn resolve(&self, requested: &str) -> Result<Resolution, ApplicationError> {
        let name = match VoiceName::new(requested) {
            Ok(name) => name,
            Err(e) => {
                return self.fallback(requested, FallbackReason::InvalidName(e.to_string()));
            }
        };
        let key = name.key();

        if let Some(reference) = self.cache.get(&key) {
            tracing::debug!(voice = %key, "Voice reference cache hit");
            return Ok(Resolution {
                voice: key,
                reference,
                outcome: ResolveOutcome::CacheHit,
            });
        }

        match self.load(&name).await {
            Ok(reference) => Ok(Resolution {
                voice: key,
                reference,
                outcome: ResolveOutcome::Loaded,
            }),
            Err(reason) => self.fallback(requested, reason),
        }
    }

    /// 预加载已知音色（不回退）
    pub async fn preload(&self, names: &[String]) -> PreloadReport {
        let mut report = PreloadReport::default();

        for raw in names {
            let name = match VoiceName::new(raw) {
                Ok(name) => name,
                Err(e) => {
                    tracing::warn!(voice = %raw, error = %e, "Skipping invalid preload voice");
                    report.failed.push((raw.clone(), e.to_string()));
                    continue;
                }
            };

            match self.load(&name).await {
                Ok(_) => report.loaded.push(name.key()),
                Err(reason) => {
                    tracing::warn!(voice = %name, reason = ?reason, "Failed to preload voice");
                    report.failed.push((raw.clone(), format!("{:?}", reason)));
                }
            }
        }

        tracing::info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "Voice references preloaded"
        );

        report
    }

    /// 从磁盘加载并写入缓存
    async fn load(&self, name: &VoiceName) -> Result<Arc<VoiceReference>, FallbackReason> {
        let assets = match self.assets.locate(name).await {
            Ok(Some(assets)) => assets,
            Ok(None) => return Err(FallbackReason::NotOnDisk),
            Err(e) => return Err(FallbackReason::AssetUnreadable(e.to_string())),
        };

        let text = self
            .assets
            .read_transcript(&assets)
            .await
            .map_err(|e| FallbackReason::AssetUnreadable(e.to_string()))?;

        let codes = self
            .model
            .encode_reference(&assets.audio_path)
            .await
            .map_err(|e| {
                tracing::warn!(
                    voice = %name,
                    path = %assets.audio_path.display(),
                    error = %e,
                    "Reference audio encoding failed"
                );
                FallbackReason::EncodeFailed(e.to_string())
            })?;

        let key = name.key();
        let reference = Arc::new(VoiceReference::new(text, codes));
        let replaced = self.cache.insert(key.clone(), reference.clone());

        tracing::info!(
            voice = %key,
            codes = reference.codes().len(),
            replaced = replaced,
            "Voice reference cached"
        );

        Ok(reference)
    }

    fn fallback(
        &self,
        requested: &str,
        reason: FallbackReason,
    ) -> Result<Resolution, ApplicationError> {
        let Some(reference) = self.cache.get(&self.default_voice) else {
            tracing::warn!(
                voice = %requested,
                reason = ?reason,
                "Voice not found and no fallback voice cached"
            );
            return Err(ApplicationError::ReferenceNotFound(requested.to_string()));
        };

        let resolution = Resolution {
            voice: self.default_voice.clone(),
            reference,
            outcome: ResolveOutcome::Fallback {
                requested: requested.to_string(),
                reason,
            },
        };

        if let Some(warning) = resolution.warning() {
            tracing::warn!(voice = %requested, fallback = %self.default_voice, "{}", warning);
        }

        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{StubAssetStore, StubModel};
    use crate::infrastructure::memory::InMemoryReferenceCache;
    use std::sync::atomic::Ordering;

    struct Fixture {
        cache: Arc<InMemoryReferenceCache>,
        assets: Arc<StubAssetStore>,
        model: Arc<StubModel>,
        resolver: VoiceResolver,
    }

    fn fixture(assets: StubAssetStore, model: StubModel) -> Fixture {
        let cache = Arc::new(InMemoryReferenceCache::new());
        let assets = Arc::new(assets);
        let model = Arc::new(model);
        let resolver = VoiceResolver::new(
            cache.clone(),
            assets.clone(),
            model.clone(),
            &VoiceName::new("MALE").unwrap(),
        );
        Fixture {
            cache,
            assets,
            model,
            resolver,
        }
    }

    fn seed(cache: &InMemoryReferenceCache, name: &str, text: &str) {
        let key = VoiceName::new(name).unwrap().key();
        cache.insert(key, Arc::new(VoiceReference::new(text, vec![1, 2, 3])));
    }

    #[tokio::test]
    async fn test_cache_hit_performs_no_io() {
        let f = fixture(
            StubAssetStore::new().with_voice("male", "male transcript"),
            StubModel::new(),
        );
        seed(&f.cache, "MALE", "cached transcript");

        let resolution = f.resolver.resolve("MALE").await.unwrap();

        assert_eq!(resolution.outcome, ResolveOutcome::CacheHit);
        assert_eq!(resolution.reference.text(), "cached transcript");
        assert_eq!(f.assets.locate_calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.assets.read_calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.model.encode_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_disk_voice_loaded_once_then_cached() {
        let f = fixture(
            StubAssetStore::new().with_voice("dave", "I am Dave."),
            StubModel::new(),
        );

        let first = f.resolver.resolve("dave").await.unwrap();
        assert_eq!(first.outcome, ResolveOutcome::Loaded);
        assert_eq!(first.voice.as_str(), "DAVE");
        assert_eq!(first.reference.text(), "I am Dave.");
        assert!(f.cache.contains(&first.voice));

        let second = f.resolver.resolve("Dave").await.unwrap();
        assert_eq!(second.outcome, ResolveOutcome::CacheHit);
        assert!(Arc::ptr_eq(&first.reference, &second.reference));

        assert_eq!(f.model.encode_calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.assets.locate_calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.cache.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_voice_falls_back_to_male() {
        let f = fixture(StubAssetStore::new(), StubModel::new());
        seed(&f.cache, "MALE", "male transcript");

        let resolution = f.resolver.resolve("ghost").await.unwrap();

        assert!(resolution.is_fallback());
        assert_eq!(resolution.voice.as_str(), "MALE");
        assert_eq!(resolution.reference.text(), "male transcript");
        let warning = resolution.warning().unwrap();
        assert!(warning.contains("ghost"));
        assert!(warning.contains("MALE"));
        // 回退不会把请求的名称写入缓存
        assert_eq!(f.cache.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_voice_without_fallback_is_not_found() {
        let f = fixture(StubAssetStore::new(), StubModel::new());

        let err = f.resolver.resolve("ghost").await.unwrap_err();
        match err {
            ApplicationError::ReferenceNotFound(name) => assert_eq!(name, "ghost"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let f = fixture(StubAssetStore::new(), StubModel::new());
        seed(&f.cache, "MALE", "male transcript");

        for name in ["male", "Male", "MALE"] {
            let resolution = f.resolver.resolve(name).await.unwrap();
            assert_eq!(resolution.outcome, ResolveOutcome::CacheHit);
            assert_eq!(resolution.voice.as_str(), "MALE");
        }
    }

    #[tokio::test]
    async fn test_encode_failure_falls_back_with_distinct_warning() {
        let f = fixture(
            StubAssetStore::new().with_voice("broken", "text"),
            StubModel::new().failing_encode_for("broken"),
        );
        seed(&f.cache, "MALE", "male transcript");

        let resolution = f.resolver.resolve("broken").await.unwrap();

        match &resolution.outcome {
            ResolveOutcome::Fallback { requested, reason } => {
                assert_eq!(requested, "broken");
                assert!(matches!(reason, FallbackReason::EncodeFailed(_)));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(resolution.warning().unwrap().contains("could not be encoded"));
        assert!(!f.cache.contains(&VoiceName::new("broken").unwrap().key()));
    }

    #[tokio::test]
    async fn test_encode_failure_without_fallback_is_not_found() {
        let f = fixture(
            StubAssetStore::new().with_voice("broken", "text"),
            StubModel::new().failing_encode_for("broken"),
        );

        let err = f.resolver.resolve("broken").await.unwrap_err();
        assert!(matches!(err, ApplicationError::ReferenceNotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_name_falls_back_without_io() {
        let f = fixture(StubAssetStore::new(), StubModel::new());
        seed(&f.cache, "MALE", "male transcript");

        let resolution = f.resolver.resolve("../secret").await.unwrap();

        assert!(resolution.is_fallback());
        assert_eq!(f.assets.locate_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_transcript_accepted() {
        let f = fixture(
            StubAssetStore::new().with_voice("quiet", "   "),
            StubModel::new(),
        );

        let resolution = f.resolver.resolve("quiet").await.unwrap();
        assert_eq!(resolution.outcome, ResolveOutcome::Loaded);
        assert_eq!(resolution.reference.text(), "   ");
    }

    #[tokio::test]
    async fn test_preload_populates_cache() {
        let f = fixture(
            StubAssetStore::new()
                .with_voice("MALE", "male")
                .with_voice("FEMALE", "female"),
            StubModel::new(),
        );

        let report = f
            .resolver
            .preload(&["MALE".to_string(), "FEMALE".to_string(), "NOBODY".to_string()])
            .await;

        assert_eq!(report.loaded.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "NOBODY");
        let keys: Vec<String> = f
            .resolver
            .cached_voices()
            .iter()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(keys, vec!["FEMALE", "MALE"]);
    }

    #[tokio::test]
    async fn test_reresolving_is_idempotent() {
        let f = fixture(
            StubAssetStore::new().with_voice("dave", "I am Dave."),
            StubModel::new(),
        );

        f.resolver.preload(&["dave".to_string()]).await;
        f.resolver.preload(&["DAVE".to_string()]).await;

        assert_eq!(f.cache.len(), 1);
        let reference = f.cache.get(&VoiceName::new("dave").unwrap().key()).unwrap();
        assert_eq!(reference.text(), "I am Dave.");
    }
}
