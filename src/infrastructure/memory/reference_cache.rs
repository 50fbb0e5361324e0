//! In-Memory Reference Cache Implementation

use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::ReferenceCachePort;
use crate::domain::voice::{VoiceKey, VoiceReference};

/// 内存参考音色缓存
///
/// 无淘汰；DashMap 分片加锁，不会在模型调用期间持有锁
pub struct InMemoryReferenceCache {
    entries: DashMap<VoiceKey, Arc<VoiceReference>>,
}

impl InMemoryReferenceCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl Default for InMemoryReferenceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceCachePort for InMemoryReferenceCache {
    fn get(&self, key: &VoiceKey) -> Option<Arc<VoiceReference>> {
        self.entries.get(key).map(|r| r.value().clone())
    }

    fn insert(&self, key: VoiceKey, reference: Arc<VoiceReference>) -> bool {
        let replaced = self.entries.insert(key.clone(), reference).is_some();
        tracing::debug!(voice = %key, replaced = replaced, "Reference cache updated");
        replaced
    }

    fn contains(&self, key: &VoiceKey) -> bool {
        self.entries.contains_key(key)
    }

    fn keys(&self) -> Vec<VoiceKey> {
        let mut keys: Vec<VoiceKey> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::VoiceName;

    fn key(name: &str) -> VoiceKey {
        VoiceName::new(name).unwrap().key()
    }

    #[test]
    fn test_insert_and_get() {
        let cache = InMemoryReferenceCache::new();
        assert!(cache.is_empty());

        let replaced = cache.insert(key("male"), Arc::new(VoiceReference::new("m", vec![1])));
        assert!(!replaced);

        let reference = cache.get(&key("MALE")).unwrap();
        assert_eq!(reference.text(), "m");
        assert!(cache.contains(&key("Male")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let cache = InMemoryReferenceCache::new();
        cache.insert(key("dave"), Arc::new(VoiceReference::new("first", vec![1])));
        let replaced = cache.insert(key("DAVE"), Arc::new(VoiceReference::new("second", vec![1])));

        assert!(replaced);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key("dave")).unwrap().text(), "second");
    }

    #[test]
    fn test_keys_sorted() {
        let cache = InMemoryReferenceCache::new();
        for name in ["male", "female", "dave"] {
            cache.insert(key(name), Arc::new(VoiceReference::new(name, vec![])));
        }
        let keys: Vec<String> = cache.keys().iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["DAVE", "FEMALE", "MALE"]);
    }

    #[test]
    fn test_concurrent_inserts_same_key() {
        let cache = Arc::new(InMemoryReferenceCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    cache.insert(key("dave"), Arc::new(VoiceReference::new("d", vec![i])));
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cache.len(), 1);
    }
}
