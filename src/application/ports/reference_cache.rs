//! Reference Cache Port - 参考音色缓存
//!
//! 进程生命周期内有效，无淘汰，无持久化

use std::sync::Arc;

use crate::domain::voice::{VoiceKey, VoiceReference};

/// Reference Cache Port
///
/// 同一 key 重复写入时后写覆盖（重新编码的结果等价）
pub trait ReferenceCachePort: Send + Sync {
    /// 查找缓存
    fn get(&self, key: &VoiceKey) -> Option<Arc<VoiceReference>>;

    /// 写入缓存，返回是否覆盖了已有条目
    fn insert(&self, key: VoiceKey, reference: Arc<VoiceReference>) -> bool;

    fn contains(&self, key: &VoiceKey) -> bool;

    /// 所有已缓存的 key（排序后）
    fn keys(&self) -> Vec<VoiceKey>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
