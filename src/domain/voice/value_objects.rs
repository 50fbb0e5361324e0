//! Voice Context - Value Objects

use std::sync::Arc;

use super::VoiceError;

const MAX_NAME_LEN: usize = 100;

/// 音色名称（调用方提供，保留原始大小写）
///
/// 不变量:
/// - 去除首尾空白后非空
/// - 仅包含 ASCII 字母数字、`-`、`_`（可直接作为文件名，不允许路径穿越）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceName(String);

impl VoiceName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, VoiceError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(VoiceError::EmptyName);
        }
        if name.len() > MAX_NAME_LEN {
            return Err(VoiceError::NameTooLong(name.len()));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(VoiceError::InvalidName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 归一化后的缓存 key
    pub fn key(&self) -> VoiceKey {
        VoiceKey(self.0.to_uppercase())
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 缓存 key - 大写归一化的音色名称
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoiceKey(String);

impl VoiceKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&VoiceName> for VoiceKey {
    fn from(name: &VoiceName) -> Self {
        name.key()
    }
}

impl std::fmt::Display for VoiceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 参考音频编码（codec codes）
///
/// 对本服务不透明，仅原样传给模型。内部共享存储，clone 开销为常数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceCodes(Arc<[i32]>);

impl ReferenceCodes {
    pub fn new(codes: Vec<i32>) -> Self {
        Self(codes.into())
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<i32>> for ReferenceCodes {
    fn from(codes: Vec<i32>) -> Self {
        Self::new(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_case_insensitive() {
        let a = VoiceName::new("male").unwrap();
        let b = VoiceName::new("Male").unwrap();
        let c = VoiceName::new("MALE").unwrap();
        assert_eq!(a.key(), b.key());
        assert_eq!(b.key(), c.key());
        assert_eq!(a.key().as_str(), "MALE");
        // 原始名称保留大小写
        assert_eq!(a.as_str(), "male");
    }

    #[test]
    fn test_name_is_trimmed() {
        let name = VoiceName::new("  female ").unwrap();
        assert_eq!(name.as_str(), "female");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(VoiceName::new("   "), Err(VoiceError::EmptyName));
    }

    #[test]
    fn test_path_traversal_rejected() {
        assert!(matches!(
            VoiceName::new("../etc/passwd"),
            Err(VoiceError::InvalidName(_))
        ));
        assert!(VoiceName::new("a/b").is_err());
    }

    #[test]
    fn test_long_name_rejected() {
        let long = "a".repeat(101);
        assert_eq!(VoiceName::new(long), Err(VoiceError::NameTooLong(101)));
    }

    #[test]
    fn test_codes_clone_shares_storage() {
        let codes = ReferenceCodes::new(vec![1, 2, 3]);
        let cloned = codes.clone();
        assert_eq!(codes.as_slice().as_ptr(), cloned.as_slice().as_ptr());
        assert_eq!(cloned.len(), 3);
    }
}
