//! Voice Context - 参考音色

use super::ReferenceCodes;

/// 参考音色：转写文本 + 编码后的参考音频
///
/// 不变量:
/// - 创建后不可变（无 setter）
/// - 转写文本原样保存，空文本也合法
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceReference {
    text: String,
    codes: ReferenceCodes,
}

impl VoiceReference {
    pub fn new(text: impl Into<String>, codes: impl Into<ReferenceCodes>) -> Self {
        Self {
            text: text.into(),
            codes: codes.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn codes(&self) -> &ReferenceCodes {
        &self.codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_creation() {
        let reference = VoiceReference::new("Hello there.", vec![7, 8, 9]);
        assert_eq!(reference.text(), "Hello there.");
        assert_eq!(reference.codes().as_slice(), &[7, 8, 9]);
    }

    #[test]
    fn test_whitespace_transcript_kept_verbatim() {
        let reference = VoiceReference::new("  \n", vec![1]);
        assert_eq!(reference.text(), "  \n");
    }
}
