//! Synthesize Commands

/// 文本最小长度（字符）
pub const MIN_TEXT_CHARS: usize = 3;
/// 文本最大长度（字符）
pub const MAX_TEXT_CHARS: usize = 500;

/// 合成语音命令
#[derive(Debug, Clone)]
pub struct SynthesizeSpeech {
    pub text: String,
    /// 请求的音色名称（大小写不敏感）
    pub voice: String,
}

/// 合成语音响应
#[derive(Debug, Clone)]
pub struct SynthesizeSpeechResponse {
    /// WAV 容器字节
    pub audio_data: Vec<u8>,
    pub sample_rate: u32,
    pub duration_ms: u64,
    /// 实际使用的音色
    pub voice: String,
    /// 请求的音色
    pub requested_voice: String,
    /// 回退警告
    pub warning: Option<String>,
}
