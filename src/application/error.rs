//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 模型启动失败，所有合成请求不可用
    #[error("TTS model is not available: {0}")]
    ModelUnavailable(String),

    /// 无缓存、无磁盘素材、无默认音色
    #[error("Voice reference not found: {0}")]
    ReferenceNotFound(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 推理失败（原因只记录日志，不返回给调用方）
    #[error("Inference failed: {0}")]
    InferenceFailure(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<crate::application::ports::AssetStoreError> for ApplicationError {
    fn from(err: crate::application::ports::AssetStoreError) -> Self {
        Self::StorageError(err.to_string())
    }
}
