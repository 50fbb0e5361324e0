//! HTTP Error Handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
///
/// 与 errno 对应的 HTTP 状态码一并返回
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    ServiceUnavailable(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, i32, &str) {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, errno::NOT_FOUND, msg.as_str()),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, errno::BAD_REQUEST, msg.as_str())
            }
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                errno::INTERNAL_ERROR,
                msg.as_str(),
            ),
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                errno::SERVICE_UNAVAILABLE,
                msg.as_str(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, msg) = self.parts();

        if status.is_server_error() {
            tracing::error!(errno = code, error = %msg, "Request failed");
        } else {
            tracing::warn!(errno = code, error = %msg, "Request rejected");
        }

        (status, Json(ErrorResponse::new(code, msg))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::ModelUnavailable(_) => {
                ApiError::ServiceUnavailable("TTS model is not available.".to_string())
            }
            ApplicationError::ReferenceNotFound(voice) => {
                ApiError::NotFound(format!("Voice '{}' not found and no fallback voice available", voice))
            }
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            // 原因已在应用层记录，这里只返回通用信息
            ApplicationError::InferenceFailure(_) => {
                ApiError::Internal("Failed to generate audio.".to_string())
            }
            ApplicationError::StorageError(msg) => ApiError::Internal(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

/// 请求体无法解析为 JSON 或字段缺失/类型错误，统一按 400 返回
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
