//! TTS Handlers
//!
//! - POST /generate-tts/        JSON，音频为 Base64 WAV
//! - POST /generate-tts/stream  audio/wav 附件

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    Json,
};
use std::io::Cursor;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::application::{ApplicationError, SynthesizeSpeechHandler};
use crate::infrastructure::http::dto::{TtsRequest, TtsResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 回退警告 header
pub const VOICE_WARNING_HEADER: &str = "X-Voice-Warning";
/// 实际使用音色 header
pub const VOICE_HEADER: &str = "X-Voice";

fn synthesize_handler(state: &AppState) -> Result<&SynthesizeSpeechHandler, ApiError> {
    state
        .synthesize_handler
        .as_ref()
        .ok_or_else(|| ApplicationError::ModelUnavailable("model failed to load".to_string()).into())
}

/// 合成语音，返回 Base64 WAV
pub async fn generate_tts(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Json<TtsResponse>, ApiError> {
    let Json(req) = payload?;
    let handler = synthesize_handler(&state)?;

    let input_text = req.text.clone();
    let result = handler.handle(req.into()).await?;

    Ok(Json(TtsResponse::new(input_text, result)))
}

/// 合成语音，以 audio/wav 附件流式返回
pub async fn generate_tts_stream(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let handler = synthesize_handler(&state)?;

    let result = handler.handle(req.into()).await?;
    let content_length = result.audio_data.len();

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/wav")
        .header(header::CONTENT_LENGTH, content_length)
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"speech.wav\"",
        )
        .header(VOICE_HEADER, result.voice.as_str());

    // 警告中可能含有非 header 安全字符（如文件路径），无法编码时省略
    if let Some(value) = result
        .warning
        .as_deref()
        .and_then(|w| HeaderValue::from_str(w).ok())
    {
        builder = builder.header(VOICE_WARNING_HEADER, value);
    }

    let stream = ReaderStream::new(Cursor::new(result.audio_data));

    builder
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
