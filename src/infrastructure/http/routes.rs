//! HTTP Routes
//!
//! API Endpoints:
//! - /                      GET   存活消息
//! - /generate-tts/         POST  合成语音（Base64 WAV）
//! - /generate-tts/stream   POST  合成语音（audio/wav 附件）
//! - /voices                GET   列出音色
//! - /api/ping              GET   健康检查

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::root))
        .nest("/api", api_routes())
        .merge(tts_routes())
        .route("/voices", get(handlers::list_voices))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/ping", get(handlers::ping))
}

/// TTS 路由（带与不带结尾斜杠均可）
fn tts_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-tts", post(handlers::generate_tts))
        .route("/generate-tts/", post(handlers::generate_tts))
        .route("/generate-tts/stream", post(handlers::generate_tts_stream))
}
