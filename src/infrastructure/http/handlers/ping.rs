//! Ping Handlers
//!
//! 存活检查

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// 根路径响应
#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// GET / - 存活消息
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "NeuTTS-Air API is running. POST to /generate-tts/ to synthesize audio.",
    })
}

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model_loaded: bool,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: state.model_loaded(),
    })
}
