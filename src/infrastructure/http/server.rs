//! HTTP Server
//!
//! 挂载中间件并监听端口；关闭信号到达后停止接收新请求

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::header::CONTENT_TYPE;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::middleware::request_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 请求体上限（文本最多 500 字符，留足 JSON 余量）
const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", 8000)
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    fn build_router(&self) -> Router {
        // 浏览器端可直接调用，并读取 X-Voice / X-Voice-Warning
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([CONTENT_TYPE])
            .expose_headers(Any)
            .max_age(Duration::from_secs(3600));

        create_routes()
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(middleware::from_fn(request_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        let listener = TcpListener::bind(&addr).await?;
        tracing::info!(addr = %addr, model_loaded = self.state.model_loaded(), "TTS API listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::VoiceName;
    use crate::infrastructure::adapters::{FsVoiceAssetStore, FsVoiceStoreConfig, HoundWavEncoder};
    use crate::infrastructure::memory::InMemoryReferenceCache;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::util::ServiceExt;

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::new("127.0.0.1", 8080);
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(ServerConfig::default().addr(), "0.0.0.0:8000");
    }

    #[tokio::test]
    async fn test_layered_router_allows_cross_origin() {
        let state = AppState::new(
            Arc::new(InMemoryReferenceCache::new()),
            Arc::new(FsVoiceAssetStore::new(FsVoiceStoreConfig::default())),
            None,
            Arc::new(HoundWavEncoder::new()),
            &VoiceName::new("MALE").unwrap(),
        );
        let server = HttpServer::new(ServerConfig::default(), state);

        let response = server
            .build_router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("Origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
