//! HTTP Speech Model - 调用外部模型推理服务
//!
//! 实现 SpeechModelPort trait
//!
//! 外部模型 API:
//! POST {base_url}/encode_reference
//!   Request:  {"audio_path": "..."}  (JSON，模型服务自行读取文件)
//!   Response: {"codes": [..]}        (JSON)
//! POST {base_url}/infer
//!   Request:  {"text": "...", "ref_codes": [..], "ref_text": "..."}  (JSON)
//!   Response: 原始 f32 小端单声道 PCM，采样率在 X-Sample-Rate header
//! GET  {base_url}/health

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::application::ports::{ModelError, SpeechModelPort, Waveform, MODEL_SAMPLE_RATE};
use crate::domain::voice::ReferenceCodes;

#[derive(Debug, Serialize)]
struct EncodeReferenceRequest<'a> {
    audio_path: &'a str,
}

#[derive(Debug, Deserialize)]
struct EncodeReferenceResponse {
    codes: Vec<i32>,
}

#[derive(Debug, Serialize)]
struct InferHttpRequest<'a> {
    text: &'a str,
    ref_codes: &'a [i32],
    ref_text: &'a str,
}

/// HTTP 模型客户端配置
#[derive(Debug, Clone)]
pub struct HttpSpeechModelConfig {
    /// 模型服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpSpeechModelConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            timeout_secs: 300,
        }
    }
}

impl HttpSpeechModelConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 模型客户端
pub struct HttpSpeechModel {
    client: Client,
    config: HttpSpeechModelConfig,
}

impl HttpSpeechModel {
    pub fn new(config: HttpSpeechModelConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ModelError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ModelError::InvalidResponse(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        Ok(response)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ModelError {
    if e.is_timeout() {
        ModelError::Timeout
    } else if e.is_connect() {
        ModelError::NetworkError(format!("Cannot connect to model service: {}", e))
    } else {
        ModelError::NetworkError(e.to_string())
    }
}

/// 解析原始 f32 小端 PCM
fn decode_f32_le(bytes: &[u8]) -> Result<Vec<f32>, ModelError> {
    if bytes.len() % 4 != 0 {
        return Err(ModelError::InvalidResponse(format!(
            "PCM payload length {} is not a multiple of 4",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

#[async_trait]
impl SpeechModelPort for HttpSpeechModel {
    async fn encode_reference(&self, audio_path: &Path) -> Result<ReferenceCodes, ModelError> {
        let path = audio_path.to_string_lossy();
        tracing::debug!(url = %self.url("encode_reference"), path = %path, "Encoding reference audio");

        let response = self
            .post_json("encode_reference", &EncodeReferenceRequest { audio_path: &*path })
            .await
            .map_err(|e| match e {
                ModelError::InvalidResponse(msg) => ModelError::EncodeFailed(msg),
                other => other,
            })?;

        let body: EncodeReferenceResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("Failed to parse codes: {}", e)))?;

        Ok(ReferenceCodes::new(body.codes))
    }

    async fn infer(
        &self,
        text: &str,
        ref_codes: &ReferenceCodes,
        ref_text: &str,
    ) -> Result<Waveform, ModelError> {
        let request = InferHttpRequest {
            text,
            ref_codes: ref_codes.as_slice(),
            ref_text,
        };

        tracing::debug!(
            url = %self.url("infer"),
            text_len = text.len(),
            ref_codes = ref_codes.len(),
            "Sending inference request"
        );

        let response = self
            .post_json("infer", &request)
            .await
            .map_err(|e| match e {
                ModelError::InvalidResponse(msg) => ModelError::InferenceFailed(msg),
                other => other,
            })?;

        let sample_rate = response
            .headers()
            .get("X-Sample-Rate")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(MODEL_SAMPLE_RATE);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("Failed to read audio: {}", e)))?;
        let samples = decode_f32_le(&bytes)?;

        tracing::debug!(samples = samples.len(), sample_rate = sample_rate, "Inference completed");

        Ok(Waveform {
            samples,
            sample_rate,
        })
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.url("health"))
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
