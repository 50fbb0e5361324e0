//! Application State
//!
//! 进程启动时构建一次，通过 Arc 共享给所有请求处理器

use std::sync::Arc;

use crate::application::{
    // Command handlers
    SynthesizeSpeechHandler,
    // Query handlers
    ListVoicesHandler,
    // Services
    Synthesizer, VoiceResolver,
    // Ports
    AudioEncoderPort, ReferenceCachePort, SpeechModelPort, VoiceAssetStorePort,
};
use crate::domain::voice::VoiceName;

/// 应用状态
///
/// 模型加载失败时 `resolver` 与 `synthesize_handler` 为 None，合成请求返回 503
pub struct AppState {
    // ========== Services ==========
    pub resolver: Option<Arc<VoiceResolver>>,

    // ========== Command Handlers ==========
    pub synthesize_handler: Option<SynthesizeSpeechHandler>,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        cache: Arc<dyn ReferenceCachePort>,
        assets: Arc<dyn VoiceAssetStorePort>,
        model: Option<Arc<dyn SpeechModelPort>>,
        encoder: Arc<dyn AudioEncoderPort>,
        default_voice: &VoiceName,
    ) -> Self {
        let (resolver, synthesize_handler) = match model {
            Some(model) => {
                let resolver = Arc::new(VoiceResolver::new(
                    cache.clone(),
                    assets.clone(),
                    model.clone(),
                    default_voice,
                ));
                let synthesizer = Arc::new(Synthesizer::new(model, encoder));
                let handler = SynthesizeSpeechHandler::new(resolver.clone(), synthesizer);
                (Some(resolver), Some(handler))
            }
            None => (None, None),
        };

        Self {
            resolver,
            synthesize_handler,
            list_voices_handler: ListVoicesHandler::new(cache, assets, default_voice),
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.synthesize_handler.is_some()
    }
}
