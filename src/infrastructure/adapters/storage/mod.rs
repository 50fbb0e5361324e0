//! Storage Adapter - 参考音色素材

mod fs_voice_store;

pub use fs_voice_store::{FsVoiceAssetStore, FsVoiceStoreConfig};
