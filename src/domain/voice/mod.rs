//! Voice Context - 参考音色限界上下文
//!
//! 职责:
//! - 音色名称校验与归一化（缓存 key）
//! - 参考音色值对象（不可变）

mod errors;
mod reference;
mod value_objects;

pub use errors::VoiceError;
pub use reference::VoiceReference;
pub use value_objects::{ReferenceCodes, VoiceKey, VoiceName};
