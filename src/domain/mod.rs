//! Domain Layer - 领域层
//!
//! Voice Context: 参考音色（转写文本 + 编码后的参考音频）

pub mod voice;
