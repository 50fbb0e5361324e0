//! 应用层 - 命令
//!
//! CQRS 命令侧：语音合成（会写入参考音色缓存）

mod synthesize_commands;

pub mod handlers;

pub use synthesize_commands::*;
