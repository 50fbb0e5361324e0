//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Voice name cannot be empty")]
    EmptyName,

    #[error("Voice name too long: {0} chars (max 100)")]
    NameTooLong(usize),

    #[error("Invalid voice name: {0}")]
    InvalidName(String),
}
