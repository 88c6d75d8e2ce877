//! The `error` module defines the error type shared by every part of
//! `eventpost`.
//!
//! Broker, serialization, configuration and I/O failures are all surfaced as
//! variants of [`Error`] so callers can propagate them with `?`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("amqp error: {0}")]
    Amqp(#[from] lapin::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("broker rejected message {0}")]
    Nacked(String),
}

pub type Result<T> = std::result::Result<T, Error>;
