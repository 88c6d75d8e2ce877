//! # eventpost
//!
//! `eventpost` publishes JSON notification events to a RabbitMQ queue and can
//! consume them back. The default target is the `events` queue read by the
//! chat notification bot.
//!
//! ## Core Modules
//!
//! - `event`: the payload (`text`, `recipient`, optional attachments) and its JSON form.
//! - `client`: the AMQP client: connect, declare, publish, consume, close.
//! - `config`: loads settings from defaults, a TOML file and the environment.
//! - `utils`: the crate error type and logging setup.

pub mod client;
pub mod config;
pub mod event;
pub mod utils;

pub use client::{QueueSpec, RabbitClient};
pub use config::Settings;
pub use event::{Attachment, Event};
pub use utils::{Error, Result};
