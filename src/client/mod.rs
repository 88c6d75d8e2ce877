//! The `client` module talks to the message broker.
//!
//! [`RabbitClient`] owns one AMQP connection and one channel and exposes the
//! publish / consume / close operations. The helpers around it build the
//! connection URI, the queue declaration and the per-message properties,
//! and [`RetryPolicy`] decides how often a failing step is repeated.

pub mod credentials;
pub mod listener;
pub mod properties;
pub mod rabbit_client;
pub mod retry;

pub use credentials::Credentials;
pub use listener::{handle_delivery, run_listener};
pub use properties::QueueSpec;
pub use rabbit_client::RabbitClient;
pub use retry::RetryPolicy;

#[cfg(test)]
mod tests;
