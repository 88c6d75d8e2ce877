//! AMQP queue arguments and message properties.
//!
//! Kept apart from the connection so the exact values sent to the broker can
//! be checked without one.

use lapin::BasicProperties;
use lapin::options::QueueDeclareOptions;
use lapin::types::{AMQPValue, FieldTable, LongString, ShortString};
use uuid::Uuid;

use crate::config::QueueSettings;

pub const CONTENT_TYPE: &str = "application/json";

/// AMQP delivery mode 2: the broker writes the message to disk.
pub const PERSISTENT: u8 = 2;

const QUEUE_MODE_ARG: &str = "x-queue-mode";

/// Describes the queue to declare before publishing or consuming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSpec {
    pub name: String,
    pub durable: bool,
    pub lazy: bool,
}

impl QueueSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            durable: true,
            lazy: true,
        }
    }

    pub fn options(&self) -> QueueDeclareOptions {
        QueueDeclareOptions {
            durable: self.durable,
            ..QueueDeclareOptions::default()
        }
    }

    pub fn arguments(&self) -> FieldTable {
        let mut args = FieldTable::default();
        if self.lazy {
            args.insert(
                ShortString::from(QUEUE_MODE_ARG),
                AMQPValue::LongString(LongString::from("lazy")),
            );
        }
        args
    }
}

impl From<&QueueSettings> for QueueSpec {
    fn from(settings: &QueueSettings) -> Self {
        Self {
            name: settings.name.clone(),
            durable: settings.durable,
            lazy: settings.lazy,
        }
    }
}

/// Properties for one outgoing message, with a fresh id.
///
/// Returns the id alongside so callers can report it.
pub fn publish_properties() -> (String, BasicProperties) {
    let message_id = Uuid::new_v4().to_string();
    let props = BasicProperties::default()
        .with_message_id(ShortString::from(message_id.clone()))
        .with_content_type(ShortString::from(CONTENT_TYPE))
        .with_delivery_mode(PERSISTENT)
        .with_timestamp(chrono::Utc::now().timestamp().max(0) as u64);
    (message_id, props)
}
