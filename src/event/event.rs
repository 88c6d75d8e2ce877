use serde::{Deserialize, Deserializer, Serialize};

use crate::event::attachment::Attachment;
use crate::utils::Result;

/// A notification addressed to a single chat.
///
/// This is the body of every message published to the events queue. The
/// JSON encoding keeps non-ASCII text as-is, so a consumer sees exactly the
/// UTF-8 that was sent.
///
/// # Example
///
/// ```rust
/// use eventpost::event::Event;
///
/// let evt = Event::new("disk almost full", 123456789);
/// let json = evt.to_json().unwrap();
/// assert_eq!(json, r#"{"text":"disk almost full","recipient":123456789}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub text: String,
    pub recipient: i64,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attaches: Vec<Attachment>,
}

/// Producers that encode an absent list as `null` are read as "no attachments".
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Attachment>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Attachment>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Event {
    pub fn new(text: impl Into<String>, recipient: i64) -> Self {
        Self {
            text: text.into(),
            recipient,
            attaches: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attaches.push(attachment);
        self
    }

    /// A recipient of `0` addresses nobody; consumers skip such events.
    pub fn is_deliverable(&self) -> bool {
        self.recipient != 0
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }
}
