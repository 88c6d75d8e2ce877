//! The `event` module defines the payload that travels through the queue.
//!
//! An [`Event`] carries a text, the numeric chat id of its recipient and an
//! optional list of file attachments. It is serialized to JSON before being
//! handed to the broker.

pub mod attachment;
pub mod event;

pub use attachment::{Attachment, AttachmentKind};
pub use event::Event;
