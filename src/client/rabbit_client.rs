//! Broker client
//!
//! A thin wrapper over a `lapin` connection and a single channel:
//! - `connect` opens the connection and channel and turns on publisher
//!   confirms, so `publish` only returns once the broker has taken the message
//! - `publish_event` is the one-shot path: serialize, declare, publish
//! - `send_event` wraps connect, publish and close in the retry policy, so
//!   every attempt starts from a fresh connection and channel
//! - `consume` feeds every delivery of a queue to a handler and acks it
//!
//! Every call is awaited in order; the client is not meant to be shared
//! between tasks.

use futures_util::StreamExt;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicPublishOptions, ConfirmSelectOptions,
};
use lapin::types::{FieldTable, LongString};
use lapin::{Channel, Connection, ConnectionProperties};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::credentials::Credentials;
use crate::client::properties::{QueueSpec, publish_properties};
use crate::client::retry::RetryPolicy;
use crate::config::{BrokerSettings, Settings};
use crate::event::Event;
use crate::utils::{Error, Result};

/// Publishing through the default exchange routes by queue name.
pub const DEFAULT_EXCHANGE: &str = "";

const CLOSE_OK: u16 = 200;

pub struct RabbitClient {
    connection: Connection,
    channel: Channel,
}

impl RabbitClient {
    /// Opens a connection and a channel with publisher confirms enabled.
    pub async fn connect(settings: &BrokerSettings) -> Result<Self> {
        let credentials = Credentials::from(settings);
        credentials.validate()?;

        let props = ConnectionProperties::default()
            .with_connection_name(LongString::from(env!("CARGO_PKG_NAME")));
        let connection = Connection::connect(&credentials.uri(&settings.vhost), props).await?;
        info!(host = %credentials.host, port = credentials.port, "connected to broker");

        let channel = connection.create_channel().await?;
        channel
            .confirm_select(ConfirmSelectOptions::default())
            .await?;
        debug!(channel = channel.id(), "channel opened");

        Ok(Self {
            connection,
            channel,
        })
    }

    pub async fn declare_queue(&self, queue: &QueueSpec) -> Result<()> {
        let declared = self
            .channel
            .queue_declare(&queue.name, queue.options(), queue.arguments())
            .await?;
        debug!(
            queue = %queue.name,
            messages = declared.message_count(),
            consumers = declared.consumer_count(),
            "queue declared"
        );
        Ok(())
    }

    /// Publishes `payload` and waits for the broker's confirm.
    ///
    /// Returns the message id stamped on the message.
    pub async fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        payload: &[u8],
    ) -> Result<String> {
        let (message_id, props) = publish_properties();

        let confirmation = self
            .channel
            .basic_publish(
                exchange,
                routing_key,
                BasicPublishOptions::default(),
                payload,
                props,
            )
            .await?
            .await?;

        if confirmation.is_nack() {
            return Err(Error::Nacked(message_id));
        }

        debug!(%message_id, routing_key, bytes = payload.len(), "message confirmed");
        Ok(message_id)
    }

    /// Serializes `event` and publishes it to `queue` via the default exchange.
    pub async fn publish_event(&self, event: &Event, queue: &QueueSpec) -> Result<String> {
        let body = event.to_vec()?;
        self.declare_queue(queue).await?;
        let message_id = self.publish(DEFAULT_EXCHANGE, &queue.name, &body).await?;
        info!(%message_id, queue = %queue.name, recipient = event.recipient, "event published");
        Ok(message_id)
    }

    /// Connects, publishes `event` to `queue` and closes, once per attempt.
    ///
    /// A failed attempt drops its connection, so a channel the broker has
    /// closed is never reused.
    pub async fn send_event(
        settings: &Settings,
        event: &Event,
        queue: &QueueSpec,
    ) -> Result<String> {
        let policy = RetryPolicy::from(&settings.retry);
        policy
            .run(|attempt| async move {
                debug!(attempt, "publishing on a new connection");
                let client = Self::connect(&settings.broker).await?;
                let message_id = client.publish_event(event, queue).await?;
                // confirmed by the broker: a close failure must not trigger a resend
                if let Err(e) = client.close().await {
                    warn!(%message_id, error = %e, "close after publish failed");
                }
                Ok(message_id)
            })
            .await
    }

    /// Hands every delivery on `queue` to `handler` until the stream ends.
    ///
    /// Deliveries are acked even when the handler fails; the failure is
    /// logged and the message is dropped.
    pub async fn consume<F>(&self, queue: &QueueSpec, mut handler: F) -> Result<()>
    where
        F: FnMut(&[u8]) -> Result<()>,
    {
        self.declare_queue(queue).await?;

        let tag = format!("{}-{}", env!("CARGO_PKG_NAME"), Uuid::new_v4());
        let mut consumer = self
            .channel
            .basic_consume(
                &queue.name,
                &tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await?;
        info!(queue = %queue.name, consumer = %tag, "consuming");

        while let Some(delivery) = consumer.next().await {
            let delivery = delivery?;
            if let Err(e) = handler(&delivery.data) {
                warn!(
                    delivery_tag = delivery.delivery_tag,
                    error = %e,
                    "handler failed, dropping message"
                );
            }
            delivery.acker.ack(BasicAckOptions::default()).await?;
        }

        info!(consumer = %tag, "consumer stream ended");
        Ok(())
    }

    /// Closes the channel, then the connection.
    pub async fn close(self) -> Result<()> {
        self.channel.close(CLOSE_OK, "OK").await?;
        self.connection.close(CLOSE_OK, "OK").await?;
        debug!("connection closed");
        Ok(())
    }
}

impl std::fmt::Debug for RabbitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RabbitClient")
            .field("connection", &self.connection.status().state())
            .field("channel", &self.channel.id())
            .finish()
    }
}
