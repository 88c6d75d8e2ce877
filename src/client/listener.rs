use tracing::{debug, info, warn};

use crate::client::properties::QueueSpec;
use crate::client::rabbit_client::RabbitClient;
use crate::client::retry::RetryPolicy;
use crate::config::Settings;
use crate::event::Event;
use crate::utils::Result;

/// Decodes one delivery and logs the event it carries.
///
/// Events addressed to recipient `0` are skipped. Returns the decoded event
/// when it is deliverable.
pub fn handle_delivery(data: &[u8]) -> Result<Option<Event>> {
    let event = Event::from_slice(data)?;
    if !event.is_deliverable() {
        debug!("event without recipient skipped");
        return Ok(None);
    }
    info!(
        recipient = event.recipient,
        attachments = event.attaches.len(),
        text = %event.text,
        "event received"
    );
    Ok(Some(event))
}

/// Consumes `queue` forever, reconnecting whenever the consumer stops.
///
/// Connecting goes through the configured [`RetryPolicy`]; once it gives up
/// the error is returned. Errors while consuming only trigger a reconnect.
pub async fn run_listener<F>(settings: &Settings, queue: &QueueSpec, mut handler: F) -> Result<()>
where
    F: FnMut(&[u8]) -> Result<()>,
{
    let policy = RetryPolicy::from(&settings.retry);

    loop {
        let client = policy
            .run(|_| RabbitClient::connect(&settings.broker))
            .await?;

        match client.consume(queue, &mut handler).await {
            Ok(()) => warn!(queue = %queue.name, "consumer closed, reconnecting"),
            Err(e) => warn!(queue = %queue.name, error = %e, "consumer failed, reconnecting"),
        }

        if let Err(e) = client.close().await {
            debug!(error = %e, "close after consumer stop failed");
        }
        tokio::time::sleep(policy.delay).await;
        info!(queue = %queue.name, "reconnecting");
    }
}
