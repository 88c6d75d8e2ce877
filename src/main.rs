//! CLI for eventpost
//!
//! Subcommands:
//! - `publish`: send one event to the queue and exit
//! - `listen`: consume the queue and log every event until Ctrl-C

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{error, info};

use eventpost::client::{QueueSpec, RabbitClient, handle_delivery, run_listener};
use eventpost::config::{Settings, load_config, load_config_from};
use eventpost::event::{Attachment, Event};
use eventpost::utils::{self, Result};

const DEMO_TEXT: &str = "Привет из Раббит!";

#[derive(Parser)]
#[command(name = "eventpost", version, about = "Publish notification events to RabbitMQ")]
struct Cli {
    /// TOML settings file (default: config/default.toml when present)
    #[arg(long, global = true, env = "EVENTPOST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Publish one event and exit
    Publish {
        /// Message text
        #[arg(long, default_value = DEMO_TEXT)]
        text: String,
        /// Chat id of the recipient
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        recipient: i64,
        /// File to attach; may be repeated
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
        /// Queue name, overrides the configured one
        #[arg(long)]
        queue: Option<String>,
    },
    /// Consume the queue and log incoming events
    Listen {
        /// Queue name, overrides the configured one
        #[arg(long)]
        queue: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            utils::logging::init("info");
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    utils::logging::init(&settings.log.level);

    let result = match cli.command {
        Command::Publish {
            text,
            recipient,
            attachments,
            queue,
        } => run_publish(&settings, text, recipient, &attachments, queue).await,
        Command::Listen { queue } => run_listen(&settings, queue).await,
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let settings = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(settings)
}

fn queue_spec(settings: &Settings, name: Option<String>) -> QueueSpec {
    let mut spec = QueueSpec::from(&settings.queue);
    if let Some(name) = name {
        spec.name = name;
    }
    spec
}

async fn run_publish(
    settings: &Settings,
    text: String,
    recipient: i64,
    attachments: &[PathBuf],
    queue: Option<String>,
) -> Result<()> {
    let mut event = Event::new(text, recipient);
    for path in attachments {
        event = event.with_attachment(Attachment::from_path(path)?);
    }
    let queue = queue_spec(settings, queue);

    let message_id = RabbitClient::send_event(settings, &event, &queue).await?;

    info!(%message_id, "done");
    Ok(())
}

async fn run_listen(settings: &Settings, queue: Option<String>) -> Result<()> {
    let queue = queue_spec(settings, queue);

    tokio::select! {
        res = run_listener(settings, &queue, |data| handle_delivery(data).map(|_| ())) => res,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
            Ok(())
        }
    }
}
