use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes the broker connection, the target queue, the retry policy and
/// the log level.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub broker: BrokerSettings,
    pub queue: QueueSettings,
    pub retry: RetrySettings,
    pub log: LogSettings,
}

/// Where the broker lives and how to log in.
#[derive(Deserialize, Clone, PartialEq)]
pub struct BrokerSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub vhost: String,
}

impl std::fmt::Debug for BrokerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("vhost", &self.vhost)
            .finish()
    }
}

/// The queue events are published to and consumed from.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct QueueSettings {
    pub name: String,
    pub durable: bool,
    pub lazy: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RetrySettings {
    pub attempts: u32,
    pub delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LogSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize, Default)]
pub struct PartialSettings {
    pub broker: Option<PartialBrokerSettings>,
    pub queue: Option<PartialQueueSettings>,
    pub retry: Option<PartialRetrySettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PartialBrokerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub vhost: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PartialQueueSettings {
    pub name: Option<String>,
    pub durable: Option<bool>,
    pub lazy: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PartialRetrySettings {
    pub attempts: Option<u32>,
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

impl PartialSettings {
    /// Fills every missing value from `defaults`.
    pub fn merge(self, defaults: Settings) -> Settings {
        let broker = self.broker.unwrap_or_default();
        let queue = self.queue.unwrap_or_default();
        let retry = self.retry.unwrap_or_default();
        let log = self.log.unwrap_or_default();

        Settings {
            broker: BrokerSettings {
                host: broker.host.unwrap_or(defaults.broker.host),
                port: broker.port.unwrap_or(defaults.broker.port),
                username: broker.username.unwrap_or(defaults.broker.username),
                password: broker.password.unwrap_or(defaults.broker.password),
                vhost: broker.vhost.unwrap_or(defaults.broker.vhost),
            },
            queue: QueueSettings {
                name: queue.name.unwrap_or(defaults.queue.name),
                durable: queue.durable.unwrap_or(defaults.queue.durable),
                lazy: queue.lazy.unwrap_or(defaults.queue.lazy),
            },
            retry: RetrySettings {
                // zero attempts would never run the operation
                attempts: retry.attempts.unwrap_or(defaults.retry.attempts).max(1),
                delay_ms: retry.delay_ms.unwrap_or(defaults.retry.delay_ms),
            },
            log: LogSettings {
                level: log.level.unwrap_or(defaults.log.level),
            },
        }
    }
}

/// Provides default values for `Settings`.
///
/// A local RabbitMQ with the stock `guest` account and an `events` queue.
impl Default for Settings {
    fn default() -> Self {
        Self {
            broker: BrokerSettings {
                host: "127.0.0.1".to_string(),
                port: 5672,
                username: "guest".to_string(),
                password: "guest".to_string(),
                vhost: "/".to_string(),
            },
            queue: QueueSettings {
                name: "events".to_string(),
                durable: true,
                lazy: true,
            },
            retry: RetrySettings {
                attempts: 1,
                delay_ms: 1000,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}
