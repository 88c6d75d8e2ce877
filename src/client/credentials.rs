use crate::config::BrokerSettings;
use crate::utils::{Error, Result};

/// Everything needed to open an AMQP connection.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl Credentials {
    /// Builds credentials, trimming surrounding whitespace from every string.
    pub fn new(username: &str, password: &str, host: &str, port: u16) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.trim().to_string(),
            host: host.trim().to_string(),
            port,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Error::InvalidCredentials("host is empty".to_string()));
        }
        if self.port == 0 {
            return Err(Error::InvalidCredentials("port is zero".to_string()));
        }
        Ok(())
    }

    /// Returns the `amqp://` URI for `vhost`.
    ///
    /// User info is only included when a username is set. The vhost is
    /// percent-encoded, so the default `/` vhost becomes `%2F`.
    pub fn uri(&self, vhost: &str) -> String {
        let vhost = urlencoding::encode(vhost);
        if self.username.is_empty() {
            format!("amqp://{}:{}/{}", self.host, self.port, vhost)
        } else {
            format!(
                "amqp://{}:{}@{}:{}/{}",
                urlencoding::encode(&self.username),
                urlencoding::encode(&self.password),
                self.host,
                self.port,
                vhost
            )
        }
    }
}

impl From<&BrokerSettings> for Credentials {
    fn from(settings: &BrokerSettings) -> Self {
        Self::new(
            &settings.username,
            &settings.password,
            &settings.host,
            settings.port,
        )
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
