use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use super::settings::{PartialSettings, Settings};
use super::{load_config, load_config_from};

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.broker.host, "127.0.0.1");
    assert_eq!(settings.broker.port, 5672);
    assert_eq!(settings.broker.username, "guest");
    assert_eq!(settings.broker.password, "guest");
    assert_eq!(settings.queue.name, "events");
    assert!(settings.queue.durable);
    assert_eq!(settings.retry.attempts, 1);
}

#[test]
fn test_empty_partial_merges_to_defaults() {
    let merged = PartialSettings::default().merge(Settings::default());
    assert_eq!(merged, Settings::default());
}

#[test]
fn test_debug_hides_password() {
    let printed = format!("{:?}", Settings::default().broker);
    assert!(printed.contains("password: \"***\""));
    assert!(printed.contains("username: \"guest\""));
}

#[test]
#[serial]
fn test_load_config_from_file_overrides_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let path = tmp.path().join("custom.toml");
    let toml = r#"
        [broker]
        host = "rabbit.internal"
        port = 5673

        [queue]
        name = "alerts"
        lazy = false

        [retry]
        attempts = 0
    "#;
    fs::write(&path, toml).expect("write config file");

    let cfg = temp_env::with_vars_unset(["EVENTPOST_BROKER__HOST"], || {
        load_config_from(&path).expect("load_config_from failed")
    });
    assert_eq!(cfg.broker.host, "rabbit.internal");
    assert_eq!(cfg.broker.port, 5673);
    assert_eq!(cfg.broker.username, "guest");
    assert_eq!(cfg.queue.name, "alerts");
    assert!(!cfg.queue.lazy);
    assert!(cfg.queue.durable);
    assert_eq!(cfg.retry.attempts, 1);
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    let tmp = TempDir::new().expect("create tempdir");
    assert!(load_config_from(&tmp.path().join("nope.toml")).is_err());
}

#[test]
#[serial]
fn test_env_overrides_defaults() {
    let cfg = temp_env::with_vars(
        [
            ("EVENTPOST_BROKER__HOST", Some("10.0.0.5")),
            ("EVENTPOST_BROKER__PORT", Some("5999")),
            ("EVENTPOST_RETRY__DELAY_MS", Some("250")),
        ],
        || load_config().expect("load_config failed"),
    );
    assert_eq!(cfg.broker.host, "10.0.0.5");
    assert_eq!(cfg.broker.port, 5999);
    assert_eq!(cfg.retry.delay_ms, 250);
    assert_eq!(cfg.queue.name, "events");
}
