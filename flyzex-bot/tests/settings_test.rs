//! Tests for the YAML settings loader and its environment overrides.
//!
//! Kept as a single test: the override checks mutate process-wide
//! environment variables, and parallel test threads would race on them.

use std::io::Write;

use flyzex_bot::Settings;
use tempfile::NamedTempFile;

fn write_settings(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// **Test: Parsing, validation, and environment overrides.**
///
/// **Setup:** A minimal settings file, one with the webapp enabled but no
/// admin key, and one fully configured; BOT_TOKEN/ADMIN_API_KEY/UVICORN_PORT
/// toggled around the assertions.
/// **Action:** `Settings::load` plus the resolved accessors.
/// **Expected:** Defaults fill the optional sections; a keyless enabled
/// webapp is rejected; environment values win while set and the file values
/// come back once cleared; the shipped example template parses.
#[test]
fn settings_parse_validate_and_override() {
    std::env::remove_var("BOT_TOKEN");
    std::env::remove_var("ADMIN_API_KEY");
    std::env::remove_var("UVICORN_PORT");

    let minimal = write_settings(
        r#"
rubika:
  bot_token: "token-123"
  owner_id: "u1"
storage:
  path: "data/storage.json"
"#,
    );
    let settings = Settings::load(minimal.path()).unwrap();
    assert_eq!(settings.rubika.owner_id, "u1");
    assert_eq!(settings.security.rate_limit_burst, 5);
    assert_eq!(settings.xp.message_reward_limit, 20);
    assert_eq!(settings.cups.leaderboard_size, 5);
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.system.timezone, "+03:30");
    assert!(!settings.webapp.enabled);

    let example = Settings::load(std::path::Path::new("../config/settings.example.yaml"));
    assert!(example.is_ok(), "example template must stay parseable");

    let keyless_webapp = write_settings(
        r#"
rubika:
  bot_token: "token-123"
  owner_id: "u1"
storage:
  path: "data/storage.json"
webapp:
  enabled: true
"#,
    );
    assert!(Settings::load(keyless_webapp.path()).is_err());

    let full = write_settings(
        r#"
rubika:
  bot_token: "file-token"
  owner_id: "u1"
storage:
  path: "data/storage.json"
webapp:
  enabled: true
  port: 8000
  admin_api_key: "file-key"
"#,
    );
    let settings = Settings::load(full.path()).unwrap();

    std::env::set_var("BOT_TOKEN", "env-token");
    std::env::set_var("ADMIN_API_KEY", "env-key");
    std::env::set_var("UVICORN_PORT", "9100");

    assert_eq!(settings.bot_token().as_deref(), Some("env-token"));
    assert_eq!(settings.admin_api_key().as_deref(), Some("env-key"));
    assert_eq!(settings.webapp_port(), 9100);

    std::env::remove_var("BOT_TOKEN");
    std::env::remove_var("ADMIN_API_KEY");
    std::env::remove_var("UVICORN_PORT");

    assert_eq!(settings.bot_token().as_deref(), Some("file-token"));
    assert_eq!(settings.admin_api_key().as_deref(), Some("file-key"));
    assert_eq!(settings.webapp_port(), 8000);
}
