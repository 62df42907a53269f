use super::*;
use crate::validation::{NamePolicy, PhonePolicy};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_config() {
    let content = r#"---
server:
  bind: 0.0.0.0:8080
database:
  path: /var/lib/intake/intake.db
session:
  secret_key: abc123
form:
  profile: minimal
---

# Config
"#;
    let config = Config::parse(content).unwrap();
    assert_eq!(config.server.bind, "0.0.0.0:8080");
    assert_eq!(
        config.database.path,
        std::path::PathBuf::from("/var/lib/intake/intake.db")
    );
    assert_eq!(config.session.secret_key, "abc123");
    assert_eq!(config.profile(), Profile::Minimal);
}

#[test]
fn test_parse_minimal_config() {
    let content = r#"---
session:
  secret_key: k
---
"#;
    let config = Config::parse(content).unwrap();
    assert_eq!(config.server.bind, "127.0.0.1:5000"); // default
    assert_eq!(config.profile(), Profile::Rich); // default
    assert_eq!(config.validation.max_reasons, 5);
}

#[test]
fn test_parse_empty_frontmatter_uses_defaults() {
    let config = Config::parse("---\n---\n# Config\n").unwrap();
    assert_eq!(config.database.path, default_database_path());
}

#[test]
fn test_parse_requires_frontmatter() {
    assert!(Config::parse("# Just markdown\n").is_err());
}

#[test]
fn test_rules_follow_profile_and_overrides() {
    let config = Config::parse(
        r#"---
form:
  profile: rich
validation:
  name_policy: strict
  max_reasons: 3
---
"#,
    )
    .unwrap();
    let rules = config.rules();
    assert_eq!(rules.name, NamePolicy::Strict);
    assert_eq!(rules.phone, PhonePolicy::Loose); // rich default
    assert_eq!(rules.max_reasons, 3);

    let minimal = Config::parse("---\nform:\n  profile: minimal\n---\n").unwrap();
    assert_eq!(minimal.rules().phone, PhonePolicy::Digits10);
}

#[test]
fn test_invalid_reason_bounds_rejected() {
    let err = Config::parse("---\nvalidation:\n  min_reasons: 0\n---\n").unwrap_err();
    assert!(err.to_string().contains("min_reasons"));

    let err =
        Config::parse("---\nvalidation:\n  min_reasons: 4\n  max_reasons: 2\n---\n").unwrap_err();
    assert!(err.to_string().contains("must not exceed"));
}

#[test]
fn test_unknown_policy_rejected() {
    assert!(Config::parse("---\nvalidation:\n  phone_policy: fuzzy\n---\n").is_err());
}

#[test]
fn test_intro_notice_defaults_and_overrides() {
    let rich = Config::parse("---\n---\n").unwrap();
    assert_eq!(
        rich.intro_notice().as_deref(),
        Some(crate::profile::RICH_INTRO_NOTICE)
    );

    let disabled = Config::parse("---\nform:\n  intro_notice: \"\"\n---\n").unwrap();
    assert_eq!(disabled.intro_notice(), None);

    let minimal = Config::parse("---\nform:\n  profile: minimal\n---\n").unwrap();
    assert_eq!(minimal.intro_notice(), None);
    assert_eq!(minimal.title(), "Contact Details");
}

#[test]
fn test_validate_requires_secret_key() {
    let config = Config::parse("---\n---\n").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("secret_key"));
}

#[test]
fn test_validate_rejects_bad_bind() {
    let config = Config::parse(
        "---\nserver:\n  bind: localhost\nsession:\n  secret_key: k\n---\n",
    )
    .unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_render_initial_round_trips() {
    let content = Config::render_initial(Profile::Minimal, "deadbeef");
    let config = Config::parse(&content).unwrap();
    assert_eq!(config.profile(), Profile::Minimal);
    assert_eq!(config.session.secret_key, "deadbeef");
    config.validate().unwrap();
}

#[test]
#[serial]
fn test_env_overrides_applied_on_load() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.md");
    fs::write(&path, Config::render_initial(Profile::Rich, "from-file")).unwrap();

    std::env::set_var(ENV_SECRET_KEY, "from-env");
    std::env::set_var(ENV_BIND, "127.0.0.1:6000");
    let loaded = Config::load_from(&path);
    std::env::remove_var(ENV_SECRET_KEY);
    std::env::remove_var(ENV_BIND);

    let config = loaded.unwrap();
    assert_eq!(config.session.secret_key, "from-env");
    assert_eq!(config.server.bind, "127.0.0.1:6000");
}

#[test]
#[serial]
fn test_load_from_missing_file() {
    let tmp = TempDir::new().unwrap();
    let err = Config::load_from(&tmp.path().join("nope.md")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config"));
}
