// regexbot-core/tests/config_integration_tests.rs
use anyhow::Result;
use tempfile::NamedTempFile;
use std::io::Write;

use regexbot_core::config::{BotConfig, IgnoreRuleConfig};
use regexbot_core::{RegexBot, RegexBotError};

#[test]
fn test_load_default_config() {
    let config = BotConfig::load_default().unwrap();
    assert_eq!(config.bot_name, "regexbot");
    assert_eq!(config.max_messages, 25);
    assert_eq!(config.max_message_size, 200);
    assert!(config.ignore.iter().any(|r| r.label == "slackbot"));
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
bot_name: "sedbot"
channel_flood_cooldown: 10
global_flood_cooldown: 2
max_messages: 50
max_message_size: 300
attempt_timeout_ms: 250
scan_timeout_secs: 5
ignore:
  - label: "first"
    pattern: "^U0"
  - label: "second"
    pattern: "bot$"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = BotConfig::load_from_file(file.path())?;

    assert_eq!(config.bot_name, "sedbot");
    assert_eq!(config.channel_flood_cooldown, 10);
    assert_eq!(config.global_flood_cooldown, 2);
    assert_eq!(config.max_messages, 50);
    assert_eq!(config.max_message_size, 300);
    assert_eq!(config.attempt_timeout_ms, 250);
    assert_eq!(config.scan_timeout_secs, 5);
    // order is preserved
    assert_eq!(
        config.ignore,
        vec![IgnoreRuleConfig::new("first", "^U0"), IgnoreRuleConfig::new("second", "bot$")]
    );
    Ok(())
}

#[test]
fn test_partial_file_falls_back_to_defaults() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"bot_name: \"fixer\"\n")?;
    let config = BotConfig::load_from_file(file.path())?;
    assert_eq!(config.bot_name, "fixer");
    assert_eq!(config.channel_flood_cooldown, 5);
    assert_eq!(config.global_flood_cooldown, 1);
    assert!(config.ignore.iter().any(|r| r.pattern == "^USLACKBOT$"));
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let err = BotConfig::load_from_file("/definitely/not/here/regexbot.yaml").unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read config file"));
}

#[test]
fn test_invalid_ignore_pattern_in_file_is_fatal() -> Result<()> {
    let yaml_content = r#"
ignore:
  - label: "broken"
    pattern: "(unclosed"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let err = BotConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to compile ignore rule 'broken'"));
    Ok(())
}

#[test]
fn test_bot_construction_rejects_bad_ignore_pattern() {
    let config = BotConfig {
        ignore: vec![IgnoreRuleConfig::new("broken", "[z-a]")],
        ..BotConfig::default()
    };
    match RegexBot::new(config) {
        Err(RegexBotError::IgnoreRuleCompilationError(label, _)) => assert_eq!(label, "broken"),
        other => panic!("expected a compilation error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_malformed_yaml_is_an_error() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"max_messages: [not, a, number]\n")?;
    assert!(BotConfig::load_from_file(file.path()).is_err());
    Ok(())
}
