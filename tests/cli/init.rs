use anyhow::{Context, Result};
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["sourceLocale"], "en");
    assert_eq!(parsed["path"], "locales");
    assert_eq!(parsed["jsonObj"], false);
    assert!(parsed["ignore"].is_array(), "Config should have 'ignore' list");
    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let out = test.run(&["init"])?;
    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Created .mfvrc.json"));
    assert!(out.stdout.contains("Set `path`"));

    assert!(test.root().join(".mfvrc.json").exists());
    let content = test.read_file(".mfvrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".mfvrc.json", "{}")?;

    let out = test.run(&["init"])?;
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains(".mfvrc.json already exists"));
    assert_eq!(test.read_file(".mfvrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"])?;
    test.write_file("locales/en.json", "{\"a\": \"Hello\"}")?;
    test.write_file("locales/fr.json", "{\"a\": \"Bonjour\"}")?;

    let out = test.run(&[])?;
    assert_eq!(
        out.code,
        Some(0),
        "Validation should work with initialized config. stderr: {}",
        out.stderr
    );

    Ok(())
}
