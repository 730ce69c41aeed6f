use anyhow::Result;
use serde_json::{Value, json};

use crate::CliTest;

#[test]
fn test_print_missing_and_untranslated() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", r#"{"a": "Some text", "b": "Other text", "c": "More"}"#),
        ("fr", r#"{"a": "Some text", "c": "Plus"}"#),
        ("de", r#"{"a": "Etwas", "b": "Anderes", "c": "Mehr"}"#),
    ])?;

    let out = test.run(&["print-missing"])?;
    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);

    let parsed: Value = serde_json::from_str(&out.stdout)?;
    assert_eq!(
        parsed,
        json!({
            "locales/de.json": {},
            "locales/fr.json": {"a": "Some text", "b": "Other text"},
        })
    );

    Ok(())
}

#[test]
fn test_print_missing_ignores_ignore_setting() -> Result<()> {
    let test = CliTest::with_locales(&[("en", r#"{"a": "A"}"#), ("fr", "{}")])?;

    let out = test.run(&["print-missing", "-i", "missing"])?;
    let parsed: Value = serde_json::from_str(&out.stdout)?;
    assert_eq!(parsed["locales/fr.json"], json!({"a": "A"}));

    Ok(())
}
