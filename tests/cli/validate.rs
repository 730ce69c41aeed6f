use anyhow::Result;
use serde_json::Value;

use crate::CliTest;

const SOURCE: &str = r#"{
  "greeting": "Hello {name}",
  "farewell": "Goodbye"
}
"#;

const TARGET: &str = r#"{
  "greeting": "Bonjour {nom}",
  "extra": "En trop"
}
"#;

#[test]
fn test_clean_locales() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", SOURCE),
        ("fr", "{\"greeting\": \"Bonjour {name}\", \"farewell\": \"Au revoir\"}"),
    ])?;

    let out = test.run(&["validate"])?;
    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("Total locales"));
    assert!(out.stdout.contains("Checked 2 locale files - no problems found"));

    Ok(())
}

#[test]
fn test_default_command_validates() -> Result<()> {
    let test = CliTest::with_locales(&[("en", SOURCE), ("fr", TARGET)])?;

    let out = test.run(&[])?;
    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("locales/fr.json"));
    assert!(out.stdout.contains("  argument"));
    assert!(out.stdout.contains("  extraneous"));
    assert!(out.stdout.contains("String missing from locale file."));
    assert!(out.stdout.contains("3 problems (3 errors, 0 warnings)"));
    assert!(
        out.stderr
            .contains("Errors were reported in at least one locale.")
    );

    Ok(())
}

#[test]
fn test_issue_points_at_line() -> Result<()> {
    let test = CliTest::with_locales(&[("en", SOURCE), ("fr", TARGET)])?;

    let out = test.run(&["--ignore", "missing,argument"])?;
    assert!(out.stdout.contains("--> locales/fr.json:3\n"));
    assert!(out.stdout.contains("3 |   \"extra\": \"En trop\""));
    assert!(out.stdout.contains("1 problems (1 error, 0 warnings) - 2 ignored"));
    assert_eq!(out.code, Some(1));

    Ok(())
}

#[test]
fn test_ignore_every_error() -> Result<()> {
    let test = CliTest::with_locales(&[("en", SOURCE), ("fr", TARGET)])?;

    let out = test.run(&["-i", "missing, argument, extraneous"])?;
    assert_eq!(out.code, Some(0), "stdout: {}", out.stdout);
    assert!(out.stdout.contains("no problems found - 3 ignored"));

    Ok(())
}

#[test]
fn test_unknown_ignore_type_is_an_error() -> Result<()> {
    let test = CliTest::with_locales(&[("en", SOURCE)])?;

    let out = test.run(&["-i", "nonsense"])?;
    assert_eq!(out.code, Some(2));
    assert!(out.stderr.starts_with("Error:"));

    Ok(())
}

#[test]
fn test_no_issues_prints_totals_only() -> Result<()> {
    let test = CliTest::with_locales(&[("en", SOURCE), ("fr", TARGET)])?;

    let out = test.run(&["--no-issues"])?;
    assert!(!out.stdout.contains("-->"));
    assert!(out.stdout.contains("3 problems (3 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_locales_filter() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", SOURCE),
        ("fr", TARGET),
        ("de", "{\"greeting\": \"Hallo {name}\", \"farewell\": \"Tschüss\"}"),
    ])?;

    let out = test.run(&["-l", "de"])?;
    assert_eq!(out.code, Some(0), "stdout: {}", out.stdout);
    assert!(!out.stdout.contains("fr.json"));

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let test = CliTest::with_locales(&[("en", SOURCE), ("fr", TARGET)])?;

    let out = test.run(&["--json"])?;
    assert_eq!(out.code, Some(1));
    let parsed: Value = serde_json::from_str(&out.stdout)?;
    let fr = parsed
        .as_array()
        .and_then(|locales| locales.iter().find(|l| l["locale"] == "fr"))
        .expect("fr outcome");
    assert_eq!(fr["file"], "locales/fr.json");
    assert_eq!(fr["totals"]["errors"], 3);
    assert!(
        fr["issues"]
            .as_array()
            .unwrap()
            .iter()
            .any(|issue| issue["type"] == "extraneous" && issue["key"] == "extra")
    );

    Ok(())
}

#[test]
fn test_missing_source_locale() -> Result<()> {
    let test = CliTest::with_locales(&[("fr", TARGET)])?;

    let out = test.run(&["-s", "de"])?;
    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("Error:"));

    Ok(())
}

#[test]
fn test_config_file_sets_path() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".mfvrc.json", r#"{"path": "i18n/*", "sourceLocale": "en"}"#)?;
    test.write_file("i18n/app/en.json", SOURCE)?;
    test.write_file("i18n/app/fr.json", TARGET)?;
    test.write_file("i18n/admin/en.json", "{\"a\": \"A\"}")?;

    let out = test.run(&[])?;
    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("i18n/app/fr.json"));
    assert!(out.stdout.contains("Total i18n/admin, i18n/app"));

    Ok(())
}
