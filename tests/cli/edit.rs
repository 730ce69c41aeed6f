use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

const SOURCE: &str = "{\n  \"a\": \"A\",\n  \"b\": \"B\",\n  \"c\": \"C\"\n}\n";

#[test]
fn test_add_missing() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", SOURCE),
        ("fr", "{\n  \"a\": \"Ah\",\n  \"c\": \"Ceh\"\n}\n"),
    ])?;

    let out = test.run(&["add-missing"])?;
    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("Added: b"));
    assert!(out.stdout.contains("Added 1 missing messages"));
    assert_eq!(
        test.read_file("locales/fr.json")?,
        "{\n  \"a\": \"Ah\",\n  \"b\": \"B\",\n  \"c\": \"Ceh\"\n}\n"
    );
    assert_eq!(test.read_file("locales/en.json")?, SOURCE);

    // Nothing left to add.
    let out = test.run(&["add-missing"])?;
    assert!(out.stdout.contains("Added 0 missing messages"));

    Ok(())
}

#[test]
fn test_remove_extraneous() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", SOURCE),
        ("fr", "{\n  \"a\": \"Ah\",\n  \"z\": \"Zed\"\n}\n"),
    ])?;

    let out = test.run(&["remove-extraneous"])?;
    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("Removed: z"));
    assert!(out.stdout.contains("Removed 1 extraneous messages"));
    assert_eq!(test.read_file("locales/fr.json")?, "{\n  \"a\": \"Ah\"\n}\n");

    Ok(())
}

#[test]
fn test_sort() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", "{\n  \"b\": \"B\",\n  \"a\": \"A\"\n}\n"),
        ("fr", "{\n  \"a\": \"Ah\",\n  \"b\": \"Beh\"\n}\n"),
    ])?;

    let out = test.run(&["sort"])?;
    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    insta::assert_snapshot!(out.stdout, @r"
    ✓ locales/en.json - Sorted

    ✓ Sorted 1 file
    ");
    assert_eq!(
        test.read_file("locales/en.json")?,
        "{\n  \"a\": \"A\",\n  \"b\": \"B\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_rename() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", "{\n  \"a\": \"A\"\n}\n"),
        ("fr", "{\n  'a': 'Ah'\n}\n"),
        ("de", "{}"),
    ])?;

    let out = test.run(&["rename", "a", "renamed"])?;
    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("locales/en.json - Renamed"));
    assert!(out.stdout.contains("locales/de.json - Missing"));
    assert!(out.stdout.contains("Renamed 2 messages"));
    assert_eq!(
        test.read_file("locales/fr.json")?,
        "{\n  'renamed': 'Ah'\n}\n"
    );

    Ok(())
}

#[test]
fn test_rename_to_existing_key_fails() -> Result<()> {
    let test = CliTest::with_locales(&[("en", "{\"a\": \"A\", \"b\": \"B\"}")])?;

    let out = test.run(&["rename", "a", "b"])?;
    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("\"b\" already exists"));
    assert_eq!(test.read_file("locales/en.json")?, "{\"a\": \"A\", \"b\": \"B\"}");

    Ok(())
}

#[test]
fn test_format_quotes() -> Result<()> {
    let test = CliTest::with_locales(&[(
        "en",
        "{\n  \"a\": \"This isn't \\\"correct\\\"\",\n  \"b\": \"Fine\"\n}\n",
    )])?;

    let out = test.run(&["format", "-q", "straight"])?;
    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("Formatting: en"));
    assert!(out.stdout.contains("Formatted 1 messages"));
    assert_eq!(
        test.read_file("locales/en.json")?,
        "{\n  \"a\": \"This isn’t “correct”\",\n  \"b\": \"Fine\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_highlight() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", "{\"greeting\": \"Hi {name}\"}"),
        ("de", "{}"),
    ])?;

    let out = test.run(&["highlight", "greeting"])?;
    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("locales/en.json\nHi·{name}\n"));
    assert!(out.stdout.contains("\"greeting\" is missing"));

    Ok(())
}
