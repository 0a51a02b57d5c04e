use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["messagesRoot", "baseLocale", "output", "parity", "lookupFunctions"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["baseLocale"], "en");
    assert_eq!(parsed["parity"], "strict");

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "✓ Created .keyschemarc.json\n");
    assert!(test.root().join(".keyschemarc.json").exists());

    let content = test.read_file(".keyschemarc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".keyschemarc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("error: .keyschemarc.json already exists"));
    assert_eq!(test.read_file(".keyschemarc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;

    test.command().arg("init").output()?;
    test.write_file("src/app.tsx", "t(\"common.ok\");\n")?;

    let output = test.generate_command().output()?;
    assert!(
        output.status.success(),
        "Generate should work with initialized config. stdout: {}",
        stdout(&output)
    );

    let output = test.validate_command().output()?;
    assert!(
        output.status.success(),
        "Validate should work with initialized config. stdout: {}",
        stdout(&output)
    );

    Ok(())
}

#[test]
fn test_invalid_config_is_command_error() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file(".keyschemarc.json", r#"{ "baseLocale": "en", "locales": ["en"] }"#)?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("base locale"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("generate"));
    assert!(stdout(&output).contains("validate"));

    Ok(())
}
