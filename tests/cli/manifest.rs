use anyhow::Result;

use crate::{CliTest, stdout};

const MANIFEST_PATH: &str = "locales/namespaces.json";

#[test]
fn test_manifest_freezes_alphabetical_order() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;

    let output = test.manifest_command().output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert!(stdout(&output).contains("✓ Wrote 2 namespaces to ./locales/namespaces.json"));
    assert_eq!(
        test.read_file(MANIFEST_PATH)?,
        "[\n  \"common\",\n  \"rbac\"\n]\n"
    );

    Ok(())
}

#[test]
fn test_manifest_keeps_order_adds_unlisted_and_drops_missing() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file("locales/en/admin/users.json", r#"{ "title": "Users" }"#)?;
    test.write_file(MANIFEST_PATH, r#"["rbac", "billing", "common"]"#)?;

    let output = test.manifest_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0), "{}", out);
    assert!(out.contains("- added: admin.users"));
    assert!(out.contains("- dropped: billing"));
    assert_eq!(
        test.read_file(MANIFEST_PATH)?,
        "[\n  \"rbac\",\n  \"common\",\n  \"admin.users\"\n]\n"
    );

    // The frozen manifest is now consistent with the sources.
    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert!(!stdout(&output).contains("unlisted-namespace"));

    Ok(())
}

#[test]
fn test_manifest_places_ungrouped_namespace_last() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file("locales/en/app.json", r#"{ "title": "App" }"#)?;
    test.write_file(".keyschemarc.json", r#"{ "ungroupedNamespace": "app" }"#)?;

    assert!(test.manifest_command().status()?.success());

    assert_eq!(
        test.read_file(MANIFEST_PATH)?,
        "[\n  \"common\",\n  \"rbac\",\n  \"app\"\n]\n"
    );

    Ok(())
}

#[test]
fn test_manifest_not_written_when_sources_are_malformed() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file("locales/en/rbac.json", "{ \"role\": ")?;

    let output = test.manifest_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("malformed-source"));
    assert!(out.contains("Manifest not written"));
    assert!(!test.exists(MANIFEST_PATH));

    Ok(())
}

#[test]
fn test_manifest_not_overwritten_when_malformed() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file(MANIFEST_PATH, r#"{ "order": ["rbac"] }"#)?;

    let output = test.manifest_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(test.read_file(MANIFEST_PATH)?, r#"{ "order": ["rbac"] }"#);

    Ok(())
}
