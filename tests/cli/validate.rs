use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, SCHEMA_PATH, stderr, stdout};

fn project_with_legacy_key() -> Result<CliTest> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file("locales/en/common.json", r#"{ "ok": "OK", "legacy": "Old" }"#)?;
    test.write_file(
        "locales/deprecations.json",
        r#"[{ "key": "common.legacy", "note": "use common.ok" }]"#,
    )?;
    Ok(test)
}

#[test]
fn test_validate_clean_project() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file(
        "src/app.tsx",
        "export const App = () => <p>{t(\"common.ok\")} {t('rbac.role')}</p>;\n",
    )?;

    let output = test.validate_command().output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ Checked 2 key usages in 1 source file - no issues found\n"
    );
    // Validation never writes the schema.
    assert!(!test.exists(SCHEMA_PATH));

    Ok(())
}

#[test]
fn test_validate_unknown_key_fails() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file(
        "src/app.tsx",
        "const a = t(\"common.ok\");\nconst b = t(\"common.doesNotExist\");\n",
    )?;

    assert_cmd_snapshot!(test.validate_command());

    Ok(())
}

#[test]
fn test_validate_deprecated_usage_is_warning() -> Result<()> {
    let test = project_with_legacy_key()?;
    test.write_file("src/app.tsx", "t(\"common.legacy\");\n")?;

    assert_cmd_snapshot!(test.validate_command());

    Ok(())
}

#[test]
fn test_validate_deny_deprecated() -> Result<()> {
    let test = project_with_legacy_key()?;
    test.write_file("src/app.tsx", "t(\"common.legacy\");\n")?;

    assert_cmd_snapshot!(test.validate_command().arg("--deny-deprecated"));

    Ok(())
}

#[test]
fn test_validate_reports_stale_deprecation() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file(
        "locales/deprecations.json",
        r#"[{ "key": "common.gone", "note": "removed" }]"#,
    )?;
    test.write_file("src/app.ts", "t(\"common.ok\");\n")?;

    assert_cmd_snapshot!(test.validate_command());

    Ok(())
}

#[test]
fn test_validate_reports_permissive_parity_gap() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".keyschemarc.json", r#"{ "parity": "permissive" }"#)?;
    test.write_file("locales/en/foo.json", r#"{ "bar": "Bar", "baz": "Baz" }"#)?;
    test.write_file("locales/fr/foo.json", r#"{ "baz": "Baz" }"#)?;
    test.write_file("src/app.ts", "t(\"foo.bar\");\n")?;

    let output = test.validate_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0), "{}", out);
    assert!(out.contains("warning: \"foo.bar\"  parity-gap"));
    assert!(out.contains("= note: present in: en; missing from: fr"));
    assert!(out.contains("1 problem (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_validate_unused_keys_opt_in() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file("src/app.tsx", "t(\"common.ok\");\n")?;

    let output = test.validate_command().output()?;
    assert!(!stdout(&output).contains("unused-key"));

    let output = test.validate_command().arg("--unused").output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("warning: \"rbac.role\"  unused-key"));
    assert!(out.contains("--> ./locales/en/rbac.json:1:1"));
    assert!(!out.contains("\"common.ok\"  unused-key"));

    Ok(())
}

#[test]
fn test_validate_unused_keys_from_config() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file(".keyschemarc.json", r#"{ "reportUnused": true }"#)?;
    test.write_file("src/app.tsx", "t(\"rbac.role\");\n")?;

    let output = test.validate_command().output()?;

    assert!(stdout(&output).contains("warning: \"common.ok\"  unused-key"));

    Ok(())
}

#[test]
fn test_validate_ignores_test_files_and_other_receivers() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file("src/app.test.tsx", "t(\"common.fromTest\");\n")?;
    test.write_file("src/__tests__/helper.ts", "t(\"common.fromHelper\");\n")?;
    test.write_file(
        "src/app.ts",
        "format(\"common.nope\");\nobj.t(\"common.nope\");\nt(`common.${name}`);\n",
    )?;

    let output = test.validate_command().output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert!(stdout(&output).contains("0 key usages in 1 source file"));

    Ok(())
}

#[test]
fn test_validate_custom_lookup_function() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file(
        ".keyschemarc.json",
        r#"{ "lookupFunctions": ["i18n.t"], "includes": ["app"] }"#,
    )?;
    test.write_file("app/page.ts", "i18n.t(\"rbac.missing\");\nt(\"also.ignored\");\n")?;

    let output = test.validate_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: \"rbac.missing\"  unknown-key"));
    assert!(!out.contains("also.ignored"));

    Ok(())
}

#[test]
fn test_validate_reports_pipeline_errors_instead_of_scanning() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file("locales/en/rbac.json", r#"{ "role": true }"#)?;
    test.write_file("src/app.tsx", "t(\"common.doesNotExist\");\n")?;

    let output = test.validate_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("unsupported-leaf"));
    assert!(!out.contains("unknown-key"));
    assert!(out.contains("Schema could not be derived"));

    Ok(())
}
