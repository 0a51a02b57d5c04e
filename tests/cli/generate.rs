use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use sha2::{Digest, Sha256};

use crate::{CliTest, HASH_PATH, SCHEMA_PATH, hash_filters, stderr, stdout};

#[test]
fn test_generate_two_namespaces() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains(
        "✓ Generated 2 keys in 2 namespaces from 2 locale files -> ./src/i18n/keys.generated.ts"
    ));

    let schema = test.read_file(SCHEMA_PATH)?;
    assert_eq!(
        schema,
        r#"// This file is generated by keyschema. Do not modify manually.
// Regenerate with: keyschema generate
// Namespaces: common, rbac
// Keys: 2

export interface TranslationKeys {
  // common
  "common.ok": string;
  // rbac
  "rbac.role": string;
}

export type TranslationKey = keyof TranslationKeys;

export const TRANSLATION_KEYS: readonly TranslationKey[] = [
  "common.ok",
  "rbac.role",
] as const;
"#
    );

    let hash = hex::encode(Sha256::digest(schema.as_bytes()));
    assert_eq!(
        test.read_file(HASH_PATH)?,
        format!("{}  keys.generated.ts\n", hash)
    );

    Ok(())
}

#[test]
fn test_generate_is_deterministic() -> Result<()> {
    let first = CliTest::new()?;
    first.write_file("locales/en/zeta.json", r#"{ "b": "B", "a": { "y": "Y", "x": "X" } }"#)?;
    first.write_file("locales/en/alpha.json", r#"{ "k": "K" }"#)?;

    let second = CliTest::new()?;
    second.write_file("locales/en/alpha.json", r#"{ "k": "K" }"#)?;
    second.write_file("locales/en/zeta.json", r#"{ "a": { "x": "X", "y": "Y" }, "b": "B" }"#)?;

    assert!(first.generate_command().status()?.success());
    let schema = first.read_file(SCHEMA_PATH)?;
    let hash = first.read_file(HASH_PATH)?;

    // Re-running over identical inputs does not change a byte.
    assert!(first.generate_command().status()?.success());
    assert_eq!(first.read_file(SCHEMA_PATH)?, schema);
    assert_eq!(first.read_file(HASH_PATH)?, hash);

    // Key order and file creation order in the sources do not matter either.
    assert!(second.generate_command().status()?.success());
    assert_eq!(second.read_file(SCHEMA_PATH)?, schema);
    assert_eq!(second.read_file(HASH_PATH)?, hash);

    assert!(schema.contains(
        "  \"alpha.k\": string;\n  // zeta\n  \"zeta.a.x\": string;\n  \"zeta.a.y\": string;\n  \"zeta.b\": string;\n"
    ));

    Ok(())
}

#[test]
fn test_generate_conflict_aborts_without_writing() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file("locales/en/common.json", r#"{ "id": "ID" }"#)?;
    test.write_file("locales/en/legacy.json", r#"{ "common": { "id": "Id" } }"#)?;
    test.write_file(".keyschemarc.json", r#"{ "ungroupedNamespace": "legacy" }"#)?;

    assert_cmd_snapshot!(test.generate_command());
    assert!(!test.exists(SCHEMA_PATH));
    assert!(!test.exists(HASH_PATH));

    Ok(())
}

fn project_with_parity_gap() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file("locales/en/foo.json", r#"{ "bar": "Bar", "baz": "Baz" }"#)?;
    test.write_file("locales/fr/foo.json", r#"{ "baz": "Baz" }"#)?;
    Ok(test)
}

#[test]
fn test_generate_parity_gap_strict() -> Result<()> {
    let test = project_with_parity_gap()?;

    assert_cmd_snapshot!(test.generate_command());
    assert!(!test.exists(SCHEMA_PATH));

    Ok(())
}

#[test]
fn test_generate_parity_gap_permissive() -> Result<()> {
    let test = project_with_parity_gap()?;

    insta::with_settings!({ filters => hash_filters() }, {
        assert_cmd_snapshot!(test.generate_command().arg("--permissive"));
    });

    let schema = test.read_file(SCHEMA_PATH)?;
    assert!(schema.contains("\"foo.bar\": string;"));
    assert!(schema.contains("// Regenerate with: keyschema generate --permissive\n"));

    Ok(())
}

#[test]
fn test_generate_locales_flag_limits_comparison() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/en/foo.json", r#"{ "bar": "Bar" }"#)?;
    test.write_file("locales/fr/foo.json", r#"{ "bar": "Bar" }"#)?;
    test.write_file("locales/de/foo.json", "{}")?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("missing from: de"));

    let output = test.generate_command().args(["--locales", "fr"]).output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));

    Ok(())
}

#[test]
fn test_generate_deprecation_keeps_key() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/en/common.json", r#"{ "ok": "OK", "legacy": "Old" }"#)?;
    test.write_file(
        "locales/deprecations.json",
        r#"[{ "key": "common.legacy", "note": "use common.ok" }]"#,
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert!(stdout(&output).contains("- deprecated: 1"));

    let schema = test.read_file(SCHEMA_PATH)?;
    assert!(schema.contains(
        "  /** @deprecated Migrate this entry: use common.ok */\n  \"common.legacy\": string;\n"
    ));
    assert!(schema.contains("  \"common.legacy\",\n  \"common.ok\",\n"));

    Ok(())
}

#[test]
fn test_generate_stale_deprecation_is_warning() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file(
        "locales/deprecations.json",
        r#"[{ "key": "common.gone", "note": "removed" }]"#,
    )?;

    insta::with_settings!({ filters => hash_filters() }, {
        assert_cmd_snapshot!(test.generate_command());
    });
    assert!(test.exists(SCHEMA_PATH));

    Ok(())
}

#[test]
fn test_generate_malformed_source_reports_position() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file("locales/en/rbac.json", "{\n  \"role\": \"Role\",\n}")?;

    let output = test.generate_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("malformed-source"));
    assert!(out.contains("--> ./locales/en/rbac.json:3:"));
    assert!(!test.exists(SCHEMA_PATH));

    Ok(())
}

#[test]
fn test_generate_unsupported_leaf() -> Result<()> {
    let test = CliTest::with_file("locales/en/common.json", r#"{ "count": 3 }"#)?;

    let output = test.generate_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: \"count\"  unsupported-leaf"));
    assert!(out.contains("found number, expected string"));

    Ok(())
}

#[test]
fn test_generate_manifest_order() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file("locales/namespaces.json", r#"["rbac", "common"]"#)?;

    assert!(test.generate_command().status()?.success());
    let schema = test.read_file(SCHEMA_PATH)?;

    assert!(schema.contains("// Namespaces: rbac, common\n"));
    let rbac = schema.find("\"rbac.role\": string").unwrap();
    let common = schema.find("\"common.ok\": string").unwrap();
    assert!(rbac < common);

    Ok(())
}

#[test]
fn test_generate_missing_namespace_from_manifest() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    test.write_file("locales/namespaces.json", r#"["common", "rbac", "billing"]"#)?;

    let output = test.generate_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: \"billing\"  missing-namespace"));
    assert!(out.contains("--> ./locales/en/billing.json"));
    assert!(!test.exists(SCHEMA_PATH));

    Ok(())
}

#[test]
fn test_generate_output_override() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;

    let output = test
        .generate_command()
        .args(["--output", "gen/keys.ts", "--locales", "fr"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert!(test.exists("gen/keys.ts"));
    assert!(test.read_file("gen/keys.ts.sha256")?.ends_with("  keys.ts\n"));
    assert!(!test.exists(SCHEMA_PATH));
    assert!(test.read_file("gen/keys.ts")?.starts_with(
        "// This file is generated by keyschema. Do not modify manually.\n\
         // Regenerate with: keyschema generate --locales fr --output gen/keys.ts\n"
    ));

    // Checking with the recorded invocation passes.
    let output = test
        .generate_command()
        .args(["--check", "--output", "gen/keys.ts", "--locales", "fr"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));

    Ok(())
}

#[test]
fn test_check_passes_after_generate() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    assert!(test.generate_command().status()?.success());

    let output = test.generate_command().arg("--check").output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert!(stdout(&output).contains("✓ ./src/i18n/keys.generated.ts is up to date (2 keys)"));

    Ok(())
}

#[test]
fn test_check_reports_missing_artifact_without_writing() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;

    assert_cmd_snapshot!(test.generate_command().arg("--check"));
    assert!(!test.exists(SCHEMA_PATH));

    Ok(())
}

#[test]
fn test_check_detects_stale_sources() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    assert!(test.generate_command().status()?.success());
    let committed = test.read_file(SCHEMA_PATH)?;

    test.write_file("locales/en/rbac.json", r#"{ "role": "Role", "admin": "Admin" }"#)?;

    assert_cmd_snapshot!(test.generate_command().arg("--check"));
    assert_eq!(test.read_file(SCHEMA_PATH)?, committed);

    Ok(())
}

#[test]
fn test_check_detects_hand_edit() -> Result<()> {
    let test = CliTest::with_two_namespaces()?;
    assert!(test.generate_command().status()?.success());

    let edited = test
        .read_file(SCHEMA_PATH)?
        .replace("  \"rbac.role\": string;\n", "  \"rbac.role\": string;\n  \"rbac.extra\": string;\n");
    test.write_file(SCHEMA_PATH, &edited)?;

    insta::with_settings!({ filters => hash_filters() }, {
        assert_cmd_snapshot!(test.generate_command().arg("--check"));
    });

    Ok(())
}

#[test]
fn test_generate_missing_base_locale_is_command_error() -> Result<()> {
    let test = CliTest::with_file("locales/fr/common.json", "{}")?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Base locale 'en' not found"));

    Ok(())
}

#[test]
fn test_generate_base_locale_override() -> Result<()> {
    let test = CliTest::with_file("locales/fr/common.json", r#"{ "ok": "D'accord" }"#)?;

    let output = test
        .generate_command()
        .args(["--base-locale", "fr"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(test.read_file(SCHEMA_PATH)?.contains("\"common.ok\": string;"));

    Ok(())
}
