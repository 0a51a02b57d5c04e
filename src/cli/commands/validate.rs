use anyhow::Result;

use super::super::args::ValidateCommand;
use super::{CommandResult, CommandSummary, ValidateSummary, helper::finish};
use crate::{
    core::SchemaContext,
    issues::Issue,
    rules::{
        deprecated_key::check_deprecated_usages, helpers::all_usages,
        unknown_key::check_unknown_keys, unused_key::check_unused_keys,
    },
};

/// Re-derive the schema from the locale sources and check every key usage
/// against it.
///
/// When the schema cannot be derived, the pipeline findings are reported
/// instead and the source tree is not scanned.
pub fn validate(cmd: ValidateCommand) -> Result<CommandResult> {
    let ctx = SchemaContext::new(&cmd.common)?;
    let build = ctx.build_schema()?;

    let Some(schema) = build.schema else {
        return Ok(finish(
            CommandSummary::Validate(ValidateSummary::default()),
            build.issues,
            0,
            build.locale_files_checked,
        ));
    };

    let scan = ctx.scan_usages()?;
    // Pipeline warnings (stale deprecations, permissive parity gaps) still apply.
    let mut issues = build.issues;

    issues.extend(
        check_unknown_keys(&schema, &scan.usages)
            .into_iter()
            .map(Issue::UnknownKey),
    );
    issues.extend(
        check_deprecated_usages(&schema, &scan.usages, cmd.deny_deprecated)
            .into_iter()
            .map(Issue::DeprecatedKeyUsage),
    );
    if cmd.unused || ctx.config.report_unused {
        issues.extend(
            check_unused_keys(&schema, &scan.usages)
                .into_iter()
                .map(Issue::UnusedKey),
        );
    }

    let summary = ValidateSummary {
        key_count: Some(schema.len()),
        usage_count: all_usages(&scan.usages).count(),
    };

    Ok(finish(
        CommandSummary::Validate(summary),
        issues,
        scan.files_checked,
        build.locale_files_checked,
    ))
}
