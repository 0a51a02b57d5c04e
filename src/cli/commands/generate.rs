use anyhow::Result;
use tracing::info;

use super::super::args::GenerateCommand;
use super::{CommandResult, CommandSummary, GenerateSummary, helper::finish};
use crate::core::{
    SchemaContext,
    emit::{check_schema, emit_schema},
};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let mut ctx = SchemaContext::new(&cmd.common)?;
    if let Some(parity) = cmd.parity() {
        ctx.config.parity = parity;
    }
    if !cmd.locales.is_empty() {
        ctx.config.locales = cmd.locales.clone();
    }
    if let Some(ref output) = cmd.output {
        ctx.config.output = output.clone();
    }
    ctx.config.validate()?;

    let build = ctx.build_schema()?;
    let mut issues = build.issues;
    let mut summary = GenerateSummary {
        is_check: cmd.check,
        ..Default::default()
    };

    // Any fatal finding leaves `schema` empty, so nothing below runs.
    if let Some(schema) = build.schema {
        let mut target = ctx.emit_target();
        target.regenerate = cmd.regenerate_command();
        summary.output = Some(target.output.to_string_lossy().into_owned());
        summary.key_count = schema.len();
        summary.namespace_count = schema.namespaces().len();
        summary.deprecated_count = schema.keys().iter().filter(|k| k.deprecated).count();

        if cmd.check {
            issues.extend(check_schema(&schema, &target)?);
        } else {
            let hash = emit_schema(&schema, &target)?;
            info!(output = %target.output.display(), %hash, "wrote schema");
            summary.hash = Some(hash);
        }
    }

    Ok(finish(
        CommandSummary::Generate(summary),
        issues,
        0,
        build.locale_files_checked,
    ))
}
