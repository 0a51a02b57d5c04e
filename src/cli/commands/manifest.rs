use anyhow::Result;

use super::super::args::ManifestCommand;
use super::{CommandResult, CommandSummary, ManifestSummary, helper::finish};
use crate::{
    core::{SchemaContext, manifest::write_manifest},
    issues::Issue,
};

/// Freeze the derived namespace order into the manifest file.
///
/// Unlisted namespaces are added and listed namespaces without a source file
/// are dropped, so those findings are reported as changes rather than
/// problems. Nothing is written while any other error remains.
pub fn manifest(cmd: ManifestCommand) -> Result<CommandResult> {
    let ctx = SchemaContext::new(&cmd.common)?;
    let sources = ctx.load_sources()?;
    let path = ctx.manifest_path();

    let mut summary = ManifestSummary {
        path: path.to_string_lossy().into_owned(),
        ..Default::default()
    };
    let mut issues = Vec::new();
    for issue in sources.issues {
        match issue {
            Issue::UnlistedNamespace(unlisted) => summary.added.push(unlisted.namespace),
            Issue::MissingNamespace(missing) => summary.dropped.push(missing.namespace),
            other => issues.push(other),
        }
    }

    if sources.complete && !issues.iter().any(Issue::is_fatal) {
        write_manifest(&path, &sources.namespaces)?;
        summary.namespaces = sources.namespaces;
        summary.written = true;
    }

    Ok(finish(
        CommandSummary::Manifest(summary),
        issues,
        0,
        sources.locales.files_loaded,
    ))
}
