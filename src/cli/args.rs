//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `generate`: Derive the schema from the locale sources and write it (or `--check` it)
//! - `validate`: Check application source against the derived schema
//! - `manifest`: Freeze the current namespace order into the manifest file
//! - `init`: Initialize keyschema configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::ParityMode;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.common().is_some_and(|common| common.verbose)
    }

    pub fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Command::Generate(cmd)) => Some(&cmd.common),
            Some(Command::Validate(cmd)) => Some(&cmd.common),
            Some(Command::Manifest(cmd)) => Some(&cmd.common),
            Some(Command::Init) | None => None,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project directory to search for the config file from (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Locale sources directory (overrides config file)
    #[arg(long)]
    pub messages_root: Option<PathBuf>,

    /// Base locale (overrides config file)
    #[arg(long)]
    pub base_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Compare against the committed artifact and its hash without writing
    #[arg(long)]
    pub check: bool,

    /// Treat locale parity gaps as errors (overrides config file)
    #[arg(long, conflicts_with = "permissive")]
    pub strict: bool,

    /// Treat locale parity gaps as warnings (overrides config file)
    #[arg(long)]
    pub permissive: bool,

    /// Comparison locales (default: every other locale directory)
    /// Can be specified multiple times or comma separated: --locales fr,de
    #[arg(long, value_delimiter = ',')]
    pub locales: Vec<String>,

    /// Schema artifact path (overrides config file)
    #[arg(long)]
    pub output: Option<String>,
}

impl GenerateCommand {
    /// Command line that reproduces this run's artifact.
    ///
    /// Only flags that change the output are kept; `--root`, `--check` and
    /// `--verbose` are left out.
    pub fn regenerate_command(&self) -> String {
        let mut parts = vec!["keyschema".to_string(), "generate".to_string()];
        if let Some(ref base_locale) = self.common.base_locale {
            parts.push("--base-locale".to_string());
            parts.push(shell_word(base_locale));
        }
        if let Some(ref messages_root) = self.common.messages_root {
            parts.push("--messages-root".to_string());
            parts.push(shell_word(&messages_root.to_string_lossy()));
        }
        if !self.locales.is_empty() {
            parts.push("--locales".to_string());
            parts.push(shell_word(&self.locales.join(",")));
        }
        match self.parity() {
            Some(ParityMode::Strict) => parts.push("--strict".to_string()),
            Some(ParityMode::Permissive) => parts.push("--permissive".to_string()),
            None => {}
        }
        if let Some(ref output) = self.output {
            parts.push("--output".to_string());
            parts.push(shell_word(output));
        }
        parts.join(" ")
    }

    pub fn parity(&self) -> Option<ParityMode> {
        if self.strict {
            Some(ParityMode::Strict)
        } else if self.permissive {
            Some(ParityMode::Permissive)
        } else {
            None
        }
    }
}

fn shell_word(value: &str) -> String {
    if !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./,:@".contains(c))
    {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}

#[derive(Debug, Args)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Also report schema keys that no source file references
    #[arg(long)]
    pub unused: bool,

    /// Report usages of deprecated keys as errors
    #[arg(long)]
    pub deny_deprecated: bool,
}

#[derive(Debug, Args)]
pub struct ManifestCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the translation key schema from the locale sources
    Generate(GenerateCommand),
    /// Check application source for unknown, deprecated and unused keys
    Validate(ValidateCommand),
    /// Write the current namespace order to the manifest file
    Manifest(ManifestCommand),
    /// Initialize a new .keyschemarc.json configuration file
    Init,
}
