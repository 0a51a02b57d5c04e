//! Dispatches parsed arguments to the command handlers.
//!
//! Returns `Err` only when a command itself fails (unreadable config, I/O
//! failure on write); findings are part of the `CommandResult`.

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, generate::generate, init::init, manifest::manifest, validate::validate,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Validate(cmd)) => validate(cmd),
        Some(Command::Manifest(cmd)) => manifest(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
