//! Uninstall command implementation.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;

use crate::cli::context::RunContext;
use crate::output::format::Style;
use crate::platform::current_executable;
use crate::update::uninstall::{is_confirmation, remove_executable};
use crate::update::{UpdateError, UpdateResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallOutcome {
    Removed,
    Cancelled,
}

/// Run the uninstall command.
pub fn run(ctx: &RunContext) -> Result<()> {
    let exe = current_executable()?;
    let stdin = io::stdin();
    uninstall_executable(&exe, &mut stdin.lock(), ctx.style)?;
    Ok(())
}

/// Prompt on `input` and delete `exe` if the answer confirms.
pub fn uninstall_executable<R: BufRead>(
    exe: &Path,
    input: &mut R,
    style: Style,
) -> UpdateResult<UninstallOutcome> {
    println!("{}", style.cyan("mcfetch Uninstaller"));
    println!("{}", style.cyan("==================="));
    println!();
    println!("{} Executable path: {}", style.yellow("→"), exe.display());
    println!();

    print!("{}", style.yellow("Are you sure you want to uninstall mcfetch? [y/N]: "));
    io::stdout()
        .flush()
        .map_err(UpdateError::io("failed to write prompt"))?;

    // Non-UTF-8 input never confirms.
    let mut answer = Vec::new();
    input
        .read_until(b'\n', &mut answer)
        .map_err(UpdateError::io("failed to read confirmation"))?;

    if !is_confirmation(&String::from_utf8_lossy(&answer)) {
        println!("{}", style.yellow("Uninstall cancelled."));
        return Ok(UninstallOutcome::Cancelled);
    }

    println!();
    println!("{}", style.yellow("Removing mcfetch..."));
    remove_executable(exe)?;

    println!("{}", style.green(&format!("✓ Removed: {}", exe.display())));
    println!();
    println!("{}", style.green("Uninstallation complete!"));
    println!();
    println!(
        "{}",
        style.yellow(
            "Note: You may need to manually remove the directory from your PATH if it was added."
        )
    );

    Ok(UninstallOutcome::Removed)
}
