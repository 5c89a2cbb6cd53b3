use clap::Parser;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(
    name = "mcfetch",
    about = "Fetch and display Minecraft server status",
    disable_version_flag = true
)]
pub struct Cli {
    /// Server edition: java or bedrock
    pub edition: Option<String>,

    /// Server hostname
    pub host: Option<String>,

    /// Server port (defaults to 25565 for java, 19132 for bedrock)
    pub port: Option<String>,

    /// Print extra details
    #[arg(long)]
    pub verbose: bool,

    /// Print version information and exit
    #[arg(long)]
    pub version: bool,

    /// Disable colorized output
    #[arg(long)]
    pub no_color: bool,

    /// Show what would be fetched without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Update mcfetch to the latest release
    #[arg(long)]
    pub update: bool,

    /// Uninstall mcfetch from this system
    #[arg(long)]
    pub uninstall: bool,
}

/// A problem with how mcfetch was invoked. Exits with status 2.
#[derive(Error, Debug)]
pub enum UsageError {
    /// Not enough positional arguments; the help box has already been shown.
    #[error("missing arguments")]
    ShowHelp,

    #[error("{0}")]
    Invalid(String),
}
