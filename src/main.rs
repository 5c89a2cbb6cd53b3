mod cli;
mod commands;
mod config;
mod output;
mod platform;
mod status;
mod update;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::args::{Cli, UsageError};
use cli::context::RunContext;
use config::Config;
use output::format::error_line;

fn main() -> ExitCode {
    setup_broken_pipe_handling();
    let cli = Cli::parse();

    let config = Config::load();
    let ctx = RunContext::from_args(&cli, config.as_ref().unwrap_or(&Config::default()));
    init_logging(ctx.verbose);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", error_line(ctx.style, &e.to_string()));
            return ExitCode::from(1);
        }
    };

    match run(&cli, &config, &ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<UsageError>() {
            Some(UsageError::ShowHelp) => ExitCode::from(2),
            Some(_) => {
                eprintln!("{}", error_line(ctx.style, &e.to_string()));
                ExitCode::from(2)
            }
            None => {
                eprintln!("{}", error_line(ctx.style, &e.to_string()));
                ExitCode::from(1)
            }
        },
    }
}

fn run(cli: &Cli, config: &Config, ctx: &RunContext) -> Result<()> {
    // Self-management flags don't need a server to query
    if cli.update {
        return commands::update::run(config, ctx);
    }

    if cli.version {
        println!("mcfetch {}", env!("MCFETCH_VERSION"));
        return Ok(());
    }

    if cli.uninstall {
        return commands::uninstall::run(ctx);
    }

    commands::status::run(cli, config, ctx)
}

/// Set up `env_logger` on stderr.
///
/// `MCFETCH_LOG` wins when set and takes a full filter string, e.g.
/// `MCFETCH_LOG=mcfetch::update=trace`. Without it, `--verbose` turns on debug
/// output for mcfetch's own modules; otherwise only warnings get through.
fn init_logging(verbose: bool) {
    let env_var = std::env::var("MCFETCH_LOG").ok();

    let mut builder = env_logger::Builder::new();
    builder.format_target(true);
    builder.format_module_path(false);

    if let Some(ref filter) = env_var {
        builder.parse_filters(filter);
    } else if verbose {
        builder.filter_module("mcfetch", log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Warn);
    }

    builder.init();
}

/// Exit quietly when stdout is closed under us, as in `mcfetch java host | head -2`.
///
/// Rust starts with SIGPIPE ignored, so a write to a closed pipe makes
/// `println!` panic. On Unix the signal goes back to its default action and
/// the process just ends. Windows has no SIGPIPE, so there the panic hook
/// below is what catches it; on Unix it only backs up the signal.
fn setup_broken_pipe_handling() {
    #[cfg(unix)]
    unsafe {
        // signal(SIGPIPE, SIG_DFL); both numbers are fixed by POSIX
        unsafe extern "C" {
            fn signal(sig: i32, handler: usize) -> usize;
        }
        signal(13, 0);
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info
            .payload()
            .downcast_ref::<String>()
            .map(|s| s.as_str())
            .or_else(|| info.payload().downcast_ref::<&str>().copied())
            .unwrap_or("");

        if msg.contains("failed printing to stdout") {
            std::process::exit(0);
        }

        default_hook(info);
    }));
}
