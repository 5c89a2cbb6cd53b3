//! Status command: query a server and print a summary box.

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use clap::CommandFactory;

use crate::cli::args::{Cli, UsageError};
use crate::cli::context::RunContext;
use crate::config::Config;
use crate::output::boxed::render_box;
use crate::output::format::{bool_text, format_field, one_line, status_text, value_or, Style};
use crate::status::{BedrockStatus, Edition, JavaStatus, McStatusClient, StatusApi};
use crate::update::TOOL_NAME;

/// Run the status command.
pub fn run(cli: &Cli, config: &Config, ctx: &RunContext) -> Result<()> {
    let (Some(edition), Some(host)) = (cli.edition.as_deref(), cli.host.as_deref()) else {
        println!("{}", help_box(ctx.style));
        return Err(UsageError::ShowHelp.into());
    };

    let edition = Edition::parse(edition)
        .ok_or_else(|| UsageError::Invalid("Unknown edition. Use 'java' or 'bedrock'".to_string()))?;
    let port = edition
        .parse_port(cli.port.as_deref())
        .map_err(UsageError::Invalid)?;

    if cli.dry_run {
        println!("{}", dry_run_box(ctx.style, edition, host, port));
        return Ok(());
    }

    let api = McStatusClient::new(config.status_api_url.as_deref())?;
    println!("{}", fetch_and_render(&api, edition, host, port, ctx.verbose, ctx.style)?);
    Ok(())
}

/// Query `api` and render the box for the given edition.
pub fn fetch_and_render<S: StatusApi>(
    api: &S,
    edition: Edition,
    host: &str,
    port: u16,
    verbose: bool,
    style: Style,
) -> Result<String> {
    let rendered = match edition {
        Edition::Java => {
            let status = api.java_status(host, port)?;
            render_box(style, "Java Edition", &java_lines(style, host, port, &status, verbose))
        }
        Edition::Bedrock => {
            let status = api.bedrock_status(host, port)?;
            render_box(
                style,
                "Bedrock Edition",
                &bedrock_lines(style, host, port, &status, verbose),
            )
        }
    };
    Ok(rendered)
}

fn java_lines(style: Style, host: &str, port: u16, status: &JavaStatus, verbose: bool) -> Vec<String> {
    let players = status.players.clone().unwrap_or_default();
    let version = status
        .version
        .as_ref()
        .map(|v| value_or(&v.name_clean, &v.name_raw).to_string())
        .unwrap_or_default();
    let motd = status.motd.as_ref().map(|m| one_line(&m.clean)).unwrap_or_default();

    let mut lines = vec![
        format_field(style, "Host", &format!("{}:{}", host, port)),
        format_field(style, "IP", value_or(status.ip_address.as_deref().unwrap_or(""), "unknown")),
        format_field(style, "Status", &status_text(style, status.online)),
        format_field(style, "Players", &format!("{} / {}", players.online, players.max)),
        format_field(style, "Version", value_or(&version, "unknown")),
        format_field(style, "MOTD", &motd),
    ];

    if verbose {
        lines.push(format_field(style, "EULA", bool_text(status.eula_blocked)));
        lines.push(format_field(
            style,
            "Cache",
            &cache_window(status.retrieved_at, status.expires_at),
        ));
        lines.push(format_field(style, "Mods", &status.mods.len().to_string()));
        lines.push(format_field(style, "Plugins", &status.plugins.len().to_string()));
        if let Some(srv) = &status.srv_record {
            lines.push(format_field(style, "SRV", &format!("{}:{}", srv.host, srv.port)));
        }
    }

    lines
}

fn bedrock_lines(
    style: Style,
    host: &str,
    port: u16,
    status: &BedrockStatus,
    verbose: bool,
) -> Vec<String> {
    let players = status.players.clone().unwrap_or_default();
    let version = status.version.as_ref().map(|v| v.name.as_str()).unwrap_or("");
    let motd = status.motd.as_ref().map(|m| one_line(&m.clean)).unwrap_or_default();

    let mut lines = vec![
        format_field(style, "Host", &format!("{}:{}", host, port)),
        format_field(style, "Status", &status_text(style, status.online)),
        format_field(style, "Players", &format!("{} / {}", players.online, players.max)),
        format_field(style, "Version", value_or(version, "unknown")),
        format_field(style, "MOTD", &motd),
        format_field(style, "Edition", value_or(status.edition.as_deref().unwrap_or(""), "unknown")),
    ];

    if verbose {
        lines.push(format_field(
            style,
            "IP",
            value_or(status.ip_address.as_deref().unwrap_or(""), "unknown"),
        ));
        lines.push(format_field(style, "EULA", bool_text(status.eula_blocked)));
        lines.push(format_field(
            style,
            "Cache",
            &cache_window(status.retrieved_at, status.expires_at),
        ));
        lines.push(format_field(style, "Mode", status.gamemode.as_deref().unwrap_or("")));
        lines.push(format_field(style, "ServerID", status.server_id.as_deref().unwrap_or("")));
    }

    lines
}

fn cache_window(retrieved: Option<DateTime<Utc>>, expires: Option<DateTime<Utc>>) -> String {
    let fmt = |t: Option<DateTime<Utc>>| {
        t.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| "unknown".to_string())
    };
    format!("{} → {}", fmt(retrieved), fmt(expires))
}

fn dry_run_box(style: Style, edition: Edition, host: &str, port: u16) -> String {
    let lines = [
        format_field(style, "Edition", edition.as_str()),
        format_field(style, "Host", &format!("{}:{}", host, port)),
        format_field(style, "Mode", "dry run (no request)"),
    ];
    render_box(style, "mcfetch Dry Run", &lines)
}

/// The help box shown when positional arguments are missing.
pub fn help_box(style: Style) -> String {
    let mut lines = vec![
        format_field(
            style,
            "Usage",
            &format!("{} <java|bedrock> <host> [port] [flags]", TOOL_NAME),
        ),
        format_field(style, "Example", &format!("{} java donutsmp.net", TOOL_NAME)),
        format_field(
            style,
            "Example",
            &format!("{} java donutsmp.net 25565 --no-color", TOOL_NAME),
        ),
        format_field(
            style,
            "Example",
            &format!("{} bedrock demo.mcstatus.io --verbose", TOOL_NAME),
        ),
        format_field(style, "Flags", ""),
    ];

    let cmd = Cli::command();
    for arg in cmd.get_arguments() {
        if let Some(long) = arg.get_long() {
            let help = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
            lines.push(format!("  {:<14} {}", format!("--{}", long), help));
        }
    }

    render_box(style, &format!("{} help", TOOL_NAME), &lines)
}
