//! Update command implementation.

use std::path::Path;

use anyhow::Result;

use crate::cli::context::RunContext;
use crate::config::Config;
use crate::output::format::Style;
use crate::platform::current_executable;
use crate::update::github::{GitHubApi, GitHubClient};
use crate::update::platform::PlatformIdentity;
use crate::update::replace::{install, Applied, PowerShellLauncher, ProcessLauncher, ReplaceStrategy};
use crate::update::select::select_asset;
use crate::update::{UpdateError, UpdateResult};

/// Run the update command.
pub fn run(config: &Config, ctx: &RunContext) -> Result<()> {
    let style = ctx.style;
    println!("{}", style.cyan("mcfetch Updater"));
    println!("{}", style.cyan("================"));

    let exe = current_executable()?;
    let github = GitHubClient::new(config.release_url.as_deref())?;

    update_executable(
        &github,
        &PowerShellLauncher,
        &PlatformIdentity::current(),
        &exe,
        style,
    )?;
    Ok(())
}

/// Core update flow, extracted for testability.
///
/// Fetches the latest release, selects the asset for `platform` and installs
/// it over `exe` with the strategy the platform calls for.
pub fn update_executable<G, L>(
    github: &G,
    launcher: &L,
    platform: &PlatformIdentity,
    exe: &Path,
    style: Style,
) -> UpdateResult<Applied>
where
    G: GitHubApi + ?Sized,
    L: ProcessLauncher + ?Sized,
{
    let arrow = style.yellow("→");
    println!("{} Current: {}", arrow, exe.display());

    let release = github.fetch_latest_release()?;

    let asset = select_asset(&release, platform).ok_or_else(|| UpdateError::AssetNotFound {
        os: platform.os.clone(),
        arch: platform.arch.clone(),
        available: release.asset_names(),
    })?;

    println!("{} Latest: {}", arrow, release.tag_name);
    println!("{} Downloading: {}", arrow, asset.name);

    let strategy = ReplaceStrategy::for_platform(platform);
    let applied = install(github, launcher, strategy, asset, exe)?;

    match &applied {
        Applied::Replaced => {
            println!(
                "{}",
                style.green(&format!("✓ Updated successfully to {}", release.tag_name))
            );
        }
        Applied::Staged { .. } => {
            println!(
                "{}",
                style.green("✓ Update staged. The binary will be replaced after this process exits.")
            );
            println!(
                "{}",
                style.yellow("Note: If replacement fails due to permissions, run as Administrator.")
            );
        }
    }

    Ok(applied)
}
