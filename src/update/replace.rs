//! Swap the running executable for a freshly downloaded build.
//!
//! Every update goes through the same phases: the asset is streamed into a
//! staging file beside the executable, marked executable, and then handed to
//! a [`ReplaceStrategy`]. Unix-like systems let a running binary be renamed
//! over, so the swap happens immediately. Windows keeps the image locked until
//! the process exits, so the swap is deferred to a helper process that waits
//! for us to go away.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;
use tempfile::NamedTempFile;

use super::github::{Asset, GitHubApi};
use super::platform::PlatformIdentity;
use super::{UpdateError, UpdateResult};

/// File name of the helper script written next to the executable on Windows.
pub const HELPER_SCRIPT_NAME: &str = "mcfetch-update.ps1";

/// Suffix appended to the executable path for the pending replacement.
pub const PENDING_SUFFIX: &str = ".new.exe";

const HELPER_SCRIPT: &str = r#"param([string]$Target, [string]$NewFile, [int]$WaitPid)
try { Wait-Process -Id $WaitPid -ErrorAction SilentlyContinue } catch {}
Start-Sleep -Milliseconds 200
if (Test-Path -LiteralPath $NewFile) {
    Move-Item -LiteralPath $NewFile -Destination $Target -Force
    Write-Output "Updated $Target"
}
"#;

/// How the staged binary is moved onto the executable path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceStrategy {
    /// Rename the staged file over the running executable right away.
    Direct,
    /// Park the new binary beside the executable and let a helper process
    /// move it into place once this process has exited.
    Deferred,
}

impl ReplaceStrategy {
    pub fn for_platform(platform: &PlatformIdentity) -> Self {
        if platform.is_windows() {
            ReplaceStrategy::Deferred
        } else {
            ReplaceStrategy::Direct
        }
    }
}

/// What happened to the executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The new binary is live at the executable path.
    Replaced,
    /// The new binary sits at `pending` and a helper will move it into place.
    Staged { pending: PathBuf },
}

/// Work handed to the helper process: move `staged` onto `target` once the
/// process `pid` has exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredTask {
    pub script: PathBuf,
    pub target: PathBuf,
    pub staged: PathBuf,
    pub pid: u32,
}

impl DeferredTask {
    /// Arguments passed to `powershell.exe` to run the helper script.
    pub fn helper_args(&self) -> Vec<OsString> {
        vec![
            "-NoProfile".into(),
            "-ExecutionPolicy".into(),
            "Bypass".into(),
            "-File".into(),
            self.script.clone().into_os_string(),
            "-Target".into(),
            self.target.clone().into_os_string(),
            "-NewFile".into(),
            self.staged.clone().into_os_string(),
            "-WaitPid".into(),
            self.pid.to_string().into(),
        ]
    }
}

/// Starts the helper process for a deferred replacement.
pub trait ProcessLauncher {
    /// Launch the helper detached from this process. Returns once the process
    /// has been started; it is never waited on.
    fn launch(&self, task: &DeferredTask) -> io::Result<()>;
}

/// Launches the helper script with PowerShell as a detached process.
pub struct PowerShellLauncher;

impl ProcessLauncher for PowerShellLauncher {
    fn launch(&self, task: &DeferredTask) -> io::Result<()> {
        let mut cmd = Command::new("powershell.exe");
        cmd.args(task.helper_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const DETACHED_PROCESS: u32 = 0x0000_0008;
            const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
            cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
        }

        let child = cmd.spawn()?;
        debug!("launched update helper (pid {})", child.id());
        Ok(())
    }
}

/// Download `asset` and install it over `target` using `strategy`.
pub fn install<G, L>(
    github: &G,
    launcher: &L,
    strategy: ReplaceStrategy,
    asset: &Asset,
    target: &Path,
) -> UpdateResult<Applied>
where
    G: GitHubApi + ?Sized,
    L: ProcessLauncher + ?Sized,
{
    let staged = stage_download(github, asset, target)?;

    set_executable(staged.as_file())?;
    debug!("verified: {}", staged.path().display());

    match strategy {
        ReplaceStrategy::Direct => replace_direct(staged, target),
        ReplaceStrategy::Deferred => stage_deferred(staged, target, launcher),
    }
}

/// Stream the asset into a temp file in the executable's own directory, so the
/// final rename never crosses a filesystem boundary.
///
/// The temp file is deleted when dropped, which covers every failure path.
fn stage_download<G>(github: &G, asset: &Asset, target: &Path) -> UpdateResult<NamedTempFile>
where
    G: GitHubApi + ?Sized,
{
    let dir = target.parent().ok_or_else(|| {
        UpdateError::PathResolution(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} has no parent directory", target.display()),
        ))
    })?;

    let mut staged = tempfile::Builder::new()
        .prefix("mcfetch-update-")
        .tempfile_in(dir)
        .map_err(UpdateError::io("failed to create temp file"))?;
    debug!("staging: {}", staged.path().display());

    let written = github.download_asset(asset, staged.as_file_mut())?;
    staged
        .as_file()
        .sync_all()
        .map_err(UpdateError::io("failed to flush staged file"))?;
    debug!("staged {} bytes", written);

    Ok(staged)
}

fn set_executable(file: &fs::File) -> UpdateResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o755))
            .map_err(UpdateError::io("failed to chmod new binary"))?;
    }
    #[cfg(not(unix))]
    let _ = file;
    Ok(())
}

/// Rename over the executable. A process already running the old binary keeps
/// its mapping; new invocations get the new file.
fn replace_direct(staged: NamedTempFile, target: &Path) -> UpdateResult<Applied> {
    debug!("replacing: {}", target.display());
    staged.persist(target).map_err(|e| UpdateError::Io {
        context: "failed to replace binary",
        source: e.error,
    })?;
    debug!("done: {}", target.display());
    Ok(Applied::Replaced)
}

fn stage_deferred<L>(staged: NamedTempFile, target: &Path, launcher: &L) -> UpdateResult<Applied>
where
    L: ProcessLauncher + ?Sized,
{
    let pending = pending_path(target);
    move_or_copy(staged, &pending)?;

    let script = helper_script_path(target);
    if let Err(e) = fs::write(&script, HELPER_SCRIPT) {
        let _ = fs::remove_file(&pending);
        return Err(UpdateError::Io {
            context: "failed to write helper script",
            source: e,
        });
    }

    let task = DeferredTask {
        script,
        target: target.to_path_buf(),
        staged: pending.clone(),
        pid: std::process::id(),
    };
    debug!("handing off: {:?}", task);

    if let Err(e) = launcher.launch(&task) {
        let _ = fs::remove_file(&task.staged);
        let _ = fs::remove_file(&task.script);
        return Err(UpdateError::Stage(e));
    }

    Ok(Applied::Staged { pending })
}

/// Move the temp file to `dest`, copying when a rename is not possible.
fn move_or_copy(staged: NamedTempFile, dest: &Path) -> UpdateResult<()> {
    match staged.persist(dest) {
        Ok(_) => Ok(()),
        Err(e) => {
            debug!("rename to {} failed ({}), copying", dest.display(), e.error);
            copy_into_place(e.file.path(), dest)
        }
    }
}

/// Copy `src` to `dest`, removing whatever is left at `dest` if the copy fails.
fn copy_into_place(src: &Path, dest: &Path) -> UpdateResult<()> {
    if let Err(e) = fs::copy(src, dest) {
        let _ = fs::remove_file(dest);
        return Err(UpdateError::Io {
            context: "failed to prepare new binary",
            source: e,
        });
    }
    Ok(())
}

/// Sibling path the new binary waits at until the helper moves it.
pub fn pending_path(target: &Path) -> PathBuf {
    let mut path = target.as_os_str().to_owned();
    path.push(PENDING_SUFFIX);
    PathBuf::from(path)
}

fn helper_script_path(target: &Path) -> PathBuf {
    target
        .parent()
        .map(|dir| dir.join(HELPER_SCRIPT_NAME))
        .unwrap_or_else(|| PathBuf::from(HELPER_SCRIPT_NAME))
}
