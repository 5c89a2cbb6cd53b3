//! Platform detection for selecting the correct release asset.

/// OS and CPU architecture tokens, spelled the way release artifacts are named
/// (`linux`, `darwin`, `windows` / `amd64`, `arm64`, `386`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformIdentity {
    pub os: String,
    pub arch: String,
}

impl PlatformIdentity {
    pub fn new(os: &str, arch: &str) -> Self {
        Self {
            os: os.to_lowercase(),
            arch: arch.to_lowercase(),
        }
    }

    /// Identity of the host this process is running on.
    pub fn current() -> Self {
        Self::new(
            os_token(std::env::consts::OS),
            arch_token(std::env::consts::ARCH),
        )
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }
}

fn os_token(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn arch_token(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    }
}
