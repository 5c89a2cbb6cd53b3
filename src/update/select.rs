//! Pick the release asset built for the running platform.

use super::github::{Asset, Release};
use super::platform::PlatformIdentity;
use super::TOOL_NAME;

/// Find the asset matching `platform`.
///
/// Candidate patterns are tried from most to least specific, each one across
/// the whole asset list before the next is considered:
///
/// 1. `mcfetch-<os>-<arch>`
/// 2. `<os>-<arch>`
/// 3. `<os>`
/// 4. on Windows only, any `.exe` whose name contains `<arch>`
///
/// Matching is a case-insensitive substring test on the asset name.
pub fn select_asset<'a>(release: &'a Release, platform: &PlatformIdentity) -> Option<&'a Asset> {
    select_asset_for(TOOL_NAME, release, platform)
}

fn select_asset_for<'a>(
    tool: &str,
    release: &'a Release,
    platform: &PlatformIdentity,
) -> Option<&'a Asset> {
    let os = platform.os.to_lowercase();
    let arch = platform.arch.to_lowercase();
    let candidates = [
        format!("{}-{}-{}", tool.to_lowercase(), os, arch),
        format!("{}-{}", os, arch),
        os.clone(),
    ];

    for candidate in &candidates {
        if let Some(asset) = release
            .assets
            .iter()
            .find(|a| a.name.to_lowercase().contains(candidate.as_str()))
        {
            return Some(asset);
        }
    }

    if platform.is_windows() {
        return release.assets.iter().find(|a| {
            let name = a.name.to_lowercase();
            name.ends_with(".exe") && name.contains(arch.as_str())
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::test_support::release;

    fn selected(names: &[&str], os: &str, arch: &str) -> Option<String> {
        let release = release("v1.3.0", names);
        select_asset(&release, &PlatformIdentity::new(os, arch)).map(|a| a.name.clone())
    }

    #[test]
    fn test_exact_tool_asset_found_among_unrelated_names() {
        for (os, arch) in [
            ("linux", "amd64"),
            ("linux", "arm64"),
            ("darwin", "arm64"),
            ("windows", "amd64"),
            ("freebsd", "386"),
        ] {
            let target = format!("mcfetch-{os}-{arch}");
            let names = ["checksums.txt", target.as_str(), "README.md", "source.tar.gz"];
            assert_eq!(selected(&names, os, arch), Some(target.clone()), "{os}/{arch}");
        }
    }

    #[test]
    fn test_tool_prefixed_name_wins_over_earlier_platform_only_name() {
        let names = ["linux-amd64", "mcfetch-linux-amd64"];
        assert_eq!(
            selected(&names, "linux", "amd64"),
            Some("mcfetch-linux-amd64".to_string())
        );
    }

    #[test]
    fn test_os_arch_wins_over_earlier_os_only_name() {
        let names = ["bundle-linux.tar.gz", "bundle-linux-arm64.tar.gz"];
        assert_eq!(
            selected(&names, "linux", "arm64"),
            Some("bundle-linux-arm64.tar.gz".to_string())
        );
    }

    #[test]
    fn test_os_only_fallback() {
        let names = ["mcfetch-darwin-universal"];
        assert_eq!(
            selected(&names, "darwin", "arm64"),
            Some("mcfetch-darwin-universal".to_string())
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let names = ["McFetch-Linux-AMD64"];
        assert_eq!(
            selected(&names, "linux", "amd64"),
            Some("McFetch-Linux-AMD64".to_string())
        );
    }

    #[test]
    fn test_windows_arch_named_exe() {
        let names = ["setup.exe", "mytool-windows-arm64.exe"];
        assert_eq!(
            selected(&names, "windows", "arm64"),
            Some("mytool-windows-arm64.exe".to_string())
        );
    }

    #[test]
    fn test_windows_exe_special_case_without_os_token() {
        let names = ["setup.exe", "mcfetch_arm64.exe"];
        assert_eq!(
            selected(&names, "windows", "arm64"),
            Some("mcfetch_arm64.exe".to_string())
        );
    }

    #[test]
    fn test_exe_special_case_only_applies_on_windows() {
        let names = ["mcfetch_arm64.exe"];
        assert_eq!(selected(&names, "linux", "arm64"), None);
    }

    #[test]
    fn test_no_match_returns_none() {
        let names = ["mcfetch-darwin-arm64", "mcfetch-windows-amd64.exe", "checksums.txt"];
        assert_eq!(selected(&names, "linux", "riscv64"), None);
    }

    #[test]
    fn test_empty_release_returns_none() {
        assert_eq!(selected(&[], "linux", "amd64"), None);
    }
}
