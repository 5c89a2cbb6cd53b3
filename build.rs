fn main() {
    println!("cargo:rerun-if-env-changed=MCFETCH_BUILD_VERSION");

    let version = match std::env::var("MCFETCH_BUILD_VERSION").ok() {
        Some(v) if !v.trim().is_empty() => v,
        _ => format!("v{}", std::env::var("CARGO_PKG_VERSION").unwrap_or_default()),
    };

    println!("cargo:rustc-env=MCFETCH_VERSION={version}");
}
