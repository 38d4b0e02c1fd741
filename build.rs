//! Bakes the `--version` label into the binary as `HUB_VERSION`.
//!
//! A checkout sitting exactly on a release tag reports the crate version;
//! anything else reports `dev@<short hash>`, or `dev@unknown` outside git.

use std::process::Command;

/// Trimmed stdout of a successful `git` invocation.
fn git(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_owned())
}

fn version_label() -> String {
    if git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some() {
        return env!("CARGO_PKG_VERSION").to_owned();
    }
    match git(&["rev-parse", "--short", "HEAD"]) {
        Some(hash) if !hash.is_empty() => format!("dev@{hash}"),
        _ => "dev@unknown".to_owned(),
    }
}

fn main() {
    for watched in [".git/HEAD", ".git/refs/"] {
        println!("cargo:rerun-if-changed={watched}");
    }
    println!("cargo:rustc-env=HUB_VERSION={}", version_label());
}
