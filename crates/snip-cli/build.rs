//! Embeds a git-derived version string so `snip --version` can report
//! exactly which commit a dev build came from. Falls back to the crate
//! version outside a git checkout (e.g. a crates.io build).

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let version = git_describe().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=SNIP_VERSION={version}");
}

fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|out| out.status.success())?;

    let described = String::from_utf8(output.stdout).ok()?;
    // Tags are conventionally prefixed `v`; the version string is not.
    let described = described.trim().trim_start_matches('v');

    (!described.is_empty()).then(|| described.to_string())
}
