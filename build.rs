// SPDX-License-Identifier: MPL-2.0

use std::process::Command;

fn main() {
    // Re-run build script if git HEAD changes
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");

    // Check if version is already set (e.g., in flatpak builds)
    let version = if let Ok(v) = std::env::var("SNAPCAM_VERSION") {
        v
    } else {
        get_git_version()
    };

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

fn get_git_version() -> String {
    let describe = Command::new("git")
        .args(["describe", "--tags", "--dirty", "--always"])
        .output();

    match describe {
        Ok(output) if output.status.success() => {
            let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
            tag.strip_prefix('v').map(str::to_owned).unwrap_or(tag)
        }
        _ => format!("{}-unknown", env!("CARGO_PKG_VERSION")),
    }
}
