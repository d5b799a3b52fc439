//! Build script that embeds version metadata.

use std::process::Command;

fn main() {
    // ROGU_VERSION from the environment wins (release builds); otherwise ask
    // git for a describe string.
    if let Ok(version) = std::env::var("ROGU_VERSION") {
        println!("cargo:rustc-env=ROGU_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=ROGU_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=ROGU_VERSION");
}
