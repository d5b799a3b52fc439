//! Command: print version information.

/// Version baked in by the build script, else the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("ROGU_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the rogu version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("rogu {}", version());
}
