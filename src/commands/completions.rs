//! Command: generate shell completions.
use clap::CommandFactory as _;
use std::io::Write;

use crate::cli::{Cli, CompletionsOpts};

/// Write completions for the requested shell to stdout.
pub fn run(opts: &CompletionsOpts) {
    write(opts.shell, &mut std::io::stdout());
}

/// Write completions for `shell` to `out`.
pub fn write(shell: clap_complete::Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
}
