//! Boilerplate command: stream a file from the boilerplate server.
use anyhow::{Context as _, Result};

use crate::cli::{BoilerplateOpts, GlobalOpts};
use crate::config::Flags;
use crate::items::Context;
use crate::logging::Logger;
use crate::url;

/// Fetched when no file is named.
pub const FILE_LIST: &str = "meta/filelist.txt";

/// Run the boilerplate command.
///
/// # Errors
///
/// Returns an error if setup fails, no boilerplate server is configured, the
/// file does not exist, or the download fails.
pub fn run(global: &GlobalOpts, opts: &BoilerplateOpts, flags: Flags, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, flags, log)?;
    let base = setup
        .manifest
        .boilerplates
        .url_dir
        .as_deref()
        .context("no boilerplates url-dir configured")?;
    fetch(&setup.ctx, &file_url(base, opts.file.as_deref()))
}

/// Join `file` (or the file list) onto `base`.
#[must_use]
pub fn file_url(base: &str, file: Option<&str>) -> String {
    let file = file.unwrap_or(FILE_LIST).trim_start_matches('/');
    format!("{}/{file}", base.trim_end_matches('/'))
}

/// Probe `url`, then stream it to stdout with curl.
///
/// # Errors
///
/// Returns an error if the URL does not answer 200 or curl fails.
pub fn fetch(ctx: &Context, url: &str) -> Result<()> {
    url::require(ctx.probe.as_ref(), url)?;
    ctx.executor
        .run(&ctx.home, &format!("curl -fsSL {}", shell_words::quote(url)))
        .with_context(|| format!("downloading {url}"))
}
