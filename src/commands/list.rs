//! List command: dotfiles tracked by the bare repository, or the catalog.
use anyhow::Result;
use std::fmt::Write as _;

use crate::cli::{GlobalOpts, ListOpts};
use crate::config::Flags;
use crate::config::DotfilesEntry;
use crate::items::{Context, DotfilesItem, Item};
use crate::logging::Logger;

/// Run the list command.
///
/// # Errors
///
/// Returns an error if setup fails or the dotfiles repository cannot be
/// read.
#[allow(clippy::print_stdout)]
pub fn run(global: &GlobalOpts, opts: &ListOpts, flags: Flags, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, flags, log)?;
    if opts.items {
        print!("{}", format_catalog(&setup.catalog));
        return Ok(());
    }
    for file in tracked_dotfiles(&setup.manifest.dotfiles, &setup.ctx)? {
        println!("{file}");
    }
    Ok(())
}

/// Paths tracked by the bare dotfiles repository, relative to home.
///
/// # Errors
///
/// Returns an error if the repository is not cloned or git fails.
pub fn tracked_dotfiles(entry: &DotfilesEntry, ctx: &Context) -> Result<Vec<String>> {
    DotfilesItem::new(entry).open(ctx)?.tracked_files()
}

/// Render the catalog as a priority/type/name table, one item per line.
#[must_use]
pub fn format_catalog(catalog: &[Item]) -> String {
    let mut out = String::new();
    for item in catalog {
        let priority = if item.priority() == i32::MAX {
            "max".to_string()
        } else {
            item.priority().to_string()
        };
        let _ = writeln!(
            out,
            "{priority:>5}  {:<8}  {}",
            item.item_type(),
            item.name()
        );
    }
    out
}
