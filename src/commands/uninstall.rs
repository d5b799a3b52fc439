//! Uninstall command implementation.
use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, UninstallOpts};
use crate::config::Flags;
use crate::items::{Context, Item};
use crate::logging::{ItemStatus, Log, Logger};

/// Run the uninstall command.
///
/// # Errors
///
/// Returns an error if setup fails or an uninstaller fails.
pub fn run(global: &GlobalOpts, opts: &UninstallOpts, flags: Flags, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, flags, log)?;
    let result = uninstall_items(&setup.catalog, &setup.ctx, &opts.filters, log);
    log.print_summary();
    result
}

/// Uninstall every selected item, halting on the first error.
///
/// An empty filter list selects nothing.
///
/// # Errors
///
/// Returns the first uninstaller error.
pub fn uninstall_items(
    catalog: &[Item],
    ctx: &Context,
    filters: &[String],
    log: &dyn Log,
) -> Result<()> {
    if filters.is_empty() {
        log.warn("nothing selected");
        return Ok(());
    }
    for item in super::select(catalog, filters) {
        let Some(uninstall) = item.handlers(ctx).uninstall else {
            log.warn(&format!("I don't know how to uninstall {}", item.name()));
            log.record_item(item.name(), ItemStatus::Skipped, Some("no uninstaller"));
            continue;
        };
        log.stage(&format!("Uninstalling {}", super::label(item, ctx)));
        if let Err(e) = uninstall() {
            log.record_item(item.name(), ItemStatus::Failed, Some(&format!("{e:#}")));
            return Err(e).with_context(|| format!("uninstalling {}", item.name()));
        }
        log.record_item(item.name(), ItemStatus::Ok, None);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::{DotfilesEntry, ScriptEntry};
    use crate::exec::test_helpers::MockExecutor;
    use crate::items::{DotfilesItem, ScriptItem};
    use crate::logging::isolated_logger;
    use crate::url::MockUrlProbe;
    use std::sync::Arc;

    fn ctx(exec: &Arc<MockExecutor>) -> Context {
        Context::with_parts(
            std::env::temp_dir(),
            exec.clone(),
            Arc::new(MockUrlProbe::new()),
            Flags::new(),
        )
    }

    fn catalog() -> Vec<Item> {
        vec![
            Item::Script(ScriptItem::new(
                "fzf",
                ScriptEntry {
                    uninstall: "brew uninstall fzf".to_string(),
                    ..ScriptEntry::default()
                },
            )),
            Item::Dotfiles(DotfilesItem::new(&DotfilesEntry::default())),
        ]
    }

    #[test]
    fn runs_uninstaller_of_matching_items() {
        let (log, _tmp, _guard) = isolated_logger();
        let exec = Arc::new(MockExecutor::with_responses(vec![(0, "")]));
        uninstall_items(&catalog(), &ctx(&exec), &["fzf".to_string()], &log).unwrap();
        assert_eq!(exec.scripts(), vec!["brew uninstall fzf"]);
    }

    #[test]
    fn items_without_uninstaller_are_skipped() {
        let (log, _tmp, _guard) = isolated_logger();
        let exec = Arc::new(MockExecutor::default());
        uninstall_items(&catalog(), &ctx(&exec), &["dot".to_string()], &log).unwrap();
        assert_eq!(log.item_entries()[0].status, ItemStatus::Skipped);
    }

    #[test]
    fn empty_filter_selects_nothing() {
        let (log, _tmp, _guard) = isolated_logger();
        let exec = Arc::new(MockExecutor::default());
        uninstall_items(&catalog(), &ctx(&exec), &[], &log).unwrap();
        assert!(exec.scripts().is_empty());
    }

    #[test]
    fn failure_halts() {
        let (log, _tmp, _guard) = isolated_logger();
        let exec = Arc::new(MockExecutor::with_responses(vec![(1, "")]));
        let err = uninstall_items(&catalog(), &ctx(&exec), &["f".to_string()], &log).unwrap_err();
        assert_eq!(format!("{err:#}"), "uninstalling fzf: uninstall fzf: exit code 1");
        assert_eq!(log.item_entries().len(), 1);
    }
}
