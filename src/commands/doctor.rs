//! Doctor command: run every item's check and report, never stopping early.
use anyhow::Result;

use crate::cli::{DoctorOpts, GlobalOpts};
use crate::config::Flags;
use crate::error::ItemError;
use crate::items::{Context, Item};
use crate::logging::{ItemStatus, Log, Logger};

/// Run the doctor command.
///
/// # Errors
///
/// Returns an error if setup fails or any check failed.
pub fn run(global: &GlobalOpts, opts: &DoctorOpts, flags: Flags, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, flags, log)?;
    log.stage("Checking items");
    let failures = doctor_items(&setup.catalog, &setup.ctx, &opts.filters, log);
    log.print_summary();
    if failures > 0 {
        anyhow::bail!("{failures} item(s) failed");
    }
    Ok(())
}

/// Check every selected item and return the number of failures.
///
/// Items without a check count as failures.
pub fn doctor_items(catalog: &[Item], ctx: &Context, filters: &[String], log: &dyn Log) -> usize {
    let mut failures = 0;
    for item in super::select(catalog, filters) {
        let label = super::label(item, ctx);
        let result = match item.handlers(ctx).check {
            Some(check) => check(),
            None => Err(ItemError::NoCheck {
                name: item.name().to_string(),
            }
            .into()),
        };
        match result {
            Ok(()) => {
                log.good(&label);
                log.record_item(item.name(), ItemStatus::Ok, None);
            }
            Err(e) => {
                failures += 1;
                log.bad(&format!("{label}: {e:#}"));
                log.record_item(item.name(), ItemStatus::Failed, Some(&format!("{e:#}")));
            }
        }
    }
    failures
}
