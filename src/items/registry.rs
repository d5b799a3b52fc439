//! Catalog construction.
use std::cmp::Reverse;

use super::{DotfilesItem, Item, RoguItem, file, script, template};
use crate::config::Manifest;
use crate::error::ConfigError;

/// Produces the items of one kind from the manifest.
pub type Factory = fn(&Manifest) -> Result<Vec<Item>, ConfigError>;

/// Factories for every manifest-driven item kind, in catalog order.
#[must_use]
pub fn default_factories() -> Vec<Factory> {
    vec![script::items, file::items, template::items]
}

/// Build the catalog: every factory's items in order, then the dotfiles and
/// self items, stably sorted so higher priorities come first.
///
/// # Errors
///
/// Returns the first factory error; no partial catalog is produced.
pub fn all(factories: &[Factory], manifest: &Manifest) -> Result<Vec<Item>, ConfigError> {
    let mut items = Vec::new();
    for factory in factories {
        items.extend(factory(manifest)?);
    }
    items.push(Item::Dotfiles(DotfilesItem::new(&manifest.dotfiles)));
    items.push(Item::Rogu(RoguItem::new(&manifest.self_update)));
    items.sort_by_key(|item| Reverse(item.priority()));
    tracing::debug!("catalog has {} items", items.len());
    Ok(items)
}

/// Whether `item` is selected by `filters`: no filters select everything,
/// otherwise any case-insensitive substring match of the name.
#[must_use]
pub fn matches(item: &Item, filters: &[String]) -> bool {
    if filters.is_empty() {
        return true;
    }
    let name = item.name().to_lowercase();
    filters
        .iter()
        .any(|filter| name.contains(&filter.to_lowercase()))
}
