//! Optional lifecycle handlers of an item.
use anyhow::Result;
use std::fmt;
use std::rc::Rc;

/// A lifecycle operation with no result beyond success.
pub type Action<'a> = Rc<dyn Fn() -> Result<()> + 'a>;

/// A presence test.
pub type Presence<'a> = Rc<dyn Fn() -> Result<bool> + 'a>;

/// The five optional lifecycle operations of an item.
///
/// `None` means the item does not support the operation; drivers inspect
/// this rather than calling a no-op.
#[derive(Clone, Default)]
pub struct ItemHandlers<'a> {
    /// Read-only health check.
    pub check: Option<Action<'a>>,
    /// Read-only presence test.
    pub is_installed: Option<Presence<'a>>,
    /// Installs a missing item.
    pub install: Option<Action<'a>>,
    /// Removes the item.
    pub uninstall: Option<Action<'a>>,
    /// Refreshes an installed item.
    pub update: Option<Action<'a>>,
}

/// Wrap a closure as an [`Action`].
pub fn action<'a>(f: impl Fn() -> Result<()> + 'a) -> Option<Action<'a>> {
    Some(Rc::new(f))
}

/// Wrap a closure as a [`Presence`].
pub fn presence<'a>(f: impl Fn() -> Result<bool> + 'a) -> Option<Presence<'a>> {
    Some(Rc::new(f))
}

impl fmt::Debug for ItemHandlers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemHandlers")
            .field("check", &self.check.is_some())
            .field("is_installed", &self.is_installed.is_some())
            .field("install", &self.install.is_some())
            .field("uninstall", &self.uninstall.is_some())
            .field("update", &self.update.is_some())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_handlers() {
        let h = ItemHandlers::default();
        assert!(h.check.is_none() && h.is_installed.is_none() && h.install.is_none());
        assert_eq!(
            format!("{h:?}"),
            "ItemHandlers { check: false, is_installed: false, install: false, uninstall: false, update: false }"
        );
    }

    #[test]
    fn aliased_handlers_share_the_closure() {
        let install = action(|| Ok(()));
        let h = ItemHandlers {
            update: install.clone(),
            install,
            ..ItemHandlers::default()
        };
        assert!(Rc::ptr_eq(h.install.as_ref().unwrap(), h.update.as_ref().unwrap()));
        (h.update.unwrap())().unwrap();
    }
}
