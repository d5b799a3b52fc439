//! Provisionable items.
//!
//! Every kind of item answers the same four questions: its name, its
//! priority, its [`ItemType`], and the [`ItemHandlers`] it offers for the
//! current [`Context`]. Drivers only ever talk to [`Item`]; the kind-specific
//! behaviour lives in the submodules.
pub mod context;
pub mod dotfiles;
pub mod file;
pub mod handlers;
pub mod registry;
pub mod rogu;
pub mod script;
pub mod template;

pub use context::Context;
pub use dotfiles::DotfilesItem;
pub use file::FileItem;
pub use handlers::ItemHandlers;
pub use rogu::RoguItem;
pub use script::ScriptItem;
pub use template::TemplateItem;

use std::fmt;

/// Kind of an item. Used for filtering and self-sync gating only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    /// The bare dotfiles repository.
    Dotfiles,
    /// The tool itself.
    Rogu,
    /// A downloaded file.
    File,
    /// A shell-snippet item.
    Script,
    /// A cloned project template.
    Template,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dotfiles => "dotfiles",
            Self::Rogu => "self",
            Self::File => "file",
            Self::Script => "script",
            Self::Template => "template",
        };
        f.pad(s)
    }
}

/// One provisionable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// See [`ScriptItem`].
    Script(ScriptItem),
    /// See [`FileItem`].
    File(FileItem),
    /// See [`TemplateItem`].
    Template(TemplateItem),
    /// See [`DotfilesItem`].
    Dotfiles(DotfilesItem),
    /// See [`RoguItem`].
    Rogu(RoguItem),
}

impl Item {
    /// Unique name; built-ins have fixed names.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Script(s) => s.name(),
            Self::File(f) => f.name(),
            Self::Template(t) => t.name(),
            Self::Dotfiles(_) => dotfiles::NAME,
            Self::Rogu(_) => rogu::NAME,
        }
    }

    /// Higher runs first.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        match self {
            Self::Script(s) => s.priority(),
            Self::File(f) => f.priority(),
            Self::Template(t) => t.priority(),
            Self::Dotfiles(_) => dotfiles::PRIORITY,
            Self::Rogu(_) => rogu::PRIORITY,
        }
    }

    /// Kind of item.
    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        match self {
            Self::Script(_) => ItemType::Script,
            Self::File(_) => ItemType::File,
            Self::Template(_) => ItemType::Template,
            Self::Dotfiles(_) => ItemType::Dotfiles,
            Self::Rogu(_) => ItemType::Rogu,
        }
    }

    /// Build the item's handlers. Not cached: each call closes over `ctx`
    /// afresh.
    #[must_use]
    pub fn handlers<'a>(&'a self, ctx: &'a Context) -> ItemHandlers<'a> {
        match self {
            Self::Script(s) => s.handlers(ctx),
            Self::File(f) => f.handlers(ctx),
            Self::Template(t) => t.handlers(ctx),
            Self::Dotfiles(d) => d.handlers(ctx),
            Self::Rogu(r) => r.handlers(ctx),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.item_type(), self.name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{DotfilesEntry, SelfEntry};

    #[test]
    fn builtins_have_fixed_identity() {
        let d = Item::Dotfiles(DotfilesItem::new(&DotfilesEntry::default()));
        assert_eq!(d.name(), "Dotfiles");
        assert_eq!(d.priority(), 60);
        assert_eq!(d.to_string(), "dotfiles Dotfiles");

        let r = Item::Rogu(RoguItem::new(&SelfEntry::default()));
        assert_eq!(r.priority(), i32::MAX);
        assert_eq!(r.item_type().to_string(), "self");
    }
}
