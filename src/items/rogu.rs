//! The tool's own binary, kept up to date from a download URL.
use anyhow::Result;
use std::path::PathBuf;

use super::context::Context;
use super::file;
use super::handlers::{ItemHandlers, action, presence};
use crate::config::SelfEntry;
use crate::{fs, url};

/// Display name of the self item.
pub const NAME: &str = "Rogu";

/// Always processed first.
pub const PRIORITY: i32 = i32::MAX;

/// Install location when the manifest does not give one.
pub const DEFAULT_PATH: &str = "~/bin/rogu";

const MODE: u32 = 0o755;

/// The rogu binary itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoguItem {
    url: Option<String>,
    path: String,
}

/// Expand `{os}` and `{arch}` in a download URL for the running platform.
#[must_use]
pub fn expand_url(url: &str) -> String {
    url.replace("{os}", std::env::consts::OS)
        .replace("{arch}", std::env::consts::ARCH)
}

impl RoguItem {
    /// Expands the URL for this platform. A blank URL counts as unset.
    #[must_use]
    pub fn new(entry: &SelfEntry) -> Self {
        Self {
            url: entry
                .url
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(expand_url),
            path: entry
                .path
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PATH)
                .to_string(),
        }
    }

    fn path(&self, ctx: &Context) -> PathBuf {
        fs::expand_home(&self.path, &ctx.home)
    }

    /// Always installed; only the check and the updater touch the network.
    #[must_use]
    pub fn handlers<'a>(&'a self, ctx: &'a Context) -> ItemHandlers<'a> {
        let install = self
            .url
            .as_deref()
            .and_then(|url| action(move || file::fetch(ctx, url, &self.path(ctx), MODE)));
        ItemHandlers {
            check: action(move || self.check(ctx)),
            is_installed: presence(|| Ok(true)),
            update: install.clone(),
            install,
            uninstall: None,
        }
    }

    fn check(&self, ctx: &Context) -> Result<()> {
        let Some(source) = &self.url else {
            tracing::debug!("no self url configured");
            return Ok(());
        };
        url::require(ctx.probe.as_ref(), source)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Flags;
    use crate::exec::test_helpers::MockExecutor;
    use crate::url::{MockUrlProbe, Probe};
    use std::sync::Arc;

    fn ctx(probe: MockUrlProbe) -> Context {
        Context::with_parts(
            PathBuf::from("/home/me"),
            Arc::new(MockExecutor::default()),
            Arc::new(probe),
            Flags::new(),
        )
    }

    #[test]
    fn url_placeholders_are_expanded() {
        let item = RoguItem::new(&SelfEntry {
            url: Some("https://dl/rogu-{os}-{arch}".to_string()),
            path: None,
        });
        let expected = format!(
            "https://dl/rogu-{}-{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        );
        assert_eq!(item.url.as_deref(), Some(expected.as_str()));
        assert_eq!(item.path, DEFAULT_PATH);
    }

    #[test]
    fn always_installed_and_no_installer_without_url() {
        let ctx = ctx(MockUrlProbe::new());
        let item = RoguItem::new(&SelfEntry::default());
        let h = item.handlers(&ctx);
        assert!((h.is_installed.unwrap())().unwrap());
        assert!(h.install.is_none() && h.update.is_none() && h.uninstall.is_none());
        (h.check.unwrap())().unwrap();
    }

    #[test]
    fn check_probes_url() {
        let mut probe = MockUrlProbe::new();
        probe
            .expect_exists()
            .times(1)
            .returning(|_| {
                Ok(Probe {
                    status: 404,
                    reachable: false,
                })
            });
        let ctx = ctx(probe);
        let item = RoguItem::new(&SelfEntry {
            url: Some("https://dl/rogu".to_string()),
            path: Some("~/.local/bin/rogu".to_string()),
        });
        let h = item.handlers(&ctx);
        assert!(h.install.is_some() && h.update.is_some());
        let err = (h.check.unwrap())().unwrap_err();
        assert!(err.to_string().contains("404"));
    }
}
