// Shared helpers for integration tests.
//
// Provides a temporary home directory with a manifest, a recording logger and
// a canned URL probe so each integration test can drive the commands against
// the real shell without touching the user's environment.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rogu::commands::CommandSetup;
use rogu::config::Flags;
use rogu::exec::SystemExecutor;
use rogu::items::Context;
use rogu::logging::{ItemStatus, Log};
use rogu::url::{Probe, UrlProbe};

/// [`UrlProbe`] answering every request with the same status.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub u16);

impl UrlProbe for FixedProbe {
    fn exists(&self, _url: &str) -> anyhow::Result<Probe> {
        Ok(Probe {
            status: self.0,
            reachable: (200..300).contains(&self.0),
        })
    }
}

/// [`Log`] that remembers every message and item result.
#[derive(Debug, Default)]
pub struct RecordingLog {
    pub messages: Mutex<Vec<(&'static str, String)>>,
    pub items: Mutex<Vec<(String, ItemStatus)>>,
}

impl RecordingLog {
    fn push(&self, level: &'static str, msg: &str) {
        self.messages
            .lock()
            .expect("lock messages")
            .push((level, msg.to_string()));
    }

    /// Messages logged at `level`.
    pub fn at(&self, level: &str) -> Vec<String> {
        self.messages
            .lock()
            .expect("lock messages")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Recorded item results in order.
    pub fn items(&self) -> Vec<(String, ItemStatus)> {
        self.items.lock().expect("lock items").clone()
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn good(&self, msg: &str) {
        self.push("good", msg);
    }
    fn bad(&self, msg: &str) {
        self.push("bad", msg);
    }
    fn record_item(&self, name: &str, status: ItemStatus, _message: Option<&str>) {
        self.items
            .lock()
            .expect("lock items")
            .push((name.to_string(), status));
    }
}

/// An isolated home directory backed by a [`tempfile::TempDir`].
pub struct TestHome {
    pub home: tempfile::TempDir,
}

impl TestHome {
    /// Create a home containing `manifest` as `~/.rogu`.
    pub fn with_manifest(manifest: &str) -> Self {
        let home = tempfile::tempdir().expect("create temp home");
        std::fs::write(home.path().join(".rogu"), manifest).expect("write manifest");
        Self { home }
    }

    pub fn path(&self) -> &Path {
        self.home.path()
    }

    /// Context running real shell snippets in this home.
    pub fn context(&self, flags: Flags) -> Context {
        Context::with_parts(
            self.path().to_path_buf(),
            Arc::new(SystemExecutor::new(false)),
            Arc::new(FixedProbe(200)),
            flags,
        )
    }

    /// Load the manifest and build the catalog.
    pub fn setup(&self, log: &dyn Log) -> CommandSetup {
        CommandSetup::with_context(None, self.context(Flags::new()), log).expect("command setup")
    }
}

/// Every entry under `root` keyed by its relative path: file contents, or
/// `None` for a directory.
pub fn snapshot(root: &Path) -> BTreeMap<String, Option<Vec<u8>>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<String, Option<Vec<u8>>>) {
        for entry in std::fs::read_dir(dir).expect("read dir") {
            let path = entry.expect("dir entry").path();
            let rel = path
                .strip_prefix(root)
                .expect("under root")
                .display()
                .to_string();
            if path.is_dir() {
                out.insert(rel, None);
                walk(root, &path, out);
            } else {
                out.insert(rel, Some(std::fs::read(&path).expect("read file")));
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}
