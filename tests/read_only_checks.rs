#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! `is_installed` and `check` must leave a real installation untouched.
//!
//! A bare dotfiles repository and a template are cloned from local origins
//! with the real `git`, then both queries run repeatedly while the whole home
//! directory (including `.dotfiles/index`) is compared before and after.

mod common;

use std::path::Path;

use common::{RecordingLog, TestHome, snapshot};
use rogu::commands::list::tracked_dotfiles;
use rogu::exec::{Executor, SystemExecutor};
use rogu::items::{Item, ItemType};

/// Create a bare origin at `<dir>/<name>.git` whose `main` holds `files`.
fn origin(dir: &Path, name: &str, files: &[(&str, &str)]) -> String {
    let exec = SystemExecutor::new(false);
    let work = dir.join(name);
    std::fs::create_dir(&work).unwrap();
    exec.run(&work, "git init -q && git symbolic-ref HEAD refs/heads/main")
        .unwrap();
    for (file, content) in files {
        std::fs::write(work.join(file), content).unwrap();
    }
    exec.run(
        &work,
        "git add -A && git -c user.email=test@example.com -c user.name=test commit -qm init",
    )
    .unwrap();
    let bare = dir.join(format!("{name}.git"));
    exec.run(dir, &format!("git clone -q --bare {name} {}", bare.display()))
        .unwrap();
    bare.display().to_string()
}

fn find(catalog: &[Item], kind: ItemType) -> &Item {
    catalog
        .iter()
        .find(|item| item.item_type() == kind)
        .expect("item in catalog")
}

#[test]
fn queries_leave_installed_repositories_untouched() {
    if !SystemExecutor::new(false).which("git") {
        return;
    }
    let origins = tempfile::tempdir().unwrap();
    let dots = origin(
        origins.path(),
        "dots",
        &[(".bashrc", "alias ll='ls -l'\n"), (".vimrc", "set nu\n")],
    );
    let tpl = origin(origins.path(), "tpl", &[("README.md", "# tpl\n")]);
    let home = TestHome::with_manifest(&format!(
        "dotfiles:\n  url: {dots}\ntemplates:\n  tpl:\n    url: {tpl}\n"
    ));
    std::fs::write(home.path().join(".bashrc"), "# local\n").unwrap();
    let log = RecordingLog::default();
    let setup = home.setup(&log);
    let dotfiles = find(&setup.catalog, ItemType::Dotfiles);
    let template = find(&setup.catalog, ItemType::Template);

    for item in [dotfiles, template] {
        (item.handlers(&setup.ctx).install.unwrap())().unwrap();
    }
    assert!(home.path().join(".dotfiles/index").is_file());
    assert!(home.path().join(".tpl/.git").is_dir());
    assert_eq!(
        std::fs::read_to_string(home.path().join(".bashrc")).unwrap(),
        "alias ll='ls -l'\n"
    );

    let before = snapshot(home.path());
    for item in [dotfiles, template] {
        for _ in 0..2 {
            let handlers = item.handlers(&setup.ctx);
            assert!((handlers.is_installed.unwrap())().unwrap(), "{item}");
            (handlers.check.unwrap())().unwrap();
        }
    }
    assert_eq!(before, snapshot(home.path()));
}

#[test]
fn list_reports_tracked_dotfiles() {
    if !SystemExecutor::new(false).which("git") {
        return;
    }
    let origins = tempfile::tempdir().unwrap();
    let dots = origin(origins.path(), "dots", &[(".bashrc", ""), (".gitconfig", "")]);
    let home = TestHome::with_manifest(&format!("dotfiles:\n  url: {dots}\n"));
    let log = RecordingLog::default();
    let setup = home.setup(&log);
    (find(&setup.catalog, ItemType::Dotfiles)
        .handlers(&setup.ctx)
        .install
        .unwrap())()
    .unwrap();

    let files = tracked_dotfiles(&setup.manifest.dotfiles, &setup.ctx).unwrap();

    assert_eq!(files, vec![".bashrc", ".gitconfig"]);
}
