//! Repository client.
//!
//! Every operation is a `git` invocation run through the shared
//! [`Executor`], in the repository's working directory. Commands are built as
//! shell text so a custom prefix (such as the bare dotfiles repository's
//! `--git-dir`/`--work-tree` pair) can be prepended verbatim.
use anyhow::{Context as _, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::DEFAULT_BRANCH;
use crate::error::{ExecError, GitError};
use crate::exec::{ExecResult, Executor};

/// Options applied when opening a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoOptions {
    /// Branch substituted for `{branch}` and used by [`Repo::sync`].
    pub branch: String,
    /// Command prefix, `git` unless the repository needs explicit dirs.
    pub prefix: String,
    /// Directory commands run in; defaults to the repository root.
    pub workdir: Option<PathBuf>,
}

impl Default for RepoOptions {
    fn default() -> Self {
        Self {
            branch: DEFAULT_BRANCH.to_string(),
            prefix: "git".to_string(),
            workdir: None,
        }
    }
}

impl RepoOptions {
    /// Options bound to `branch`.
    #[must_use]
    pub fn branch(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            ..Self::default()
        }
    }
}

/// An opened repository.
#[derive(Debug, Clone)]
pub struct Repo {
    root: PathBuf,
    branch: String,
    prefix: String,
    workdir: PathBuf,
    executor: Arc<dyn Executor>,
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root.display())
    }
}

/// Open the repository at `root`.
///
/// # Errors
///
/// Returns [`GitError::NotInstalled`] if `root` does not exist.
pub fn open(
    root: &Path,
    options: RepoOptions,
    executor: Arc<dyn Executor>,
) -> Result<Repo, GitError> {
    if !root.exists() {
        return Err(GitError::NotInstalled(root.display().to_string()));
    }
    let workdir = options.workdir.unwrap_or_else(|| root.to_path_buf());
    Ok(Repo {
        root: root.to_path_buf(),
        branch: options.branch,
        prefix: options.prefix,
        workdir,
        executor,
    })
}

/// Clone `url` into `root`.
///
/// # Errors
///
/// Returns an error if `git clone` fails.
pub fn clone(executor: &dyn Executor, dir: &Path, url: &str, root: &Path) -> Result<()> {
    let root = root.display().to_string();
    executor
        .run(
            dir,
            &format!("git clone {} {}", shell_words::quote(url), shell_words::quote(&root)),
        )
        .with_context(|| format!("git clone {url}"))
}

/// Clone `url` into `root` as a bare repository.
///
/// # Errors
///
/// Returns an error if `git clone --bare` fails.
pub fn clone_bare(executor: &dyn Executor, dir: &Path, url: &str, root: &Path) -> Result<()> {
    let root = root.display().to_string();
    executor
        .run(
            dir,
            &format!(
                "git clone --bare {} {}",
                shell_words::quote(url),
                shell_words::quote(&root)
            ),
        )
        .with_context(|| format!("git clone --bare {url}"))
}

impl Repo {
    /// Repository root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Bound branch.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Files in the index of the work tree.
    ///
    /// # Errors
    ///
    /// Returns an error if `git ls-files` fails.
    pub fn files(&self) -> Result<Vec<String>> {
        self.lines("ls-files")
    }

    /// Files tracked on the bound branch. Works without a checkout, which
    /// is what a freshly cloned bare repository needs.
    ///
    /// # Errors
    ///
    /// Returns an error if `git ls-tree` fails.
    pub fn tracked_files(&self) -> Result<Vec<String>> {
        self.lines("ls-tree -r --name-only {branch}")
    }

    /// Tracked files with uncommitted modifications.
    ///
    /// # Errors
    ///
    /// Returns an error if `git ls-files --modified` fails.
    pub fn modified_files(&self) -> Result<Vec<String>> {
        self.lines("ls-files --modified")
    }

    /// Whether `git status --short` reports anything.
    ///
    /// # Errors
    ///
    /// Returns an error if `git status` fails.
    pub fn is_dirty(&self) -> Result<bool> {
        let out = self.checked("status --short")?;
        Ok(!out.trim().is_empty())
    }

    /// Read a config value; empty when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    pub fn config(&self, key: &str) -> Result<String> {
        let result = self.exec(&format!("config {}", shell_words::quote(key)))?;
        Ok(result.output.trim().to_string())
    }

    /// Set a config value.
    ///
    /// # Errors
    ///
    /// Returns an error if `git config` fails.
    pub fn set_config(&self, key: &str, value: &str) -> Result<()> {
        self.run(&format!(
            "config {} {}",
            shell_words::quote(key),
            shell_words::quote(value)
        ))
        .with_context(|| format!("git config {key}"))
    }

    /// Run a git subcommand with output streamed.
    ///
    /// `{branch}` in `args` is replaced with the bound branch.
    ///
    /// # Errors
    ///
    /// Returns an error on non-zero exit.
    pub fn run(&self, args: &str) -> Result<()> {
        self.executor.run(&self.workdir, &self.command(args))
    }

    /// Run a git subcommand and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error only if the command cannot be spawned.
    pub fn exec(&self, args: &str) -> Result<ExecResult> {
        self.executor.exec(&self.workdir, &self.command(args))
    }

    /// Commit local modifications, rebase onto the remote branch, and push.
    ///
    /// Issued as one `;`-chained shell line: a commit that has nothing to do
    /// does not stop the pull, and the exit status is that of the last
    /// command. Without modifications only the pull runs.
    ///
    /// # Errors
    ///
    /// Returns an error if listing modifications fails or the last command
    /// in the chain exits non-zero.
    pub fn sync(&self) -> Result<()> {
        let modified = self.modified_files()?;
        let script = self.sync_script(&modified);
        tracing::debug!("syncing {self}");
        self.executor
            .run(&self.workdir, &script)
            .with_context(|| format!("syncing {self}"))
    }

    fn sync_script(&self, modified: &[String]) -> String {
        let pull = format!("{} pull --rebase origin {} ; ", self.prefix, self.branch);
        if modified.is_empty() {
            return pull;
        }
        let files = shell_words::join(modified);
        let message = shell_words::quote(&format!("Updating {}", modified.join(" "))).into_owned();
        format!(
            "{prefix} commit -m {message} -- {files} ; {pull}{prefix} push origin {branch} ; ",
            prefix = self.prefix,
            branch = self.branch,
        )
    }

    fn command(&self, args: &str) -> String {
        format!("{} {}", self.prefix, args.replace("{branch}", &self.branch))
    }

    fn checked(&self, args: &str) -> Result<String> {
        let result = self.exec(args)?;
        if !result.success() {
            let label = args.replace("{branch}", &self.branch);
            return Err(anyhow::Error::new(ExecError::NonZeroExit {
                code: result.exit_code(),
            })
            .context(format!("git {label} in {self}: {}", result.output.trim())));
        }
        Ok(result.output)
    }

    fn lines(&self, args: &str) -> Result<Vec<String>> {
        Ok(self
            .checked(args)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::MockExecutor;

    fn repo_with(exec: &Arc<MockExecutor>, options: RepoOptions) -> (tempfile::TempDir, Repo) {
        let dir = tempfile::tempdir().unwrap();
        let executor: Arc<dyn Executor> = exec.clone();
        let repo = open(dir.path(), options, executor).unwrap();
        (dir, repo)
    }

    #[test]
    fn open_missing_root_is_not_installed() {
        let executor: Arc<dyn Executor> = Arc::new(MockExecutor::default());
        let err = open(Path::new("/nonexistent/repo"), RepoOptions::default(), executor)
            .unwrap_err();
        assert_eq!(err.to_string(), "repository not installed: /nonexistent/repo");
    }

    #[test]
    fn tracked_files_expands_branch() {
        let exec = Arc::new(MockExecutor::with_responses(vec![(0, ".bashrc\n.vimrc\n\n")]));
        let (_dir, repo) = repo_with(&exec, RepoOptions::branch("trunk"));
        assert_eq!(repo.tracked_files().unwrap(), vec![".bashrc", ".vimrc"]);
        assert_eq!(exec.scripts(), vec!["git ls-tree -r --name-only trunk"]);
    }

    #[test]
    fn commands_use_prefix_and_workdir() {
        let exec = Arc::new(MockExecutor::with_responses(vec![(0, "")]));
        let work = tempfile::tempdir().unwrap();
        let options = RepoOptions {
            branch: "main".to_string(),
            prefix: "git --git-dir=/h/.dotfiles --work-tree=/h".to_string(),
            workdir: Some(work.path().to_path_buf()),
        };
        let (_dir, repo) = repo_with(&exec, options);
        assert!(repo.files().unwrap().is_empty());
        assert_eq!(
            exec.scripts(),
            vec!["git --git-dir=/h/.dotfiles --work-tree=/h ls-files"]
        );
        assert_eq!(exec.dirs(), vec![work.path().to_path_buf()]);
    }

    #[test]
    fn failing_listing_is_an_error_with_output() {
        let exec = Arc::new(MockExecutor::with_responses(vec![(128, "fatal: not a git repository")]));
        let (_dir, repo) = repo_with(&exec, RepoOptions::default());
        let err = repo.modified_files().unwrap_err();
        assert!(format!("{err:#}").contains("not a git repository"));
    }

    #[test]
    fn is_dirty_reads_short_status() {
        let exec = Arc::new(MockExecutor::with_responses(vec![(0, " M .bashrc\n"), (0, "")]));
        let (_dir, repo) = repo_with(&exec, RepoOptions::default());
        assert!(repo.is_dirty().unwrap());
        assert!(!repo.is_dirty().unwrap());
    }

    #[test]
    fn sync_without_modifications_only_pulls() {
        let exec = Arc::new(MockExecutor::with_responses(vec![(0, ""), (0, "")]));
        let (_dir, repo) = repo_with(&exec, RepoOptions::branch("main"));
        repo.sync().unwrap();
        assert_eq!(
            exec.scripts()[1],
            "git pull --rebase origin main ; "
        );
    }

    #[test]
    fn sync_with_modifications_commits_pulls_pushes() {
        let exec = Arc::new(MockExecutor::with_responses(vec![(0, ".bashrc\n.vimrc\n"), (0, "")]));
        let (_dir, repo) = repo_with(&exec, RepoOptions::branch("dev"));
        repo.sync().unwrap();
        assert_eq!(
            exec.scripts()[1],
            "git commit -m 'Updating .bashrc .vimrc' -- .bashrc .vimrc ; \
             git pull --rebase origin dev ; git push origin dev ; "
        );
    }

    #[test]
    fn sync_reports_chain_failure() {
        let exec = Arc::new(MockExecutor::with_responses(vec![(0, ""), (1, "")]));
        let (_dir, repo) = repo_with(&exec, RepoOptions::default());
        assert!(repo.sync().is_err());
    }

    #[test]
    fn set_config_quotes_values() {
        let exec = Arc::new(MockExecutor::with_responses(vec![(0, "")]));
        let (_dir, repo) = repo_with(&exec, RepoOptions::default());
        repo.set_config("branch.main.merge", "refs/heads/main").unwrap();
        assert_eq!(exec.scripts(), vec!["git config branch.main.merge refs/heads/main"]);
    }

    #[test]
    fn config_reads_trimmed_value_and_empty_when_unset() {
        let exec = Arc::new(MockExecutor::with_responses(vec![
            (0, "git@github.com:me/dotfiles.git\n"),
            (1, ""),
        ]));
        let (_dir, repo) = repo_with(&exec, RepoOptions::default());
        assert_eq!(
            repo.config("remote.origin.url").unwrap(),
            "git@github.com:me/dotfiles.git"
        );
        assert_eq!(repo.config("user.signingkey").unwrap(), "");
    }

    #[test]
    fn clone_quotes_paths() {
        let exec = MockExecutor::with_responses(vec![(0, "")]);
        clone(&exec, Path::new("/"), "https://x/y.git", Path::new("/home/me/.my tpl")).unwrap();
        assert_eq!(exec.scripts(), vec!["git clone https://x/y.git '/home/me/.my tpl'"]);
    }

    #[test]
    fn real_git_no_op_commit_does_not_stop_pull() {
        let sh = crate::exec::SystemExecutor::default();
        if !sh.which("git") {
            return;
        }
        let base = tempfile::tempdir().unwrap();
        let remote = base.path().join("remote.git");
        let work = base.path().join("work");
        let setup = format!(
            "git init -q --bare -b main {r} && git clone -q {r} {w} && cd {w} && \
             git config user.email t@example.com && git config user.name t && \
             echo a > a && git add a && git commit -q -m init && git push -q origin main",
            r = remote.display(),
            w = work.display(),
        );
        if !sh.exec(base.path(), &setup).unwrap().success() {
            return;
        }
        let executor: Arc<dyn Executor> = Arc::new(sh);
        let repo = open(&work, RepoOptions::branch("main"), executor).unwrap();
        repo.sync().unwrap();
        std::fs::write(work.join("a"), "changed").unwrap();
        repo.sync().unwrap();
        assert!(repo.modified_files().unwrap().is_empty());
    }
}
