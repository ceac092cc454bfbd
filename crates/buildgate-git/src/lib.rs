//! Git-backed changeset provider.
//!
//! Lists the commits in a revision range by shelling out to the local
//! `git` binary. Errors map into the buildgate taxonomy: a directory that
//! is not a usable repository is a client-construction failure
//! ([`GateError::ClientUnavailable`]); a failing or unparsable `git log`
//! invocation is a provider failure ([`GateError::Provider`]).

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};

use buildgate_core::{
    BranchHead, ChangeSet, ChangesetProvider, Commit, GateError, OwnerHandle, Result,
};

/// Record separator between the hash, author email, and author date
/// fields of one log line (ASCII unit separator, cannot appear in any of
/// them).
const LOG_FORMAT: &str = "%H%x1f%ae%x1f%aI";

/// [`ChangesetProvider`] backed by a local git work tree or bare repository.
#[derive(Debug, Clone)]
pub struct GitChangesetProvider {
    repo_dir: PathBuf,
}

impl GitChangesetProvider {
    /// Open a provider for `repo_dir`, verifying it is a git repository.
    pub fn open(repo_dir: impl Into<PathBuf>) -> Result<Self> {
        let repo_dir = repo_dir.into();
        if !is_git_repo(&repo_dir) {
            return Err(GateError::ClientUnavailable(format!(
                "{} is not a git repository",
                repo_dir.display()
            )));
        }
        Ok(Self { repo_dir })
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    fn run_git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|e| GateError::Provider(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GateError::Provider(format!(
                "git {} failed: {}",
                args.first().unwrap_or(&""),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ChangesetProvider for GitChangesetProvider {
    fn list_commits(
        &self,
        _owner: &OwnerHandle,
        head: &BranchHead,
        current: &str,
        baseline: Option<&str>,
    ) -> Result<ChangeSet> {
        // (baseline, current] when a baseline exists; full reachable
        // history otherwise. git log output is most-recent-first.
        let range = match baseline {
            Some(base) => format!("{base}..{current}"),
            None => current.to_string(),
        };

        tracing::debug!(branch = %head.name, range = %range, "listing commits");

        let format_arg = format!("--format={LOG_FORMAT}");
        let out = self.run_git(&["log", &format_arg, &range])?;

        let mut commits = Vec::new();
        for line in out.lines().filter(|l| !l.trim().is_empty()) {
            commits.push(parse_log_line(line)?);
        }
        Ok(ChangeSet::new(commits))
    }
}

fn parse_log_line(line: &str) -> Result<Commit> {
    let mut fields = line.split('\x1f');
    let (Some(id), Some(email), Some(date)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(GateError::Provider(format!(
            "unexpected git log line: {line}"
        )));
    };

    let timestamp = DateTime::parse_from_rfc3339(date)
        .map_err(|e| GateError::Provider(format!("bad author date '{date}': {e}")))?
        .with_timezone(&Utc);

    Ok(Commit::new(id, email, timestamp))
}

/// Resolve a branch name to its tip commit id via `git rev-parse`.
pub fn resolve_head(repo_dir: &Path, branch: &str) -> Result<String> {
    let output = Command::new("git")
        .args(["rev-parse", branch])
        .current_dir(repo_dir)
        .output()
        .map_err(|e| GateError::Provider(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GateError::Provider(format!(
            "git rev-parse {branch} failed: {}",
            stderr.trim()
        )));
    }

    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if sha.is_empty() {
        return Err(GateError::Provider(format!(
            "git rev-parse {branch} returned empty output"
        )));
    }
    Ok(sha)
}

/// Check whether a directory is inside a git work tree or bare repository.
pub fn is_git_repo(dir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command as StdCommand;

    fn run_git(repo_dir: &Path, args: &[&str]) {
        let output = StdCommand::new("git")
            .args(args)
            .current_dir(repo_dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn commit_as(repo_dir: &Path, email: &str, message: &str) {
        run_git(repo_dir, &["config", "user.name", "test-user"]);
        run_git(repo_dir, &["config", "user.email", email]);
        run_git(repo_dir, &["commit", "--allow-empty", "-m", message]);
    }

    fn make_git_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        run_git(dir.path(), &["init", "-b", "main"]);
        commit_as(dir.path(), "dev@example.com", "initial");
        dir
    }

    fn owner() -> OwnerHandle {
        OwnerHandle::new("pipeline")
    }

    fn main_head() -> BranchHead {
        BranchHead::new("main")
    }

    #[test]
    fn open_fails_outside_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let err = GitChangesetProvider::open(dir.path()).unwrap_err();
        assert!(matches!(err, GateError::ClientUnavailable(_)));
    }

    #[test]
    fn resolve_head_returns_40_hex_chars() {
        let repo = make_git_repo();
        let sha = resolve_head(repo.path(), "main").unwrap();
        assert_eq!(sha.len(), 40, "SHA should be 40 hex chars, got: {sha}");
        assert!(sha.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn resolve_head_fails_for_unknown_branch() {
        let repo = make_git_repo();
        assert!(resolve_head(repo.path(), "no-such-branch").is_err());
    }

    #[test]
    fn lists_range_most_recent_first() {
        let repo = make_git_repo();
        let base = resolve_head(repo.path(), "main").unwrap();
        commit_as(repo.path(), "alice@example.com", "second");
        commit_as(repo.path(), "bob@example.com", "third");
        let tip = resolve_head(repo.path(), "main").unwrap();

        let provider = GitChangesetProvider::open(repo.path()).unwrap();
        let changeset = provider
            .list_commits(&owner(), &main_head(), &tip, Some(&base))
            .unwrap();

        assert_eq!(changeset.len(), 2);
        let authors: Vec<&str> = changeset.iter().map(|c| c.author_email.as_str()).collect();
        assert_eq!(authors, vec!["bob@example.com", "alice@example.com"]);
        assert_eq!(changeset.head().unwrap().commit_id, tip);
    }

    #[test]
    fn no_baseline_lists_full_history() {
        let repo = make_git_repo();
        commit_as(repo.path(), "alice@example.com", "second");
        let tip = resolve_head(repo.path(), "main").unwrap();

        let provider = GitChangesetProvider::open(repo.path()).unwrap();
        let changeset = provider
            .list_commits(&owner(), &main_head(), &tip, None)
            .unwrap();

        assert_eq!(changeset.len(), 2);
    }

    #[test]
    fn equal_baseline_and_current_yield_empty_changeset() {
        let repo = make_git_repo();
        let tip = resolve_head(repo.path(), "main").unwrap();

        let provider = GitChangesetProvider::open(repo.path()).unwrap();
        let changeset = provider
            .list_commits(&owner(), &main_head(), &tip, Some(&tip))
            .unwrap();

        assert!(changeset.is_empty());
    }

    #[test]
    fn unknown_revision_is_a_provider_error() {
        let repo = make_git_repo();
        let provider = GitChangesetProvider::open(repo.path()).unwrap();
        let err = provider
            .list_commits(&owner(), &main_head(), &"0".repeat(40), None)
            .unwrap_err();
        assert!(matches!(err, GateError::Provider(_)));
    }

    #[test]
    fn timestamps_are_parsed() {
        let repo = make_git_repo();
        let tip = resolve_head(repo.path(), "main").unwrap();

        let provider = GitChangesetProvider::open(repo.path()).unwrap();
        let changeset = provider
            .list_commits(&owner(), &main_head(), &tip, None)
            .unwrap();

        let commit = changeset.head().unwrap();
        assert!(commit.timestamp <= Utc::now());
    }
}
