// ABOUTME: Git integration utilities for locating repositories and reading tracked trees
// ABOUTME: Wraps the git CLI behind the VersionControl trait and discovers hook directories

mod cli;

pub use cli::GitCli;

use git2::Repository;
use great_scott_core::RunError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GitError {
    #[error(transparent)]
    Command(#[from] RunError),

    #[error("not a git repository (or any of the parent directories): {0}")]
    NotARepository(String),

    #[error("HEAD is detached, check out a branch first")]
    DetachedHead,
}

pub type Result<T> = std::result::Result<T, GitError>;

/// Read-only view of the version control system used to compare branches.
pub trait VersionControl {
    /// Name of the currently checked-out branch
    fn current_branch(&self) -> Result<String>;

    /// Every file path tracked at `reference`, in the order git lists them
    fn list_tracked_files(&self, reference: &str) -> Result<Vec<String>>;
}

/// Locate the hooks directory of the repository containing `start`.
///
/// Linked worktrees share the hooks of the main repository, so the common
/// git directory is used. Bare repositories are rejected since checkout hooks
/// need a working tree.
pub fn discover_hooks_dir(start: impl AsRef<Path>) -> Result<PathBuf> {
    let start = start.as_ref();
    debug!("Discovering git repository from {}", start.display());

    let repo = Repository::discover(start).map_err(|e| {
        debug!("No git repository found at {}: {}", start.display(), e);
        GitError::NotARepository(start.display().to_string())
    })?;

    if repo.is_bare() || repo.workdir().is_none() {
        return Err(GitError::NotARepository(format!(
            "{} is a bare repository",
            repo.path().display()
        )));
    }

    let hooks_dir = repo.commondir().join("hooks");
    debug!("Found git hooks directory: {}", hooks_dir.display());
    Ok(hooks_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_discover_hooks_dir_from_subdirectory() {
        let temp_dir = tempdir().unwrap();
        Repository::init(temp_dir.path()).unwrap();
        let nested = temp_dir.path().join("app").join("migrations");
        std::fs::create_dir_all(&nested).unwrap();

        let hooks_dir = discover_hooks_dir(&nested).unwrap();

        assert!(hooks_dir.ends_with(".git/hooks"));
        assert_eq!(
            hooks_dir.parent().unwrap().canonicalize().unwrap(),
            temp_dir.path().join(".git").canonicalize().unwrap()
        );
    }

    #[test]
    fn test_discover_hooks_dir_from_linked_worktree() {
        let temp_dir = tempdir().unwrap();
        let main = temp_dir.path().join("main");
        let repo = Repository::init(&main).unwrap();
        let signature = git2::Signature::now("Great Scott", "gs@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
            .unwrap();
        let linked = temp_dir.path().join("linked");
        repo.worktree("linked", &linked, None).unwrap();

        let hooks_dir = discover_hooks_dir(&linked).unwrap();

        assert_eq!(
            hooks_dir.parent().unwrap().canonicalize().unwrap(),
            main.join(".git").canonicalize().unwrap()
        );
    }

    #[test]
    fn test_discover_hooks_dir_rejects_bare_repository() {
        let temp_dir = tempdir().unwrap();
        Repository::init_bare(temp_dir.path()).unwrap();

        let result = discover_hooks_dir(temp_dir.path());

        assert!(matches!(result, Err(GitError::NotARepository(_))));
    }

    #[test]
    fn test_discover_hooks_dir_missing_path() {
        let temp_dir = tempdir().unwrap();

        let err = discover_hooks_dir(temp_dir.path().join("missing")).unwrap_err();

        assert!(matches!(err, GitError::NotARepository(_)));
        assert!(err.to_string().starts_with("not a git repository"));
    }
}
