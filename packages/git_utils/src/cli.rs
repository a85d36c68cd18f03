// ABOUTME: git CLI wrapper implementing VersionControl through a CommandRunner
// ABOUTME: Reads the current branch and lists every file tracked at a reference

use crate::{GitError, Result, VersionControl};
use great_scott_core::{CommandRunner, Invocation};
use tracing::debug;

const GIT: &str = "git";

/// git CLI wrapper
pub struct GitCli<R> {
    runner: R,
}

impl<R: CommandRunner> GitCli<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    fn git<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invocation = Invocation::new(GIT).args(args);
        Ok(self.runner.run(&invocation)?)
    }
}

impl<R: CommandRunner> VersionControl for GitCli<R> {
    fn current_branch(&self) -> Result<String> {
        let branch = self.git(["rev-parse", "--abbrev-ref", "HEAD"])?;
        let branch = branch.trim();

        // rev-parse prints the literal "HEAD" when no branch is checked out
        if branch == "HEAD" {
            return Err(GitError::DetachedHead);
        }

        debug!("Current branch: {}", branch);
        Ok(branch.to_string())
    }

    fn list_tracked_files(&self, reference: &str) -> Result<Vec<String>> {
        // -z keeps paths with spaces or non-ASCII names unquoted
        let stdout = self.git(["ls-tree", "-r", "--name-only", "-z", reference])?;

        let files: Vec<String> = stdout
            .split('\0')
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .collect();

        debug!("{} files tracked at {}", files.len(), reference);
        Ok(files)
    }
}
