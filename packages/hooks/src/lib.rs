// ABOUTME: Installs and removes the git hooks that trigger migration reversal on checkout
// ABOUTME: Patches an existing post-checkout in place and owns a dedicated gs-pre-checkout script

pub mod scripts;

use great_scott_git_utils::discover_hooks_dir;
use scripts::{
    delegation_line, is_shell_shebang, post_checkout_script, pre_checkout_script, POST_CHECKOUT,
    PRE_CHECKOUT,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum HookError {
    #[error("fatal: not a git repository (or any of the parent directories), quitting...")]
    NotARepository,

    #[error("{} does not exist, quitting...", .0.display())]
    MissingExecutable(PathBuf),

    #[error("{} is not a bash or a sh script, quitting...", .0.display())]
    UnrecognizedScript(PathBuf),

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, HookError>;

/// What installation did to the post-checkout hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostCheckoutChange {
    Created,
    Patched,
    AlreadyInstalled,
}

/// Manages the great-scott hooks of one repository
#[derive(Debug, Clone)]
pub struct HookInstaller {
    hooks_dir: PathBuf,
    executable: PathBuf,
}

impl HookInstaller {
    /// `executable` is the great-scott binary the hooks will call
    pub fn new(hooks_dir: impl Into<PathBuf>, executable: impl Into<PathBuf>) -> Self {
        Self {
            hooks_dir: hooks_dir.into(),
            executable: executable.into(),
        }
    }

    /// Use the hooks directory of the repository containing `start`
    pub fn discover(start: impl AsRef<Path>, executable: impl Into<PathBuf>) -> Result<Self> {
        let hooks_dir = discover_hooks_dir(start).map_err(|e| {
            debug!("Hook discovery failed: {}", e);
            HookError::NotARepository
        })?;
        Ok(Self::new(hooks_dir, executable))
    }

    pub fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    pub fn install(&self) -> Result<PostCheckoutChange> {
        if !self.executable.exists() {
            return Err(HookError::MissingExecutable(self.executable.clone()));
        }

        fs::create_dir_all(&self.hooks_dir).map_err(io_error(&self.hooks_dir))?;

        let change = self.install_post_checkout()?;
        self.install_pre_checkout()?;

        info!("Installed git hooks in {}", self.hooks_dir.display());
        Ok(change)
    }

    pub fn uninstall(&self) -> Result<()> {
        self.uninstall_post_checkout()?;
        self.uninstall_pre_checkout()?;

        info!("Removed git hooks from {}", self.hooks_dir.display());
        Ok(())
    }

    fn install_post_checkout(&self) -> Result<PostCheckoutChange> {
        let path = self.hooks_dir.join(POST_CHECKOUT);
        if !path.exists() {
            write_executable(&path, &post_checkout_script())?;
            return Ok(PostCheckoutChange::Created);
        }

        let content = fs::read_to_string(&path).map_err(io_error(&path))?;
        let lines: Vec<&str> = content.lines().collect();

        let shebang = lines.first().copied().unwrap_or_default();
        if !is_shell_shebang(shebang) {
            return Err(HookError::UnrecognizedScript(path));
        }

        let delegation = delegation_line();
        if lines.iter().any(|line| line.trim() == delegation) {
            debug!("{} already delegates to {}", path.display(), PRE_CHECKOUT);
            return Ok(PostCheckoutChange::AlreadyInstalled);
        }

        let mut patched = Vec::with_capacity(lines.len() + 1);
        patched.push(shebang);
        patched.push(delegation.as_str());
        patched.extend_from_slice(&lines[1..]);

        fs::write(&path, patched.join("\n") + "\n").map_err(io_error(&path))?;
        Ok(PostCheckoutChange::Patched)
    }

    fn install_pre_checkout(&self) -> Result<()> {
        let path = self.hooks_dir.join(PRE_CHECKOUT);
        write_executable(&path, &pre_checkout_script(&self.executable))
    }

    /// Drops only the delegation line, leaving the rest of the hook as it was
    fn uninstall_post_checkout(&self) -> Result<()> {
        let path = self.hooks_dir.join(POST_CHECKOUT);
        if !path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(&path).map_err(io_error(&path))?;
        let delegation = delegation_line();
        let lines: Vec<&str> = content.lines().collect();
        let kept: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| line.trim() != delegation)
            .collect();

        if kept.len() == lines.len() {
            return Ok(());
        }

        fs::write(&path, kept.join("\n") + "\n").map_err(io_error(&path))
    }

    fn uninstall_pre_checkout(&self) -> Result<()> {
        let path = self.hooks_dir.join(PRE_CHECKOUT);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HookError::Io { path, source: e }),
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> HookError + '_ {
    move |source| HookError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn write_executable(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(io_error(path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).map_err(io_error(path))?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).map_err(io_error(path))?;
    }

    debug!("Wrote {}", path.display());
    Ok(())
}
