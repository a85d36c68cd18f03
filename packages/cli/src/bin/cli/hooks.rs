// ABOUTME: install and uninstall command handlers
// ABOUTME: Locates the repository from the working directory and manages its hooks

use anyhow::Context;
use great_scott_cli::output;
use great_scott_hooks::{HookInstaller, PostCheckoutChange};
use std::env;
use tracing::debug;

fn installer() -> anyhow::Result<HookInstaller> {
    let executable = env::current_exe().context("Failed to locate the great-scott executable")?;
    let cwd = env::current_dir().context("Failed to read the current directory")?;
    debug!(
        "Managing hooks for {} from {}",
        executable.display(),
        cwd.display()
    );
    Ok(HookInstaller::discover(cwd, executable)?)
}

pub fn install() -> anyhow::Result<()> {
    output::info("Installing git hooks...");

    let installer = installer()?;
    let change = installer.install()?;
    debug!(
        "post-checkout in {}: {:?}",
        installer.hooks_dir().display(),
        change
    );

    output::replace_line(match change {
        PostCheckoutChange::AlreadyInstalled => "git hooks already installed!",
        PostCheckoutChange::Created | PostCheckoutChange::Patched => "git hooks installed!",
    });
    Ok(())
}

pub fn uninstall() -> anyhow::Result<()> {
    output::info("Uninstalling git hooks...");

    let installer = installer()?;
    installer.uninstall()?;
    debug!("Uninstalled hooks from {}", installer.hooks_dir().display());

    output::replace_line("git hooks uninstalled!");
    Ok(())
}
