// ABOUTME: reverse command handler wiring git and Django to the reversal orchestrator
// ABOUTME: Turns orchestrator progress events into terminal output

use great_scott_cli::output;
use great_scott_config::Config;
use great_scott_core::SystemRunner;
use great_scott_git_utils::GitCli;
use great_scott_migrations::{reverse_migrations, DjangoProject, ReversalEvent, ReversalOutcome};
use tracing::debug;

pub fn reverse(dst_branch: &str, config: &Config) -> anyhow::Result<()> {
    debug!(
        "Reversing towards {} using {} {}",
        dst_branch, config.python, config.manage_py
    );
    let runner = SystemRunner::new();
    let git = GitCli::new(runner);
    let django = DjangoProject::new(runner, config.python.as_str(), config.manage_py.as_str());

    let outcome = reverse_migrations(&git, &django, dst_branch, |event| match event {
        ReversalEvent::ListingApps => output::info("Getting a list of Django applications..."),
        ReversalEvent::Scanning { branch } => output::replace_line(output::scanning_line(branch)),
        ReversalEvent::Reversing { app, target } => {
            output::info(output::reversing_line(app, target))
        }
    })?;

    match outcome {
        ReversalOutcome::SameBranch { branch } => {
            debug!("Already on {}, nothing to compare", branch);
        }
        ReversalOutcome::Completed(report) if report.reversals.is_empty() => {
            output::replace_line(output::summary_line(0));
        }
        ReversalOutcome::Completed(report) => {
            output::info(output::summary_line(report.reversals.len()));
        }
    }

    Ok(())
}
