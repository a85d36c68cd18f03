// ABOUTME: Reversal orchestrator comparing the current branch against a destination branch
// ABOUTME: Rolls each registered app back to the youngest migration both branches share

use crate::django::{Framework, FrameworkError};
use crate::migration::{sequence_token, youngest_shared};
use crate::set::enumerate;
use great_scott_git_utils::{GitError, VersionControl};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ReversalError {
    #[error("Django not found, won't reverse any migrations 🤷")]
    Environment,

    #[error(transparent)]
    VersionControl(#[from] GitError),

    #[error("Failed to list Django apps: {0}")]
    FrameworkQuery(FrameworkError),

    #[error("Failed to reverse migrations for {app} (up to {target}): {error}")]
    Rollback {
        app: String,
        target: String,
        error: FrameworkError,
    },
}

pub type Result<T> = std::result::Result<T, ReversalError>;

/// Progress notifications, emitted as the reversal runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReversalEvent<'a> {
    /// The registered apps are about to be queried
    ListingApps,
    /// Both branches were enumerated and the per-app comparison is starting
    Scanning { branch: &'a str },
    /// `app` is about to be migrated back to `target`
    Reversing { app: &'a str, target: &'a str },
}

/// One rollback that was issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reversal {
    pub app: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReversalReport {
    pub current_branch: String,
    pub destination: String,
    pub reversals: Vec<Reversal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReversalOutcome {
    /// The destination is the branch already checked out, nothing was inspected
    SameBranch { branch: String },
    Completed(ReversalReport),
}

impl ReversalOutcome {
    /// Number of apps whose migrations were rolled back
    pub fn count(&self) -> usize {
        match self {
            ReversalOutcome::SameBranch { .. } => 0,
            ReversalOutcome::Completed(report) => report.reversals.len(),
        }
    }
}

/// Roll back every migration that exists on the current branch but not on `destination`.
///
/// Only apps registered in the running project are touched. Rollbacks are issued one
/// app at a time and the first failure aborts the run; apps already rolled back stay
/// rolled back.
pub fn reverse_migrations<V, F, E>(
    vcs: &V,
    framework: &F,
    destination: &str,
    mut on_event: E,
) -> Result<ReversalOutcome>
where
    V: VersionControl + ?Sized,
    F: Framework + ?Sized,
    E: FnMut(ReversalEvent<'_>),
{
    if !framework.is_available() {
        return Err(ReversalError::Environment);
    }

    let current_branch = vcs.current_branch()?;
    if current_branch == destination {
        debug!("Already on {}, nothing to reverse", destination);
        return Ok(ReversalOutcome::SameBranch {
            branch: current_branch,
        });
    }

    on_event(ReversalEvent::ListingApps);
    let registered = framework
        .registered_apps()
        .map_err(ReversalError::FrameworkQuery)?;

    let current = enumerate(vcs, &current_branch)?;
    let dest = enumerate(vcs, destination)?;

    on_event(ReversalEvent::Scanning {
        branch: &current_branch,
    });

    let mut reversals = Vec::new();
    for (app, current_migrations) in current.iter() {
        if !registered.contains(app) {
            debug!("Skipping {}: not registered in the project", app);
            continue;
        }

        let youngest = youngest_shared(current_migrations, dest.get(app));

        let Some(last) = current_migrations.last() else {
            continue;
        };
        if sequence_token(last) == youngest {
            // both branches end on the same migration for this app
            continue;
        }

        on_event(ReversalEvent::Reversing {
            app,
            target: &youngest,
        });
        info!("Reversing migrations for {} to {}", app, youngest);

        framework
            .migrate_to(app, &youngest)
            .map_err(|error| ReversalError::Rollback {
                app: app.to_string(),
                target: youngest.clone(),
                error,
            })?;

        reversals.push(Reversal {
            app: app.to_string(),
            target: youngest,
        });
    }

    Ok(ReversalOutcome::Completed(ReversalReport {
        current_branch,
        destination: destination.to_string(),
        reversals,
    }))
}
