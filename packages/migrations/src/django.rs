// ABOUTME: Django host-framework collaborator driven through manage.py
// ABOUTME: Detects Django, lists registered app labels and migrates an app to a target

use great_scott_core::{CommandRunner, Invocation, RunError};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Prints the label of every installed app as a JSON array on the last stdout line
const LIST_APPS_SCRIPT: &str =
    "import json; from django.apps import apps; print(json.dumps(list(apps.app_configs)))";

#[derive(Debug, Error)]
pub enum FrameworkError {
    #[error(transparent)]
    Command(#[from] RunError),

    #[error("Failed to parse Django app list: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, FrameworkError>;

/// The web framework whose migrations are being reversed.
pub trait Framework {
    /// Whether the framework can be run at all from the current environment
    fn is_available(&self) -> bool;

    /// Labels of the apps wired into the running project
    fn registered_apps(&self) -> Result<HashSet<String>>;

    /// Migrate `app` to `target`, where `target` is a sequence token or `zero`
    fn migrate_to(&self, app: &str, target: &str) -> Result<()>;
}

/// Django project reached through `python manage.py`
pub struct DjangoProject<R> {
    runner: R,
    python: String,
    manage_py: String,
}

impl<R: CommandRunner> DjangoProject<R> {
    pub fn new(runner: R, python: impl Into<String>, manage_py: impl Into<String>) -> Self {
        Self {
            runner,
            python: python.into(),
            manage_py: manage_py.into(),
        }
    }

    fn manage<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(self.python.as_str())
            .arg(self.manage_py.as_str())
            .args(args)
    }
}

impl<R: CommandRunner> Framework for DjangoProject<R> {
    fn is_available(&self) -> bool {
        let version_check =
            Invocation::new(self.python.as_str()).args(["-m", "django", "--version"]);
        match self.runner.run(&version_check) {
            Ok(version) => {
                debug!("Found Django {}", version.trim());
                true
            }
            Err(e) => {
                debug!("Django not available: {}", e);
                false
            }
        }
    }

    fn registered_apps(&self) -> Result<HashSet<String>> {
        let stdout = self
            .runner
            .run(&self.manage(["shell", "-c", LIST_APPS_SCRIPT]))?;
        let apps = parse_app_labels(&stdout)?;

        debug!("Registered Django apps: {:?}", apps);
        Ok(apps)
    }

    fn migrate_to(&self, app: &str, target: &str) -> Result<()> {
        let stdout = self.runner.run(&self.manage(["migrate", app, target]))?;
        debug!("migrate {} {}: {}", app, target, stdout.trim());
        Ok(())
    }
}

/// Settings modules sometimes print on import, so only the last line is the payload.
fn parse_app_labels(stdout: &str) -> Result<HashSet<String>> {
    let payload = stdout
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .ok_or_else(|| FrameworkError::Parse("no output from manage.py shell".to_string()))?;

    let labels: Vec<String> = serde_json::from_str(payload)
        .map_err(|e| FrameworkError::Parse(format!("{}: {}", e, payload)))?;

    Ok(labels.into_iter().collect())
}
