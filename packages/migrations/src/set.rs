// ABOUTME: Migration enumeration for a git reference, grouped by owning Django app
// ABOUTME: Filters tracked paths to migrations/ directories and keeps apps in first-seen order

use great_scott_git_utils::{Result, VersionControl};
use std::collections::HashMap;
use tracing::debug;

const MIGRATIONS_DIR: &str = "migrations";
const PACKAGE_MARKER: &str = "__init__.py";

/// Migration filenames per application, with apps in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationSet {
    apps: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl MigrationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from tracked file paths.
    ///
    /// Paths are processed in lexical order and each app's migrations end up sorted.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut paths: Vec<S> = paths.into_iter().collect();
        paths.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));

        let mut set = Self::new();
        for path in &paths {
            if let Some((app, migration)) = split_migration_path(path.as_ref()) {
                set.push(app, migration);
            }
        }

        for (_, migrations) in &mut set.apps {
            migrations.sort();
        }
        set
    }

    fn push(&mut self, app: &str, migration: &str) {
        let slot = match self.index.get(app) {
            Some(&slot) => slot,
            None => {
                self.apps.push((app.to_string(), Vec::new()));
                self.index.insert(app.to_string(), self.apps.len() - 1);
                self.apps.len() - 1
            }
        };
        self.apps[slot].1.push(migration.to_string());
    }

    /// Migrations of `app`, empty when the app has none at this reference
    pub fn get(&self, app: &str) -> &[String] {
        self.index
            .get(app)
            .map_or(&[][..], |&slot| self.apps[slot].1.as_slice())
    }

    pub fn contains(&self, app: &str) -> bool {
        self.index.contains_key(app)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.apps
            .iter()
            .map(|(app, migrations)| (app.as_str(), migrations.as_slice()))
    }

    pub fn apps(&self) -> impl Iterator<Item = &str> {
        self.apps.iter().map(|(app, _)| app.as_str())
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

/// Split `project/blog/migrations/0001_initial.py` into `("blog", "0001_initial.py")`.
///
/// Uses the `migrations` segment closest to the file. Returns `None` for paths outside
/// a migrations directory and for the package's `__init__.py`.
fn split_migration_path(path: &str) -> Option<(&str, &str)> {
    let segments: Vec<&str> = path.split('/').collect();
    let (migration, parents) = segments.split_last()?;

    let position = parents
        .iter()
        .rposition(|segment| *segment == MIGRATIONS_DIR)?;
    if position == 0 {
        return None;
    }

    if *migration == PACKAGE_MARKER || migration.is_empty() {
        return None;
    }

    Some((parents[position - 1], *migration))
}

/// Every migration tracked at `reference`, grouped by app.
pub fn enumerate<V>(vcs: &V, reference: &str) -> Result<MigrationSet>
where
    V: VersionControl + ?Sized,
{
    let files = vcs.list_tracked_files(reference)?;
    let set = MigrationSet::from_paths(files);

    debug!(
        "Found migrations for {} apps at {}: {:?}",
        set.len(),
        reference,
        set.apps().collect::<Vec<_>>()
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("blog/migrations/0001_initial.py", Some(("blog", "0001_initial.py")))]
    #[case("src/apps/shop/migrations/0002_price.py", Some(("shop", "0002_price.py")))]
    #[case("shop/migrations/data/0003_seed.json", Some(("shop", "0003_seed.json")))]
    #[case("blog/migrations/__init__.py", None)]
    #[case("migrations/0001_initial.py", None)]
    #[case("blog/migrations", None)]
    #[case("blog/models.py", None)]
    #[case("blog/migrations_old/0001_initial.py", None)]
    #[case("README.md", None)]
    fn test_split_migration_path(#[case] path: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(split_migration_path(path), expected);
    }

    #[test]
    fn test_from_paths_groups_and_sorts() {
        let set = MigrationSet::from_paths([
            "shop/migrations/0002_price.py",
            "blog/migrations/0002_tags.py",
            "blog/migrations/__init__.py",
            "shop/migrations/0001_initial.py",
            "blog/migrations/0001_initial.py",
            "manage.py",
        ]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("blog"), ["0001_initial.py", "0002_tags.py"]);
        assert_eq!(set.get("shop"), ["0001_initial.py", "0002_price.py"]);
        assert_eq!(set.apps().collect::<Vec<_>>(), vec!["blog", "shop"]);
    }

    #[test]
    fn test_apps_keep_first_seen_order_of_sorted_paths() {
        // "a/zeta" sorts before "b/alpha" even though "alpha" < "zeta"
        let set = MigrationSet::from_paths([
            "b/alpha/migrations/0001_initial.py",
            "a/zeta/migrations/0001_initial.py",
        ]);

        assert_eq!(set.apps().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_same_app_name_in_two_directories_is_merged() {
        let set = MigrationSet::from_paths([
            "legacy/core/migrations/0001_initial.py",
            "src/core/migrations/0002_more.py",
        ]);

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("core"), ["0001_initial.py", "0002_more.py"]);
    }

    #[test]
    fn test_missing_app_is_empty() {
        let set = MigrationSet::from_paths(["blog/migrations/0001_initial.py"]);

        assert!(set.contains("blog"));
        assert!(!set.contains("shop"));
        assert!(set.get("shop").is_empty());
    }

    #[test]
    fn test_init_only_app_is_absent() {
        let set = MigrationSet::from_paths(["blog/migrations/__init__.py"]);

        assert!(set.is_empty());
    }
}
