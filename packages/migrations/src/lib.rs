// ABOUTME: Migration diffing and reversal between two git branches
// ABOUTME: Enumerates migrations per app, finds the shared prefix and rolls back the rest

pub mod django;
pub mod migration;
pub mod reverse;
pub mod set;

pub use django::{DjangoProject, Framework, FrameworkError};
pub use migration::{sequence_token, youngest_shared, ZERO};
pub use reverse::{
    reverse_migrations, Reversal, ReversalError, ReversalEvent, ReversalOutcome, ReversalReport,
};
pub use set::{enumerate, MigrationSet};
