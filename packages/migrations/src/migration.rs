// ABOUTME: Migration name helpers and the youngest-shared-migration resolver
// ABOUTME: Compares two ordered migration lists and returns the last agreed sequence token

/// Target Django understands as "unapply every migration of the app"
pub const ZERO: &str = "zero";

/// Bare sequence token of a migration filename: `0007_add_index.py` -> `0007`.
pub fn sequence_token(migration: &str) -> &str {
    migration
        .split_once('_')
        .map_or(migration, |(token, _)| token)
}

/// Sequence token of the last migration both lists agree on, walking from the start.
///
/// Stops at the first position where the lists differ or either one ends, even if
/// later entries happen to match again: migrations within an app form a chain and
/// nothing past a divergence can still be applied on both sides. Returns [`ZERO`]
/// when not even the first entries agree.
pub fn youngest_shared<A, B>(a: &[A], b: &[B]) -> String
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    a.iter()
        .zip(b)
        .map(|(left, right)| (left.as_ref(), right.as_ref()))
        .take_while(|(left, right)| left == right)
        .last()
        .map_or(ZERO, |(shared, _)| sequence_token(shared))
        .to_string()
}
