// ABOUTME: Core types and utilities shared by every great-scott package
// ABOUTME: Provides the command runner seam used for git and Django subprocesses

pub mod runner;

// Re-export main types
pub use runner::{CommandRunner, Invocation, RunError, SystemRunner};
