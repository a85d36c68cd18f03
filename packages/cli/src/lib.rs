// ABOUTME: Support code for the great-scott binary
// ABOUTME: Terminal output helpers and tracing subscriber setup

pub mod logging;
pub mod output;

#[cfg(test)]
mod tests;
