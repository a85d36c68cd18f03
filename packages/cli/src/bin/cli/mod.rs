pub mod hooks;
pub mod reverse;
