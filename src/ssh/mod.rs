//! ssh client invocation
//!
//! This module turns a resolved host profile into ssh arguments, renders them
//! for display and runs the system ssh client.

pub mod args;
pub mod invoke;
pub mod render;

// Re-exports
pub use args::build_ssh_args;
pub use invoke::{invoke, Launcher, SystemLauncher};
pub use render::{needs_quoting, quote, render_command};
