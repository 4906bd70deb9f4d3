//! gssh - named SSH host profiles for the system ssh client
//!
//! This crate resolves a host profile from YAML files, `GSSH_*` environment
//! variables and command line flags, builds the matching `ssh` argument list
//! and runs the system ssh client with the terminal passed straight through.
//!
//! # Precedence
//!
//! Per field, highest first: flags, environment variables, the target's
//! profile file, built-in defaults (port 22).
//!
//! # Profile search path
//!
//! - the `--config` directory (default `hosts`)
//! - `~/hosts`
//!
//! # Example Usage (CLI)
//!
//! ```bash
//! gssh --list
//! gssh -t ipa
//! gssh -t ipa --dry-run -- uname -a
//! gssh --host 192.168.1.100 --user admin --port 2222 -i ~/.ssh/id_ed25519
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod profile;
pub mod ssh;
pub mod targets;

// Re-exports for convenience
pub use app::run;
pub use config::{Args, Environment, ProfileOrigins};
pub use error::{GsshError, Result};
pub use profile::{resolve, HostProfile, ProfileLayer, Sources};
pub use ssh::{build_ssh_args, render_command, Launcher, SystemLauncher};
pub use targets::list_targets;
