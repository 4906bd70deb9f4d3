//! Host profile resolution
//!
//! This module merges defaults, YAML profile files, environment variables and
//! command line flags into a single validated [`HostProfile`].

pub mod file;
pub mod layer;
pub mod resolve;

// Re-exports
pub use file::{parse_profile, read_profile_file, ProfileFileError};
pub use layer::ProfileLayer;
pub use resolve::{resolve, HostProfile, Sources};
