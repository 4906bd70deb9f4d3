//! Host profile resolution
//!
//! Precedence, lowest first: built-in defaults, the target's profile file,
//! `GSSH_*` environment variables, command line flags.

use std::path::PathBuf;

use tracing::debug;

use super::file::read_profile_file;
use super::layer::ProfileLayer;
use crate::config::{env_key, DEFAULT_PORT, HOME_HOSTS_DIR};
use crate::error::{GsshError, Result};
use crate::targets::find_target;

/// Fully merged and validated connection parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProfile {
    /// Remote hostname or IP address
    pub host: String,

    /// Login user; `None` lets ssh use the local user
    pub user: Option<String>,

    /// SSH port (default: 22)
    pub port: u16,

    /// Private key path; `None` lets ssh use its own key discovery
    pub identity: Option<String>,
}

impl HostProfile {
    /// Profile for `host` with every optional field unset
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: None,
            port: DEFAULT_PORT,
            identity: None,
        }
    }

    /// Set the login user
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the SSH port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the private key path
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// `user@host`, or `host` when no user is set
    pub fn destination(&self) -> String {
        match &self.user {
            Some(user) => format!("{}@{}", user, self.host),
            None => self.host.clone(),
        }
    }
}

/// Everything the resolver merges
#[derive(Debug, Clone, Default)]
pub struct Sources<'a> {
    /// Target whose profile file is loaded; `None` skips file lookup entirely
    pub target: Option<&'a str>,

    /// Directories searched for the target's file, in order
    pub search_dirs: &'a [PathBuf],

    /// Values from `GSSH_*` environment variables
    pub env: ProfileLayer,

    /// Values from command line flags
    pub flags: ProfileLayer,
}

/// Load the profile file layer for a named target
fn load_target(target: &str, dirs: &[PathBuf]) -> Result<ProfileLayer> {
    let path = find_target(dirs, target).ok_or_else(|| {
        let searched = dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        GsshError::config_read(
            target,
            format!("no {target}.yaml or {target}.yml found in [{searched}]"),
        )
    })?;

    debug!("Loading target '{}' from {}", target, path.display());

    read_profile_file(&path)
        .map_err(|e| GsshError::config_read(target, format!("{}: {}", path.display(), e)))
}

/// Merge all sources and validate the result
pub fn resolve(sources: &Sources<'_>) -> Result<HostProfile> {
    let file = match sources.target {
        Some(target) => load_target(target, sources.search_dirs)?,
        None => {
            debug!("No target given, skipping profile file lookup");
            ProfileLayer::default()
        }
    };

    let merged = ProfileLayer::merge([
        ProfileLayer::defaults(),
        file,
        sources.env.clone(),
        sources.flags.clone(),
    ]);
    debug!("Merged profile layers: {:?}", merged);

    validate(merged)
}

/// Turn a merged layer into a profile
///
/// `host` is required. A missing or non-positive port becomes 22.
fn validate(layer: ProfileLayer) -> Result<HostProfile> {
    let host = layer.host.filter(|h| !h.is_empty()).ok_or_else(|| {
        GsshError::validation(format!(
            "host is required. Set --host, {}, or provide a target via --target with host in YAML \
             (looked in --config and ~/{})",
            env_key("host"),
            HOME_HOSTS_DIR
        ))
    })?;

    let port = match layer.port {
        Some(p) if p > 0 => u16::try_from(p).map_err(|_| {
            GsshError::validation(format!("port {p} is out of range (1-65535)"))
        })?,
        _ => DEFAULT_PORT,
    };

    Ok(HostProfile {
        host,
        user: layer.user.filter(|u| !u.is_empty()),
        port,
        identity: layer.identity.filter(|i| !i.is_empty()),
    })
}
