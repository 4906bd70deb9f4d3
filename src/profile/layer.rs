//! Partial host profiles and precedence overlays

use clap::parser::ValueSource;

use crate::config::{Args, DEFAULT_PORT};

/// One configuration source's view of a host profile
///
/// Each field is `None` when the source does not set it. Empty strings are
/// never stored; they are treated as unset so lower layers show through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileLayer {
    pub host: Option<String>,
    pub user: Option<String>,
    pub port: Option<i64>,
    pub identity: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

impl ProfileLayer {
    /// Built-in defaults (port 22 only)
    pub fn defaults() -> Self {
        Self {
            port: Some(i64::from(DEFAULT_PORT)),
            ..Self::default()
        }
    }

    /// Values given as command line flags
    pub fn from_args(args: &Args) -> Self {
        Self::from_source(args, ValueSource::CommandLine)
    }

    /// Values clap read from `GSSH_HOST`, `GSSH_USER`, `GSSH_PORT` and `GSSH_IDENTITY`
    pub fn from_env(args: &Args) -> Self {
        Self::from_source(args, ValueSource::EnvVariable)
    }

    /// Fields of `args` whose value came from `source`
    fn from_source(args: &Args, source: ValueSource) -> Self {
        let origins = &args.origins;
        let pick = |origin: Option<ValueSource>, value: Option<&str>| {
            if origin == Some(source) {
                non_empty(value)
            } else {
                None
            }
        };

        Self {
            host: pick(origins.host, args.host.as_deref()),
            user: pick(origins.user, args.user.as_deref()),
            port: args.port.filter(|_| origins.port == Some(source)),
            identity: pick(origins.identity, args.identity.as_deref()),
        }
    }

    /// Apply `upper` on top of `self`; fields set in `upper` win
    pub fn overlay(self, upper: ProfileLayer) -> ProfileLayer {
        ProfileLayer {
            host: upper.host.or(self.host),
            user: upper.user.or(self.user),
            port: upper.port.or(self.port),
            identity: upper.identity.or(self.identity),
        }
    }

    /// Merge layers given lowest precedence first
    pub fn merge(layers: impl IntoIterator<Item = ProfileLayer>) -> ProfileLayer {
        layers
            .into_iter()
            .fold(ProfileLayer::default(), ProfileLayer::overlay)
    }
}
