//! YAML profile files
//!
//! ```yaml
//! host: ipa.diydev.io
//! user: root
//! port: 25022
//! identity: ~/.ssh/id_ed25519
//! ```
//!
//! Keys are matched case-insensitively and unknown keys are ignored.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::layer::ProfileLayer;

/// Failure to turn a profile file into a layer
#[derive(Debug, Error)]
pub enum ProfileFileError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("expected a mapping of profile fields at the top level")]
    NotMapping,

    #[error("port must be an integer, got '{0}'")]
    InvalidPort(String),
}

/// Any YAML scalar; profile strings may be written as numbers or booleans
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Str(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::UInt(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Port {
    Int(i64),
    Str(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawProfile {
    host: Option<Scalar>,
    user: Option<Scalar>,
    port: Option<Port>,
    identity: Option<Scalar>,
}

fn lowercase_keys(mapping: Mapping) -> Mapping {
    mapping
        .into_iter()
        .filter_map(|(k, v)| match k {
            Value::String(s) => Some((Value::String(s.to_lowercase()), v)),
            _ => None,
        })
        .collect()
}

fn scalar_field(value: Option<Scalar>) -> Option<String> {
    value.map(Scalar::into_string).filter(|s| !s.is_empty())
}

/// Parse profile YAML text into a layer
pub fn parse_profile(text: &str) -> Result<ProfileLayer, ProfileFileError> {
    let mapping = match serde_yaml::from_str::<Value>(text)? {
        Value::Mapping(m) => lowercase_keys(m),
        Value::Null => Mapping::new(),
        _ => return Err(ProfileFileError::NotMapping),
    };

    let raw: RawProfile = serde_yaml::from_value(Value::Mapping(mapping))?;

    let port = match raw.port {
        Some(Port::Int(n)) => Some(n),
        Some(Port::Str(s)) if s.trim().is_empty() => None,
        Some(Port::Str(s)) => Some(
            s.trim()
                .parse::<i64>()
                .map_err(|_| ProfileFileError::InvalidPort(s.clone()))?,
        ),
        None => None,
    };

    Ok(ProfileLayer {
        host: scalar_field(raw.host),
        user: scalar_field(raw.user),
        port,
        identity: scalar_field(raw.identity),
    })
}

/// Read and parse a profile file
pub fn read_profile_file(path: impl AsRef<Path>) -> Result<ProfileLayer, ProfileFileError> {
    let text = fs::read_to_string(path)?;
    parse_profile(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_profile() {
        let layer = parse_profile(
            "host: ipa.diydev.io\nuser: root\nport: 25022\nidentity: /home/me/.ssh/id_ed25519\n",
        )
        .unwrap();
        assert_eq!(layer.host.as_deref(), Some("ipa.diydev.io"));
        assert_eq!(layer.user.as_deref(), Some("root"));
        assert_eq!(layer.port, Some(25022));
        assert_eq!(layer.identity.as_deref(), Some("/home/me/.ssh/id_ed25519"));
    }

    #[test]
    fn test_parse_keys_case_insensitive() {
        let layer = parse_profile("Host: example.com\nUSER: admin\nPort: \"2222\"\n").unwrap();
        assert_eq!(layer.host.as_deref(), Some("example.com"));
        assert_eq!(layer.user.as_deref(), Some("admin"));
        assert_eq!(layer.port, Some(2222));
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let layer = parse_profile("host: a\ncomment: staging box\n").unwrap();
        assert_eq!(layer.host.as_deref(), Some("a"));
        assert_eq!(layer.user, None);
        assert_eq!(layer.port, None);
    }

    #[test]
    fn test_parse_stringifies_scalars() {
        let layer = parse_profile("host: 10\nuser: 1000\n").unwrap();
        assert_eq!(layer.host.as_deref(), Some("10"));
        assert_eq!(layer.user.as_deref(), Some("1000"));
    }

    #[test]
    fn test_parse_empty_values_are_unset() {
        let layer = parse_profile("host: a\nuser: \"\"\nidentity:\n").unwrap();
        assert_eq!(layer.user, None);
        assert_eq!(layer.identity, None);
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(parse_profile("").unwrap(), ProfileLayer::default());
    }

    #[test]
    fn test_parse_not_mapping() {
        let err = parse_profile("- host\n- user\n").unwrap_err();
        assert!(matches!(err, ProfileFileError::NotMapping));
    }

    #[test]
    fn test_parse_bad_port() {
        let err = parse_profile("host: a\nport: twenty-two\n").unwrap_err();
        assert!(err.to_string().contains("port must be an integer"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(parse_profile("host: [unclosed\n").is_err());
    }

    #[test]
    fn test_read_profile_file_missing() {
        let temp = tempdir().unwrap();
        let err = read_profile_file(temp.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ProfileFileError::Io(_)));
    }
}
