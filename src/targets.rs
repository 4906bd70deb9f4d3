//! Target discovery
//!
//! A target is the stem of a `.yaml`/`.yml` file in one of the profile
//! directories. Listing and lookup share the same directory scan so that every
//! listed target can be resolved.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Recognized profile extensions, in lookup preference order
const PROFILE_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// A profile file found in a directory
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProfileEntry {
    name: String,
    path: PathBuf,
    rank: usize,
}

/// Scan the direct entries of `dir` for profile files
fn profile_entries(dir: &Path) -> io::Result<Vec<ProfileEntry>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }

        let path = entry.path();
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        let Some(rank) = PROFILE_EXTENSIONS.iter().position(|e| *e == ext) else {
            continue;
        };
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        entries.push(ProfileEntry {
            name: name.to_string(),
            path: path.clone(),
            rank,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name).then(a.rank.cmp(&b.rank)));
    Ok(entries)
}

/// List target names in `dir`, sorted ascending
///
/// Subdirectories and files with other extensions are skipped. Fails if the
/// directory does not exist or cannot be read.
pub fn list_targets(dir: impl AsRef<Path>) -> io::Result<Vec<String>> {
    Ok(profile_entries(dir.as_ref())?
        .into_iter()
        .map(|e| e.name)
        .collect())
}

/// List targets across `dirs` in search order
///
/// Unreadable directories and directories without targets are left out.
pub fn list_all(dirs: &[PathBuf]) -> Vec<(PathBuf, Vec<String>)> {
    dirs.iter()
        .filter_map(|dir| match list_targets(dir) {
            Ok(targets) if !targets.is_empty() => Some((dir.clone(), targets)),
            Ok(_) => None,
            Err(e) => {
                debug!("Skipping {}: {}", dir.display(), e);
                None
            }
        })
        .collect()
}

/// Locate the profile file for `name`; the first directory containing it wins
///
/// Within a directory `.yaml` is preferred over `.yml`.
pub fn find_target(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    for dir in dirs {
        let entries = match profile_entries(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Skipping {}: {}", dir.display(), e);
                continue;
            }
        };

        if let Some(entry) = entries.into_iter().find(|e| e.name == name) {
            debug!("Target '{}' found at {}", name, entry.path.display());
            return Some(entry.path);
        }
    }

    None
}
