//! Top-level flow
//!
//! `--list` prints targets, otherwise the profile is resolved, the ssh command
//! is built and either printed (`--dry-run`) or run.

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::{search_dirs, Args, Environment, SSH_PROGRAM};
use crate::error::Result;
use crate::profile::{resolve, ProfileLayer, Sources};
use crate::ssh::{build_ssh_args, render_command, Launcher};
use crate::targets::list_all;

/// Run one invocation and return the exit code for the process
///
/// Informational modes (`--list`, `--dry-run`) return 0. Otherwise the ssh
/// child's exit code is returned as-is.
pub fn run(
    args: &Args,
    env: &Environment,
    out: &mut impl Write,
    launcher: &impl Launcher,
) -> Result<i32> {
    let dirs = search_dirs(&args.config_dir, env.home_dir());
    debug!("Profile search path: {:?}", dirs);

    if args.list {
        print_targets(&dirs, out)?;
        return Ok(0);
    }

    let sources = Sources {
        target: args.target_name(),
        search_dirs: &dirs,
        env: ProfileLayer::from_env(args),
        flags: ProfileLayer::from_args(args),
    };
    let profile = resolve(&sources)?;

    info!(
        "Connecting to {} on port {}",
        profile.destination(),
        profile.port
    );

    let ssh_args = build_ssh_args(&profile, &args.command);

    if args.dry_run || args.verbose {
        writeln!(out, "{}", render_command(SSH_PROGRAM, &ssh_args))?;
        out.flush()?;
    }

    if args.dry_run {
        return Ok(0);
    }

    launcher.launch(SSH_PROGRAM, &ssh_args)
}

/// Print `<name> (<dir>)` for every target, or a notice when there are none
fn print_targets(dirs: &[PathBuf], out: &mut impl Write) -> Result<()> {
    let found = list_all(dirs);

    if found.is_empty() {
        writeln!(out, "No targets found.")?;
        return Ok(());
    }

    for (dir, targets) in found {
        for target in targets {
            writeln!(out, "{} ({})", target, dir.display())?;
        }
    }

    Ok(())
}
