//! gssh - Entry point
//!
//! Parses CLI arguments, sets up logging, runs the invocation and performs the
//! single process exit with either the ssh child's code or the error's code.

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use gssh::config::{Args, Environment};
use gssh::ssh::SystemLauncher;

fn main() {
    let args = Args::load();

    // Logs go to stderr; stdout carries list/dry-run output and the ssh session
    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("gssh wrapper v{}", env!("CARGO_PKG_VERSION"));

    let env = Environment::from_process();
    let mut stdout = std::io::stdout().lock();

    let code = match gssh::run(&args, &env, &mut stdout, &SystemLauncher) {
        Ok(code) => code,
        Err(e) => {
            debug!("Fatal: {:?}", e);
            eprintln!("error: {}", e);
            e.exit_code()
        }
    };

    drop(stdout);
    std::process::exit(code);
}
