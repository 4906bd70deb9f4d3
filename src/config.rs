//! Configuration and CLI argument parsing for gssh

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::parser::ValueSource;
use clap::{ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use tracing::debug;

/// Prefix for environment variables (`GSSH_HOST`, `GSSH_PORT`, ...)
pub const ENV_PREFIX: &str = "GSSH";

/// Profile directory used when `--config` is not given
pub const DEFAULT_CONFIG_DIR: &str = "hosts";

/// Profile directory under the user's home, searched after `--config`
pub const HOME_HOSTS_DIR: &str = "hosts";

/// SSH port used when no source sets one
pub const DEFAULT_PORT: u16 = 22;

/// Name of the ssh client executable
pub const SSH_PROGRAM: &str = "ssh";

/// Where each profile field's value came from, as reported by clap
///
/// `None` means neither the command line nor the environment set the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileOrigins {
    pub host: Option<ValueSource>,
    pub user: Option<ValueSource>,
    pub port: Option<ValueSource>,
    pub identity: Option<ValueSource>,
}

impl ProfileOrigins {
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            host: matches.value_source("host"),
            user: matches.value_source("user"),
            port: matches.value_source("port"),
            identity: matches.value_source("identity"),
        }
    }
}

/// gssh CLI Arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "gssh")]
#[command(version)]
#[command(about = "Resolve a named SSH host profile and run ssh with it")]
pub struct Args {
    /// Target name (basename of YAML in --config, e.g. 'ipa' for hosts/ipa.yaml)
    #[arg(short, long, env = "GSSH_TARGET")]
    pub target: Option<String>,

    /// Directory containing host YAML files
    #[arg(
        short = 'c',
        long = "config",
        default_value = DEFAULT_CONFIG_DIR,
        env = "GSSH_CONFIG"
    )]
    pub config_dir: PathBuf,

    /// Hostname or IP to connect to (overrides config)
    #[arg(long, env = "GSSH_HOST")]
    pub host: Option<String>,

    /// SSH user (overrides config)
    #[arg(long, env = "GSSH_USER")]
    pub user: Option<String>,

    /// SSH port (overrides config) [default: 22]
    #[arg(long, allow_negative_numbers = true, env = "GSSH_PORT")]
    pub port: Option<i64>,

    /// Path to private key file (overrides config)
    #[arg(short, long, env = "GSSH_IDENTITY")]
    pub identity: Option<String>,

    /// List available targets and exit
    #[arg(long)]
    pub list: bool,

    /// Print the ssh command that would be executed and exit
    #[arg(long, env = "GSSH_DRY_RUN")]
    pub dry_run: bool,

    /// Print the ssh command before running it and enable debug logging
    #[arg(short, long, env = "GSSH_VERBOSE")]
    pub verbose: bool,

    /// Remote command to run instead of an interactive shell
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<String>,

    /// Source of each profile field, filled in by [`Args::load`]
    #[arg(skip)]
    pub origins: ProfileOrigins,
}

impl Args {
    /// Parse the process arguments and environment, exiting on usage errors
    ///
    /// Use this instead of `Args::parse` so that [`Args::origins`] is filled in.
    pub fn load() -> Self {
        match Self::try_load_from(std::env::args_os()) {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Parse `itr` (and the process environment), recording value sources
    pub fn try_load_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load_with(Self::command(), itr)
    }

    fn load_with<I, T>(cmd: Command, itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut matches = cmd.try_get_matches_from(itr)?;
        let origins = ProfileOrigins::from_matches(&matches);
        let mut args = Self::from_arg_matches_mut(&mut matches)?;
        args.origins = origins;
        Ok(args)
    }

    /// Target name, with an empty `--target ""` treated as absent
    pub fn target_name(&self) -> Option<&str> {
        self.target.as_deref().filter(|t| !t.is_empty())
    }
}

/// Parse `argv` with profile fields bound to freshly named environment variables
///
/// `env` pairs a profile arg id (`"host"`, `"port"`, ...) with the value its
/// variable should hold. Names are unique per call so parallel tests never see
/// each other's values.
#[cfg(test)]
pub(crate) fn load_with_env(argv: &[&str], env: &[(&str, &str)]) -> Result<Args, clap::Error> {
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT: AtomicUsize = AtomicUsize::new(0);

    let mut cmd = Args::command();
    for (id, value) in env {
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        let name: &'static str =
            Box::leak(format!("{}_TEST_{}_{}", ENV_PREFIX, id.to_uppercase(), n).into_boxed_str());
        std::env::set_var(name, value);
        cmd = cmd.mut_arg(*id, |arg| arg.env(name));
    }

    Args::load_with(cmd, std::iter::once("gssh").chain(argv.iter().copied()))
}

/// Process facts the resolver needs besides the parsed arguments
#[derive(Debug, Clone, Default)]
pub struct Environment {
    home: Option<PathBuf>,
}

impl Environment {
    /// Create an environment with no home directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the home directory of the current user
    pub fn from_process() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    /// Set the home directory
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Home directory, if one could be determined
    pub fn home_dir(&self) -> Option<&Path> {
        self.home.as_deref()
    }
}

/// Environment variable name for a flag
///
/// `host` becomes `GSSH_HOST`, `dry-run` becomes `GSSH_DRY_RUN`.
pub fn env_key(flag: &str) -> String {
    format!("{}_{}", ENV_PREFIX, flag.to_uppercase().replace('-', "_"))
}

/// Profile directories in search order: `config_dir`, then `<home>/hosts`
pub fn search_dirs(config_dir: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = vec![config_dir.to_path_buf()];

    match home {
        Some(home) => {
            let home_hosts = home.join(HOME_HOSTS_DIR);
            if !dirs.contains(&home_hosts) {
                dirs.push(home_hosts);
            }
        }
        None => debug!("Home directory unknown, searching {} only", config_dir.display()),
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(argv: &[&str]) -> Result<Args, clap::Error> {
        load_with_env(argv, &[])
    }

    #[test]
    fn test_env_key() {
        assert_eq!(env_key("host"), "GSSH_HOST");
        assert_eq!(env_key("dry-run"), "GSSH_DRY_RUN");
        assert_eq!(env_key("Identity"), "GSSH_IDENTITY");
    }

    #[test]
    fn test_profile_args_bound_to_env_names() {
        let cmd = Args::command();
        let bindings = [
            ("host", "host"),
            ("user", "user"),
            ("port", "port"),
            ("identity", "identity"),
            ("target", "target"),
            ("config_dir", "config"),
            ("dry_run", "dry-run"),
            ("verbose", "verbose"),
        ];
        for (id, flag) in bindings {
            let arg = cmd
                .get_arguments()
                .find(|a| a.get_id().as_str() == id)
                .unwrap_or_else(|| panic!("missing arg {}", id));
            let expected = env_key(flag);
            assert_eq!(
                arg.get_env().and_then(|e| e.to_str()),
                Some(expected.as_str()),
                "arg {}",
                id
            );
        }
    }

    #[test]
    fn test_search_dirs_order() {
        let dirs = search_dirs(Path::new("hosts"), Some(Path::new("/home/me")));
        assert_eq!(
            dirs,
            vec![PathBuf::from("hosts"), PathBuf::from("/home/me/hosts")]
        );
    }

    #[test]
    fn test_search_dirs_without_home() {
        let dirs = search_dirs(Path::new("conf"), None);
        assert_eq!(dirs, vec![PathBuf::from("conf")]);
    }

    #[test]
    fn test_search_dirs_dedupes_home() {
        let dirs = search_dirs(Path::new("/home/me/hosts"), Some(Path::new("/home/me")));
        assert_eq!(dirs, vec![PathBuf::from("/home/me/hosts")]);
    }

    #[test]
    fn test_args_defaults() {
        let args = load(&[]).unwrap();
        assert_eq!(args.config_dir, PathBuf::from("hosts"));
        assert!(args.command.is_empty());
        assert!(!args.list);
    }

    #[test]
    fn test_args_trailing_command() {
        let args = load(&[
            "--host", "foo", "--user", "bob", "--port", "2222", "--identity", "/k", "--", "ls",
            "-la",
        ])
        .unwrap();
        assert_eq!(args.host.as_deref(), Some("foo"));
        assert_eq!(args.port, Some(2222));
        assert_eq!(args.identity.as_deref(), Some("/k"));
        assert_eq!(args.command, vec!["ls", "-la"]);
        assert_eq!(args.origins.host, Some(ValueSource::CommandLine));
        assert_eq!(args.origins.port, Some(ValueSource::CommandLine));
    }

    #[test]
    fn test_args_command_without_separator() {
        let args = load(&["-t", "ipa", "uname", "-a"]).unwrap();
        assert_eq!(args.target_name(), Some("ipa"));
        assert_eq!(args.command, vec!["uname", "-a"]);
    }

    #[test]
    fn test_args_unknown_flag_is_error() {
        assert!(load(&["--host", "x", "--dryrun"]).is_err());
        assert!(load(&["--host", "prod", "--dryrun", "reboot"]).is_err());
        assert!(load(&["--dryrun", "--host", "prod"]).is_err());
        assert!(Args::try_parse_from(["gssh", "--host", "x", "--dryrun"]).is_err());
    }

    #[test]
    fn test_args_negative_port() {
        let args = load(&["--port", "-1"]).unwrap();
        assert_eq!(args.port, Some(-1));
    }

    #[test]
    fn test_empty_target_is_absent() {
        let args = load(&["--target", ""]).unwrap();
        assert_eq!(args.target_name(), None);
    }

    #[test]
    fn test_env_values_recorded_as_env_source() {
        let args = load_with_env(
            &["--host", "flag.example.com"],
            &[("user", "envuser"), ("port", "2022")],
        )
        .unwrap();
        assert_eq!(args.host.as_deref(), Some("flag.example.com"));
        assert_eq!(args.user.as_deref(), Some("envuser"));
        assert_eq!(args.port, Some(2022));
        assert_eq!(args.origins.host, Some(ValueSource::CommandLine));
        assert_eq!(args.origins.user, Some(ValueSource::EnvVariable));
        assert_eq!(args.origins.port, Some(ValueSource::EnvVariable));
        assert_eq!(args.origins.identity, None);
    }

    #[test]
    fn test_flag_beats_env_for_same_field() {
        let args = load_with_env(&["--port", "2400"], &[("port", "2300")]).unwrap();
        assert_eq!(args.port, Some(2400));
        assert_eq!(args.origins.port, Some(ValueSource::CommandLine));
    }

    #[test]
    fn test_env_port_not_integer_is_error() {
        assert!(load_with_env(&[], &[("port", "ssh")]).is_err());
    }

    #[test]
    fn test_environment_home() {
        let env = Environment::new().with_home("/home/me");
        assert_eq!(env.home_dir(), Some(Path::new("/home/me")));
        assert_eq!(Environment::new().home_dir(), None);
    }
}
