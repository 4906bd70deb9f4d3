//! ssh argument construction

use crate::config::DEFAULT_PORT;
use crate::profile::HostProfile;

/// Build the argument list for the ssh client
///
/// Order is fixed: `-i <identity>`, `-p <port>` (only when not 22), the
/// destination, then the remote command tokens verbatim.
///
/// # Examples
/// ```
/// use gssh::profile::HostProfile;
/// use gssh::ssh::args::build_ssh_args;
///
/// let profile = HostProfile::new("foo")
///     .with_user("bob")
///     .with_port(2222)
///     .with_identity("/k");
/// let command = vec!["ls".to_string(), "-la".to_string()];
///
/// assert_eq!(
///     build_ssh_args(&profile, &command),
///     ["-i", "/k", "-p", "2222", "bob@foo", "ls", "-la"]
/// );
/// ```
pub fn build_ssh_args(profile: &HostProfile, remote_command: &[String]) -> Vec<String> {
    let mut args = Vec::with_capacity(5 + remote_command.len());

    if let Some(identity) = &profile.identity {
        args.push("-i".to_string());
        args.push(identity.clone());
    }

    if profile.port != DEFAULT_PORT {
        args.push("-p".to_string());
        args.push(profile.port.to_string());
    }

    args.push(profile.destination());
    args.extend(remote_command.iter().cloned());
    args
}
