//! Command rendering for display
//!
//! Produces a shell-like one-line rendering of a command for `--dry-run` and
//! `--verbose`. The output is never executed; ssh is always spawned with a
//! discrete argument list.

/// Check whether an argument needs quoting for display
///
/// True if the argument contains a space, tab, single quote or double quote.
pub fn needs_quoting(arg: &str) -> bool {
    arg.contains([' ', '\t', '"', '\''])
}

/// Wrap an argument in double quotes
///
/// Backslashes are doubled and double quotes are backslash-escaped.
///
/// # Example
/// ```
/// use gssh::ssh::render::quote;
///
/// assert_eq!(quote("hello world"), "\"hello world\"");
/// assert_eq!(quote("a\"b"), "\"a\\\"b\"");
/// assert_eq!(quote("a\\b"), "\"a\\\\b\"");
/// ```
pub fn quote(arg: &str) -> String {
    let escaped = arg.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// Render `program` and `args` as one space-separated line
///
/// # Example
/// ```
/// use gssh::ssh::render::render_command;
///
/// let args = vec!["bob@foo".to_string(), "echo".to_string(), "hi there".to_string()];
/// assert_eq!(render_command("ssh", &args), "ssh bob@foo echo \"hi there\"");
/// ```
pub fn render_command(program: &str, args: &[String]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(program.to_string());

    for arg in args {
        if needs_quoting(arg) {
            parts.push(quote(arg));
        } else {
            parts.push(arg.clone());
        }
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_quoting() {
        assert!(needs_quoting("hello world"));
        assert!(needs_quoting("tab\there"));
        assert!(needs_quoting("it's"));
        assert!(needs_quoting("say \"hi\""));
        assert!(!needs_quoting("plain"));
        assert!(!needs_quoting("a\\b"));
        assert!(!needs_quoting("$HOME;ls|wc"));
        assert!(!needs_quoting(""));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("hello world"), "\"hello world\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote("it's"), "\"it's\"");
    }

    #[test]
    fn test_quote_backslash_before_quote() {
        assert_eq!(quote("x\\\" y"), "\"x\\\\\\\" y\"");
    }

    #[test]
    fn test_render_command() {
        let args: Vec<String> = ["-i", "/path/key", "user@host", "echo", "hello world"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            render_command("ssh", &args),
            "ssh -i /path/key user@host echo \"hello world\""
        );
    }

    #[test]
    fn test_render_no_args() {
        assert_eq!(render_command("ssh", &[]), "ssh");
    }
}
