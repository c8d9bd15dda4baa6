//! Command-line argument parsing.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Remove stored credentials
    Logout,
    /// Run the TUI application (default)
    RunTui {
        /// `--api-url` override
        api_url: Option<String>,
    },
    /// Arguments could not be parsed
    Invalid(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// The first argument is the program name and is skipped. Unknown flags are
/// ignored.
///
/// # Examples
///
/// ```
/// use qchat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["qchat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut api_url = None;
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--logout" => return CliCommand::Logout,
            "--api-url" => match args.next() {
                Some(url) if !url.starts_with('-') => api_url = Some(url),
                _ => return CliCommand::Invalid("--api-url requires a value".to_string()),
            },
            other => {
                if let Some(url) = other.strip_prefix("--api-url=") {
                    if url.is_empty() {
                        return CliCommand::Invalid("--api-url requires a value".to_string());
                    }
                    api_url = Some(url.to_string());
                }
            }
        }
    }
    CliCommand::RunTui { api_url }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["qchat", "--version"]), CliCommand::Version);
        assert_eq!(parse(&["qchat", "-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_help_and_logout() {
        assert_eq!(parse(&["qchat", "-h"]), CliCommand::Help);
        assert_eq!(parse(&["qchat", "--logout"]), CliCommand::Logout);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&["qchat"]), CliCommand::RunTui { api_url: None });
    }

    #[test]
    fn test_parse_api_url() {
        assert_eq!(
            parse(&["qchat", "--api-url", "http://x/api/v1"]),
            CliCommand::RunTui {
                api_url: Some("http://x/api/v1".to_string())
            }
        );
        assert_eq!(
            parse(&["qchat", "--api-url=http://y"]),
            CliCommand::RunTui {
                api_url: Some("http://y".to_string())
            }
        );
    }

    #[test]
    fn test_parse_api_url_missing_value() {
        assert!(matches!(parse(&["qchat", "--api-url"]), CliCommand::Invalid(_)));
        assert!(matches!(
            parse(&["qchat", "--api-url", "--logout"]),
            CliCommand::Invalid(_)
        ));
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(
            parse(&["qchat", "--unknown"]),
            CliCommand::RunTui { api_url: None }
        );
    }
}
