//! Command-line interface.
//!
//! Flags are handled before the TUI starts:
//!
//! ```ignore
//! use qchat::cli::{parse_args, run_cli_command};
//!
//! let (command, config) = command_and_config(std::env::args())?;
//! if let Some(result) = run_cli_command(&command, &config) {
//!     // flag handled, exit with result
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use version::{version_string, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::auth::CredentialsManager;
use crate::config::ClientConfig;
use crate::error::QchatResult;

pub const USAGE: &str = "\
Usage: qchat [OPTIONS]

Options:
      --api-url <URL>  Backend base URL (overrides QCHAT_API_URL)
      --logout         Remove stored credentials and exit
  -V, --version        Print version
  -h, --help           Print help

Environment:
  QCHAT_API_URL                   Backend base URL
  QCHAT_STREAM_IDLE_TIMEOUT_SECS  Stream idle timeout, 0 disables
  QCHAT_REQUEST_TIMEOUT_SECS      Timeout for other requests
  QCHAT_HOME                      Credentials and logs directory
  RUST_LOG                        Log filter";

/// Parse the full argument list (program name first) and build the config.
///
/// The environment is read first; `--api-url` overrides it.
pub fn command_and_config<I>(args: I) -> QchatResult<(CliCommand, ClientConfig)>
where
    I: Iterator<Item = String>,
{
    let command = parse_args(args);
    let mut config = ClientConfig::from_env()?;
    if let CliCommand::RunTui { api_url: Some(url) } = &command {
        config = config.with_api_url(url);
    }
    Ok((command, config))
}

/// Run a non-TUI command.
///
/// Returns `None` for `RunTui`, otherwise the outcome of the command.
pub fn run_cli_command(command: &CliCommand, config: &ClientConfig) -> Option<Result<()>> {
    match command {
        CliCommand::Version => {
            println!("{}", version_string());
            Some(Ok(()))
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Some(Ok(()))
        }
        CliCommand::Logout => Some(handle_logout(config)),
        CliCommand::Invalid(message) => Some(Err(eyre!("{}\n\n{}", message, USAGE))),
        CliCommand::RunTui { .. } => None,
    }
}

fn handle_logout(config: &ClientConfig) -> Result<()> {
    CredentialsManager::new(config.home_dir()).clear()?;
    println!("Signed out.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use tempfile::TempDir;

    #[test]
    fn test_run_tui_returns_none() {
        let config = ClientConfig::default();
        assert!(run_cli_command(&CliCommand::RunTui { api_url: None }, &config).is_none());
    }

    #[test]
    fn test_invalid_is_error() {
        let config = ClientConfig::default();
        let result = run_cli_command(&CliCommand::Invalid("bad".to_string()), &config);
        assert!(matches!(result, Some(Err(_))));
    }

    #[test]
    fn test_logout_clears_credentials() {
        let dir = TempDir::new().unwrap();
        let config = ClientConfig::default().with_home_dir(dir.path());
        let manager = CredentialsManager::new(dir.path());
        manager
            .save(&Credentials::from_login("tok", "bearer", "a@b.c"))
            .unwrap();

        let result = run_cli_command(&CliCommand::Logout, &config);
        assert!(matches!(result, Some(Ok(()))));
        assert!(manager.load().is_empty());
    }
}
