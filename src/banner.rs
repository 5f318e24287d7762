//! Banner Retrieval
//!
//! Obtains the interpreter's banner text via a single external command
//! invocation (`<interpreter> -V` through the command shell) and extracts
//! the language version from it. This runs outside the protocol state
//! machine; the session caches the result.

use std::process::Command;

use crate::config::ShellConfig;
use crate::error::{Error, Result};
use crate::protocol::patterns::PatternSet;

/// Run `<shell> -c "<interpreter> -V"` and return stdout and stderr
/// combined (version banners commonly land on stderr).
pub fn fetch_banner(config: &ShellConfig) -> Result<String> {
    let command = config.version_command();
    debug!("fetching banner via {} -c '{}'", config.shell, command);

    let output = Command::new(&config.shell)
        .arg("-c")
        .arg(&command)
        .output()
        .map_err(|e| Error::BannerUnavailable {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(text)
}

/// Extract the dotted version number from banner text.
pub fn extract_version(patterns: &PatternSet, banner: &str) -> Result<String> {
    patterns
        .version()
        .captures(banner)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(Error::VersionNotFound)
}
