//! Error types and Result aliases for skillshell

use std::fmt;
use std::path::PathBuf;

/// Result type alias for skillshell operations
pub type Result<T> = std::result::Result<T, Error>;

/// A raised condition reported by the interpreter during cell execution.
///
/// Extracted from the error-record literal the `errset` guard prints:
/// `("<class>" <code> t nil (<message>))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalError {
    /// Error class name, e.g. `undefinedFunctionError`
    pub class: String,
    /// Numeric error code
    pub code: i64,
    /// Human-readable message
    pub message: String,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.class, self.code, self.message)
    }
}

/// Main error type for skillshell
#[derive(Debug)]
pub enum Error {
    // === PTY-related errors ===
    /// Failed to create PTY
    PtyCreationFailed {
        command: String,
        reason: String,
    },

    /// Failed to spawn command in PTY
    CommandSpawnFailed {
        command: String,
        reason: String,
    },

    /// Failed to clone PTY reader
    PtyReaderCloneFailed {
        reason: String,
    },

    /// Failed to take PTY writer
    PtyWriterTakeFailed {
        reason: String,
    },

    /// Failed to send input to PTY
    PtyInputSendFailed {
        reason: String,
    },

    /// Failed to adjust terminal attributes on the PTY
    EchoConfigFailed {
        reason: String,
    },

    /// The interpreter's stream ended
    StreamClosed {
        context: String,
    },

    // === Signal errors ===
    /// Failed to send signal to process
    SignalSendFailed {
        signal: String,
        reason: String,
    },

    /// Signal handling not supported on platform
    SignalNotSupported {
        signal: String,
        platform: String,
    },

    /// No PID available for the interpreter process
    NoPidAvailable,

    // === Protocol errors ===
    /// The interpreter reported a raised condition
    Evaluation(EvalError),

    // === Banner errors ===
    /// Failed to obtain the interpreter banner
    BannerUnavailable {
        command: String,
        reason: String,
    },

    /// No version string found in the banner
    VersionNotFound,

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Failed to save configuration file
    ConfigSaveFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    /// Regex compilation errors
    Regex(regex::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // PTY errors
            Error::PtyCreationFailed { command, reason } => {
                write!(f, "Failed to create PTY for command '{}': {}", command, reason)
            }
            Error::CommandSpawnFailed { command, reason } => {
                write!(f, "Failed to spawn command '{}': {}", command, reason)
            }
            Error::PtyReaderCloneFailed { reason } => {
                write!(f, "Failed to clone PTY reader: {}", reason)
            }
            Error::PtyWriterTakeFailed { reason } => {
                write!(f, "Failed to take PTY writer: {}", reason)
            }
            Error::PtyInputSendFailed { reason } => {
                write!(f, "Failed to send input to PTY: {}", reason)
            }
            Error::EchoConfigFailed { reason } => {
                write!(f, "Failed to adjust PTY terminal attributes: {}", reason)
            }
            Error::StreamClosed { context } => {
                write!(f, "Interpreter stream closed: {}", context)
            }

            // Signal errors
            Error::SignalSendFailed { signal, reason } => {
                write!(f, "Failed to send signal '{}': {}", signal, reason)
            }
            Error::SignalNotSupported { signal, platform } => {
                write!(f, "Signal '{}' not supported on {}", signal, platform)
            }
            Error::NoPidAvailable => {
                write!(f, "No PID available for the interpreter process")
            }

            // Protocol errors
            Error::Evaluation(err) => {
                write!(f, "Evaluation error: {}", err)
            }

            // Banner errors
            Error::BannerUnavailable { command, reason } => {
                write!(f, "Failed to obtain banner via '{}': {}", command, reason)
            }
            Error::VersionNotFound => {
                write!(f, "No version string found in the interpreter banner")
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigSaveFailed { path, reason } => {
                write!(f, "Failed to save config to '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
            Error::Regex(err) => write!(f, "Regex compilation error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Regex(err)
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
