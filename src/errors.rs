/*!
 * Error types for the cinema-family library.
 *
 * Subtitle parsing, identifier decoding and request-level failures each get
 * their own enum, defined with the thiserror crate. Application glue (CLI,
 * configuration loading) uses anyhow on top of these.
 */

use thiserror::Error;

/// Errors raised while parsing an SRT document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// The cue-number line is not a bare integer
    #[error("Unable to parse cue number at line {line}: {content}")]
    InvalidCueNumber {
        /// 1-based line number
        line: usize,
        /// Offending line after trimming
        content: String,
    },

    /// The timecode line does not have the `HH:MM:SS,mmm --> HH:MM:SS,mmm` shape
    #[error("Timecode line {line} is badly formatted: {content}")]
    MalformedTimecode {
        /// 1-based line number
        line: usize,
        /// Offending line after trimming
        content: String,
    },

    /// A line appeared in a state that does not admit it
    #[error("Unexpected line {line}: {content:?}")]
    UnexpectedLine {
        /// 1-based line number
        line: usize,
        /// Offending line after trimming
        content: String,
    },

    /// Input ended right after a cue number, before its timecode
    #[error("Cue {id} ends before its timecode line")]
    IncompleteCue {
        /// Id of the dangling cue
        id: String,
    },
}

/// Errors raised while resolving an opaque path identifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The token is not a well-formed identifier
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The requested resource does not exist or its identifier is invalid
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// A bad identifier is reported to callers as a missing resource
impl From<IdentifierError> for AppError {
    fn from(error: IdentifierError) -> Self {
        Self::NotFound(error.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
