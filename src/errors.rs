/*!
 * Error types for the cuecodec library.
 *
 * This module contains the error taxonomy for reading, writing and
 * validating caption documents, using the thiserror crate for ergonomic
 * error definitions.
 */

use thiserror::Error;

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" (line {})", line),
        None => String::new(),
    }
}

/// Errors that can occur while reading a caption stream
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptionReadError {
    /// Content is not in a representation the reader accepts
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed timing line or timestamp
    #[error("{message}{}", line_suffix(.line))]
    Syntax {
        /// What was wrong with the line
        message: String,
        /// 1-based line number, once known
        line: Option<usize>,
    },

    /// Inverted or non-monotonic timing (strict mode only)
    #[error("{message}{}", line_suffix(.line))]
    TimingOrder {
        /// What was wrong with the timing
        message: String,
        /// 1-based line number, once known
        line: Option<usize>,
    },

    /// The stream parsed cleanly but produced no captions
    #[error("No captions found: {0}")]
    NoCaptions(String),
}

impl CaptionReadError {
    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
            line: None,
        }
    }

    pub(crate) fn timing_order(message: impl Into<String>) -> Self {
        Self::TimingOrder {
            message: message.into(),
            line: None,
        }
    }

    /// Attach a 1-based line number to syntax and timing errors.
    pub fn at_line(self, line_number: usize) -> Self {
        match self {
            Self::Syntax { message, .. } => Self::Syntax {
                message,
                line: Some(line_number),
            },
            Self::TimingOrder { message, .. } => Self::TimingOrder {
                message,
                line: Some(line_number),
            },
            other => other,
        }
    }

    /// Line number the error was reported at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } | Self::TimingOrder { line, .. } => *line,
            _ => None,
        }
    }
}

/// Errors raised by layout geometry conversions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A pixel value cannot be relativized without the matching video dimension
    #[error("Cannot convert pixel {axis} to a percentage: video {axis} is unknown")]
    MissingVideoDimensions {
        /// "width" or "height"
        axis: &'static str,
    },

    /// A video dimension of zero was supplied
    #[error("Video {axis} must be greater than zero")]
    ZeroVideoDimension {
        /// "width" or "height"
        axis: &'static str,
    },
}

/// Errors that can occur while writing a caption document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptionWriteError {
    /// A style class references itself, directly or transitively
    #[error("Style class cycle detected: {0}")]
    StyleCycle(String),

    /// Positioning could not be translated
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Rejections raised by the sequenced-metadata policy layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    /// First physical line does not carry the WEBVTT token
    #[error("Header WebVTT is missing")]
    MissingHeader,

    /// Two blank physical lines in a row
    #[error("Consecutive new lines found (line {line})")]
    ConsecutiveBlankLines {
        /// 1-based line number of the second blank line
        line: usize,
    },

    /// A cue carries no comment metadata
    #[error("Metadata not found (cue {index})")]
    MissingComment {
        /// 0-based cue index
        index: usize,
    },

    /// The cue's comment text is not JSON
    #[error("Metadata is not a valid JSON (cue {index}): {reason}")]
    InvalidJsonComment {
        /// 0-based cue index
        index: usize,
        /// Parser message
        reason: String,
    },

    /// The metadata object lacks the "Seq" key
    #[error("Metadata is missing Seq number (cue {index})")]
    MissingSeq {
        /// 0-based cue index
        index: usize,
    },

    /// The metadata object lacks the "game_id" key
    #[error("Metadata is missing Game ID (cue {index})")]
    MissingGameId {
        /// 0-based cue index
        index: usize,
    },

    /// An id value cannot be read as an integer
    #[error("Metadata {key} is not an integer (cue {index}): {value}")]
    NonCoercibleId {
        /// 0-based cue index
        index: usize,
        /// Offending key
        key: String,
        /// Offending value, as JSON
        value: String,
    },

    /// The document holds no cues at all
    #[error("No cues found")]
    NoCues,

    /// The underlying WebVTT read failed
    #[error("Read error: {0}")]
    Read(#[from] CaptionReadError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from reading captions
    #[error("Read error: {0}")]
    Read(#[from] CaptionReadError),

    /// Error from writing captions
    #[error("Write error: {0}")]
    Write(#[from] CaptionWriteError),

    /// Error from metadata validation
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
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
