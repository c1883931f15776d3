//! Error types for the turnreport system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Tokenizer no-matches are not errors; they are `Option::None` at the
//! primitive level. Everything here is a hard failure.

use std::fmt;

use thiserror::Error;

/// The main error type for turnreport operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a structural parse error at the given source line.
    #[must_use]
    pub fn parse(message: impl Into<String>, line: usize) -> Self {
        Self::new(ErrorKind::Parse {
            message: message.into(),
            line,
            section: None,
        })
    }

    /// Creates an unexpected end-of-input error.
    #[must_use]
    pub fn unexpected_end(expected: impl Into<String>, line: usize) -> Self {
        Self::new(ErrorKind::UnexpectedEnd {
            expected: expected.into(),
            line,
        })
    }

    /// Creates a cursor misuse error.
    #[must_use]
    pub fn cursor(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cursor(message.into()))
    }

    /// Creates an output sink error.
    #[must_use]
    pub fn sink(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Sink(message.into()))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates a merge error.
    #[must_use]
    pub fn merge(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Merge(message.into()))
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Attaches the section name to a parse error. Other kinds pass through.
    #[must_use]
    pub fn in_section(mut self, name: &str) -> Self {
        if let ErrorKind::Parse { section, .. } = &mut self.kind {
            if section.is_none() {
                *section = Some(name.to_string());
            }
        }
        self
    }

    /// Returns the source line this error points at, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match &self.kind {
            ErrorKind::Parse { line, .. }
            | ErrorKind::UnexpectedEnd { line, .. }
            | ErrorKind::Cancelled { line } => Some(*line),
            _ => self.context.as_ref().and_then(|c| c.line),
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A required anchor was missing where the grammar demands it.
    #[error("parse error at line {line}{}: {message}", section_suffix(.section))]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed) of the offending block.
        line: usize,
        /// The section being parsed, if known.
        section: Option<String>,
    },

    /// The input ended while a section still required content.
    #[error("unexpected end of input after line {line}: expected {expected}")]
    UnexpectedEnd {
        /// What the parser was looking for.
        expected: String,
        /// Last line number read.
        line: usize,
    },

    /// The cursor was driven in a way its contract forbids.
    #[error("cursor misuse: {0}")]
    Cursor(String),

    /// The structured output sink rejected an event.
    #[error("sink error: {0}")]
    Sink(String),

    /// I/O error reading input or writing output.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The parse was cancelled between logical blocks.
    #[error("parse cancelled after line {line}")]
    Cancelled {
        /// Last line fully processed.
        line: usize,
    },

    /// A batch job ran past its deadline.
    #[error("timed out after {seconds}s")]
    Timeout {
        /// The configured deadline.
        seconds: u64,
    },

    /// Documents could not be merged.
    #[error("merge error: {0}")]
    Merge(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::Serialization(e.to_string()))
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file or report name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Chain of sections/entities being parsed, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Adds a frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

fn section_suffix(section: &Option<String>) -> String {
    section
        .as_ref()
        .map(|s| format!(" in {s}"))
        .unwrap_or_default()
}

/// Result type alias using the turnreport [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
