use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum EdiError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Segment(#[from] SegmentError),
}

impl EdiError {
    /// True when the error is a missing node rather than a malformed one.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, EdiError::Segment(SegmentError::NotFound { .. }))
    }
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("The {first} and the {second} both use '{value}'")]
    #[diagnostic(
        code(config::duplicate_separator),
        help("Component separator, data separator, release indicator and segment terminator must all differ.")
    )]
    DuplicateSeparator {
        first: &'static str,
        second: &'static str,
        value: char,
    },

    #[error("Unknown dialect '{name}'")]
    #[diagnostic(
        code(config::unknown_dialect),
        help("Supported dialects: edifact.")
    )]
    UnknownDialect { name: String },

    #[error("Invalid separator configuration: {message}")]
    #[diagnostic(
        code(config::parse),
        help("Each separator is a single character, for example component ':' and data '+'.")
    )]
    Parse { message: String },
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("Segment '{tag}' was not found")]
    #[diagnostic(
        code(segment::not_found),
        help("Interchange header and trailer are mandatory; add the node to the source tree.")
    )]
    NotFound { tag: String },

    #[error("Segment '{tag}' is malformed: {reason}")]
    #[diagnostic(
        code(segment::format),
        help("Check the node kind, its tag and the number of data elements.")
    )]
    Format { tag: String, reason: String },
}
