//! Error types for the cut-flow engine.
//!
//! Errors follow a two-tier model: configuration and wiring problems are
//! surfaced as [`CutflowError`] values from constructors, before any event is
//! seen. The per-event evaluation path never returns an error; a cut whose
//! input cannot be retrieved simply fails that cut.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CutflowError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CutflowError {
    /// A required configuration block is absent. Running with an
    /// unconfigured selector would produce silent wrong answers, so this is
    /// fatal at startup.
    #[error("required configuration block missing: {0}")]
    MissingConfigBlock(&'static str),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A cut was registered outside the fixed cut-flow order.
    #[error("cut registered out of order: expected {expected}, found {found}")]
    CutOrder { expected: String, found: String },

    /// A cut label in the configuration does not name any registered cut.
    #[error("unknown cut label: {0}")]
    UnknownCut(String),

    /// A threshold was requested for a cut that carries none.
    #[error("cut has no threshold: {0}")]
    NotAThreshold(&'static str),

    /// A threshold was requested with the wrong type.
    #[error("threshold for {cut} is not a {requested} threshold")]
    ThresholdType {
        cut: &'static str,
        requested: &'static str,
    },

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CutflowError {
    fn from(err: std::io::Error) -> Self {
        CutflowError::Io(err.to_string())
    }
}
