use thiserror::Error;

/// Errors reported by the analysis routines.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input buffer is too small for the requested operation.
    #[error("input too short: need at least {needed} samples, got {got}")]
    InputTooShort { needed: usize, got: usize },

    /// A parameter failed validation at the call boundary.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The caller raised the cancellation flag mid-analysis.
    #[error("analysis cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
