//! Error types for plotly-utils.

use thiserror::Error;

/// Failures surfaced by the plotting helpers.
///
/// All of them are caused by caller input; none is transient.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    /// Unsupported enum value, out-of-range number or inconsistent shapes.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration value had the wrong type (e.g. a non-boolean flag).
    #[error("Type mismatch: `{name}` must be {expected}, received {received}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        received: String,
    },

    /// NaN values found in the samples under the `raise` policy.
    #[error("`samples` contains {0} NaN values")]
    ContainsNaN(usize),

    /// Feature combination that is explicitly not supported.
    #[error("Not implemented: {0}")]
    Unimplemented(String),

    /// Color string that is neither `#rrggbb` nor `rgb(r,g,b)`.
    #[error("Invalid color format: {0:?}")]
    InvalidColorFormat(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlotError>;
