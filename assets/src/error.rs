use thiserror::Error;

/// Rejections raised when a partial update or a batch record would corrupt
/// the collection. The failing operation is dropped; nothing is applied.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("field `{field}` cannot be cleared by a partial update")]
    NullField { field: &'static str },

    #[error("field `{field}` must be a number")]
    NotANumber { field: &'static str },

    #[error("field `{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("rank must be a positive integer")]
    InvalidRank,

    #[error("sparkline must hold exactly {expected} samples, got {actual}")]
    SparklineLength { expected: usize, actual: usize },

    #[error("unknown update field `{field}`")]
    UnknownField { field: String },

    #[error("update payload must be a JSON object")]
    NotAnObject,
}
