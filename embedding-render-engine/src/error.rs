//! Error taxonomy for batch loading and rendering.

/// Everything that can stop a batch from reaching the screen.
///
/// Data-shape variants are raised by `prepare_batch` before any mesh,
/// material or entity exists, so an `Err` never leaves partial geometry behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VisualiserError {
    #[error("at least 2 vectors are required to project a batch, got {count}")]
    InsufficientData { count: usize },

    #[error("projected coordinates collapse to a single value ({value})")]
    DegenerateRange { value: f64 },

    #[error("vector {index} has {found} dimensions, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("{labels} labels supplied for {vectors} vectors")]
    LabelMismatch { labels: usize, vectors: usize },

    #[error("vector {index} contains a non-finite component")]
    NonFiniteInput { index: usize },

    #[error("rendering resource unavailable: {0}")]
    ResourceInit(String),
}

impl VisualiserError {
    /// JSON-RPC application error code (reserved -32000..-32099 range).
    pub fn rpc_code(&self) -> i32 {
        match self {
            Self::InsufficientData { .. } => -32001,
            Self::DegenerateRange { .. } => -32002,
            Self::DimensionMismatch { .. } => -32003,
            Self::LabelMismatch { .. } => -32004,
            Self::NonFiniteInput { .. } => -32005,
            Self::ResourceInit(_) => -32010,
        }
    }

    /// Stable machine-readable name, sent alongside the message to the host page.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "insufficient_data",
            Self::DegenerateRange { .. } => "degenerate_range",
            Self::DimensionMismatch { .. } => "dimension_mismatch",
            Self::LabelMismatch { .. } => "label_mismatch",
            Self::NonFiniteInput { .. } => "non_finite_input",
            Self::ResourceInit(_) => "resource_init",
        }
    }
}

pub type Result<T> = std::result::Result<T, VisualiserError>;
