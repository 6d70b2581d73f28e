use thiserror::Error;

/// Failures reported by the estimator. Every variant is a deterministic
/// function of the input; nothing is retried.
#[derive(Error, Debug)]
pub enum IriError {
    /// Required columns absent or unresolvable
    #[error("Schema error: {0}")]
    Schema(String),

    /// Too few samples, or non-positive duration or speed
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The configured segment length yields no scored segment
    #[error("Degenerate segmentation: {0}")]
    DegenerateSegmentation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IriError {
    /// Stable machine-readable kind for the UI layer
    pub fn kind(&self) -> &'static str {
        match self {
            IriError::Schema(_) => "schema_error",
            IriError::InsufficientData(_) => "insufficient_data",
            IriError::DegenerateSegmentation(_) => "degenerate_segmentation",
            IriError::Config(_) => "config_error",
            IriError::Csv(_) | IriError::Io(_) => "input_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, IriError>;
