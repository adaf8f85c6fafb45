use thiserror::Error;

/// Failures that abort drawing a portfolio page
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PresentationError {
    /// Asset has no entry in the sector map
    #[error("No sector assigned to asset '{0}'")]
    UnknownAsset(String),

    /// Weights and asset names are not aligned
    #[error("Got {weights} weights for {names} asset names")]
    LengthMismatch { weights: usize, names: usize },

    /// Holding has no column in a price or return table
    #[error("Asset '{asset}' is missing from the {table} table")]
    MissingColumn { asset: String, table: String },

    /// Series cannot produce a move summary
    #[error("Need at least 2 observations to summarize performance, got {0}")]
    SeriesTooShort(usize),
}
