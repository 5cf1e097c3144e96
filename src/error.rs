//! Error types for the board view engine

use thiserror::Error;

/// Result type alias for board view operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the board view engine
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to initialize the view
    #[error("View initialization failed: {0}")]
    InitializationError(String),

    /// Failed to load or parse the host page
    #[error("Failed to load page: {0}")]
    PageError(String),

    /// The host page has no element with the configured container class
    #[error("No container element with class `{0}` in the document")]
    MissingContainer(String),

    /// More squares were requested than cells exist on the board
    #[error("Square count {squares} exceeds the {cells} cells on the board")]
    CellCountMismatch { cells: usize, squares: usize },

    /// The snapshot holds fewer bytes than the requested square count
    #[error("Snapshot of length {len} is shorter than square count {squares}")]
    ShortSnapshot { len: usize, squares: usize },

    /// A snapshot byte falls outside the 0-12 piece code range
    #[error("Invalid piece code {code} at square index {index}")]
    InvalidPieceCode { index: usize, code: u8 },

    /// Failed to read or write a snapshot file
    #[error("Snapshot file error: {0}")]
    SnapshotFileError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
