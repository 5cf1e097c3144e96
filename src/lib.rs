//! Boardview Headless Chessboard Renderer
//!
//! A headless chessboard rendering API for Rust: decodes the flat byte
//! snapshot supplied by an external board engine into a grid of cell
//! elements in a synthetic DOM, overlaying one piece image per occupied
//! square. All chess semantics stay in the engine; this crate only renders.
//!
//! # Features
//!
//! - **Headless DOM**: host pages parse into a mutable element arena and
//!   serialize back to HTML
//! - **Opaque engine boundary**: the engine exposes a square count and a
//!   byte per square, nothing more
//! - **Async facade**: a worker-thread-backed handle with an awaited ready
//!   signal and an optional bounded-rate refresh loop
//!
//! # Example
//!
//! ```
//! use boardview::{BoardEngine, BoardView, FixedEngine, Page, ViewConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let page = Page::from_html(boardview::DEFAULT_PAGE);
//! let mut view = BoardView::attach(page.doc, ViewConfig::default())?;
//! view.initialize_board();
//!
//! let engine = FixedEngine::initial();
//! view.render_pieces(&engine.snapshot_bytes(), engine.square_count())?;
//! print!("{}", view.text_snapshot().text);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod dom;
pub mod engine;
pub mod input;
pub mod page;
pub mod piece;
pub mod render;

// Async-friendly board handle (worker-backed abstraction)
pub mod async_api;

pub use async_api::{BoardHandle, RefreshLoop};
pub use dom::{Document, NodeId};
pub use engine::{FixedEngine, SnapshotFile, INITIAL_PLACEMENT};
pub use input::{ClickEvent, Selection};
pub use page::{Page, DEFAULT_PAGE};
pub use piece::{Piece, PieceKind, Side};
pub use render::{BoardView, TextSnapshot};

/// Configuration for the board view
///
/// The defaults describe a standard 8x8 board rendered into a container
/// carrying the `chessboard` class, with piece images addressed as
/// `./img/{assetId}.svg`.
///
/// # Examples
///
/// ```
/// let cfg = boardview::ViewConfig::default();
/// assert_eq!(cfg.rows * cfg.cols, 64);
/// ```
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Number of board rows
    pub rows: usize,
    /// Number of board columns
    pub cols: usize,
    /// Class name of the container element in the host page
    pub container_class: String,
    /// Base path for piece image assets (`{asset_base}/{assetId}.svg`)
    pub asset_base: String,
    /// Timeout for host page fetches in milliseconds, applied by
    /// `Page::fetch`
    pub timeout_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            container_class: "chessboard".to_string(),
            asset_base: "./img".to_string(),
            timeout_ms: 30000,
        }
    }
}

/// Core trait for board engine collaborators.
///
/// The engine owns all board state and rule logic. The renderer reads a
/// fresh copy of the snapshot on every render pass and never assumes the
/// bytes are live or mutable; `square_count` must be consistent with the
/// snapshot length.
pub trait BoardEngine {
    /// Total number of addressable squares (64 for a standard board)
    fn square_count(&self) -> usize;

    /// One piece code per square index, row-major from index 0
    fn snapshot_bytes(&self) -> Vec<u8>;
}
