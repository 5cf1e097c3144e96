//! Interaction state for square selection.
//!
//! The selected square is an explicit object with a defined lifecycle:
//! created at page init, replaced on each click, cleared when consumed.
//! No module-level globals.

/// A click on the board, already resolved to grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub row: usize,
    pub col: usize,
}

impl ClickEvent {
    /// Square index of the clicked cell, or `None` when the click falls
    /// outside a `rows` x `cols` board.
    pub fn square_index(self, rows: usize, cols: usize) -> Option<usize> {
        if self.row < rows && self.col < cols {
            Some(self.row * cols + self.col)
        } else {
            None
        }
    }
}

/// At most one selected square at a time.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    current: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a square, replacing any previous selection.
    pub fn select(&mut self, index: usize) {
        self.current = Some(index);
    }

    /// Consume the selection; the state is cleared once taken.
    pub fn take(&mut self) -> Option<usize> {
        self.current.take()
    }

    /// Look without consuming.
    pub fn peek(&self) -> Option<usize> {
        self.current
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
