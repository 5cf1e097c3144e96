//! The board renderer: a 1:1 mapping between square indices and cell
//! elements, kept in sync with the engine's snapshot by full redraw.

use crate::dom::{Document, NodeId};
use crate::piece::Piece;
use crate::{Error, Result, ViewConfig};

/// An ASCII rendering of the board, one rank per line.
///
/// Uppercase letters are white pieces, lowercase black, `.` an empty
/// square.
#[derive(Debug, Clone)]
pub struct TextSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub text: String,
}

/// A chessboard view attached to a container element in a host document.
///
/// Cells are created once by [`BoardView::initialize_board`] and reused by
/// every [`BoardView::render_pieces`] pass; each holds at most one piece
/// image child.
pub struct BoardView {
    doc: Document,
    container: NodeId,
    cells: Vec<NodeId>,
    config: ViewConfig,
}

impl BoardView {
    /// Attach to the container element in `doc`, failing loudly when the
    /// host page has no element with the configured container class.
    pub fn attach(doc: Document, config: ViewConfig) -> Result<Self> {
        let container = doc.element_by_class(&config.container_class).ok_or_else(|| {
            log::error!(
                "host page has no element with class `{}`",
                config.container_class
            );
            Error::MissingContainer(config.container_class.clone())
        })?;
        Ok(Self {
            doc,
            container,
            cells: Vec::new(),
            config,
        })
    }

    /// Create the rows x cols grid of cell elements in row-major order.
    ///
    /// The container is cleared first, so calling this twice rebuilds the
    /// grid instead of duplicating it. Shading comes from `(row + col) % 2`:
    /// 0 is light, 1 is dark.
    pub fn initialize_board(&mut self) {
        self.doc.clear_children(self.container);
        self.cells.clear();

        for row in 0..self.config.rows {
            for col in 0..self.config.cols {
                let cell = self.doc.create_element("div");
                self.doc.add_class(cell, "square");
                self.doc.add_class(
                    cell,
                    if (row + col) % 2 == 0 { "lightSq" } else { "darkSq" },
                );
                self.doc.set_attribute(cell, "data-row", &row.to_string());
                self.doc.set_attribute(cell, "data-col", &col.to_string());
                self.doc.append_child(self.container, cell);
                self.cells.push(cell);
            }
        }

        log::debug!(
            "initialized {}x{} board ({} cells)",
            self.config.rows,
            self.config.cols,
            self.cells.len()
        );
    }

    /// Redraw every cell from the snapshot: full redraw semantics, no
    /// diffing. A square count beyond the cell count, a short snapshot, or
    /// a piece code above 12 is a fatal configuration error; the document
    /// is left untouched in that case.
    pub fn render_pieces(&mut self, snapshot: &[u8], square_count: usize) -> Result<()> {
        if square_count > self.cells.len() {
            log::error!(
                "square count {} exceeds the {} cells on the board",
                square_count,
                self.cells.len()
            );
            return Err(Error::CellCountMismatch {
                cells: self.cells.len(),
                squares: square_count,
            });
        }
        if snapshot.len() < square_count {
            log::error!(
                "snapshot of length {} is shorter than square count {}",
                snapshot.len(),
                square_count
            );
            return Err(Error::ShortSnapshot {
                len: snapshot.len(),
                squares: square_count,
            });
        }

        // Decode everything up front so a bad byte cannot leave the board
        // half drawn.
        let mut decoded = Vec::with_capacity(square_count);
        for (index, code) in snapshot.iter().take(square_count).enumerate() {
            decoded.push(Piece::from_code(*code, index)?);
        }

        for (index, piece) in decoded.into_iter().enumerate() {
            let cell = self.cells[index];
            for img in self.doc.children_by_tag(cell, "img") {
                self.doc.remove_child(cell, img);
            }
            if let Some(piece) = piece {
                let img = self.doc.create_element("img");
                let src = format!("{}/{}.svg", self.config.asset_base, piece.asset_id());
                self.doc.set_attribute(img, "src", &src);
                self.doc.append_child(cell, img);
            }
        }

        Ok(())
    }

    /// Number of cells created by `initialize_board`.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Asset id of the piece image currently at `index`, if any.
    pub fn cell_asset(&self, index: usize) -> Option<String> {
        let cell = *self.cells.get(index)?;
        let img = self.doc.children_by_tag(cell, "img").into_iter().next()?;
        let src = self.doc.get_attribute(img, "src")?;
        let name = src.rsplit('/').next()?;
        name.strip_suffix(".svg").map(|id| id.to_string())
    }

    /// ASCII diagram of the current board contents.
    pub fn text_snapshot(&self) -> TextSnapshot {
        let mut text = String::new();
        for row in 0..self.config.rows {
            for col in 0..self.config.cols {
                if col > 0 {
                    text.push(' ');
                }
                let glyph = self
                    .cell_asset(row * self.config.cols + col)
                    .and_then(|id| {
                        let mut chars = id.chars();
                        let side = chars.next()?;
                        let letter = chars.next()?;
                        Some(if side == 'b' {
                            letter.to_ascii_lowercase()
                        } else {
                            letter
                        })
                    })
                    .unwrap_or('.');
                text.push(glyph);
            }
            text.push('\n');
        }
        TextSnapshot {
            rows: self.config.rows,
            cols: self.config.cols,
            text,
        }
    }

    /// Serialize the host document, board included.
    pub fn to_html(&self) -> String {
        self.doc.to_html()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }
}
