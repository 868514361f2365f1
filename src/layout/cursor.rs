//! Placement cursor and its pagination step.

use super::GridGeometry;

/// Position of the next free cell.
///
/// `x`/`y` are the bottom-left corner of the cell in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub x: f64,
    pub y: f64,
    pub column: u32,
    pub row: u32,
    pub page: u32,
}

/// Result of advancing past a filled cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advance {
    pub next: Cursor,
    /// The cell just filled was the last on its page.
    pub page_break: bool,
}

impl Cursor {
    /// Cursor at the top-left cell of the first page.
    pub fn start(grid: &GridGeometry) -> Self {
        let (x, y) = grid.origin();
        Self {
            x,
            y,
            column: 0,
            row: 0,
            page: 0,
        }
    }

    /// Step to the next cell: left to right, then top to bottom, then the
    /// top-left cell of a new page.
    pub fn advance(&self, grid: &GridGeometry) -> Advance {
        let mut next = *self;
        let mut page_break = false;

        next.column += 1;
        if next.column >= grid.columns {
            next.column = 0;
            next.row += 1;
            next.x = grid.margin;
            next.y -= grid.cell_height + grid.padding;

            if next.row >= grid.rows {
                let (_, top) = grid.origin();
                next.row = 0;
                next.y = top;
                next.page += 1;
                page_break = true;
            }
        } else {
            next.x += grid.cell_width + grid.padding;
        }

        Advance { next, page_break }
    }
}
