use serde::Serialize;

/// Width of the dashboard grid in Grafana units.
pub const GRID_WIDTH: u32 = 24;
/// Width of every generated panel.
pub const PANEL_WIDTH: u32 = 12;
/// Height of every generated panel.
pub const PANEL_HEIGHT: u32 = 8;
/// Rows reserved above the first panel for the dashboard header.
pub const HEADER_HEIGHT: u32 = 4;

/// Position and size of a panel on the dashboard grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridPos {
    /// Height.
    pub h: u32,
    /// Width.
    pub w: u32,
    /// Column offset.
    pub x: u32,
    /// Row offset.
    pub y: u32,
}

/// Packing state for the two-column grid, threaded through one compilation run.
///
/// Placement consumes the cursor and hands back its successor, so the only layout
/// state is the value the caller holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCursor {
    x: u32,
    y: u32,
}

impl GridCursor {
    /// Cursor at the first cell below the header.
    pub fn new() -> Self {
        Self::at(0, HEADER_HEIGHT)
    }

    /// Cursor at an arbitrary cell.
    pub fn at(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Current column offset.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Current row offset.
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Place one panel at the cursor and return the advanced cursor.
    pub fn place(self) -> (GridPos, GridCursor) {
        let pos = GridPos {
            h: PANEL_HEIGHT,
            w: PANEL_WIDTH,
            x: self.x,
            y: self.y,
        };
        let next_x = self.x + PANEL_WIDTH;
        let next = if next_x >= GRID_WIDTH {
            GridCursor::at(0, self.y + PANEL_HEIGHT)
        } else {
            GridCursor::at(next_x, self.y)
        };
        (pos, next)
    }
}

impl Default for GridCursor {
    fn default() -> Self {
        Self::new()
    }
}
