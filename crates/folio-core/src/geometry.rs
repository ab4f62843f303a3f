//! Canvas geometry in logical pixels.

/// Logical pixels covered by one terminal cell horizontally.
pub const CELL_WIDTH: f64 = 8.0;
/// Logical pixels covered by one terminal cell vertically.
pub const CELL_HEIGHT: f64 = 16.0;

/// Size of the drawing canvas. Valid positions are `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds, or `None` when either side is empty or not finite.
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        (usable(width) && usable(height)).then_some(Self { width, height })
    }

    /// Bounds covering a terminal area of `columns x rows` cells.
    pub fn from_cells(columns: u16, rows: u16) -> Option<Self> {
        Self::new(columns as f64 * CELL_WIDTH, rows as f64 * CELL_HEIGHT)
    }

    /// Logical position of the center of a terminal cell.
    pub fn cell_center(column: u16, row: u16) -> (f64, f64) {
        (
            (column as f64 + 0.5) * CELL_WIDTH,
            (row as f64 + 0.5) * CELL_HEIGHT,
        )
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }

    /// Clamp a position into the canvas.
    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (x.clamp(0.0, self.width), y.clamp(0.0, self.height))
    }
}
