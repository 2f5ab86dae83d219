//! Button placement: drag positioning, grid snapping, and bounds clamping.
//!
//! Snapping uses a fixed pixel grid (`grid_size`, rounding to the nearest
//! multiple). Free placement skips the snap but is still clamped, so a button's
//! bounding box never leaves the board: `0 <= left <= board.width - button.width`.

use rand::Rng;

use crate::models::{BoardRect, Point, Position, Size};

/// Cells per board side used for initial placement of new buttons.
pub const PLACEMENT_CELLS: u32 = 8;

/// Columns on the right that new buttons avoid (reserved for controls).
const RESERVED_COLUMNS: u32 = 2;

/// Rows from the top that new buttons may land in, so they are visible without scrolling.
const PLACEMENT_ROWS: u32 = 2;

/// Pure placement calculator for a board of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionEngine {
    board: BoardRect,
    button: Size,
    grid_size: f64,
}

impl PositionEngine {
    /// Creates an engine for the given board, button size, and snap grid unit.
    #[must_use]
    pub const fn new(board: BoardRect, button: Size, grid_size: f64) -> Self {
        Self {
            board,
            button,
            grid_size,
        }
    }

    /// Current board rectangle.
    #[must_use]
    pub const fn board(&self) -> BoardRect {
        self.board
    }

    /// Updates the board rectangle (e.g. after a window resize).
    pub fn set_board(&mut self, board: BoardRect) {
        self.board = board;
    }

    /// Size of a button's bounding box.
    #[must_use]
    pub const fn button_size(&self) -> Size {
        self.button
    }

    /// Converts a raw pointer location into a button position.
    ///
    /// `drag_offset` is the pointer-to-button-origin delta captured when the drag
    /// started. Non-finite inputs count as zero, so this never fails.
    #[must_use]
    pub fn compute_position(&self, raw: Point, drag_offset: Point, snap_enabled: bool) -> Position {
        let raw = raw.sanitized();
        let offset = drag_offset.sanitized();

        let mut left = raw.x - offset.x;
        let mut top = raw.y - offset.y;

        if snap_enabled {
            left = self.snap(left);
            top = self.snap(top);
        }

        self.clamp(Position::new(left, top))
    }

    /// Picks a random cell in the top rows, away from the control columns.
    pub fn initial_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let cell_width = self.board.width / f64::from(PLACEMENT_CELLS);
        let cell_height = self.board.height / f64::from(PLACEMENT_CELLS);

        let column = rng.gen_range(0..PLACEMENT_CELLS - RESERVED_COLUMNS);
        let row = rng.gen_range(0..PLACEMENT_ROWS);

        self.clamp(Position::new(
            f64::from(column) * cell_width,
            f64::from(row) * cell_height,
        ))
    }

    /// Keeps the button's bounding box inside the board.
    #[must_use]
    pub fn clamp(&self, position: Position) -> Position {
        let max_left = (self.board.width - self.button.width).max(0.0);
        let max_top = (self.board.height - self.button.height).max(0.0);

        let left = if position.left.is_finite() { position.left } else { 0.0 };
        let top = if position.top.is_finite() { position.top } else { 0.0 };

        Position::new(left.clamp(0.0, max_left), top.clamp(0.0, max_top))
    }

    fn snap(&self, value: f64) -> f64 {
        if self.grid_size > 0.0 {
            (value / self.grid_size).round() * self.grid_size
        } else {
            value
        }
    }
}
