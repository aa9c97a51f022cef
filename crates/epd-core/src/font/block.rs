//! The compact 3×5 "block" digit font.
//!
//! Where the LCD font spends up to 28 triangles per digit, a block digit
//! costs at most three rectangles: the whole 30×50 cell is filled in the
//! foreground color and the digit's counters are carved back out with one
//! or two background-colored rectangles.
//!
//! ```text
//! ### ### ### ### ### # # ### ###  #  ###
//! # # # #   # #   #   # #   #   #  #  # #
//! ### ###   # ### ### ### ### ###  #  # #
//!   # # #   # # #   #   #   # #    #  # #
//! ### ###   # ### ###   # ### ###  #  ###
//! ```
//!
//! The colon has no carve set of its own: it reuses digit 8's carves with
//! foreground and background swapped, leaving only the two counters inked.

use super::Point;

/// Width of one digit cell in local units.
pub const CELL_WIDTH: u16 = 30;
/// Height of one digit cell in local units.
pub const CELL_HEIGHT: u16 = 50;
/// Horizontal gap between two adjacent digit cells, in local units.
pub const SPACING: u16 = 5;

/// Roughly 23 digits across an 800-pixel panel.
pub const SCALE_SMALL: f32 = 1.0;
/// Roughly 9 digits across an 800-pixel panel.
pub const SCALE_MEDIUM: f32 = 2.5;
/// Roughly 5 digits across an 800-pixel panel.
pub const SCALE_LARGE: f32 = 4.65;

/// An axis-aligned rectangle as two opposite corners.
pub type Carve = [Point; 2];

/// The full cell rectangle, filled before carving.
pub const CELL: Carve = [(0, 0), (CELL_WIDTH, CELL_HEIGHT)];

// Grid points on the 10-unit lattice.
const B01: Point = (0, 0);
const B02: Point = (10, 0);
const B03: Point = (20, 0);
const B04: Point = (0, 10);
const B05: Point = (10, 10);
const B06: Point = (20, 20);
const B07: Point = (30, 20);
const B08: Point = (0, 30);
const B09: Point = (10, 30);
const B10: Point = (20, 40);
const B11: Point = (30, 40);
const B12: Point = (10, 50);
const B13: Point = (20, 50);
const B14: Point = (30, 50);

static CARVE_0: [Carve; 1] = [[B05, B10]];
static CARVE_1: [Carve; 2] = [[B01, B12], [B03, B14]];
static CARVE_2: [Carve; 2] = [[B04, B06], [B09, B11]];
static CARVE_3: [Carve; 2] = [[B04, B06], [B08, B10]];
static CARVE_4: [Carve; 2] = [[B02, B06], [B08, B13]];
static CARVE_5: [Carve; 2] = [[B05, B07], [B08, B10]];
static CARVE_6: [Carve; 2] = [[B02, B07], [B09, B10]];
static CARVE_7: [Carve; 1] = [[B04, B13]];
static CARVE_8: [Carve; 2] = [[B05, B06], [B09, B10]];
static CARVE_9: [Carve; 2] = [[B05, B06], [B08, B10]];

static CARVES: [&[Carve]; 10] = [
    &CARVE_0, &CARVE_1, &CARVE_2, &CARVE_3, &CARVE_4, &CARVE_5, &CARVE_6, &CARVE_7, &CARVE_8,
    &CARVE_9,
];

/// Returns the carve rectangles for a decimal digit 0–9.
pub fn carves(d: u8) -> Option<&'static [Carve]> {
    CARVES.get(d as usize).copied()
}

/// The carve set the colon borrows (digit 8's counters).
pub fn colon_carves() -> &'static [Carve] {
    &CARVE_8
}
