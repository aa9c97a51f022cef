//! The seven-segment "LCD" digit font.
//!
//! Thirty-four anchor points in a 120×220 cell define the strokes of a
//! calculator-style digit: three horizontal bars (H1 top, H2 middle,
//! H3 bottom), four vertical bars (V1/V2 upper, V3/V4 lower), four corner
//! filler triangles beside the middle bar (T1–T4), and the two colon dots
//! (C1/C2). Every bar is decomposed into four filled triangles so its
//! angled ends render correctly; the colon dots are filled rectangles.
//!
//! ```text
//!  ---               H1
//! | . |           V1 C1 V2
//! ><---><         T1T2H2T3T4
//! | . |           V3 C2 V4
//!  ---               H3
//! ```
//!
//! The middle bar overlaps T2 and T3 by construction.

use super::{Point, Primitive};

/// Width of one digit cell in local units.
pub const CELL_WIDTH: u16 = 120;
/// Height of one digit cell in local units.
pub const CELL_HEIGHT: u16 = 220;
/// Horizontal gap between two adjacent digit cells, in local units.
pub const SPACING: u16 = 20;

/// Roughly 17 digits across an 800-pixel panel.
pub const SCALE_SMALL: f32 = 0.33;
/// Roughly 9 digits across an 800-pixel panel.
pub const SCALE_MEDIUM: f32 = 0.63;
/// Roughly 5 digits across an 800-pixel panel.
pub const SCALE_LARGE: f32 = 1.15;

// Anchor points, top-left origin.
const P01: Point = (20, 0);
const P02: Point = (100, 0);
const P03: Point = (10, 10);
const P04: Point = (110, 10);
const P05: Point = (0, 20);
const P06: Point = (120, 20);
const P07: Point = (30, 30);
const P08: Point = (90, 30);
const P09: Point = (45, 60);
const P12: Point = (75, 90);
const P13: Point = (0, 95);
const P14: Point = (30, 95);
const P15: Point = (90, 95);
const P16: Point = (120, 95);
const P17: Point = (15, 110);
const P18: Point = (105, 110);
const P19: Point = (0, 125);
const P20: Point = (30, 125);
const P21: Point = (90, 125);
const P22: Point = (120, 125);
const P23: Point = (45, 130);
const P26: Point = (75, 160);
const P27: Point = (30, 190);
const P28: Point = (90, 190);
const P29: Point = (0, 200);
const P30: Point = (120, 200);
const P31: Point = (10, 210);
const P32: Point = (110, 210);
const P33: Point = (20, 220);
const P34: Point = (100, 220);

const fn tri(a: Point, b: Point, c: Point) -> Primitive {
    Primitive::FilledTriangle([a, b, c])
}

const fn rect(a: Point, b: Point) -> Primitive {
    Primitive::FilledRect([a, b])
}

/// One stroke of the seven-segment layout, in emission order.
pub type Segment = &'static [Primitive];

static H1: [Primitive; 4] = [
    tri(P01, P07, P03),
    tri(P01, P07, P02),
    tri(P02, P08, P04),
    tri(P02, P08, P07),
];
static H2: [Primitive; 4] = [
    tri(P14, P20, P17),
    tri(P14, P20, P15),
    tri(P15, P21, P20),
    tri(P15, P21, P18),
];
static H3: [Primitive; 4] = [
    tri(P27, P33, P31),
    tri(P27, P33, P28),
    tri(P28, P34, P33),
    tri(P28, P34, P32),
];
static V1: [Primitive; 4] = [
    tri(P05, P07, P03),
    tri(P05, P07, P13),
    tri(P13, P14, P07),
    tri(P13, P14, P17),
];
static V2: [Primitive; 4] = [
    tri(P08, P06, P04),
    tri(P08, P06, P15),
    tri(P15, P16, P06),
    tri(P15, P16, P18),
];
static V3: [Primitive; 4] = [
    tri(P19, P20, P17),
    tri(P19, P20, P29),
    tri(P29, P27, P20),
    tri(P29, P27, P31),
];
static V4: [Primitive; 4] = [
    tri(P21, P22, P18),
    tri(P21, P22, P28),
    tri(P28, P30, P22),
    tri(P28, P30, P32),
];
static T1: [Primitive; 1] = [tri(P13, P19, P17)];
static T2: [Primitive; 1] = [tri(P14, P20, P17)];
static T3: [Primitive; 1] = [tri(P15, P21, P18)];
static T4: [Primitive; 1] = [tri(P16, P22, P18)];

/// The colon glyph: two filled-rectangle dots.
pub static COLON: [Primitive; 2] = [rect(P09, P12), rect(P23, P26)];

static DIGIT_0: [Segment; 10] = [&H1, &H3, &V1, &V2, &V3, &V4, &T1, &T2, &T3, &T4];
static DIGIT_1: [Segment; 4] = [&V2, &V4, &T3, &T4];
static DIGIT_2: [Segment; 5] = [&H1, &H2, &H3, &V2, &V3];
static DIGIT_3: [Segment; 6] = [&H1, &H2, &H3, &V2, &V4, &T4];
static DIGIT_4: [Segment; 5] = [&H2, &V1, &V2, &V4, &T4];
static DIGIT_5: [Segment; 5] = [&H1, &H2, &H3, &V1, &V4];
static DIGIT_6: [Segment; 7] = [&H1, &H2, &H3, &V1, &V3, &V4, &T1];
static DIGIT_7: [Segment; 6] = [&H1, &V1, &V2, &V4, &T3, &T4];
static DIGIT_8: [Segment; 9] = [&H1, &H2, &H3, &V1, &V2, &V3, &V4, &T1, &T4];
static DIGIT_9: [Segment; 7] = [&H1, &H2, &H3, &V1, &V2, &V4, &T4];

static DIGITS: [&[Segment]; 10] = [
    &DIGIT_0, &DIGIT_1, &DIGIT_2, &DIGIT_3, &DIGIT_4, &DIGIT_5, &DIGIT_6, &DIGIT_7, &DIGIT_8,
    &DIGIT_9,
];

/// Returns the ordered stroke segments composing a decimal digit 0–9.
pub fn digit(d: u8) -> Option<&'static [Segment]> {
    DIGITS.get(d as usize).copied()
}

/// Returns the flattened primitive sequence for a digit, in emission order.
pub fn digit_primitives(d: u8) -> Option<impl Iterator<Item = &'static Primitive>> {
    digit(d).map(|segments| segments.iter().flat_map(|segment| segment.iter()))
}
