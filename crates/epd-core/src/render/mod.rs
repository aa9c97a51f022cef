//! Host-side rendering: digit glyph planning and text layout.
//!
//! Everything in here is pure computation over the protocol types in
//! [`crate::protocol`]; nothing talks to a transport.

pub mod digits;
pub mod layout;

pub use digits::{plan_digits, DigitPlan, FontStyle, Step, GLYPHS_PER_BATCH};
pub use layout::{measure_width, wrap_lines, LayoutError, WrappedLine};
