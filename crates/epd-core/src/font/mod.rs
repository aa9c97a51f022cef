//! Vector digit fonts as static primitive tables.
//!
//! Both fonts define their glyphs in a local cell coordinate space with the
//! origin at the top-left corner. A glyph is nothing but an ordered list of
//! fill primitives; scaling and placement happen in
//! [`crate::render::digits`], and each primitive becomes exactly one
//! fill-rectangle or fill-triangle command on the wire.
//!
//! - [`lcd`] is the calculator-style seven-segment font, built from
//!   triangles so that the angled stroke ends render cleanly.
//! - [`block`] is a compact 3×5 font, built by filling the whole cell and
//!   carving the counters back out in the background color.

pub mod block;
pub mod lcd;

/// A 2-D point in a glyph's local cell space.
pub type Point = (u16, u16);

/// One drawable glyph fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// A filled triangle given by its three corners.
    FilledTriangle([Point; 3]),
    /// A filled axis-aligned rectangle given by two opposite corners.
    FilledRect([Point; 2]),
}
