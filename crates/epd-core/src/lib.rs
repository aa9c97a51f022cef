//! # epd-core
//!
//! Shared library for EPD-Link containing the serial frame codec, the
//! command catalog, the vector digit fonts, and the text layout engine.
//!
//! This crate is pure computation: it turns drawing intent into the exact
//! byte frames a serial-addressed e-paper module expects, and it never
//! opens a port itself. The `epd-driver` crate owns transports and timing.
//!
//! # Architecture overview (for beginners)
//!
//! The display module speaks a small framed command protocol over a serial
//! line: every command travels as a begin byte, a big-endian length, an
//! opcode, a payload, a fixed end marker, and an XOR checksum.  Nothing is
//! drawn until an explicit update command flushes the module's buffer to
//! the e-paper panel.
//!
//! This crate defines:
//!
//! - **`protocol`** – Framing ([`protocol::frame`]) and the typed command
//!   catalog ([`protocol::commands`]): handshake, configuration, drawing
//!   primitives, text, and bitmaps, each encoding itself to a complete
//!   frame.
//!
//! - **`font`** – Static vector glyph tables for two digit fonts: the
//!   seven-segment [`font::lcd`] style and the compact [`font::block`]
//!   style.
//!
//! - **`render`** – The pure planners: [`render::digits`] decomposes a
//!   digit string into an ordered command plan with pacing markers, and
//!   [`render::layout`] wraps prose into width-limited lines using a
//!   calibrated width table.

pub mod font;
pub mod protocol;
pub mod render;

// Re-export the most-used types at the crate root so callers can write
// `epd_core::Command` instead of `epd_core::protocol::commands::Command`.
pub use protocol::commands::{
    BaudRate, Color, Command, CommandError, CoordinateEncoding, FontSize, MemoryMode, Opcode,
    Rotation,
};
pub use protocol::frame::{build_frame, xor_checksum};
pub use render::digits::{plan_digits, DigitPlan, FontStyle, Step};
pub use render::layout::{measure_width, wrap_lines, LayoutError, WrappedLine};
