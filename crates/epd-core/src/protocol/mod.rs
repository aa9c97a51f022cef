//! Protocol module containing the frame codec and the command catalog.

pub mod commands;
pub mod frame;

pub use commands::{
    BaudRate, Color, Command, CommandError, CoordinateEncoding, FontSize, MemoryMode, Opcode,
    Rotation,
};
pub use frame::{build_frame, xor_checksum};
