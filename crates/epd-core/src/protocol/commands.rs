//! The command catalog: every drawing and configuration operation the
//! display controller understands, as a typed [`Command`] that knows its
//! opcode and how to lay out its payload bytes.
//!
//! Payloads are concatenations of encoded coordinates (see
//! [`CoordinateEncoding`]), fixed single-byte enum values, and
//! zero-terminated text. The surrounding frame (begin marker, length,
//! end marker, checksum) is added by [`crate::protocol::frame`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::frame;

/// Longest accepted text payload, in bytes, before the terminating zero.
pub const MAX_TEXT_BYTES: usize = 1020;

/// First coordinate value whose high byte is two decimal digits, which the
/// legacy encoder could not represent (see [`CoordinateEncoding`]).
pub const LEGACY_COORDINATE_LIMIT: u16 = 2560;

/// Errors produced while validating command arguments.
///
/// These are rejected-input conditions: no frame is built and nothing is
/// transmitted. They never represent a protocol defect.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The text (or bitmap name, or GB2312 data) exceeds [`MAX_TEXT_BYTES`].
    #[error("text exceeds the maximum of {MAX_TEXT_BYTES} bytes: got {0}")]
    TextTooLong(usize),

    /// Text payloads carry one code byte per character, so only ASCII fits.
    #[error("text contains a non-ASCII character: {0:?}")]
    NonAsciiText(char),

    /// GB2312 glyph codes are two bytes each; an odd count is malformed.
    #[error("GB2312 data must be whole byte pairs: got {0} bytes")]
    OddGb2312Length(usize),

    /// The legacy coordinate encoding corrupts frames at or above
    /// [`LEGACY_COORDINATE_LIMIT`]; such coordinates are rejected instead.
    #[error("coordinate {0} is outside the range the legacy encoding can represent (< {LEGACY_COORDINATE_LIMIT})")]
    CoordinateOutOfLegacyRange(u16),

    /// The byte is not in the opcode table.
    #[error("unknown opcode byte 0x{0:02X}")]
    UnknownOpcode(u8),

    /// The byte is not one of the four panel shades.
    #[error("unknown color byte 0x{0:02X}")]
    UnknownColor(u8),

    /// The byte is not a built-in font size selector.
    #[error("unknown font size selector 0x{0:02X}")]
    UnknownFontSize(u8),

    /// The byte is not a storage selector.
    #[error("unknown memory mode byte 0x{0:02X}")]
    UnknownMemoryMode(u8),

    /// The byte is not a rotation value.
    #[error("unknown rotation byte 0x{0:02X}")]
    UnknownRotation(u8),

    /// The rate is not one the controller accepts.
    #[error("unsupported baud rate {0}")]
    UnsupportedBaudRate(u32),
}

// ── Opcode table ──────────────────────────────────────────────────────────────

/// Single-byte operation identifiers, as documented for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    Handshake = 0x00,
    SetBaud = 0x01,
    ReadBaud = 0x02,
    SetMemoryMode = 0x07,
    EnterStopMode = 0x08,
    Update = 0x0A,
    SetRotation = 0x0D,
    ImportFont = 0x0E,
    ImportPicture = 0x0F,
    SetColor = 0x10,
    SetEnglishFont = 0x1E,
    SetChineseFont = 0x1F,
    DrawPixel = 0x20,
    DrawLine = 0x22,
    FillRect = 0x24,
    DrawRect = 0x25,
    DrawCircle = 0x26,
    FillCircle = 0x27,
    DrawTriangle = 0x28,
    FillTriangle = 0x29,
    Clear = 0x2E,
    DrawString = 0x30,
    DrawBitmap = 0x70,
}

impl TryFrom<u8> for Opcode {
    type Error = CommandError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Opcode::Handshake),
            0x01 => Ok(Opcode::SetBaud),
            0x02 => Ok(Opcode::ReadBaud),
            0x07 => Ok(Opcode::SetMemoryMode),
            0x08 => Ok(Opcode::EnterStopMode),
            0x0A => Ok(Opcode::Update),
            0x0D => Ok(Opcode::SetRotation),
            0x0E => Ok(Opcode::ImportFont),
            0x0F => Ok(Opcode::ImportPicture),
            0x10 => Ok(Opcode::SetColor),
            0x1E => Ok(Opcode::SetEnglishFont),
            0x1F => Ok(Opcode::SetChineseFont),
            0x20 => Ok(Opcode::DrawPixel),
            0x22 => Ok(Opcode::DrawLine),
            0x24 => Ok(Opcode::FillRect),
            0x25 => Ok(Opcode::DrawRect),
            0x26 => Ok(Opcode::DrawCircle),
            0x27 => Ok(Opcode::FillCircle),
            0x28 => Ok(Opcode::DrawTriangle),
            0x29 => Ok(Opcode::FillTriangle),
            0x2E => Ok(Opcode::Clear),
            0x30 => Ok(Opcode::DrawString),
            0x70 => Ok(Opcode::DrawBitmap),
            _ => Err(CommandError::UnknownOpcode(value)),
        }
    }
}

// ── Wire value enums ──────────────────────────────────────────────────────────

/// The four shades the panel can render, one byte each on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Black = 0x00,
    DarkGray = 0x01,
    Gray = 0x02,
    White = 0x03,
}

impl TryFrom<u8> for Color {
    type Error = CommandError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Color::Black),
            0x01 => Ok(Color::DarkGray),
            0x02 => Ok(Color::Gray),
            0x03 => Ok(Color::White),
            _ => Err(CommandError::UnknownColor(value)),
        }
    }
}

/// Built-in font sizes, shared by the English and Chinese font selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum FontSize {
    Dots32 = 0x01,
    Dots48 = 0x02,
    Dots64 = 0x03,
}

impl FontSize {
    /// The glyph height in dots that this selector stands for.
    pub fn dots(self) -> u16 {
        match self {
            FontSize::Dots32 => 32,
            FontSize::Dots48 => 48,
            FontSize::Dots64 => 64,
        }
    }
}

impl TryFrom<u8> for FontSize {
    type Error = CommandError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(FontSize::Dots32),
            0x02 => Ok(FontSize::Dots48),
            0x03 => Ok(FontSize::Dots64),
            _ => Err(CommandError::UnknownFontSize(value)),
        }
    }
}

/// Where the controller reads fonts and images from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MemoryMode {
    NandFlash = 0x00,
    SdCard = 0x01,
}

impl TryFrom<u8> for MemoryMode {
    type Error = CommandError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(MemoryMode::NandFlash),
            0x01 => Ok(MemoryMode::SdCard),
            _ => Err(CommandError::UnknownMemoryMode(value)),
        }
    }
}

/// Screen orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rotation {
    Normal = 0x00,
    Inverted = 0x01,
}

impl TryFrom<u8> for Rotation {
    type Error = CommandError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Rotation::Normal),
            0x01 => Ok(Rotation::Inverted),
            _ => Err(CommandError::UnknownRotation(value)),
        }
    }
}

/// The serial rates the controller accepts. Any other rate is a rejected
/// configuration input, not a protocol error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum BaudRate {
    B1200 = 1200,
    B2400 = 2400,
    B4800 = 4800,
    B9600 = 9600,
    B19200 = 19_200,
    B38400 = 38_400,
    B57600 = 57_600,
    B115200 = 115_200,
}

impl BaudRate {
    /// The rate in bits per second, which is also its 4-byte wire form.
    pub fn bits_per_second(self) -> u32 {
        self as u32
    }
}

impl Default for BaudRate {
    fn default() -> Self {
        BaudRate::B115200
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = CommandError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1200 => Ok(BaudRate::B1200),
            2400 => Ok(BaudRate::B2400),
            4800 => Ok(BaudRate::B4800),
            9600 => Ok(BaudRate::B9600),
            19_200 => Ok(BaudRate::B19200),
            38_400 => Ok(BaudRate::B38400),
            57_600 => Ok(BaudRate::B57600),
            115_200 => Ok(BaudRate::B115200),
            _ => Err(CommandError::UnsupportedBaudRate(value)),
        }
    }
}

// ── Coordinate encoding ───────────────────────────────────────────────────────

/// How coordinates, radii, and sizes are laid out inside payloads.
///
/// The deployed encoder built each coordinate as a hex string: a literal
/// `"0"`, the high byte rendered in *decimal*, then the low byte in hex.
/// Below [`LEGACY_COORDINATE_LIMIT`] the high byte is a single decimal
/// digit and the string happens to parse to the correct two bytes
/// `[high, low]`; at or above it the token gains a nibble and shifts every
/// byte after it, corrupting the declared frame length.
///
/// [`Standard`](CoordinateEncoding::Standard) is the corrected fixed-width
/// field and the default. [`LegacyDecimalHighByte`]
/// (CoordinateEncoding::LegacyDecimalHighByte) reproduces the deployed
/// bytes for every coordinate the old encoder handled correctly, and
/// rejects the rest — use it only when bit-for-bit wire replay against an
/// existing decoder is required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateEncoding {
    /// Fixed three-byte field: one padding byte, then the value big-endian.
    #[default]
    Standard,
    /// Two-byte big-endian field, valid below [`LEGACY_COORDINATE_LIMIT`].
    LegacyDecimalHighByte,
}

fn write_coordinate(
    buf: &mut Vec<u8>,
    value: u16,
    encoding: CoordinateEncoding,
) -> Result<(), CommandError> {
    let high = (value >> 8) as u8;
    let low = (value & 0xFF) as u8;
    match encoding {
        CoordinateEncoding::Standard => {
            buf.push(0x00);
            buf.push(high);
            buf.push(low);
        }
        CoordinateEncoding::LegacyDecimalHighByte => {
            if value >= LEGACY_COORDINATE_LIMIT {
                return Err(CommandError::CoordinateOutOfLegacyRange(value));
            }
            buf.push(high);
            buf.push(low);
        }
    }
    Ok(())
}

/// Appends ASCII text as one code byte per character plus the terminating
/// zero byte the controller requires.
fn write_terminated_text(buf: &mut Vec<u8>, text: &str) -> Result<(), CommandError> {
    if let Some(c) = text.chars().find(|c| !c.is_ascii()) {
        return Err(CommandError::NonAsciiText(c));
    }
    if text.len() > MAX_TEXT_BYTES {
        return Err(CommandError::TextTooLong(text.len()));
    }
    buf.extend_from_slice(text.as_bytes());
    buf.push(0x00);
    Ok(())
}

/// Appends pre-encoded GB2312 glyph codes plus the terminating zero byte.
/// The codes are passed through untouched; no layout is performed.
fn write_terminated_gb2312(buf: &mut Vec<u8>, codes: &[u8]) -> Result<(), CommandError> {
    if codes.len() % 2 != 0 {
        return Err(CommandError::OddGb2312Length(codes.len()));
    }
    if codes.len() > MAX_TEXT_BYTES {
        return Err(CommandError::TextTooLong(codes.len()));
    }
    buf.extend_from_slice(codes);
    buf.push(0x00);
    Ok(())
}

// ── The command catalog ───────────────────────────────────────────────────────

/// One logical operation addressed to the display controller.
///
/// Each variant is a pure description; [`Command::encode`] turns it into a
/// complete transmittable frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Handshake,
    SetBaud(BaudRate),
    ReadBaud,
    SetMemoryMode(MemoryMode),
    EnterStopMode,
    Update,
    SetRotation(Rotation),
    ImportFont,
    ImportPicture,
    SetColor {
        foreground: Color,
        background: Color,
    },
    SetEnglishFont(FontSize),
    SetChineseFont(FontSize),
    DrawPixel {
        x: u16,
        y: u16,
    },
    DrawLine {
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    },
    DrawRect {
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    },
    FillRect {
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    },
    DrawCircle {
        x: u16,
        y: u16,
        radius: u16,
    },
    FillCircle {
        x: u16,
        y: u16,
        radius: u16,
    },
    DrawTriangle {
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    },
    FillTriangle {
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    },
    /// Clears the panel to the background color. Note that the effect is
    /// not visible until an [`Command::Update`] follows.
    Clear,
    /// Draws an ASCII string at the given origin in the current colors and
    /// English font size.
    DrawText {
        x: u16,
        y: u16,
        text: String,
    },
    /// Draws pre-encoded GB2312 glyph codes at the given origin.
    DrawChinese {
        x: u16,
        y: u16,
        gb2312: Vec<u8>,
    },
    /// Draws a device-resident bitmap by file name (the file lives on the
    /// controller's storage; no image data crosses the wire).
    DrawBitmap {
        x: u16,
        y: u16,
        name: String,
    },
}

impl Command {
    /// Returns the [`Opcode`] this command is transmitted under.
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::Handshake => Opcode::Handshake,
            Command::SetBaud(_) => Opcode::SetBaud,
            Command::ReadBaud => Opcode::ReadBaud,
            Command::SetMemoryMode(_) => Opcode::SetMemoryMode,
            Command::EnterStopMode => Opcode::EnterStopMode,
            Command::Update => Opcode::Update,
            Command::SetRotation(_) => Opcode::SetRotation,
            Command::ImportFont => Opcode::ImportFont,
            Command::ImportPicture => Opcode::ImportPicture,
            Command::SetColor { .. } => Opcode::SetColor,
            Command::SetEnglishFont(_) => Opcode::SetEnglishFont,
            Command::SetChineseFont(_) => Opcode::SetChineseFont,
            Command::DrawPixel { .. } => Opcode::DrawPixel,
            Command::DrawLine { .. } => Opcode::DrawLine,
            Command::DrawRect { .. } => Opcode::DrawRect,
            Command::FillRect { .. } => Opcode::FillRect,
            Command::DrawCircle { .. } => Opcode::DrawCircle,
            Command::FillCircle { .. } => Opcode::FillCircle,
            Command::DrawTriangle { .. } => Opcode::DrawTriangle,
            Command::FillTriangle { .. } => Opcode::FillTriangle,
            Command::Clear => Opcode::Clear,
            Command::DrawText { .. } => Opcode::DrawString,
            Command::DrawChinese { .. } => Opcode::DrawString,
            Command::DrawBitmap { .. } => Opcode::DrawBitmap,
        }
    }

    /// Builds the payload bytes for this command under `encoding`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when an argument fails input validation;
    /// nothing is partially emitted in that case.
    pub fn payload(&self, encoding: CoordinateEncoding) -> Result<Vec<u8>, CommandError> {
        let mut buf = Vec::new();
        match self {
            Command::Handshake
            | Command::ReadBaud
            | Command::EnterStopMode
            | Command::Update
            | Command::ImportFont
            | Command::ImportPicture
            | Command::Clear => {}
            Command::SetBaud(rate) => {
                buf.extend_from_slice(&rate.bits_per_second().to_be_bytes());
            }
            Command::SetMemoryMode(mode) => buf.push(*mode as u8),
            Command::SetRotation(rotation) => buf.push(*rotation as u8),
            Command::SetColor {
                foreground,
                background,
            } => {
                buf.push(*foreground as u8);
                buf.push(*background as u8);
            }
            Command::SetEnglishFont(size) | Command::SetChineseFont(size) => {
                buf.push(*size as u8);
            }
            Command::DrawPixel { x, y } => {
                write_coordinate(&mut buf, *x, encoding)?;
                write_coordinate(&mut buf, *y, encoding)?;
            }
            Command::DrawLine { x0, y0, x1, y1 }
            | Command::DrawRect { x0, y0, x1, y1 }
            | Command::FillRect { x0, y0, x1, y1 } => {
                for value in [x0, y0, x1, y1] {
                    write_coordinate(&mut buf, *value, encoding)?;
                }
            }
            Command::DrawCircle { x, y, radius } | Command::FillCircle { x, y, radius } => {
                for value in [x, y, radius] {
                    write_coordinate(&mut buf, *value, encoding)?;
                }
            }
            Command::DrawTriangle {
                x0,
                y0,
                x1,
                y1,
                x2,
                y2,
            }
            | Command::FillTriangle {
                x0,
                y0,
                x1,
                y1,
                x2,
                y2,
            } => {
                for value in [x0, y0, x1, y1, x2, y2] {
                    write_coordinate(&mut buf, *value, encoding)?;
                }
            }
            Command::DrawText { x, y, text } => {
                write_coordinate(&mut buf, *x, encoding)?;
                write_coordinate(&mut buf, *y, encoding)?;
                write_terminated_text(&mut buf, text)?;
            }
            Command::DrawChinese { x, y, gb2312 } => {
                write_coordinate(&mut buf, *x, encoding)?;
                write_coordinate(&mut buf, *y, encoding)?;
                write_terminated_gb2312(&mut buf, gb2312)?;
            }
            Command::DrawBitmap { x, y, name } => {
                write_coordinate(&mut buf, *x, encoding)?;
                write_coordinate(&mut buf, *y, encoding)?;
                write_terminated_text(&mut buf, name)?;
            }
        }
        Ok(buf)
    }

    /// Encodes this command as a complete frame, ready for the transport.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when an argument fails input validation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use epd_core::protocol::commands::{Command, CoordinateEncoding};
    ///
    /// let frame = Command::Handshake
    ///     .encode(CoordinateEncoding::Standard)
    ///     .unwrap();
    /// assert_eq!(frame, [0xA5, 0x00, 0x09, 0x00, 0xCC, 0x33, 0xC3, 0x3C, 0xAC]);
    /// ```
    pub fn encode(&self, encoding: CoordinateEncoding) -> Result<Vec<u8>, CommandError> {
        let payload = self.payload(encoding)?;
        Ok(frame::build_frame(self.opcode() as u8, &payload))
    }
}
