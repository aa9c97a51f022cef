//! The high-level display API.
//!
//! [`EpdDisplay`] owns a [`Transport`] and turns drawing calls into encoded
//! frames. Single commands propagate their first error; the batch
//! operations (digit rendering, wrapped text) transmit everything they can
//! and report per-item failures in a [`BatchReport`] instead of aborting,
//! since a half-drawn clock face is better than none before the next
//! refresh overwrites it.

use std::time::Duration;

use epd_core::render::digits::{plan_digits, FontStyle, Step};
use epd_core::render::layout::{wrap_lines, LayoutError};
use epd_core::{
    BaudRate, Color, Command, CommandError, CoordinateEncoding, FontSize, MemoryMode, Rotation,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::transport::{Transport, TransportError};

/// Delay observed after each pacing update, long enough for the panel to
/// finish a partial refresh before more primitives arrive.
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_secs(2);

/// Errors surfaced by the driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// A command rejected its arguments; nothing was transmitted.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// The transport failed while writing or reading.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Text layout rejected its arguments.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Outcome of a batch operation that does not abort on per-item failures.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Frames successfully handed to the transport.
    pub sent: usize,
    /// Input characters that produced no output (not drawable).
    pub skipped: Vec<char>,
    /// Per-item failures, in occurrence order.
    pub errors: Vec<DriverError>,
}

impl BatchReport {
    /// `true` when every item was transmitted.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A display module at the far end of a transport.
pub struct EpdDisplay<T: Transport> {
    transport: T,
    encoding: CoordinateEncoding,
    pacing_delay: Duration,
    debug_echo: bool,
}

impl<T: Transport> EpdDisplay<T> {
    /// Wraps a transport with the default (corrected) coordinate encoding
    /// and the default pacing delay.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            encoding: CoordinateEncoding::default(),
            pacing_delay: DEFAULT_PACING_DELAY,
            debug_echo: false,
        }
    }

    /// Selects the coordinate encoding for every subsequent command.
    pub fn with_coordinate_encoding(mut self, encoding: CoordinateEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Overrides the pacing delay. Tests pass [`Duration::ZERO`].
    pub fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = delay;
        self
    }

    /// When enabled, every outgoing frame is logged as hex at debug level.
    pub fn set_debug_echo(&mut self, enabled: bool) {
        self.debug_echo = enabled;
    }

    /// Borrows the underlying transport, e.g. to inspect a recorder.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consumes the display and returns the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    fn send(&mut self, command: &Command) -> Result<(), DriverError> {
        let frame = command.encode(self.encoding)?;
        if self.debug_echo {
            let hex: String = frame.iter().map(|b| format!("{b:02x}")).collect();
            debug!(opcode = ?command.opcode(), frame = %hex, "sending frame");
        }
        self.transport.send(&frame)?;
        Ok(())
    }

    // ── Link management ───────────────────────────────────────────────────

    /// Sends the handshake frame and returns the module's reply, or `None`
    /// over a write-only transport.
    pub fn handshake(&mut self) -> Result<Option<String>, DriverError> {
        self.send(&Command::Handshake)?;
        self.read_reply()
    }

    /// Requests the module's current serial rate as a text reply.
    pub fn read_baud(&mut self) -> Result<Option<String>, DriverError> {
        self.send(&Command::ReadBaud)?;
        self.read_reply()
    }

    fn read_reply(&mut self) -> Result<Option<String>, DriverError> {
        match self.transport.read_line() {
            Ok(line) => Ok(Some(line)),
            Err(TransportError::NotSupported) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Switches the module's serial rate. The host side of the link must be
    /// reopened at the new rate by whoever owns the port; the driver only
    /// transmits the request.
    pub fn set_baud(&mut self, rate: BaudRate) -> Result<(), DriverError> {
        info!(rate = rate.bits_per_second(), "switching serial rate");
        self.send(&Command::SetBaud(rate))
    }

    /// Puts the module into its low-power stop mode until reset.
    pub fn enter_stop_mode(&mut self) -> Result<(), DriverError> {
        self.send(&Command::EnterStopMode)
    }

    // ── Configuration ─────────────────────────────────────────────────────

    /// Selects where the module reads fonts and pictures from.
    pub fn set_memory_mode(&mut self, mode: MemoryMode) -> Result<(), DriverError> {
        self.send(&Command::SetMemoryMode(mode))
    }

    /// Rotates the panel and refreshes so the change is visible at once.
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DriverError> {
        self.send(&Command::SetRotation(rotation))?;
        self.send(&Command::Update)
    }

    /// Copies fonts from SD card to on-board flash. Takes minutes on real
    /// hardware.
    pub fn import_font(&mut self) -> Result<(), DriverError> {
        self.send(&Command::ImportFont)
    }

    /// Copies pictures from SD card to on-board flash.
    pub fn import_picture(&mut self) -> Result<(), DriverError> {
        self.send(&Command::ImportPicture)
    }

    /// Sets the drawing foreground and background colors.
    pub fn set_color(&mut self, foreground: Color, background: Color) -> Result<(), DriverError> {
        self.send(&Command::SetColor {
            foreground,
            background,
        })
    }

    /// Selects the built-in English font size.
    pub fn set_english_font(&mut self, size: FontSize) -> Result<(), DriverError> {
        self.send(&Command::SetEnglishFont(size))
    }

    /// Selects the built-in Chinese font size.
    pub fn set_chinese_font(&mut self, size: FontSize) -> Result<(), DriverError> {
        self.send(&Command::SetChineseFont(size))
    }

    // ── Drawing ───────────────────────────────────────────────────────────
    //
    // Drawing commands paint the module's buffer only; nothing appears on
    // the panel until `update` (or an operation that implies it) runs.

    /// Flushes the module's draw buffer to the panel.
    pub fn update(&mut self) -> Result<(), DriverError> {
        self.send(&Command::Update)
    }

    /// Clears the buffer to the background color and refreshes.
    pub fn clear(&mut self) -> Result<(), DriverError> {
        self.send(&Command::Clear)?;
        self.send(&Command::Update)
    }

    pub fn draw_pixel(&mut self, x: u16, y: u16) -> Result<(), DriverError> {
        self.send(&Command::DrawPixel { x, y })
    }

    pub fn draw_line(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DriverError> {
        self.send(&Command::DrawLine { x0, y0, x1, y1 })
    }

    pub fn draw_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DriverError> {
        self.send(&Command::DrawRect { x0, y0, x1, y1 })
    }

    pub fn fill_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DriverError> {
        self.send(&Command::FillRect { x0, y0, x1, y1 })
    }

    pub fn draw_circle(&mut self, x: u16, y: u16, radius: u16) -> Result<(), DriverError> {
        self.send(&Command::DrawCircle { x, y, radius })
    }

    pub fn fill_circle(&mut self, x: u16, y: u16, radius: u16) -> Result<(), DriverError> {
        self.send(&Command::FillCircle { x, y, radius })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_triangle(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    ) -> Result<(), DriverError> {
        self.send(&Command::DrawTriangle {
            x0,
            y0,
            x1,
            y1,
            x2,
            y2,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn fill_triangle(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    ) -> Result<(), DriverError> {
        self.send(&Command::FillTriangle {
            x0,
            y0,
            x1,
            y1,
            x2,
            y2,
        })
    }

    /// Draws an ASCII string at `(x, y)` in the current colors and English
    /// font size.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DriverError> {
        self.send(&Command::DrawText {
            x,
            y,
            text: text.to_string(),
        })
    }

    /// Draws pre-encoded GB2312 glyph codes at `(x, y)`.
    pub fn draw_chinese(&mut self, x: u16, y: u16, gb2312: &[u8]) -> Result<(), DriverError> {
        self.send(&Command::DrawChinese {
            x,
            y,
            gb2312: gb2312.to_vec(),
        })
    }

    /// Draws a bitmap resident on the module's storage by file name.
    pub fn draw_bitmap(&mut self, x: u16, y: u16, name: &str) -> Result<(), DriverError> {
        self.send(&Command::DrawBitmap {
            x,
            y,
            name: name.to_string(),
        })
    }

    // ── Batch operations ──────────────────────────────────────────────────

    /// Renders a digit string (digits and colons) in one of the vector
    /// fonts, honoring the pacing updates the LCD font needs.
    ///
    /// Transmission failures are collected per frame rather than aborting
    /// the batch.
    pub fn render_digits(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        scale: f32,
        style: FontStyle,
    ) -> BatchReport {
        let plan = plan_digits(x, y, text, scale, style);
        let mut report = BatchReport {
            skipped: plan.skipped.clone(),
            ..BatchReport::default()
        };
        for step in &plan.steps {
            let result = match step {
                Step::Send(command) => self.send(command),
                Step::Pace => {
                    let paced = self.send(&Command::Update);
                    if paced.is_ok() && !self.pacing_delay.is_zero() {
                        std::thread::sleep(self.pacing_delay);
                    }
                    paced
                }
                Step::Update => self.send(&Command::Update),
            };
            match result {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    warn!(error = %e, "frame lost during digit render");
                    report.errors.push(e);
                }
            }
        }
        report
    }

    /// Word-wraps `text` to `limit` pixels and draws it line by line from
    /// `(x, y)`, blanking each line's band first so stale content never
    /// shows through. Bands that would run past the coordinate range are
    /// clamped to its edge.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Layout`] for an unsupported font size before
    /// anything is transmitted; transmission failures are collected in the
    /// report.
    pub fn draw_wrapped_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        limit: u32,
        size: FontSize,
    ) -> Result<BatchReport, DriverError> {
        let lines = wrap_lines(text, limit, size.dots())?;
        let mut report = BatchReport::default();

        let mut record = |result: Result<(), DriverError>, report: &mut BatchReport| match result {
            Ok(()) => report.sent += 1,
            Err(e) => {
                warn!(error = %e, "frame lost during text draw");
                report.errors.push(e);
            }
        };

        record(self.set_english_font(size), &mut report);
        let right = x.saturating_add(u16::try_from(limit).unwrap_or(u16::MAX));
        for line in lines {
            let top = y.saturating_add(u16::try_from(line.y_offset).unwrap_or(u16::MAX));
            let bottom = top.saturating_add(size.dots());
            record(self.set_color(Color::White, Color::White), &mut report);
            record(self.fill_rect(x, top, right, bottom), &mut report);
            record(self.set_color(Color::Black, Color::White), &mut report);
            if !line.text.is_empty() {
                record(self.draw_text(x, top, &line.text), &mut report);
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;

    fn display() -> EpdDisplay<MemoryTransport> {
        EpdDisplay::new(MemoryTransport::new()).with_pacing_delay(Duration::ZERO)
    }

    #[test]
    fn test_handshake_sends_the_canonical_frame() {
        let mut display = display();
        let reply = display.handshake().unwrap();
        assert_eq!(reply, None, "write-only transport has no reply");
        assert_eq!(
            display.transport().sent_frames(),
            vec![vec![0xA5, 0x00, 0x09, 0x00, 0xCC, 0x33, 0xC3, 0x3C, 0xAC]]
        );
    }

    #[test]
    fn test_handshake_returns_the_module_reply() {
        let transport = MemoryTransport::new();
        transport.push_response("OK");
        let mut display = EpdDisplay::new(transport);
        assert_eq!(display.handshake().unwrap(), Some("OK".to_string()));
    }

    #[test]
    fn test_clear_refreshes_immediately() {
        let mut display = display();
        display.clear().unwrap();
        let frames = display.transport().sent_frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0][3], 0x2E, "clear opcode");
        assert_eq!(frames[1][3], 0x0A, "update opcode");
    }

    #[test]
    fn test_set_rotation_refreshes_immediately() {
        let mut display = display();
        display.set_rotation(Rotation::Inverted).unwrap();
        let frames = display.transport().sent_frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0][3], 0x0D);
        assert_eq!(frames[1][3], 0x0A);
    }

    #[test]
    fn test_legacy_encoding_is_applied_per_display() {
        let mut display =
            display().with_coordinate_encoding(CoordinateEncoding::LegacyDecimalHighByte);
        display.draw_pixel(100, 200).unwrap();
        // 2-byte coordinates: whole frame is 13 bytes.
        assert_eq!(display.transport().sent_frames()[0].len(), 13);
    }

    #[test]
    fn test_legacy_out_of_range_sends_nothing() {
        let mut display =
            display().with_coordinate_encoding(CoordinateEncoding::LegacyDecimalHighByte);
        let result = display.draw_pixel(3000, 0);
        assert!(matches!(
            result,
            Err(DriverError::Command(
                CommandError::CoordinateOutOfLegacyRange(3000)
            ))
        ));
        assert_eq!(display.transport().sent_count(), 0);
    }

    #[test]
    fn test_render_digits_transmits_the_whole_plan() {
        let mut display = display();
        let report = display.render_digits(0, 0, "12:34", 0.63, FontStyle::Lcd);
        assert!(report.is_complete());
        assert!(report.skipped.is_empty());
        assert_eq!(report.sent, display.transport().sent_count());
    }

    #[test]
    fn test_render_digits_reports_skipped_characters() {
        let mut display = display();
        let report = display.render_digits(0, 0, "1a2", 1.0, FontStyle::Block);
        assert_eq!(report.skipped, vec!['a']);
        assert!(report.is_complete());
    }

    #[test]
    fn test_render_digits_survives_a_dropped_link() {
        let mut display = EpdDisplay::new(MemoryTransport::failing_after(3))
            .with_pacing_delay(Duration::ZERO);
        let report = display.render_digits(0, 0, "12:34", 0.63, FontStyle::Lcd);
        assert!(!report.is_complete());
        assert_eq!(report.sent, 3);
        // Every post-failure frame is an error, none silently dropped.
        assert!(report.errors.len() > 1);
    }

    #[test]
    fn test_wrapped_text_blanks_each_line_band() {
        let mut display = display();
        let report = display
            .draw_wrapped_text(10, 20, "a b", 20, FontSize::Dots32)
            .unwrap();
        assert!(report.is_complete());
        // Font select + 2 lines * (set white, fill, set black, text).
        assert_eq!(report.sent, 1 + 2 * 4);
        let frames = display.transport().sent_frames();
        assert_eq!(frames[0][3], 0x1E, "font select first");
        assert_eq!(frames[2][3], 0x24, "band blanking fill");
        assert_eq!(frames[4][3], 0x30, "first line text");
    }

    #[test]
    fn test_wrapped_text_empty_input_blanks_one_band_without_drawing() {
        let mut display = display();
        let report = display
            .draw_wrapped_text(0, 0, "", 100, FontSize::Dots48)
            .unwrap();
        // Font select plus one blanked empty band, no text frame.
        assert_eq!(report.sent, 1 + 3);
        assert!(display
            .transport()
            .sent_frames()
            .iter()
            .all(|f| f[3] != 0x30));
    }

    #[test]
    fn test_wrapped_text_near_the_coordinate_ceiling_clamps_the_band() {
        let mut display = display();
        let report = display
            .draw_wrapped_text(65000, 65500, "hi", 800, FontSize::Dots32)
            .unwrap();
        assert!(report.is_complete());

        // Every band rectangle must stay ordered: clamping to the edge of
        // the coordinate range, never wrapping around it.
        for frame in display
            .transport()
            .sent_frames()
            .iter()
            .filter(|f| f[3] == 0x24)
        {
            let x0 = u16::from_be_bytes([frame[5], frame[6]]);
            let y0 = u16::from_be_bytes([frame[8], frame[9]]);
            let x1 = u16::from_be_bytes([frame[11], frame[12]]);
            let y1 = u16::from_be_bytes([frame[14], frame[15]]);
            assert!(x1 >= x0, "band wrapped horizontally: {x0}..{x1}");
            assert!(y1 >= y0, "band wrapped vertically: {y0}..{y1}");
            assert_eq!(x1, u16::MAX, "right edge clamps to the range edge");
        }
    }

    #[test]
    fn test_blank_lines_are_blanked_but_not_drawn() {
        let mut display = display();
        let report = display
            .draw_wrapped_text(0, 0, "one\n\ntwo", 800, FontSize::Dots32)
            .unwrap();
        assert!(report.is_complete());
        let text_frames = display
            .transport()
            .sent_frames()
            .iter()
            .filter(|f| f[3] == 0x30)
            .count();
        assert_eq!(text_frames, 2);
        // Three bands were still blanked.
        let fills = display
            .transport()
            .sent_frames()
            .iter()
            .filter(|f| f[3] == 0x24)
            .count();
        assert_eq!(fills, 3);
    }
}
