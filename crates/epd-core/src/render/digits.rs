//! Plans the command sequence for rendering a digit string.
//!
//! The planner is pure: it turns a digit string into an ordered list of
//! [`Step`]s and never touches a transport. The driver crate walks the
//! steps, transmitting each command and honoring [`Step::Pace`] with a
//! real update-plus-delay. Keeping the plan pure makes the decomposition
//! and pacing rules testable without any I/O.
//!
//! Glyph placement maps a local point `(px, py)` of a cell at cursor
//! position `(ox, oy)` to `(ox + trunc(scale * px), oy + trunc(scale * py))`,
//! with the cursor advancing by `scale * (cell_width + spacing)` per cell.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::font::{block, lcd, Primitive};
use crate::protocol::commands::{Color, Command};

/// Which digit font to render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontStyle {
    /// Seven-segment style, drawn from filled triangles.
    Lcd,
    /// Compact 3×5 style, drawn by carving filled rectangles.
    Block,
}

/// The panel's draw-command buffer overflows if too many fill primitives
/// arrive between updates, so the LCD font forces an update (and a pacing
/// delay) after this many glyph cells.
pub const GLYPHS_PER_BATCH: usize = 5;

/// One step of a digit render plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Transmit this command.
    Send(Command),
    /// Transmit an update and wait out the pacing delay before continuing.
    /// This is backpressure relief for the device buffer, not a protocol
    /// acknowledgment.
    Pace,
    /// Transmit a final update with no delay.
    Update,
}

/// A planned digit render: the steps to execute in order, plus what the
/// planner had to skip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitPlan {
    /// Steps in transmission order.
    pub steps: Vec<Step>,
    /// Characters that are neither a decimal digit nor a colon. Each was
    /// logged, consumed a cursor cell, and produced no primitives.
    pub skipped: Vec<char>,
    /// Number of glyphs that actually produced draw primitives.
    pub glyphs: usize,
}

impl DigitPlan {
    /// Iterates over only the commands to be sent, in order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.steps.iter().filter_map(|step| match step {
            Step::Send(command) => Some(command),
            _ => None,
        })
    }
}

/// Maps a local glyph coordinate into panel space with integer truncation.
fn scaled(origin: u16, local: u16, scale: f32) -> u16 {
    (origin as f32 + scale * local as f32) as u16
}

fn primitive_command(primitive: &Primitive, ox: u16, oy: u16, scale: f32) -> Command {
    match primitive {
        Primitive::FilledTriangle([a, b, c]) => Command::FillTriangle {
            x0: scaled(ox, a.0, scale),
            y0: scaled(oy, a.1, scale),
            x1: scaled(ox, b.0, scale),
            y1: scaled(oy, b.1, scale),
            x2: scaled(ox, c.0, scale),
            y2: scaled(oy, c.1, scale),
        },
        Primitive::FilledRect([a, b]) => Command::FillRect {
            x0: scaled(ox, a.0, scale),
            y0: scaled(oy, a.1, scale),
            x1: scaled(ox, b.0, scale),
            y1: scaled(oy, b.1, scale),
        },
    }
}

fn set_color(foreground: Color, background: Color) -> Step {
    Step::Send(Command::SetColor {
        foreground,
        background,
    })
}

fn fill_rect(x0: u16, y0: u16, x1: u16, y1: u16) -> Step {
    Step::Send(Command::FillRect { x0, y0, x1, y1 })
}

/// Plans rendering `text` (digits and colons) at `(x, y)` with the given
/// scale and style.
///
/// The plan first blanks the background strip spanning every cell
/// (spacing included), then renders cells left to right. Unrecognized
/// characters draw nothing but still consume their cell, so the characters
/// after them keep their positions. Empty input produces an empty plan.
pub fn plan_digits(x: u16, y: u16, text: &str, scale: f32, style: FontStyle) -> DigitPlan {
    let mut plan = DigitPlan::default();
    if text.is_empty() {
        return plan;
    }

    let (cell_width, cell_height, spacing) = match style {
        FontStyle::Lcd => (lcd::CELL_WIDTH, lcd::CELL_HEIGHT, lcd::SPACING),
        FontStyle::Block => (block::CELL_WIDTH, block::CELL_HEIGHT, block::SPACING),
    };
    let advance = scale * (cell_width + spacing) as f32;
    let cell_count = text.chars().count();

    // Blank the whole strip so stale content never bleeds through the
    // transparent parts of the glyphs.
    let strip_right =
        (x as f32 + (cell_count - 1) as f32 * advance + scale * cell_width as f32) as u16;
    let strip_bottom = (y as f32 + scale * cell_height as f32) as u16;
    plan.steps.push(set_color(Color::White, Color::White));
    plan.steps.push(fill_rect(x, y, strip_right, strip_bottom));
    if style == FontStyle::Lcd {
        plan.steps.push(set_color(Color::Black, Color::White));
    }

    let mut cells = 0usize;
    for ch in text.chars() {
        let ox = (x as f32 + cells as f32 * advance) as u16;
        let rendered = match style {
            FontStyle::Lcd => plan_lcd_glyph(&mut plan.steps, ox, y, ch, scale),
            FontStyle::Block => plan_block_glyph(&mut plan.steps, ox, y, ch, scale),
        };
        if rendered {
            plan.glyphs += 1;
        } else {
            warn!(character = ?ch, "not a digit or colon; leaving its cell blank");
            plan.skipped.push(ch);
        }
        cells += 1;
        if style == FontStyle::Lcd && cells % GLYPHS_PER_BATCH == 0 {
            plan.steps.push(Step::Pace);
        }
    }
    if style == FontStyle::Lcd && cells % GLYPHS_PER_BATCH != 0 {
        plan.steps.push(Step::Update);
    }
    if style == FontStyle::Block && plan.glyphs == 0 {
        // Every valid block glyph restores the colors itself; if none
        // rendered, the strip blanking would otherwise leave white-on-white
        // active for whatever the caller draws next.
        plan.steps.push(set_color(Color::Black, Color::White));
    }
    plan
}

/// Emits one LCD glyph. The glyph draws transparently over the strip in
/// the already-active colors, one command per primitive.
fn plan_lcd_glyph(steps: &mut Vec<Step>, ox: u16, oy: u16, ch: char, scale: f32) -> bool {
    let primitives: Vec<&Primitive> = match ch {
        ':' => lcd::COLON.iter().collect(),
        '0'..='9' => lcd::digit_primitives(ch as u8 - b'0')
            .map(|iter| iter.collect())
            .unwrap_or_default(),
        _ => return false,
    };
    for primitive in primitives {
        steps.push(Step::Send(primitive_command(primitive, ox, oy, scale)));
    }
    true
}

/// Emits one block glyph: fill the whole cell, carve the counters in the
/// opposite color, then restore foreground-on-white.
fn plan_block_glyph(steps: &mut Vec<Step>, ox: u16, oy: u16, ch: char, scale: f32) -> bool {
    let (cell_colors, carve_colors, carves) = match ch {
        ':' => (
            (Color::White, Color::White),
            (Color::Black, Color::White),
            block::colon_carves(),
        ),
        '0'..='9' => {
            let Some(carves) = block::carves(ch as u8 - b'0') else {
                return false;
            };
            (
                (Color::Black, Color::White),
                (Color::White, Color::White),
                carves,
            )
        }
        _ => return false,
    };

    let [cell_a, cell_b] = block::CELL;
    steps.push(set_color(cell_colors.0, cell_colors.1));
    steps.push(fill_rect(
        scaled(ox, cell_a.0, scale),
        scaled(oy, cell_a.1, scale),
        scaled(ox, cell_b.0, scale),
        scaled(oy, cell_b.1, scale),
    ));
    steps.push(set_color(carve_colors.0, carve_colors.1));
    for [a, b] in carves {
        steps.push(fill_rect(
            scaled(ox, a.0, scale),
            scaled(oy, a.1, scale),
            scaled(ox, b.0, scale),
            scaled(oy, b.1, scale),
        ));
    }
    steps.push(set_color(Color::Black, Color::White));
    true
}
