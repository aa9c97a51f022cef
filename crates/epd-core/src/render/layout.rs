//! Greedy word wrap with a calibrated character width table.
//!
//! The widths were measured by hand against the controller's built-in
//! 32-dot ASCII font; 48 and 64 simply scale those measurements, so wraps
//! at the larger sizes are rough estimates. Characters without a
//! measurement (including everything non-ASCII) count as the widest slot.
//!
//! Like the digit planner, this module is pure: it computes the wrapped
//! lines and their vertical offsets, and the driver turns each line into a
//! clear-rectangle-plus-draw-string command pair.

use thiserror::Error;

/// The font size the width table was calibrated at.
pub const REFERENCE_SIZE: u16 = 32;

/// Width charged for any character without a calibrated measurement.
pub const FALLBACK_WIDTH: u32 = 32;

/// Errors produced while validating layout arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The controller only renders 32-, 48-, and 64-dot fonts.
    #[error("unsupported font size {0}: must be 32, 48, or 64")]
    UnsupportedSize(u16),
}

/// One wrapped output line, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    /// The line's text, delimiters trimmed.
    pub text: String,
    /// Vertical offset from the wrap origin, in pixels.
    pub y_offset: u32,
    /// Measured width of `text` at the requested size, in pixels.
    pub width: u32,
}

/// Calibrated pixel width of one character at [`REFERENCE_SIZE`].
fn reference_width(c: char) -> u32 {
    match c {
        '\'' => 5,
        'i' | 'j' | 'l' | '|' => 6,
        'f' => 7,
        ' ' | 'I' | 't' | '!' | '[' | ']' | '.' | ',' | ';' | ':' | '/' | '\\' => 8,
        'r' | '-' | '`' | '(' | ')' | '{' | '}' => 9,
        '"' => 10,
        '*' => 11,
        'x' | '^' => 12,
        'J' | 'v' | 'z' => 13,
        'c' | 'k' | 's' | 'y' => 14,
        'L' | 'a' | 'b' | 'd' | 'e' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' | '$' | '#'
        | '?' | '_' | '0'..='9' => 15,
        'T' | '+' | '<' | '>' | '=' | '~' => 16,
        'F' | 'P' | 'V' | 'X' | 'Z' => 17,
        'A' | 'B' | 'E' | 'K' | 'S' | 'Y' | '&' => 18,
        'H' | 'N' | 'U' | 'w' => 19,
        'C' | 'D' | 'R' => 20,
        'G' | 'O' | 'Q' => 21,
        'm' => 22,
        'M' => 23,
        '%' => 24,
        '@' => 27,
        'W' => 28,
        _ => FALLBACK_WIDTH,
    }
}

fn validate_size(size: u16) -> Result<(), LayoutError> {
    match size {
        32 | 48 | 64 => Ok(()),
        other => Err(LayoutError::UnsupportedSize(other)),
    }
}

/// Measures the pixel width of `text` at `size`.
///
/// The per-character reference widths are summed first and the size ratio
/// is applied to the total, matching the calibration procedure.
///
/// # Errors
///
/// Returns [`LayoutError::UnsupportedSize`] for sizes other than 32/48/64.
pub fn measure_width(text: &str, size: u16) -> Result<u32, LayoutError> {
    validate_size(size)?;
    let reference: u32 = text.chars().map(reference_width).sum();
    Ok((reference as f32 * (size as f32 / REFERENCE_SIZE as f32)) as u32)
}

/// Greedily wraps `text` to lines no wider than `limit` pixels.
///
/// Explicit line breaks are honored first; each resulting line is split on
/// single spaces and words are packed while
/// `line_width + space_width + word_width <= limit`. A word wider than
/// `limit` at the start of a line is kept whole on its own line — there is
/// no character-level breaking. Blank source lines produce an empty
/// [`WrappedLine`] so vertical structure survives. Leading and trailing
/// whitespace of the input is trimmed.
///
/// The vertical offset advances by `size` per produced line.
///
/// # Errors
///
/// Returns [`LayoutError::UnsupportedSize`] for sizes other than 32/48/64.
pub fn wrap_lines(text: &str, limit: u32, size: u16) -> Result<Vec<WrappedLine>, LayoutError> {
    validate_size(size)?;
    let space_width = measure_width(" ", size)?;

    let mut lines = Vec::new();
    let mut y_offset = 0u32;
    let mut flush = |text: String, y_offset: &mut u32, lines: &mut Vec<WrappedLine>| {
        let width = {
            let reference: u32 = text.chars().map(reference_width).sum();
            (reference as f32 * (size as f32 / REFERENCE_SIZE as f32)) as u32
        };
        lines.push(WrappedLine {
            text,
            y_offset: *y_offset,
            width,
        });
        *y_offset += size as u32;
    };

    for source_line in text.trim().split('\n') {
        let mut words = source_line.trim().split(' ').filter(|w| !w.is_empty());
        let Some(first) = words.next() else {
            // Blank source line: keep the paragraph gap.
            flush(String::new(), &mut y_offset, &mut lines);
            continue;
        };
        let mut line = first.to_string();
        let mut line_width = measure_width(first, size)?;
        for word in words {
            let word_width = measure_width(word, size)?;
            if line_width + space_width + word_width <= limit {
                line.push(' ');
                line.push_str(word);
                line_width += space_width + word_width;
            } else {
                flush(line, &mut y_offset, &mut lines);
                line = word.to_string();
                line_width = word_width;
            }
        }
        flush(line, &mut y_offset, &mut lines);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measured_widths_match_calibration() {
        assert_eq!(measure_width("'", 32), Ok(5));
        assert_eq!(measure_width("W", 32), Ok(28));
        assert_eq!(measure_width("ab", 32), Ok(30));
        assert_eq!(measure_width(" ", 32), Ok(8));
    }

    #[test]
    fn test_uncalibrated_characters_use_the_fallback_width() {
        assert_eq!(measure_width("\u{4f60}", 32), Ok(FALLBACK_WIDTH));
        assert_eq!(measure_width("\t", 32), Ok(FALLBACK_WIDTH));
    }

    #[test]
    fn test_larger_sizes_scale_the_total() {
        // "ab" = 30 reference units; 30 * 48/32 = 45, 30 * 64/32 = 60.
        assert_eq!(measure_width("ab", 48), Ok(45));
        assert_eq!(measure_width("ab", 64), Ok(60));
    }

    #[test]
    fn test_unsupported_size_is_rejected() {
        assert_eq!(measure_width("a", 40), Err(LayoutError::UnsupportedSize(40)));
        assert_eq!(
            wrap_lines("a", 100, 0),
            Err(LayoutError::UnsupportedSize(0))
        );
    }

    #[test]
    fn test_overflowing_word_starts_a_new_line() {
        // "a" and "b" measure 15 each; 15 + 8 + 15 > 20.
        let lines = wrap_lines("a b", 20, 32).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "a");
        assert_eq!(lines[0].y_offset, 0);
        assert_eq!(lines[1].text, "b");
        assert_eq!(lines[1].y_offset, 32);
    }

    #[test]
    fn test_words_pack_while_they_fit() {
        // 15 + 8 + 15 = 38 <= 40.
        let lines = wrap_lines("a b", 40, 32).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "a b");
        assert_eq!(lines[0].width, 38);
    }

    #[test]
    fn test_wrap_bound_holds_when_every_word_fits() {
        let text = "the quick brown fox jumps over the lazy dog and keeps running";
        for limit in [120u32, 200, 320, 800] {
            let lines = wrap_lines(text, limit, 32).unwrap();
            for line in &lines {
                assert!(
                    line.width <= limit,
                    "line {:?} measures {} > limit {limit}",
                    line.text,
                    line.width
                );
            }
        }
    }

    #[test]
    fn test_oversized_word_is_kept_whole() {
        let lines = wrap_lines("hi incomprehensibilities hi", 100, 32).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "incomprehensibilities");
        assert!(lines[1].width > 100);
    }

    #[test]
    fn test_explicit_line_breaks_are_honored() {
        let lines = wrap_lines("one\ntwo", 800, 32).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "one");
        assert_eq!(lines[1].text, "two");
    }

    #[test]
    fn test_blank_source_line_keeps_the_gap() {
        let lines = wrap_lines("one\n\ntwo", 800, 32).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "");
        assert_eq!(lines[2].y_offset, 64);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let lines = wrap_lines("  hello world \n", 800, 32).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "hello world");
    }

    #[test]
    fn test_consecutive_spaces_collapse() {
        let lines = wrap_lines("a   b", 800, 32).unwrap();
        assert_eq!(lines[0].text, "a b");
    }

    #[test]
    fn test_vertical_offsets_advance_by_size() {
        let lines = wrap_lines("a b c", 20, 48).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines.iter().map(|l| l.y_offset).collect::<Vec<_>>(),
            vec![0, 48, 96]
        );
    }
}
