//! Static draw operations and text helpers

use crate::constants::{ELLIPSIS, HELVETICA_CHAR_WIDTH_RATIO, HELVETICA_WIDTHS};
use lopdf::{Object, StringFormat};

pub type Rgb = [f32; 3];

pub const BLACK: Rgb = [0.0, 0.0, 0.0];
pub const WHITE: Rgb = [1.0, 1.0, 1.0];

/// Which configured font a text op uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Base,
    Bold,
    Italic,
}

impl FontRole {
    /// Resource name inside the page's font dictionary
    pub fn resource_name(self) -> &'static str {
        match self {
            FontRole::Base => "F1",
            FontRole::Bold => "F2",
            FontRole::Italic => "F3",
        }
    }
}

/// A piece of static page content
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Text {
        x: f32,
        y: f32,
        font: FontRole,
        size: f32,
        color: Rgb,
        text: String,
    },
    /// The header logo image, scaled into the given box
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

impl DrawOp {
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            DrawOp::FillRect { .. } | DrawOp::Image { .. } => None,
        }
    }
}

fn glyph_width(c: char, size: f32) -> f32 {
    let em = match c as u32 {
        code @ 0x20..=0x7E => HELVETICA_WIDTHS[(code - 0x20) as usize] as f32 / 1000.0,
        _ => HELVETICA_CHAR_WIDTH_RATIO,
    };
    em * size
}

/// Rendered width of `text` using Helvetica metrics
pub fn estimate_text_width(text: &str, size: f32) -> f32 {
    text.chars().map(|c| glyph_width(c, size)).sum()
}

/// Shorten `text` with an ellipsis so it fits in `max_width`.
///
/// Returns `None` when the text already fits.
pub fn truncate_to_width(text: &str, size: f32, max_width: f32) -> Option<String> {
    if estimate_text_width(text, size) <= max_width {
        return None;
    }
    let budget = max_width - estimate_text_width(ELLIPSIS, size);
    let mut used = 0.0;
    let mut shortened = String::new();
    for c in text.chars() {
        used += glyph_width(c, size);
        if used > budget {
            break;
        }
        shortened.push(c);
    }
    shortened.truncate(shortened.trim_end().len());
    shortened.push_str(ELLIPSIS);
    Some(shortened)
}

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// Words wider than a whole line are broken between characters.
pub fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };
        if estimate_text_width(&candidate, size) <= max_width {
            line = candidate;
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        for c in word.chars() {
            if !line.is_empty() && estimate_text_width(&line, size) + glyph_width(c, size) > max_width {
                lines.push(std::mem::take(&mut line));
            }
            line.push(c);
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wrap `text` and keep at most `max_lines` lines. When lines are dropped the
/// last kept line ends with an ellipsis.
///
/// Returns the lines and whether anything was cut.
pub fn fit_lines(text: &str, size: f32, max_width: f32, max_lines: usize) -> (Vec<String>, bool) {
    let mut lines = wrap_text(text, size, max_width);
    let max_lines = max_lines.max(1);
    if lines.len() <= max_lines {
        return (lines, false);
    }

    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let marked = format!("{}{}", last, ELLIPSIS);
        *last = truncate_to_width(&marked, size, max_width).unwrap_or(marked);
    }
    (lines, true)
}

/// Encode text for a simple font using WinAnsiEncoding.
///
/// Characters outside the encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{20AC}' => 0x80,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

/// A PDF text string: literal for ASCII, UTF-16BE with BOM otherwise
pub fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_not_truncated() {
        assert_eq!(truncate_to_width("W-2", 10.0, 100.0), None);
    }

    #[test]
    fn long_text_gets_ellipsis() {
        let text = "Please upload your 1099-MISC from American Hearing Benefit";
        let short = truncate_to_width(text, 10.0, 100.0).unwrap();
        assert!(short.ends_with("..."));
        assert!(estimate_text_width(&short, 10.0) <= 100.0);
        assert!(short.starts_with("Please upload"));
    }

    #[test]
    fn capitals_are_wider_than_lowercase() {
        assert!(estimate_text_width("WWWW", 10.0) > estimate_text_width("iiii", 10.0) * 3.0);
        // Helvetica 'W' is 944/1000 em
        assert!((estimate_text_width("W", 10.0) - 9.44).abs() < 1e-4);
    }

    #[test]
    fn wrap_keeps_every_word() {
        let text = "Please upload your 1099-MISC from American Hearing Benefit.";
        let lines = wrap_text(text, 10.0, 238.0);
        assert_eq!(lines, vec!["Please upload your 1099-MISC from American", "Hearing Benefit."]);
        assert!(lines.iter().all(|l| estimate_text_width(l, 10.0) <= 238.0));
    }

    #[test]
    fn wrap_breaks_overlong_words() {
        let lines = wrap_text("ABCDEFGHIJKLMNOPQRSTUVWXYZ", 10.0, 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert!(lines.iter().all(|l| estimate_text_width(l, 10.0) <= 50.0));
    }

    #[test]
    fn fit_lines_marks_dropped_text() {
        let text = "one two three four five six seven eight nine ten";
        let (lines, cut) = fit_lines(text, 10.0, 60.0, 2);
        assert!(cut);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("..."));
        assert!(lines.iter().all(|l| estimate_text_width(l, 10.0) <= 60.0));

        let (lines, cut) = fit_lines("W-2", 10.0, 60.0, 2);
        assert!(!cut);
        assert_eq!(lines, vec!["W-2"]);
    }

    #[test]
    fn win_ansi_maps_typographic_quotes() {
        assert_eq!(encode_win_ansi("It’s"), vec![b'I', b't', 0x92, b's']);
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }

    #[test]
    fn non_ascii_text_string_is_utf16() {
        match text_string("Zoë") {
            Object::String(bytes, _) => assert_eq!(&bytes[..2], &[0xFE, 0xFF]),
            other => panic!("Expected string, got {:?}", other),
        }
    }
}
