//! Fixed-width text layout
//!
//! Width is measured in characters: one `char`, one column. Glyphs that
//! the printer renders double-width or as combining marks will throw the
//! columns off; nothing here tries to compensate.

/// Horizontal alignment, shared by text padding and the printer's
/// justification command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

/// Glyph used by [`dashed_line`]
pub const DIVIDER: char = '-';

/// Marker appended by [`ellipsize`] when text is cut
pub const ELLIPSIS: &str = "..";

/// Number of columns a string occupies
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Keep at most `max_width` characters
pub fn truncate(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad or truncate `text` to exactly `width` characters
///
/// Center alignment puts `floor(rem / 2)` spaces on the left and the
/// rest on the right.
pub fn pad(text: &str, width: usize, align: Align) -> String {
    let current = text_width(text);
    if current >= width {
        return truncate(text, width);
    }
    let rem = width - current;
    let (left, right) = match align {
        Align::Start => (0, rem),
        Align::End => (rem, 0),
        Align::Center => (rem / 2, rem - rem / 2),
    };
    let mut out = String::with_capacity(text.len() + rem);
    out.push_str(&" ".repeat(left));
    out.push_str(text);
    out.push_str(&" ".repeat(right));
    out
}

/// Fit `text` into exactly `width` characters, replacing the tail with
/// [`ELLIPSIS`] when it does not fit
pub fn ellipsize(text: &str, width: usize) -> String {
    let marker = text_width(ELLIPSIS);
    if text_width(text) <= width {
        return pad(text, width, Align::Start);
    }
    if width <= marker {
        return truncate(text, width);
    }
    let mut out = truncate(text, width - marker);
    out.push_str(ELLIPSIS);
    out
}

/// Left text and right text on one line of `width` characters
///
/// The right side is never cut (it usually carries an amount). The left
/// side is shortened until at least one space separates the two. When the
/// right side alone is wider than the line it is returned as-is.
pub fn two_column(left: &str, right: &str, width: usize) -> String {
    let rw = text_width(right);
    let left = truncate(left, width.saturating_sub(rw + 1));
    let lw = text_width(&left);
    if lw == 0 && rw >= width {
        return right.to_string();
    }
    let gap = width.saturating_sub(lw + rw).max(1);
    let mut out = String::with_capacity(left.len() + gap + right.len());
    out.push_str(&left);
    out.push_str(&" ".repeat(gap));
    out.push_str(right);
    out
}

/// Divider line of `width` dashes
pub fn dashed_line(width: usize) -> String {
    DIVIDER.to_string().repeat(width)
}
