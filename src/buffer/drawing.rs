//! Text and box drawing operations.

use unicode_segmentation::UnicodeSegmentation;

use super::CellBuffer;
use crate::cell::{Attr, Cell};

/// Box drawing characters and the attribute they are drawn with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoxStyle {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    pub attr: Attr,
}

impl BoxStyle {
    /// Single-line box drawing characters. These take part in border joins.
    #[must_use]
    pub const fn single(attr: Attr) -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
            attr,
        }
    }

    /// Double-line box drawing characters.
    #[must_use]
    pub const fn double(attr: Attr) -> Self {
        Self {
            top_left: '╔',
            top_right: '╗',
            bottom_left: '╚',
            bottom_right: '╝',
            horizontal: '═',
            vertical: '║',
            attr,
        }
    }

    /// ASCII box drawing characters (works in all terminals).
    #[must_use]
    pub const fn ascii(attr: Attr) -> Self {
        Self {
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
            horizontal: '-',
            vertical: '|',
            attr,
        }
    }
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self::single(Attr::DEFAULT)
    }
}

impl CellBuffer {
    /// Draw text starting at `(x, y)`, clipped at the right edge.
    ///
    /// Each grapheme cluster occupies one cell (two for wide clusters); only
    /// its base character is stored. Returns the columns consumed.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, attr: Attr) -> u16 {
        let mut col = x;
        for grapheme in text.graphemes(true) {
            if col >= self.width() {
                break;
            }
            let Some(ch) = grapheme.chars().next() else {
                continue;
            };
            if ch == '\n' || ch == '\r' {
                continue;
            }
            col = col.saturating_add(self.put_char(col, y, ch, attr));
        }
        col - x
    }

    /// Draw a box border and record it for joining.
    pub fn draw_box(&mut self, x: u16, y: u16, w: u16, h: u16, style: &BoxStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let attr = style.attr;
        let (right, bottom) = (x.saturating_add(w - 1), y.saturating_add(h - 1));

        self.set(x, y, Cell::new(style.top_left, attr));
        self.set(right, y, Cell::new(style.top_right, attr));
        self.set(x, bottom, Cell::new(style.bottom_left, attr));
        self.set(right, bottom, Cell::new(style.bottom_right, attr));

        for col in (x + 1)..right {
            self.set(col, y, Cell::new(style.horizontal, attr));
            self.set(col, bottom, Cell::new(style.horizontal, attr));
        }
        for row in (y + 1)..bottom {
            self.set(x, row, Cell::new(style.vertical, attr));
            self.set(right, row, Cell::new(style.vertical, attr));
        }

        for row in y..=bottom {
            self.add_border_stop(row, x, right);
        }
    }

    /// Draw a horizontal rule of `len` cells and record it for joining.
    pub fn draw_hline(&mut self, x: u16, y: u16, len: u16, attr: Attr) {
        if len == 0 {
            return;
        }
        let end = x.saturating_add(len - 1);
        for col in x..=end {
            self.set(col, y, Cell::new('─', attr));
        }
        self.add_border_stop(y, x, end);
    }

    /// Draw a vertical rule of `len` cells and record it for joining.
    pub fn draw_vline(&mut self, x: u16, y: u16, len: u16, attr: Attr) {
        for row in y..y.saturating_add(len) {
            self.set(x, row, Cell::new('│', attr));
            self.add_border_stop(row, x, x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Glyph;

    fn text_of(buf: &CellBuffer, y: u16) -> String {
        buf.row(y)
            .unwrap()
            .iter()
            .filter_map(|c| c.glyph.as_char())
            .collect()
    }

    #[test]
    fn test_draw_text_ascii() {
        let mut buf = CellBuffer::new(10, 1);
        assert_eq!(buf.draw_text(1, 0, "abc", Attr::DEFAULT), 3);
        assert_eq!(text_of(&buf, 0), " abc      ");
    }

    #[test]
    fn test_draw_text_clips() {
        let mut buf = CellBuffer::new(4, 1);
        assert_eq!(buf.draw_text(2, 0, "hello", Attr::DEFAULT), 2);
        assert_eq!(text_of(&buf, 0), "  he");
    }

    #[test]
    fn test_draw_text_wide_and_combining() {
        let mut buf = CellBuffer::new(6, 1);
        assert_eq!(buf.draw_text(0, 0, "日e\u{301}x", Attr::DEFAULT), 4);
        assert_eq!(buf.get(0, 0).unwrap().glyph, Glyph::Char('日'));
        assert_eq!(buf.get(1, 0).unwrap().glyph, Glyph::Continuation);
        assert_eq!(buf.get(2, 0).unwrap().glyph, Glyph::Char('e'));
        assert_eq!(buf.get(3, 0).unwrap().glyph, Glyph::Char('x'));
    }

    #[test]
    fn test_draw_box_records_stops() {
        let mut buf = CellBuffer::new(6, 4);
        buf.draw_box(1, 0, 4, 3, &BoxStyle::single(Attr::DEFAULT));
        assert_eq!(text_of(&buf, 0), " ┌──┐ ");
        assert_eq!(text_of(&buf, 1), " │  │ ");
        assert_eq!(text_of(&buf, 2), " └──┘ ");
        assert_eq!(buf.border_stops().len(), 3);
        let span = buf.border_stops().get(1).unwrap();
        assert_eq!((span.start, span.end), (1, 4));
    }

    #[test]
    fn test_degenerate_box_ignored() {
        let mut buf = CellBuffer::new(4, 4);
        buf.draw_box(0, 0, 1, 4, &BoxStyle::ascii(Attr::DEFAULT));
        assert!(buf.border_stops().is_empty());
        assert_eq!(buf.get(0, 0), Some(&Cell::BLANK));
    }

    #[test]
    fn test_divider_forms_tees() {
        let mut buf = CellBuffer::new(5, 5);
        buf.draw_box(0, 0, 5, 5, &BoxStyle::single(Attr::DEFAULT));
        buf.draw_hline(0, 2, 5, Attr::DEFAULT);
        buf.join_borders();
        assert_eq!(text_of(&buf, 2), "├───┤");
    }

    #[test]
    fn test_double_box_not_joined() {
        let mut buf = CellBuffer::new(5, 3);
        buf.draw_box(0, 0, 5, 3, &BoxStyle::double(Attr::DEFAULT));
        buf.draw_vline(2, 0, 3, Attr::DEFAULT);
        buf.join_borders();
        assert_eq!(text_of(&buf, 0), "╔═│═╗");
    }
}
