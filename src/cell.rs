//! Terminal cell type representing a single character position.
//!
//! A screen is a grid of cells. Each cell pairs a packed [`Attr`] with a
//! [`Glyph`]. The attribute word keeps the style flags and both colors in one
//! integer so the renderer can compare "did the style change" with a single
//! equality test:
//!
//! ```text
//! [31..23: unused][22..18: flags][17..9: fg][8..0: bg]
//! ```
//!
//! Colors are palette indices 0-510; [`Attr::DEFAULT_COLOR`] (`0x1ff`) means
//! "whatever the terminal's default is".
//!
//! # Wide Characters
//!
//! Some characters (CJK, emoji) have display width 2. When a wide glyph is
//! placed in a cell, the following cell becomes a [`Glyph::Continuation`] to
//! indicate it's occupied by the previous character.
//!
//! # Examples
//!
//! ```
//! use cellterm::{Attr, AttrFlags, Cell};
//!
//! let attr = Attr::new(AttrFlags::BOLD, 2, Attr::DEFAULT_COLOR);
//! let cell = Cell::new('A', attr);
//! assert_eq!(cell.attr.fg(), 2);
//! assert!(cell.attr.flags().contains(AttrFlags::BOLD));
//!
//! let wide = Cell::new('日', Attr::DEFAULT);
//! assert_eq!(wide.display_width(), 2);
//! ```

use bitflags::bitflags;
use unicode_width::UnicodeWidthChar;

bitflags! {
    /// Style flags stored in the high bits of an [`Attr`].
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct AttrFlags: u32 {
        /// Bold/increased intensity.
        const BOLD      = 0x01;
        /// Underlined text.
        const UNDERLINE = 0x02;
        /// Blinking text.
        const BLINK     = 0x04;
        /// Swapped foreground/background.
        const INVERSE   = 0x08;
        /// Hidden/invisible text.
        const INVISIBLE = 0x10;
    }
}

/// Packed cell attribute: `(flags << 18) | (fg << 9) | bg`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Attr(u32);

impl Attr {
    const FLAGS_SHIFT: u32 = 18;
    const FG_SHIFT: u32 = 9;
    const COLOR_MASK: u32 = 0x1ff;

    /// Color index meaning "terminal default".
    pub const DEFAULT_COLOR: u16 = 0x1ff;

    /// No flags, default foreground and background.
    pub const DEFAULT: Self = Self::new(AttrFlags::empty(), Self::DEFAULT_COLOR, Self::DEFAULT_COLOR);

    /// Pack flags and colors. Colors are masked to 9 bits.
    #[must_use]
    pub const fn new(flags: AttrFlags, fg: u16, bg: u16) -> Self {
        Self(
            (flags.bits() << Self::FLAGS_SHIFT)
                | (((fg as u32) & Self::COLOR_MASK) << Self::FG_SHIFT)
                | ((bg as u32) & Self::COLOR_MASK),
        )
    }

    #[must_use]
    pub const fn flags(self) -> AttrFlags {
        AttrFlags::from_bits_truncate(self.0 >> Self::FLAGS_SHIFT)
    }

    #[must_use]
    pub const fn fg(self) -> u16 {
        ((self.0 >> Self::FG_SHIFT) & Self::COLOR_MASK) as u16
    }

    #[must_use]
    pub const fn bg(self) -> u16 {
        (self.0 & Self::COLOR_MASK) as u16
    }

    /// Whether the background is the terminal default.
    #[must_use]
    pub const fn has_default_bg(self) -> bool {
        self.bg() == Self::DEFAULT_COLOR
    }

    #[must_use]
    pub const fn with_flags(self, flags: AttrFlags) -> Self {
        Self::new(flags, self.fg(), self.bg())
    }

    #[must_use]
    pub const fn with_fg(self, fg: u16) -> Self {
        Self::new(self.flags(), fg, self.bg())
    }

    #[must_use]
    pub const fn with_bg(self, bg: u16) -> Self {
        Self::new(self.flags(), self.fg(), bg)
    }

    /// Raw packed value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Rebuild from a packed value, dropping unknown flag bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        let flags = AttrFlags::from_bits_truncate(bits >> Self::FLAGS_SHIFT);
        Self((flags.bits() << Self::FLAGS_SHIFT) | (bits & ((1 << Self::FLAGS_SHIFT) - 1)))
    }
}

impl Default for Attr {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What a cell displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// A single display character (width 1 or 2).
    Char(char),
    /// Right half of a wide character in the previous cell.
    Continuation,
}

impl Glyph {
    /// Columns this glyph occupies. Control characters count as one.
    #[must_use]
    pub fn display_width(self) -> usize {
        match self {
            Self::Char(c) => c.width().unwrap_or(1),
            Self::Continuation => 0,
        }
    }

    #[must_use]
    pub const fn is_continuation(self) -> bool {
        matches!(self, Self::Continuation)
    }

    #[must_use]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Char(c) => Some(c),
            Self::Continuation => None,
        }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::Char(' ')
    }
}

/// A single terminal cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub attr: Attr,
    pub glyph: Glyph,
}

impl Cell {
    /// Blank cell: default attribute and a space.
    pub const BLANK: Self = Self {
        attr: Attr::DEFAULT,
        glyph: Glyph::Char(' '),
    };

    #[must_use]
    pub const fn new(ch: char, attr: Attr) -> Self {
        Self {
            attr,
            glyph: Glyph::Char(ch),
        }
    }

    /// A space carrying `attr`, used when clearing regions.
    #[must_use]
    pub const fn clear(attr: Attr) -> Self {
        Self::new(' ', attr)
    }

    /// Placeholder for the second column of a wide glyph.
    #[must_use]
    pub const fn continuation(attr: Attr) -> Self {
        Self {
            attr,
            glyph: Glyph::Continuation,
        }
    }

    #[must_use]
    pub fn display_width(&self) -> usize {
        self.glyph.display_width()
    }

    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.glyph.is_continuation()
    }
}
