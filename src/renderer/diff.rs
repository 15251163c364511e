//! Row diffing and escape-sequence generation.
//!
//! [`DiffRenderer`] walks one dirty row of a [`CellBuffer`], compares each
//! pending cell with what the terminal is believed to show and emits the
//! cursor movement, attribute changes and glyphs needed to bring the terminal
//! up to date. Every emitted cell is copied to `committed`.
//!
//! The renderer tracks the terminal's cursor, current attribute and
//! alternate-charset state so nothing is emitted redundantly. Each row starts
//! and ends with the terminal in the default attribute with ACS off.

use crate::acs;
use crate::buffer::{CellBuffer, UNKNOWN};
use crate::cell::{Attr, AttrFlags, Cell, Glyph};
use crate::color;
use crate::config::RendererOptions;
use crate::terminfo::features::has_magic_cookie_glitch;
use crate::terminfo::{BooleanCap, CapabilitySet, NumberCap, Param, Sink, StringCap};

/// Flags set together by one attribute sequence each.
const FLAG_CAPS: [(AttrFlags, StringCap); 5] = [
    (AttrFlags::BOLD, StringCap::EnterBoldMode),
    (AttrFlags::UNDERLINE, StringCap::EnterUnderlineMode),
    (AttrFlags::BLINK, StringCap::EnterBlinkMode),
    (AttrFlags::INVERSE, StringCap::EnterReverseMode),
    (AttrFlags::INVISIBLE, StringCap::EnterSecureMode),
];

/// Map an ANSI color index to the `setf`/`setb` ordering (red and blue
/// swapped).
#[must_use]
pub const fn legacy_color(index: u16) -> u16 {
    const SWAP: [u16; 8] = [0, 4, 2, 6, 1, 5, 3, 7];
    SWAP[(index & 7) as usize] | (index & 8)
}

/// Per-frame diff state.
#[derive(Clone, Debug)]
pub struct DiffRenderer {
    /// Terminal cursor as `(x, y)`, `None` when unknown.
    cursor: Option<(u16, u16)>,
    attr: Attr,
    in_acs: bool,
    use_bce: bool,
    suppress_sgr: bool,
    unicode: bool,
    use_acs: bool,
    max_colors: i32,
}

impl DiffRenderer {
    /// Prepare a frame for the terminal described by `caps`.
    ///
    /// The cursor position starts unknown.
    #[must_use]
    pub fn new(caps: &CapabilitySet, options: &RendererOptions) -> Self {
        let features = caps.features();
        Self {
            cursor: None,
            attr: Attr::DEFAULT,
            in_acs: false,
            use_bce: options.use_bce && caps.has_string(StringCap::ClrEol),
            suppress_sgr: features.magic_cookie && has_magic_cookie_glitch(caps.entry()),
            unicode: features.unicode,
            use_acs: !features.broken_acs
                && caps.has_string(StringCap::EnterAltCharsetMode)
                && !caps.acs().is_empty(),
            max_colors: caps.number(NumberCap::MaxColors).unwrap_or(0),
        }
    }

    /// Where the terminal cursor is believed to be.
    #[must_use]
    pub const fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Tell the renderer the cursor was moved to `(x, y)` by other output.
    pub fn set_cursor(&mut self, cursor: Option<(u16, u16)>) {
        self.cursor = cursor;
    }

    /// Diff row `y` into `out` and clear its dirty flag.
    ///
    /// Nothing is written when the row already matches the terminal.
    pub fn render_row<S: Sink + ?Sized>(
        &mut self,
        caps: &mut CapabilitySet,
        buf: &mut CellBuffer,
        y: u16,
        out: &mut S,
    ) {
        let width = usize::from(buf.width());
        let Some((pending, committed)) = buf.diff_rows(y) else {
            return;
        };
        self.attr = Attr::DEFAULT;
        self.in_acs = false;

        let mut x = 0;
        while x < width {
            let cell = pending[x];
            if cell == committed[x] {
                x += 1;
                continue;
            }
            let col = x as u16;

            if self.use_bce && bce_applicable(caps, &cell) && pending[x..].iter().all(|c| *c == cell) {
                self.set_attr(caps, cell.attr, out);
                self.move_to(caps, col, y, out);
                caps.expand_into(StringCap::ClrEol, &[], 1, out);
                committed[x..].copy_from_slice(&pending[x..]);
                break;
            }

            match cell.glyph {
                Glyph::Continuation if x > 0 && pending[x - 1].display_width() == 2 => {
                    // Covered by the wide glyph to its left.
                    committed[x] = cell;
                    x += 1;
                }
                Glyph::Continuation => {
                    self.put(caps, col, y, cell.attr, ' ', false, width, out);
                    committed[x] = cell;
                    x += 1;
                }
                Glyph::Char(ch) => {
                    let wide = cell.display_width() == 2;
                    let fits = x + 1 < width && pending[x + 1].is_continuation();
                    if committed[x].display_width() == 2 && !(wide && fits) && x + 1 < width {
                        // The old wide glyph's right half is no longer known.
                        committed[x + 1] = UNKNOWN;
                    }
                    if wide && fits {
                        self.put(caps, col, y, cell.attr, ch, true, width, out);
                        committed[x] = cell;
                        committed[x + 1] = pending[x + 1];
                        x += 2;
                    } else {
                        let ch = if wide { ' ' } else { ch };
                        self.put(caps, col, y, cell.attr, ch, false, width, out);
                        committed[x] = cell;
                        x += 1;
                    }
                }
            }
        }

        self.exit_acs(caps, out);
        if self.attr != Attr::DEFAULT {
            self.reset_attr(caps, out);
        }
        buf.clear_dirty(y);
    }

    #[allow(clippy::too_many_arguments)]
    fn put<S: Sink + ?Sized>(
        &mut self,
        caps: &mut CapabilitySet,
        x: u16,
        y: u16,
        attr: Attr,
        ch: char,
        wide: bool,
        width: usize,
        out: &mut S,
    ) {
        self.move_to(caps, x, y, out);
        self.set_attr(caps, attr, out);
        self.write_glyph(caps, ch, wide, out);
        let next = usize::from(x) + if wide { 2 } else { 1 };
        // Writing into the last column leaves the cursor in a pending-wrap
        // state that differs between terminals.
        self.cursor = (next < width).then_some((next as u16, y));
    }

    /// Move the cursor with the cheapest capability available.
    pub fn move_to<S: Sink + ?Sized>(&mut self, caps: &mut CapabilitySet, x: u16, y: u16, out: &mut S) {
        match self.cursor {
            Some(at) if at == (x, y) => return,
            Some((cx, cy))
                if cy == y && x > cx && caps.has_string(StringCap::ParmRightCursor) =>
            {
                caps.expand_into(StringCap::ParmRightCursor, &[Param::from(x - cx)], 1, out);
            }
            _ => {
                if caps.has_string(StringCap::CursorAddress) {
                    caps.expand_into(StringCap::CursorAddress, &[Param::from(y), Param::from(x)], 1, out);
                } else if caps.has_string(StringCap::RowAddress)
                    && caps.has_string(StringCap::ColumnAddress)
                {
                    caps.expand_into(StringCap::RowAddress, &[Param::from(y)], 1, out);
                    caps.expand_into(StringCap::ColumnAddress, &[Param::from(x)], 1, out);
                } else {
                    caps.expand_into(StringCap::CursorHome, &[], 1, out);
                    step(caps, StringCap::ParmDownCursor, StringCap::CursorDown, y, out);
                    step(caps, StringCap::ParmRightCursor, StringCap::CursorRight, x, out);
                }
            }
        }
        self.cursor = Some((x, y));
    }

    /// Switch the terminal to `attr`, emitting nothing when it is current.
    pub fn set_attr<S: Sink + ?Sized>(&mut self, caps: &mut CapabilitySet, attr: Attr, out: &mut S) {
        if attr == self.attr {
            return;
        }
        if self.suppress_sgr {
            self.attr = attr;
            return;
        }
        self.exit_acs(caps, out);
        if self.attr != Attr::DEFAULT {
            caps.expand_into(StringCap::ExitAttributeMode, &[], 1, out);
        }

        let flags = attr.flags();
        for (flag, cap) in FLAG_CAPS {
            if flags.contains(flag) {
                caps.expand_into(cap, &[], 1, out);
            }
        }
        self.set_color(caps, attr.fg(), true, out);
        self.set_color(caps, attr.bg(), false, out);
        self.attr = attr;
    }

    fn reset_attr<S: Sink + ?Sized>(&mut self, caps: &mut CapabilitySet, out: &mut S) {
        if !self.suppress_sgr {
            caps.expand_into(StringCap::ExitAttributeMode, &[], 1, out);
        }
        self.attr = Attr::DEFAULT;
    }

    fn set_color<S: Sink + ?Sized>(&self, caps: &mut CapabilitySet, index: u16, fg: bool, out: &mut S) {
        let Some(index) = color::reduce(index, self.max_colors) else {
            return;
        };
        let (ansi, legacy) = if fg {
            (StringCap::SetAForeground, StringCap::SetForeground)
        } else {
            (StringCap::SetABackground, StringCap::SetBackground)
        };
        if caps.has_string(ansi) {
            caps.expand_into(ansi, &[Param::from(index)], 1, out);
        } else if caps.has_string(legacy) {
            caps.expand_into(legacy, &[Param::from(legacy_color(index))], 1, out);
        }
    }

    fn write_glyph<S: Sink + ?Sized>(&mut self, caps: &mut CapabilitySet, ch: char, wide: bool, out: &mut S) {
        if ch.is_ascii() {
            self.exit_acs(caps, out);
            let byte = if ch.is_ascii_control() { b' ' } else { ch as u8 };
            out.bytes(&[byte]);
            return;
        }
        if self.unicode {
            self.exit_acs(caps, out);
            let mut utf8 = [0u8; 4];
            out.bytes(ch.encode_utf8(&mut utf8).as_bytes());
            return;
        }

        match self.use_acs.then(|| caps.acs().terminal_byte(ch)).flatten() {
            Some(byte) => {
                if !self.in_acs {
                    caps.expand_into(StringCap::EnterAltCharsetMode, &[], 1, out);
                    self.in_acs = true;
                }
                out.bytes(&[byte]);
            }
            None => {
                self.exit_acs(caps, out);
                let ascii = acs::to_ascii(ch).unwrap_or(acs::REPLACEMENT);
                out.bytes(&[ascii as u8]);
            }
        }
        if wide {
            out.bytes(b" ");
        }
    }

    fn exit_acs<S: Sink + ?Sized>(&mut self, caps: &mut CapabilitySet, out: &mut S) {
        if self.in_acs {
            caps.expand_into(StringCap::ExitAltCharsetMode, &[], 1, out);
            self.in_acs = false;
        }
    }
}

/// Whether a trailing run of `cell` may be drawn with `clr_eol`.
fn bce_applicable(caps: &CapabilitySet, cell: &Cell) -> bool {
    cell.glyph == Glyph::Char(' ')
        && !cell
            .attr
            .flags()
            .intersects(AttrFlags::INVERSE | AttrFlags::UNDERLINE)
        && (cell.attr.has_default_bg() || caps.flag(BooleanCap::BackColorErase))
}

/// Move `n` cells with a parameterized capability, else repeat the single step.
fn step<S: Sink + ?Sized>(caps: &mut CapabilitySet, parm: StringCap, single: StringCap, n: u16, out: &mut S) {
    if n == 0 {
        return;
    }
    if caps.has_string(parm) {
        caps.expand_into(parm, &[Param::from(n)], 1, out);
    } else {
        for _ in 0..n {
            caps.expand_into(single, &[], 1, out);
        }
    }
}
