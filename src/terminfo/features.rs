//! Terminal quirk detection.
//!
//! Flags are computed once per loaded entry from the entry itself and an
//! [`Environment`] snapshot. The compiler never reads them; the renderer
//! does.

use std::collections::{BTreeMap, HashMap};

use super::names::{NumberCap, StringCap};
use super::table::TermEntry;
use crate::acs;
use crate::config::Environment;

/// Quirk flags for one terminal type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FeatureFlags {
    /// Output may contain non-ASCII characters as UTF-8.
    pub unicode: bool,
    /// The terminal advertises an alternate character set it does not honor.
    pub broken_acs: bool,
    /// Magic-cookie attribute handling is enabled.
    pub magic_cookie: bool,
    /// Padding directives are honored.
    pub padding: bool,
    /// Render batches are written in one piece.
    pub setbuf: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            unicode: false,
            broken_acs: false,
            magic_cookie: true,
            padding: true,
            setbuf: true,
        }
    }
}

/// Alternate character set mapping parsed from `acs_chars`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AcsMap {
    /// VT100 code to the Unicode glyph it draws.
    to_unicode: BTreeMap<u8, char>,
    /// Unicode glyph to the byte this terminal draws it with in ACS mode.
    to_terminal: HashMap<char, u8>,
}

impl AcsMap {
    /// Parse the `acs_chars` pair list.
    ///
    /// Each pair is a VT100 code followed by the byte the terminal uses for
    /// it. Codes without a known glyph are ignored.
    #[must_use]
    pub fn parse(acs_chars: &[u8]) -> Self {
        let mut map = Self::default();
        for pair in acs_chars.chunks_exact(2) {
            let (code, term) = (pair[0], pair[1]);
            let Some(glyph) = acs::to_unicode(code) else {
                continue;
            };
            map.to_unicode.insert(code, glyph);
            map.to_terminal.entry(glyph).or_insert(term);
        }
        map
    }

    /// Unicode glyph drawn by a VT100 ACS code.
    #[must_use]
    pub fn glyph(&self, code: u8) -> Option<char> {
        self.to_unicode.get(&code).copied()
    }

    /// Byte to emit in ACS mode to draw `glyph`.
    #[must_use]
    pub fn terminal_byte(&self, glyph: char) -> Option<u8> {
        self.to_terminal.get(&glyph).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_unicode.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.to_unicode.len()
    }
}

/// Compute the quirk flags for `entry`.
///
/// `force_unicode` overrides the locale check when set.
#[must_use]
pub fn detect(entry: &TermEntry, env: &Environment, force_unicode: Option<bool>) -> FeatureFlags {
    let flags = FeatureFlags {
        unicode: force_unicode.unwrap_or_else(|| locale_is_utf8(env)),
        broken_acs: detect_broken_acs(entry, env),
        magic_cookie: env.ncurses_no_magic_cookie.is_none(),
        padding: env.ncurses_no_padding.is_none(),
        setbuf: env.ncurses_no_setbuf.is_none(),
    };
    tracing::debug!(term = entry.name(), ?flags, "detected terminal features");
    flags
}

/// Whether any locale variable names a UTF-8 codeset.
#[must_use]
pub fn locale_is_utf8(env: &Environment) -> bool {
    env.locale_vars().any(|value| {
        let value = value.to_ascii_lowercase();
        value.contains("utf-8") || value.contains("utf8")
    })
}

fn detect_broken_acs(entry: &TermEntry, env: &Environment) -> bool {
    if let Some(value) = &env.ncurses_no_utf8_acs {
        return value.trim().parse::<i64>().is_ok_and(|n| n != 0);
    }
    if let Some(&u8_flag) = entry.ext_numbers.get("U8") {
        if u8_flag >= 0 {
            return u8_flag != 0;
        }
    }
    if entry.name() == "linux" {
        return true;
    }
    detect_pc_rom_set(entry)
}

/// PC-ROM terminals alias the PC charset onto the alternate charset.
fn detect_pc_rom_set(entry: &TermEntry) -> bool {
    let (Some(enter_pc), Some(enter_acs)) = (
        entry.string(StringCap::EnterPcCharsetMode),
        entry.string(StringCap::EnterAltCharsetMode),
    ) else {
        return false;
    };
    enter_pc == enter_acs
        && entry.string(StringCap::ExitPcCharsetMode)
            == entry.string(StringCap::ExitAltCharsetMode)
}

/// Whether attribute changes consume a screen cell on this terminal.
#[must_use]
pub fn has_magic_cookie_glitch(entry: &TermEntry) -> bool {
    entry
        .number(NumberCap::MagicCookieGlitch)
        .is_some_and(|n| n > 0)
}
