//! Alternate character set tables.
//!
//! [`to_unicode`] maps a VT100 ACS code (the letters used in `acs_chars`) to
//! the glyph it draws. [`to_ascii`] is the last-resort substitution used when
//! a terminal can draw neither Unicode nor ACS.

/// Character drawn when no substitution exists.
pub const REPLACEMENT: char = '?';

/// Glyph drawn by a VT100 ACS code.
#[must_use]
pub const fn to_unicode(code: u8) -> Option<char> {
    Some(match code {
        b'`' => '◆',
        b'a' => '▒',
        b'b' => '␉',
        b'c' => '␌',
        b'd' => '␍',
        b'e' => '␊',
        b'f' => '°',
        b'g' => '±',
        b'h' => '␤',
        b'i' => '␋',
        b'j' => '┘',
        b'k' => '┐',
        b'l' => '┌',
        b'm' => '└',
        b'n' => '┼',
        b'o' => '⎺',
        b'p' => '⎻',
        b'q' => '─',
        b'r' => '⎼',
        b's' => '⎽',
        b't' => '├',
        b'u' => '┤',
        b'v' => '┴',
        b'w' => '┬',
        b'x' => '│',
        b'y' => '≤',
        b'z' => '≥',
        b'{' => 'π',
        b'|' => '≠',
        b'}' => '£',
        b'~' => '·',
        b'+' => '→',
        b',' => '←',
        b'-' => '↑',
        b'.' => '↓',
        b'0' => '█',
        _ => return None,
    })
}

/// Nearest ASCII rendition of a glyph.
#[must_use]
pub const fn to_ascii(glyph: char) -> Option<char> {
    Some(match glyph {
        '◆' | '°' | '·' => '*',
        '▒' | '█' => '#',
        '±' => '+',
        '┘' | '┐' | '┌' | '└' | '┼' | '├' | '┤' | '┴' | '┬' => '+',
        '⎺' | '⎻' | '─' | '⎼' => '-',
        '⎽' => '_',
        '│' => '|',
        '≤' | '←' => '<',
        '≥' | '→' => '>',
        '↑' => '^',
        '↓' => 'v',
        '≠' => '=',
        'π' | '£' => REPLACEMENT,
        _ => return None,
    })
}
