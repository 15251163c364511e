//! Bundled `xterm` description used when no terminfo or termcap source is
//! usable.

use super::names::{BooleanCap, NumberCap, StringCap};
use super::table::TermEntry;

/// Name line of the bundled entry.
pub const NAMES: &str = "xterm|xterm terminal emulator (bundled fallback)";

const BOOLEANS: &[BooleanCap] = &[
    BooleanCap::AutoRightMargin,
    BooleanCap::BackColorErase,
    BooleanCap::HasMetaKey,
    BooleanCap::MoveInsertMode,
    BooleanCap::MoveStandoutMode,
    BooleanCap::EatNewlineGlitch,
    BooleanCap::NoPadChar,
    BooleanCap::PrtrSilent,
];

const NUMBERS: &[(NumberCap, i32)] = &[
    (NumberCap::Columns, 80),
    (NumberCap::InitTabs, 8),
    (NumberCap::Lines, 24),
    (NumberCap::MaxColors, 8),
    (NumberCap::MaxPairs, 64),
];

const STRINGS: &[(StringCap, &[u8])] = &[
    (StringCap::Bell, b"\x07"),
    (StringCap::CarriageReturn, b"\r"),
    (StringCap::ChangeScrollRegion, b"\x1b[%i%p1%d;%p2%dr"),
    (StringCap::ClearAllTabs, b"\x1b[3g"),
    (StringCap::ClearScreen, b"\x1b[H\x1b[2J"),
    (StringCap::ClrEol, b"\x1b[K"),
    (StringCap::ClrEos, b"\x1b[J"),
    (StringCap::ClrBol, b"\x1b[1K"),
    (StringCap::ColumnAddress, b"\x1b[%i%p1%dG"),
    (StringCap::RowAddress, b"\x1b[%i%p1%dd"),
    (StringCap::CursorAddress, b"\x1b[%i%p1%d;%p2%dH"),
    (StringCap::CursorDown, b"\n"),
    (StringCap::CursorHome, b"\x1b[H"),
    (StringCap::CursorInvisible, b"\x1b[?25l"),
    (StringCap::CursorLeft, b"\x08"),
    (StringCap::CursorNormal, b"\x1b[?12l\x1b[?25h"),
    (StringCap::CursorRight, b"\x1b[C"),
    (StringCap::CursorUp, b"\x1b[A"),
    (StringCap::CursorVisible, b"\x1b[?12;25h"),
    (StringCap::DeleteCharacter, b"\x1b[P"),
    (StringCap::DeleteLine, b"\x1b[M"),
    (StringCap::InsertLine, b"\x1b[L"),
    (StringCap::EnterAltCharsetMode, b"\x1b(0"),
    (StringCap::ExitAltCharsetMode, b"\x1b(B"),
    (StringCap::EnterBlinkMode, b"\x1b[5m"),
    (StringCap::EnterBoldMode, b"\x1b[1m"),
    (StringCap::EnterDimMode, b"\x1b[2m"),
    (StringCap::EnterSecureMode, b"\x1b[8m"),
    (StringCap::EnterReverseMode, b"\x1b[7m"),
    (StringCap::EnterStandoutMode, b"\x1b[7m"),
    (StringCap::ExitStandoutMode, b"\x1b[27m"),
    (StringCap::EnterUnderlineMode, b"\x1b[4m"),
    (StringCap::ExitUnderlineMode, b"\x1b[24m"),
    (StringCap::EnterItalicsMode, b"\x1b[3m"),
    (StringCap::ExitItalicsMode, b"\x1b[23m"),
    (StringCap::ExitAttributeMode, b"\x1b(B\x1b[m"),
    (StringCap::EnterCaMode, b"\x1b[?1049h\x1b[22;0;0t"),
    (StringCap::ExitCaMode, b"\x1b[?1049l\x1b[23;0;0t"),
    (StringCap::EnterInsertMode, b"\x1b[4h"),
    (StringCap::ExitInsertMode, b"\x1b[4l"),
    (StringCap::EnterAmMode, b"\x1b[?7h"),
    (StringCap::ExitAmMode, b"\x1b[?7l"),
    (StringCap::EraseChars, b"\x1b[%p1%dX"),
    (StringCap::FlashScreen, b"\x1b[?5h$<100/>\x1b[?5l"),
    (StringCap::Init2string, b"\x1b[!p\x1b[?3;4l\x1b[4l\x1b>"),
    (StringCap::Reset1string, b"\x1bc"),
    (StringCap::Reset2string, b"\x1b[!p\x1b[?3;4l\x1b[4l\x1b>"),
    (StringCap::KeypadLocal, b"\x1b[?1l\x1b>"),
    (StringCap::KeypadXmit, b"\x1b[?1h\x1b="),
    (StringCap::KeyBackspace, b"\x7f"),
    (StringCap::KeyUp, b"\x1bOA"),
    (StringCap::KeyDown, b"\x1bOB"),
    (StringCap::KeyRight, b"\x1bOC"),
    (StringCap::KeyLeft, b"\x1bOD"),
    (StringCap::KeyHome, b"\x1bOH"),
    (StringCap::KeyEnd, b"\x1bOF"),
    (StringCap::KeyIc, b"\x1b[2~"),
    (StringCap::KeyDc, b"\x1b[3~"),
    (StringCap::KeyPpage, b"\x1b[5~"),
    (StringCap::KeyNpage, b"\x1b[6~"),
    (StringCap::KeyBtab, b"\x1b[Z"),
    (StringCap::KeyEnter, b"\x1bOM"),
    (StringCap::KeyF1, b"\x1bOP"),
    (StringCap::KeyF2, b"\x1bOQ"),
    (StringCap::KeyF3, b"\x1bOR"),
    (StringCap::KeyF4, b"\x1bOS"),
    (StringCap::KeyF5, b"\x1b[15~"),
    (StringCap::KeyF6, b"\x1b[17~"),
    (StringCap::KeyF7, b"\x1b[18~"),
    (StringCap::KeyF8, b"\x1b[19~"),
    (StringCap::KeyF9, b"\x1b[20~"),
    (StringCap::KeyF10, b"\x1b[21~"),
    (StringCap::KeyF11, b"\x1b[23~"),
    (StringCap::KeyF12, b"\x1b[24~"),
    (StringCap::KeyMouse, b"\x1b[M"),
    (StringCap::ParmDch, b"\x1b[%p1%dP"),
    (StringCap::ParmDeleteLine, b"\x1b[%p1%dM"),
    (StringCap::ParmDownCursor, b"\x1b[%p1%dB"),
    (StringCap::ParmIch, b"\x1b[%p1%d@"),
    (StringCap::ParmIndex, b"\x1b[%p1%dS"),
    (StringCap::ParmInsertLine, b"\x1b[%p1%dL"),
    (StringCap::ParmLeftCursor, b"\x1b[%p1%dD"),
    (StringCap::ParmRightCursor, b"\x1b[%p1%dC"),
    (StringCap::ParmRindex, b"\x1b[%p1%dT"),
    (StringCap::ParmUpCursor, b"\x1b[%p1%dA"),
    (StringCap::RepeatChar, b"%p1%c\x1b[%p2%{1}%-%db"),
    (StringCap::RestoreCursor, b"\x1b8"),
    (StringCap::SaveCursor, b"\x1b7"),
    (StringCap::ScrollForward, b"\n"),
    (StringCap::ScrollReverse, b"\x1bM"),
    (StringCap::SetTab, b"\x1bH"),
    (StringCap::Tab, b"\t"),
    (
        StringCap::SetAttributes,
        b"%?%p9%t\x1b(0%e\x1b(B%;\x1b[0%?%p6%t;1%;%?%p5%t;2%;%?%p2%t;4%;%?%p1%p3%|%t;7%;%?%p4%t;5%;%?%p7%t;8%;m",
    ),
    (
        StringCap::AcsChars,
        b"``aaffggiijjkkllmmnnooppqqrrssttuuvvwwxxyyzz{{||}}~~",
    ),
    (StringCap::OrigPair, b"\x1b[39;49m"),
    (StringCap::SetAForeground, b"\x1b[3%p1%dm"),
    (StringCap::SetABackground, b"\x1b[4%p1%dm"),
    (StringCap::MetaOn, b"\x1b[?1034h"),
    (StringCap::MetaOff, b"\x1b[?1034l"),
    (StringCap::User6, b"\x1b[%i%d;%dR"),
    (StringCap::User7, b"\x1b[6n"),
    (StringCap::User9, b"\x1b[c"),
];

/// The bundled entry.
#[must_use]
pub fn xterm() -> TermEntry {
    let mut entry = TermEntry::new(NAMES);
    for &cap in BOOLEANS {
        entry.set_flag(cap, true);
    }
    for &(cap, n) in NUMBERS {
        entry.set_number(cap, n);
    }
    for &(cap, s) in STRINGS {
        entry.set_string(cap, s);
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminfo::template::try_compile;

    #[test]
    fn test_fallback_shape() {
        let entry = xterm();
        assert_eq!(entry.name(), "xterm");
        assert!(entry.flag(BooleanCap::BackColorErase));
        assert_eq!(entry.number(NumberCap::MaxColors), Some(8));
        assert!(entry.string(StringCap::CursorAddress).is_some());
        assert!(!entry.has_extended());
    }

    #[test]
    fn test_fallback_strings_compile() {
        let entry = xterm();
        for (idx, value) in entry.strings.iter().enumerate() {
            if let Some(value) = value {
                assert!(try_compile(value).is_ok(), "string {idx} failed to compile");
            }
        }
    }
}
