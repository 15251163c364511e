//! Compiled terminfo parsing, writing and directory search.

use std::fs;

use cellterm::terminfo::{binary, fallback};
use cellterm::{
    BooleanCap, CapabilitySet, Error, LoadOptions, NumberCap, Param, Source, StringCap, TermEntry,
};

// ============================================================================
// Fixtures
// ============================================================================

fn push_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// A legacy-format entry assembled byte by byte.
///
/// names "cellterm-fixture|fixture terminal", bw=0 am=1, cols=80 it=absent
/// lines=24, bel/clear/cup present, el cancelled, everything else absent.
fn hand_built() -> Vec<u8> {
    let names = b"cellterm-fixture|fixture terminal\0";
    let mut table = Vec::new();
    let bel = table.len() as u16;
    table.extend_from_slice(b"\x07\0");
    let clear = table.len() as u16;
    table.extend_from_slice(b"\x1b[H\x1b[2J\0");
    let cup = table.len() as u16;
    table.extend_from_slice(b"\x1b[%i%p1%d;%p2%dH\0");

    let mut offsets = vec![0xffffu16; 11];
    offsets[StringCap::Bell.index()] = bel;
    offsets[StringCap::ClearScreen.index()] = clear;
    offsets[StringCap::CursorAddress.index()] = cup;
    offsets[StringCap::ClrEol.index()] = 0xfffe;

    let mut out = Vec::new();
    push_u16(&mut out, 0o432);
    push_u16(&mut out, names.len() as u16);
    push_u16(&mut out, 2);
    push_u16(&mut out, 3);
    push_u16(&mut out, offsets.len() as u16);
    push_u16(&mut out, table.len() as u16);
    out.extend_from_slice(names);
    out.extend_from_slice(&[0, 1]);
    if out.len() % 2 == 1 {
        out.push(0);
    }
    for n in [80i16, -1, 24] {
        out.extend_from_slice(&n.to_le_bytes());
    }
    for off in offsets {
        push_u16(&mut out, off);
    }
    out.extend_from_slice(&table);
    out
}

// ============================================================================
// Reader
// ============================================================================

#[test]
fn hand_built_entry_parses_exactly() {
    let entry = binary::parse(&hand_built()).unwrap();

    assert_eq!(entry.name(), "cellterm-fixture");
    assert_eq!(entry.names, vec!["cellterm-fixture", "fixture terminal"]);
    assert!(!entry.flag(BooleanCap::AutoLeftMargin));
    assert!(entry.flag(BooleanCap::AutoRightMargin));
    assert!(entry.booleans[2..].iter().all(|b| !b));

    assert_eq!(entry.number(NumberCap::Columns), Some(80));
    assert_eq!(entry.number(NumberCap::InitTabs), None);
    assert_eq!(entry.numbers[NumberCap::InitTabs.index()], -1);
    assert_eq!(entry.number(NumberCap::Lines), Some(24));
    assert!(entry.numbers[3..].iter().all(|&n| n == -1));

    assert_eq!(entry.string(StringCap::Bell), Some(&b"\x07"[..]));
    assert_eq!(entry.string(StringCap::ClearScreen), Some(&b"\x1b[H\x1b[2J"[..]));
    assert_eq!(
        entry.string(StringCap::CursorAddress),
        Some(&b"\x1b[%i%p1%d;%p2%dH"[..])
    );
    assert_eq!(entry.string(StringCap::ClrEol), None);
    let present = entry.strings.iter().filter(|s| s.is_some()).count();
    assert_eq!(present, 3);
    assert!(!entry.has_extended());
}

#[test]
fn hand_built_entry_expands() {
    let entry = binary::parse(&hand_built()).unwrap();
    let mut caps = CapabilitySet::from_entry(entry, &LoadOptions::default());
    assert_eq!(
        caps.expand(StringCap::CursorAddress, &[Param::Int(3), Param::Int(5)]),
        b"\x1b[4;6H"
    );
    assert!(caps.expand(StringCap::ClrEol, &[]).is_empty());
    assert!(caps.expand(StringCap::SetAForeground, &[Param::Int(1)]).is_empty());
    assert!(!caps.has("el"));
    assert!(caps.has("clear"));
    assert!(caps.has("am"));
    assert!(!caps.has("bw"));
}

#[test]
fn truncated_input_is_an_error() {
    let data = hand_built();
    for len in [0, 5, 12, 30, data.len() - 1] {
        let err = binary::parse(&data[..len]).unwrap_err();
        assert!(matches!(err, Error::Truncated { .. }), "len {len}: {err}");
    }
}

#[test]
fn unknown_magic_rejected() {
    let mut data = hand_built();
    data[0] = 0x99;
    assert!(matches!(binary::parse(&data), Err(Error::BadMagic(_))));
}

// ============================================================================
// Writer
// ============================================================================

#[test]
fn bundled_entry_round_trips() {
    let entry = fallback::xterm();
    let parsed = binary::parse(&entry.to_terminfo_bytes()).unwrap();
    assert_eq!(parsed, entry);
}

#[test]
fn extended_and_wide_numbers_round_trip() {
    let mut entry = TermEntry::new("wide-test|wide numbers");
    entry.set_number(NumberCap::MaxColors, 0x1000000);
    entry.set_number(NumberCap::MaxPairs, 0x10000);
    entry.set_string(StringCap::CursorAddress, "\x1b[%i%p1%d;%p2%dH");
    entry.ext_booleans.insert("AX".to_string(), true);
    entry.ext_numbers.insert("U8".to_string(), 1);
    entry.ext_strings.insert("Ss".to_string(), b"\x1b[%p1%d q".to_vec());

    let bytes = entry.to_terminfo_bytes();
    assert_eq!(u16::from_le_bytes([bytes[0], bytes[1]]), binary::MAGIC_32BIT);
    let parsed = binary::parse(&bytes).unwrap();
    assert_eq!(parsed, entry);
    assert_eq!(parsed.number(NumberCap::MaxColors), Some(0x1000000));
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn load_finds_letter_layout() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("c");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("cellterm-fixture"), hand_built()).unwrap();

    let options = LoadOptions::default()
        .with_terminal("cellterm-fixture")
        .with_terminfo_dir(dir.path())
        .with_fallback(false);
    let caps = CapabilitySet::load(&options).unwrap();
    assert_eq!(caps.name(), "cellterm-fixture");
    assert_eq!(
        caps.source(),
        &Source::Terminfo(sub.join("cellterm-fixture"))
    );
}

#[test]
fn load_finds_hashed_layout() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("63");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("cellterm-fixture"), hand_built()).unwrap();

    let options = LoadOptions::default()
        .with_terminal("CELLTERM-FIXTURE")
        .with_terminfo_dir(dir.path())
        .with_fallback(false);
    let caps = CapabilitySet::load(&options).unwrap();
    assert_eq!(caps.number(NumberCap::Lines), Some(24));
}

#[test]
fn corrupt_file_falls_back_to_bundled_entry() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("c");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("cellterm-broken"), b"\x1a\x01\x05").unwrap();

    let options = LoadOptions::default()
        .with_terminal("cellterm-broken")
        .with_terminfo_dir(dir.path())
        .with_termcap("cellterm-unused|nothing:co#1:");
    let caps = CapabilitySet::load(&options).unwrap();
    assert_eq!(caps.source(), &Source::Fallback);
    assert_eq!(caps.name(), "xterm");

    let strict = options.with_fallback(false);
    assert!(matches!(
        CapabilitySet::load(&strict),
        Err(Error::NoSource { .. })
    ));
}
