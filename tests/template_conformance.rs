//! Template expansion against capability strings found in real terminfo
//! databases.

use std::time::Duration;

use cellterm::terminfo::template::{compile, try_compile};
use cellterm::terminfo::{PadPolicy, Sink, StaticRegisters};
use cellterm::{CapabilitySet, LoadOptions, Param, StringCap};
use proptest::prelude::*;

fn expand(src: &str, params: &[i32]) -> Vec<u8> {
    let params: Vec<Param> = params.iter().map(|&n| Param::Int(n)).collect();
    compile("test", src.as_bytes()).expand(&params, &mut StaticRegisters::default())
}

#[derive(Default)]
struct Recorder {
    bytes: Vec<u8>,
    delays: Vec<(usize, Duration)>,
}

impl Sink for Recorder {
    fn bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    fn delay(&mut self, delay: Duration) {
        self.delays.push((self.bytes.len(), delay));
    }
}

// ============================================================================
// Core properties
// ============================================================================

#[test]
fn cursor_address_is_one_based() {
    assert_eq!(expand("\x1b[%i%p1%d;%p2%dH", &[3, 5]), b"\x1b[4;6H");
}

#[test]
fn if_then_else() {
    let src = "%?%p1%tA%eB%;";
    assert_eq!(expand(src, &[1]), b"A");
    assert_eq!(expand(src, &[0]), b"B");
}

#[test]
fn absent_capability_expands_to_nothing() {
    let mut caps = CapabilitySet::from_entry(cellterm::TermEntry::new("bare|bare"), &LoadOptions::default());
    assert!(caps.expand(StringCap::CursorAddress, &[Param::Int(1), Param::Int(1)]).is_empty());
    assert!(caps.expand_named("no-such-cap", &[]).is_empty());
    assert!(caps.template(StringCap::ClearScreen).is_none());
}

// ============================================================================
// Database strings
// ============================================================================

#[test]
fn xterm_256color_setaf() {
    let src = "\x1b[%?%p1%{8}%<%t3%p1%d%e%p1%{16}%<%t9%p1%{8}%-%d%e38;5;%p1%d%;m";
    assert_eq!(expand(src, &[1]), b"\x1b[31m");
    assert_eq!(expand(src, &[12]), b"\x1b[94m");
    assert_eq!(expand(src, &[196]), b"\x1b[38;5;196m");
}

#[test]
fn xterm_sgr_combines_attributes() {
    let src = "%?%p9%t\x1b(0%e\x1b(B%;\x1b[0%?%p6%t;1%;%?%p5%t;2%;%?%p2%t;4%;%?%p1%p3%|%t;7%;%?%p4%t;5%;%?%p7%t;8%;m";
    assert_eq!(expand(src, &[0, 0, 0, 0, 0, 1, 0, 0, 0]), b"\x1b(B\x1b[0;1m");
    assert_eq!(expand(src, &[1, 1, 0, 0, 0, 0, 0, 0, 1]), b"\x1b(0\x1b[0;4;7m");
    assert_eq!(expand(src, &[]), b"\x1b(B\x1b[0m");
}

#[test]
fn linux_console_initc() {
    // %p2 etc. scaled from 0..1000 to 0..255 and printed as hex.
    let src = "\x1b]P%p1%x%p2%{255}%*%{1000}%/%02x%p3%{255}%*%{1000}%/%02x%p4%{255}%*%{1000}%/%02x";
    assert_eq!(expand(src, &[1, 1000, 0, 500]), b"\x1b]P1ff007f");
}

#[test]
fn vt52_style_char_addressing() {
    let src = "\x1bY%p1%' '%+%c%p2%' '%+%c";
    assert_eq!(expand(src, &[2, 10]), b"\x1bY\"*");
}

#[test]
fn rxvt_style_dec_private_toggle() {
    let src = "\x1b[?%?%p1%{1}%=%t1049h%e1049l%;";
    assert_eq!(expand(src, &[1]), b"\x1b[?1049h");
    assert_eq!(expand(src, &[0]), b"\x1b[?1049l");
}

#[test]
fn string_parameter_and_length() {
    let t = compile("test", b"\x1b]2;%p1%s\x07%p1%l%d");
    let out = t.expand(&[Param::from("title")], &mut StaticRegisters::default());
    assert_eq!(out, b"\x1b]2;title\x075");
}

#[test]
fn static_register_persists_between_calls() {
    let t = compile("test", b"%gA%d%p1%PA");
    let mut statics = StaticRegisters::default();
    assert_eq!(t.expand(&[Param::Int(4)], &mut statics), b"0");
    assert_eq!(t.expand(&[Param::Int(9)], &mut statics), b"4");
    assert_eq!(statics.get('A'), Some(&Param::Int(9)));
    // A fresh register set starts over.
    assert_eq!(t.expand(&[Param::Int(1)], &mut StaticRegisters::default()), b"0");
}

// ============================================================================
// Padding
// ============================================================================

#[test]
fn padding_is_a_barrier_between_bytes() {
    let t = compile("flash", b"\x1b[?5h$<100/>\x1b[?5l");
    let mut rec = Recorder::default();
    t.expand_into(&[], &mut StaticRegisters::default(), PadPolicy::default(), &mut rec);
    assert_eq!(rec.bytes, b"\x1b[?5h\x1b[?5l");
    assert_eq!(rec.delays, vec![(5, Duration::from_millis(100))]);
}

#[test]
fn optional_padding_skipped_under_flow_control() {
    let t = compile("clear", b"\x1b[H\x1b[2J$<50>");
    let policy = PadPolicy {
        xon_xoff: true,
        ..PadPolicy::default()
    };
    let mut rec = Recorder::default();
    t.expand_into(&[], &mut StaticRegisters::default(), policy, &mut rec);
    assert!(rec.delays.is_empty());
    assert_eq!(rec.bytes, b"\x1b[H\x1b[2J");
}

#[test]
fn proportional_padding_scales_with_lines() {
    let t = compile("dl", b"\x1b[%p1%dM$<3*>");
    let policy = PadPolicy {
        affected_lines: 4,
        ..PadPolicy::default()
    };
    let mut rec = Recorder::default();
    t.expand_into(&[Param::Int(2)], &mut StaticRegisters::default(), policy, &mut rec);
    assert_eq!(rec.bytes, b"\x1b[2M");
    assert_eq!(rec.delays, vec![(4, Duration::from_millis(12))]);
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn structural_errors_become_noops() {
    for src in ["%t", "%e", "%;", "%p0%d", "%P1", "%'a"] {
        assert!(try_compile(src.as_bytes()).is_err(), "{src:?} should fail");
        assert!(compile("bad", src.as_bytes()).is_noop(), "{src:?} should be a no-op");
    }
}

proptest! {
    #[test]
    fn cursor_address_matches_format(row in 0i32..1000, col in 0i32..1000) {
        let out = expand("\x1b[%i%p1%d;%p2%dH", &[row, col]);
        prop_assert_eq!(out, format!("\x1b[{};{}H", row + 1, col + 1).into_bytes());
    }

    #[test]
    fn compiler_never_panics(src in proptest::collection::vec(any::<u8>(), 0..64)) {
        let t = compile("fuzz", &src);
        let _ = t.expand(&[Param::Int(1), Param::Int(2)], &mut StaticRegisters::default());
    }
}
