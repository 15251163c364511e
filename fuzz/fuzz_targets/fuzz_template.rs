//! Fuzz target for the capability string compiler and interpreter.

#![no_main]

use arbitrary::Arbitrary;
use cellterm::Param;
use cellterm::terminfo::template::{compile, unescape};
use cellterm::terminfo::{PadPolicy, StaticRegisters};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    source: Vec<u8>,
    params: Vec<i32>,
    escaped: bool,
}

fuzz_target!(|input: Input| {
    let source = if input.escaped {
        unescape(&input.source)
    } else {
        input.source
    };
    let template = compile("fuzz", &source);
    let params: Vec<Param> = input.params.into_iter().take(9).map(Param::Int).collect();
    let mut statics = StaticRegisters::default();
    let mut out = Vec::new();
    template.expand_into(&params, &mut statics, PadPolicy::default(), &mut out);
});
