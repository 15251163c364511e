//! Fuzz target for the compiled terminfo reader.
//!
//! Arbitrary bytes must either parse or fail with an error; a parsed entry
//! must survive being written back out and read again.

#![no_main]

use cellterm::terminfo::binary;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(entry) = binary::parse(data) else {
        return;
    };
    let bytes = entry.to_terminfo_bytes();
    let reparsed = binary::parse(&bytes).expect("written entry must parse");
    assert_eq!(reparsed, entry);
});
