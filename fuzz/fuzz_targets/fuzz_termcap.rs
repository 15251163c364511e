//! Fuzz target for termcap parsing, `tc=` resolution and translation.

#![no_main]

use cellterm::terminfo::termcap;
use cellterm::{CapabilitySet, LoadOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let records = termcap::parse(text);
    for name in records.iter().filter_map(|r| r.names.first()).take(16) {
        if let Ok(entry) = termcap::resolve(&records, name) {
            let mut caps = CapabilitySet::from_entry(entry, &LoadOptions::default());
            let _ = caps.expand_named("cm", &[1.into(), 2.into()]);
        }
    }
});
