//! Fuzz target for the interval grammar used by threshold parameters.
//!
//! Goal: parsing never panics, and a parsed set answers membership for any value.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_interval_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use tenderlens_core::IntervalSet;

fuzz_target!(|input: (&str, i64)| {
    let (text, value) = input;
    if let Ok(set) = IntervalSet::parse(text) {
        let _ = set.contains(value);
    }
});
