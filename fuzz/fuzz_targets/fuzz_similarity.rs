//! Fuzz target for folded n-gram similarity.
//!
//! Goal: never panic on arbitrary Unicode, and always stay within [0, 1].
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_similarity
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tenderlens_eligibility::similarity::{folded_similarity, ngram_similarity};

#[derive(Arbitrary, Debug)]
struct Pair<'a> {
    source: &'a str,
    target: &'a str,
    n: u8,
}

fuzz_target!(|pair: Pair<'_>| {
    let n = usize::from(pair.n % 6) + 1;
    let raw = ngram_similarity(pair.source, pair.target, n);
    assert!((0.0..=1.0).contains(&raw), "raw similarity out of range: {raw}");
    let folded = folded_similarity(pair.source, pair.target);
    assert!((0.0..=1.0).contains(&folded), "folded similarity out of range: {folded}");
});
