//! Fuzz target for dataset loading.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_dataset
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = tenderlens_app::load_dataset(text);
    }
});
