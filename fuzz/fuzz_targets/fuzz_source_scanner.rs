//! Fuzz target for the Rust source scanner.
//!
//! Goal: scanning arbitrary text (unterminated strings, stray braces, deeply
//! nested use trees) must **never panic**.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_source_scanner
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = shimguard_repo::fuzz::scan_source(text);
    }
});
