//! Fuzz target for `shimguard.toml` parsing and resolution.
//!
//! Goal: parsing and resolving arbitrary config text should **never panic**.
//! Invalid profiles, severities or allowlist globs must come back as errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 16 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(cfg) = shimguard_settings::parse_config_toml(text) {
        let _ = shimguard_settings::resolve_config(cfg, Default::default());
    }
});
