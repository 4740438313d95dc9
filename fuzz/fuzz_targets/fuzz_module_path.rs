//! Fuzz target for module path normalization.
//!
//! Goal: normalization never panics and is idempotent, whatever mix of
//! `::`, `/`, `.` and `src/` prefixes the input carries.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_module_path
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shimguard_types::ModulePath;

#[derive(Arbitrary, Debug)]
struct PathInput {
    /// Raw reference, e.g. "services/database-service/src/business/models/report".
    reference: String,
    /// Prefix tested with `starts_with`.
    prefix: String,
}

fuzz_target!(|input: PathInput| {
    if input.reference.len() > 1024 || input.prefix.len() > 256 {
        return;
    }

    let path = ModulePath::new(&input.reference);
    assert_eq!(ModulePath::new(path.as_str()), path);

    let legacy = ModulePath::from_legacy_reference(&input.reference);
    assert!(legacy.is_crate_anchored());
    assert_eq!(legacy.clone().anchored(), legacy);

    let prefix = ModulePath::new(&input.prefix).anchored();
    if legacy.starts_with(&prefix) {
        assert!(legacy.segments().count() >= prefix.segments().count());
    }
});
