//! SharePoint simulation package.

#![forbid(unsafe_code)]

/// Package version, taken from the manifest at build time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> &'static str {
    VERSION
}
