//! Registry of legacy re-exports and their load-time verification.
//!
//! Each entry is built by `forward!` from the legacy and canonical module
//! paths. The macro names the type through both paths, so an entry for a
//! symbol the legacy module does not re-export fails to compile. What the
//! compiler cannot see is a legacy module that still compiles but names a
//! different type than the canonical one (a fork, or a forward left pointing
//! at an old location); [`Forward::verify`] catches that at run time.

use crate::error::ImportError;
use shimguard_types::ModulePath;
use std::any::TypeId;
use std::sync::OnceLock;

/// One legacy path that forwards `symbol` to its canonical module.
#[derive(Clone, Copy, Debug)]
pub struct Forward {
    /// Legacy module, relative to the crate root (`business::models::report`).
    pub legacy: &'static str,
    /// Module that defines the symbol (`domain::models::report`).
    pub canonical: &'static str,
    pub symbol: &'static str,
    pub legacy_type: fn() -> TypeId,
    pub canonical_type: fn() -> TypeId,
    /// `std::any::type_name` of the symbol as seen through the legacy path.
    pub resolved_name: fn() -> &'static str,
}

macro_rules! forward {
    ($lf:ident $(:: $lr:ident)* => $cf:ident $(:: $cr:ident)*, $symbol:ident) => {
        Forward {
            legacy: concat!(stringify!($lf) $(, "::", stringify!($lr))*),
            canonical: concat!(stringify!($cf) $(, "::", stringify!($cr))*),
            symbol: stringify!($symbol),
            legacy_type: || TypeId::of::<crate::$lf $(::$lr)*::$symbol>(),
            canonical_type: || TypeId::of::<crate::$cf $(::$cr)*::$symbol>(),
            resolved_name: || std::any::type_name::<crate::$lf $(::$lr)*::$symbol>(),
        }
    };
}

/// Every legacy re-export in this crate.
pub static FORWARDS: &[Forward] = &[
    forward!(business::models::email_record => domain::models::email_record, EmailRecord),
    forward!(business::models::report => domain::models::report, Report),
];

static LOADED: OnceLock<Result<(), ImportError>> = OnceLock::new();

impl Forward {
    /// Check that the legacy path names exactly the canonical type.
    pub fn verify(&self) -> Result<(), ImportError> {
        let resolved = (self.resolved_name)();
        let expected_suffix = format!("::{}::{}", self.canonical, self.symbol);
        if (self.legacy_type)() == (self.canonical_type)() && resolved.ends_with(&expected_suffix)
        {
            return Ok(());
        }
        Err(ImportError::StaleForward {
            legacy: self.legacy.to_string(),
            canonical: self.canonical.to_string(),
            symbol: self.symbol.to_string(),
            resolved: resolved.to_string(),
        })
    }

    fn legacy_module(&self) -> ModulePath {
        ModulePath::new(self.legacy).anchored()
    }
}

/// Verify `forwards` in order; the first stale entry is returned.
pub fn verify_all(forwards: &[Forward]) -> Result<(), ImportError> {
    forwards.iter().try_for_each(Forward::verify)
}

/// Verify [`FORWARDS`] once per process and return the cached outcome.
pub fn ensure_loaded() -> Result<(), ImportError> {
    LOADED
        .get_or_init(|| {
            let outcome = verify_all(FORWARDS);
            match &outcome {
                Ok(()) => tracing::debug!(forwards = FORWARDS.len(), "legacy forwards verified"),
                Err(err) => tracing::error!(error = %err, "legacy forward is stale"),
            }
            outcome
        })
        .clone()
}

/// Resolve `symbol` under a legacy path.
///
/// `legacy_path` may use `/`, `.` or `::` separators and may carry a source
/// prefix (`services/database-service/src/business/models/email_record`).
pub fn lookup(legacy_path: &str, symbol: &str) -> Result<&'static Forward, ImportError> {
    let wanted = normalize_legacy_path(legacy_path);
    let mut at_path = FORWARDS
        .iter()
        .filter(|f| f.legacy_module() == wanted)
        .peekable();
    if at_path.peek().is_none() {
        return Err(ImportError::UnknownLegacyPath(legacy_path.to_string()));
    }
    let forward = at_path
        .find(|f| f.symbol == symbol)
        .ok_or_else(|| ImportError::SymbolNotExported {
            legacy: wanted.crate_relative().to_string(),
            symbol: symbol.to_string(),
        })?;

    ensure_loaded()?;
    Ok(forward)
}

/// Legacy module paths with at least one forward, in registry order.
pub fn legacy_paths() -> impl Iterator<Item = &'static str> {
    FORWARDS
        .iter()
        .enumerate()
        .filter(|(i, f)| !FORWARDS[..*i].iter().any(|p| p.legacy == f.legacy))
        .map(|(_, f)| f.legacy)
}

fn normalize_legacy_path(path: &str) -> ModulePath {
    let parsed = ModulePath::from_legacy_reference(path);
    let relative = parsed.crate_relative();
    let relative = relative
        .strip_prefix(concat!(env!("CARGO_CRATE_NAME"), "::"))
        .unwrap_or(relative);
    ModulePath::new(relative).anchored()
}
