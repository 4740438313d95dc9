//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after code examples.
    pub examples: ExamplePair,
}

/// Before and after code examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Code that would trigger a finding.
    pub before: &'static str,
    /// Code that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_FORWARDS_EXPLICIT => Some(explain_explicit()),
        ids::CHECK_FORWARDS_CANONICAL_EXISTS => Some(explain_canonical_exists()),
        ids::CHECK_FORWARDS_NO_FORK => Some(explain_no_fork()),
        ids::CHECK_FORWARDS_NO_CHAIN => Some(explain_no_chain()),

        // Codes
        ids::CODE_GLOB_REEXPORT => Some(explain_glob_reexport()),
        ids::CODE_MISSING_MODULE => Some(explain_missing_module()),
        ids::CODE_MISSING_SYMBOL => Some(explain_missing_symbol()),
        ids::CODE_FORKED_DEFINITION => Some(explain_forked_definition()),
        ids::CODE_CHAINED_FORWARD => Some(explain_chained_forward()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_FORWARDS_EXPLICIT,
        ids::CHECK_FORWARDS_CANONICAL_EXISTS,
        ids::CHECK_FORWARDS_NO_FORK,
        ids::CHECK_FORWARDS_NO_CHAIN,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_GLOB_REEXPORT,
        ids::CODE_MISSING_MODULE,
        ids::CODE_MISSING_SYMBOL,
        ids::CODE_FORKED_DEFINITION,
        ids::CODE_CHAINED_FORWARD,
    ]
}

// --- Check-level explanations ---

fn explain_explicit() -> Explanation {
    Explanation {
        title: "Explicit Forwards",
        description: "\
Detects glob re-exports (`pub use path::*;`) in legacy modules.

A legacy module exists only to keep old import paths working. When it forwards
with a glob, nobody can tell which names the old path is expected to provide:
- a symbol removed upstream silently disappears from the legacy path
- new canonical symbols leak into the legacy namespace
- stale forwards cannot be detected by reading the module",
        remediation: "\
Enumerate every forwarded symbol in its own `pub use` declaration (or a braced
group of explicit names).",
        examples: ExamplePair {
            before: "pub use crate::domain::models::email_record::*;",
            after: "pub use crate::domain::models::email_record::EmailRecord;",
        },
    }
}

fn explain_canonical_exists() -> Explanation {
    Explanation {
        title: "Canonical Target Exists",
        description: "\
Verifies that every crate-internal re-export points at a module that exists
and at a symbol that module provides.

A forward whose target moved again without updating the shim is stale. The
compiler rejects it too, but only for the configuration being built; this
check reports it for the whole source tree in one pass.",
        remediation: "\
Point the forward at the symbol's current canonical module, or delete the
forward if the symbol was intentionally removed.",
        examples: ExamplePair {
            before: "pub use crate::domain::email_record::EmailRecord; // module moved",
            after: "pub use crate::domain::models::email_record::EmailRecord;",
        },
    }
}

fn explain_no_fork() -> Explanation {
    Explanation {
        title: "No Forked Definitions",
        description: "\
Detects legacy modules that define an item with the same name as a canonical
definition instead of re-exporting it.

A forked copy is a different type: values created through the legacy path are
not interchangeable with canonical ones, and type-identity checks fail.",
        remediation: "\
Delete the copy and re-export the canonical definition.",
        examples: ExamplePair {
            before: "pub struct Report { pub title: String }",
            after: "pub use crate::domain::models::report::Report;",
        },
    }
}

fn explain_no_chain() -> Explanation {
    Explanation {
        title: "No Chained Forwards",
        description: "\
Detects forwards whose target module itself only re-exports the symbol.

Chains make the canonical location hard to trace and let a single stale link
break several legacy paths at once.",
        remediation: "\
Point the forward directly at the module that defines the symbol.",
        examples: ExamplePair {
            before: "pub use crate::business::models::report::Report; // itself a forward",
            after: "pub use crate::domain::models::report::Report;",
        },
    }
}

// --- Code-level explanations ---

fn explain_glob_reexport() -> Explanation {
    Explanation {
        title: "Glob Re-export",
        description: "\
A legacy module re-exports every public name of another module with `*`.",
        remediation: "\
Replace the glob with the explicit list of names the legacy path must keep
providing.",
        examples: ExamplePair {
            before: "pub use crate::domain::models::*;",
            after: "pub use crate::domain::models::{email_record, report};",
        },
    }
}

fn explain_missing_module() -> Explanation {
    Explanation {
        title: "Missing Target Module",
        description: "\
A re-export names a crate-internal module that does not exist in the source
tree.",
        remediation: "\
Update the path to the module's current location.",
        examples: ExamplePair {
            before: "pub use crate::models::report::Report;",
            after: "pub use crate::domain::models::report::Report;",
        },
    }
}

fn explain_missing_symbol() -> Explanation {
    Explanation {
        title: "Missing Target Symbol",
        description: "\
A re-export names a module that exists but neither defines nor re-exports the
symbol.",
        remediation: "\
Forward from the module that now owns the symbol, or use its new name.",
        examples: ExamplePair {
            before: "pub use crate::domain::models::report::MonthlyReport;",
            after: "pub use crate::domain::models::report::Report;",
        },
    }
}

fn explain_forked_definition() -> Explanation {
    Explanation {
        title: "Forked Definition",
        description: "\
A legacy module defines its own item where a canonical definition with the
same name exists.",
        remediation: "\
Remove the local definition and re-export the canonical item.",
        examples: ExamplePair {
            before: "pub struct EmailRecord { pub subject: String }",
            after: "pub use crate::domain::models::email_record::EmailRecord;",
        },
    }
}

fn explain_chained_forward() -> Explanation {
    Explanation {
        title: "Chained Forward",
        description: "\
A re-export targets a module that re-exports the symbol from somewhere else.",
        remediation: "\
Re-export from the defining module directly.",
        examples: ExamplePair {
            before: "pub use crate::business::models::EmailRecord;",
            after: "pub use crate::domain::models::email_record::EmailRecord;",
        },
    }
}
