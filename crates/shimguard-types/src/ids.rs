//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_FORWARDS_EXPLICIT: &str = "forwards.explicit";
pub const CHECK_FORWARDS_CANONICAL_EXISTS: &str = "forwards.canonical_exists";
pub const CHECK_FORWARDS_NO_FORK: &str = "forwards.no_fork";
pub const CHECK_FORWARDS_NO_CHAIN: &str = "forwards.no_chain";

// Codes: forwards.explicit
pub const CODE_GLOB_REEXPORT: &str = "glob_reexport";

// Codes: forwards.canonical_exists
pub const CODE_MISSING_MODULE: &str = "missing_module";
pub const CODE_MISSING_SYMBOL: &str = "missing_symbol";

// Codes: forwards.no_fork
pub const CODE_FORKED_DEFINITION: &str = "forked_definition";

// Codes: forwards.no_chain
pub const CODE_CHAINED_FORWARD: &str = "chained_forward";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
