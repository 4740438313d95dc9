use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a forward finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - file (crate-relative)
/// - module path of the offending declaration
/// - exposed symbol name
pub fn fingerprint_for_forward(
    check_id: &str,
    code: &str,
    file: &str,
    module: &str,
    symbol: &str,
) -> String {
    let canonical = [check_id, code, file, module, symbol].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_hex() {
        let a = fingerprint_for_forward("c", "k", "src/a.rs", "crate::a", "X");
        let b = fingerprint_for_forward("c", "k", "src/a.rs", "crate::a", "X");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn fingerprint_changes_with_symbol() {
        let a = fingerprint_for_forward("c", "k", "src/a.rs", "crate::a", "X");
        let b = fingerprint_for_forward("c", "k", "src/a.rs", "crate::a", "Y");
        assert_ne!(a, b);
    }
}
