use crate::model::ReexportTarget;
use globset::{Glob, GlobSet, GlobSetBuilder};
use shimguard_types::ModulePath;

pub fn build_allowlist(allow: &[String]) -> Option<GlobSet> {
    if allow.is_empty() {
        return None;
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in allow {
        let glob =
            Glob::new(pattern).expect("allowlist patterns must be validated in shimguard-settings");
        builder.add(glob);
    }
    Some(
        builder
            .build()
            .expect("allowlist patterns must be validated in shimguard-settings"),
    )
}

pub fn is_allowed(allow: Option<&GlobSet>, value: &str) -> bool {
    allow.map(|set| set.is_match(value)).unwrap_or(false)
}

/// Allowlist key for a name exposed by `module`.
pub fn forward_key(module: &ModulePath, exposed: &str) -> String {
    format!("{}::{}", module.as_str(), exposed)
}

pub fn target_display(target: &ReexportTarget) -> &str {
    match target {
        ReexportTarget::Internal(p) => p.as_str(),
        ReexportTarget::External(s) => s.as_str(),
    }
}
