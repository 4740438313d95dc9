use shimguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use shimguard_types::{ids, ModulePath, Severity};
use std::collections::BTreeMap;

pub const DEFAULT_PROFILE: &str = "strict";
pub const DEFAULT_LEGACY_PREFIX: &str = "crate::business";

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into crate config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "warn" => warn_profile(),
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    let mut checks = default_checks(Severity::Error);
    // Chained forwards only warn, even under strict.
    if let Some(p) = checks.get_mut(ids::CHECK_FORWARDS_NO_CHAIN) {
        p.severity = Severity::Warning;
    }
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        legacy_prefixes: vec![ModulePath::new(DEFAULT_LEGACY_PREFIX)],
        checks,
    }
}

fn warn_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "warn".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        legacy_prefixes: vec![ModulePath::new(DEFAULT_LEGACY_PREFIX)],
        checks: default_checks(Severity::Warning),
    }
}

fn default_checks(default_severity: Severity) -> BTreeMap<String, CheckPolicy> {
    [
        ids::CHECK_FORWARDS_EXPLICIT,
        ids::CHECK_FORWARDS_CANONICAL_EXISTS,
        ids::CHECK_FORWARDS_NO_FORK,
        ids::CHECK_FORWARDS_NO_CHAIN,
    ]
    .into_iter()
    .map(|id| (id.to_string(), CheckPolicy::enabled(default_severity)))
    .collect()
}
