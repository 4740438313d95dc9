use shimguard_types::{ModulePath, Severity};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

#[derive(Clone, Debug)]
pub struct CheckPolicy {
    pub enabled: bool,
    pub severity: Severity,
    /// Globs over `<module>::<symbol>`; matches are skipped.
    pub allow: Vec<String>,
}

impl CheckPolicy {
    pub fn enabled(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
            allow: Vec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: Severity::Info,
            allow: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    pub max_findings: usize,
    /// Module subtrees that hold legacy shims. Empty means every module.
    pub legacy_prefixes: Vec<ModulePath>,
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl EffectiveConfig {
    pub fn check_policy(&self, check_id: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_id).filter(|p| p.enabled)
    }

    pub fn is_legacy(&self, module: &ModulePath) -> bool {
        self.legacy_prefixes.is_empty()
            || self.legacy_prefixes.iter().any(|p| module.starts_with(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(prefixes: &[&str]) -> EffectiveConfig {
        EffectiveConfig {
            profile: "test".to_string(),
            fail_on: FailOn::Error,
            max_findings: 10,
            legacy_prefixes: prefixes.iter().map(|p| ModulePath::new(p)).collect(),
            checks: BTreeMap::new(),
        }
    }

    #[test]
    fn empty_prefixes_treat_every_module_as_legacy() {
        let cfg = config(&[]);
        assert!(cfg.is_legacy(&ModulePath::new("crate::domain")));
    }

    #[test]
    fn prefixes_match_whole_segments() {
        let cfg = config(&["crate::business"]);
        assert!(cfg.is_legacy(&ModulePath::new("crate::business::models")));
        assert!(!cfg.is_legacy(&ModulePath::new("crate::business_rules")));
        assert!(!cfg.is_legacy(&ModulePath::new("crate::domain::models")));
    }

    #[test]
    fn disabled_checks_have_no_policy() {
        let mut cfg = config(&[]);
        cfg.checks
            .insert("forwards.explicit".to_string(), CheckPolicy::disabled());
        assert!(cfg.check_policy("forwards.explicit").is_none());
    }
}
