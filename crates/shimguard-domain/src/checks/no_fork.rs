use crate::checks::utils::{build_allowlist, forward_key, is_allowed};
use crate::fingerprint::fingerprint_for_forward;
use crate::model::{CrateModel, ItemKind};
use crate::policy::EffectiveConfig;
use serde_json::json;
use shimguard_types::{ids, Finding, ModulePath};
use std::collections::BTreeMap;

/// Kinds whose identity matters across paths. Type aliases are forwards, not forks.
fn is_nominal(kind: ItemKind) -> bool {
    matches!(
        kind,
        ItemKind::Struct | ItemKind::Enum | ItemKind::Union | ItemKind::Trait
    )
}

pub fn run(model: &CrateModel, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_FORWARDS_NO_FORK) else {
        return;
    };
    // Without configured prefixes every module is legacy; nothing is canonical.
    if cfg.legacy_prefixes.is_empty() {
        return;
    }
    let allow = build_allowlist(&policy.allow);

    let mut canonical: BTreeMap<&str, Vec<&ModulePath>> = BTreeMap::new();
    for module in model.modules.iter().filter(|m| !cfg.is_legacy(&m.path)) {
        for item in &module.items {
            if item.visibility.is_exported() && is_nominal(item.kind) {
                canonical.entry(item.name.as_str()).or_default().push(&module.path);
            }
        }
    }

    for module in model.modules.iter().filter(|m| cfg.is_legacy(&m.path)) {
        for item in &module.items {
            if !item.visibility.is_exported() || !is_nominal(item.kind) {
                continue;
            }
            let Some(origins) = canonical.get(item.name.as_str()) else {
                continue;
            };
            if is_allowed(allow.as_ref(), &forward_key(&module.path, &item.name)) {
                continue;
            }

            let origins: Vec<&str> = origins.iter().map(|p| p.as_str()).collect();
            out.push(Finding {
                severity: policy.severity,
                check_id: ids::CHECK_FORWARDS_NO_FORK.to_string(),
                code: ids::CODE_FORKED_DEFINITION.to_string(),
                message: format!(
                    "legacy module '{}' defines its own {} '{}' instead of re-exporting '{}::{}'",
                    module.path,
                    item.kind.as_str(),
                    item.name,
                    origins[0],
                    item.name
                ),
                location: item.location.clone(),
                help: Some(
                    "Delete the copy and `pub use` the canonical definition so both paths name the same type."
                        .to_string(),
                ),
                url: None,
                fingerprint: Some(fingerprint_for_forward(
                    ids::CHECK_FORWARDS_NO_FORK,
                    ids::CODE_FORKED_DEFINITION,
                    module.file.as_str(),
                    module.path.as_str(),
                    &item.name,
                )),
                data: json!({
                    "module": module.path.as_str(),
                    "symbol": item.name,
                    "kind": item.kind.as_str(),
                    "canonical": origins,
                }),
            });
        }
    }
}
