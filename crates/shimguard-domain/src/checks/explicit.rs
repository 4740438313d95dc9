use crate::checks::utils::{build_allowlist, forward_key, is_allowed, target_display};
use crate::fingerprint::fingerprint_for_forward;
use crate::model::{CrateModel, ReexportSymbol};
use crate::policy::EffectiveConfig;
use serde_json::json;
use shimguard_types::{ids, Finding};

pub fn run(model: &CrateModel, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_FORWARDS_EXPLICIT) else {
        return;
    };
    let allow = build_allowlist(&policy.allow);

    for module in model.modules.iter().filter(|m| cfg.is_legacy(&m.path)) {
        for reexport in &module.reexports {
            if !reexport.visibility.is_exported() || reexport.symbol != ReexportSymbol::Glob {
                continue;
            }
            let key = forward_key(&module.path, "*");
            if is_allowed(allow.as_ref(), &key) {
                continue;
            }

            let target = target_display(&reexport.target);
            out.push(Finding {
                severity: policy.severity,
                check_id: ids::CHECK_FORWARDS_EXPLICIT.to_string(),
                code: ids::CODE_GLOB_REEXPORT.to_string(),
                message: format!(
                    "legacy module '{}' re-exports everything from '{}'",
                    module.path, target
                ),
                location: reexport.location.clone(),
                help: Some(
                    "Enumerate each forwarded symbol instead of using a glob re-export."
                        .to_string(),
                ),
                url: None,
                fingerprint: Some(fingerprint_for_forward(
                    ids::CHECK_FORWARDS_EXPLICIT,
                    ids::CODE_GLOB_REEXPORT,
                    module.file.as_str(),
                    module.path.as_str(),
                    "*",
                )),
                data: json!({
                    "module": module.path.as_str(),
                    "target": target,
                }),
            });
        }
    }
}
