use crate::checks::utils::{build_allowlist, forward_key, is_allowed, target_display};
use crate::fingerprint::fingerprint_for_forward;
use crate::model::{CrateModel, ReexportSymbol, ReexportTarget};
use crate::policy::EffectiveConfig;
use serde_json::json;
use shimguard_types::{ids, Finding};

pub fn run(model: &CrateModel, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_FORWARDS_NO_CHAIN) else {
        return;
    };
    let allow = build_allowlist(&policy.allow);

    for (module, reexport) in model.forwards() {
        let ReexportTarget::Internal(target) = &reexport.target else {
            continue;
        };
        let ReexportSymbol::Named { name, .. } = &reexport.symbol else {
            continue;
        };
        let Some(target_module) = model.module(target) else {
            continue;
        };
        if target_module.defines(name) {
            continue;
        }
        // The declaration under check does not count as its own next hop.
        let Some(next) = target_module.reexport_of(name, reexport) else {
            continue;
        };
        let exposed = reexport.symbol.exposed_name();
        if is_allowed(allow.as_ref(), &forward_key(&module.path, exposed)) {
            continue;
        }

        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_FORWARDS_NO_CHAIN.to_string(),
            code: ids::CODE_CHAINED_FORWARD.to_string(),
            message: format!(
                "'{}' forwards '{}' through '{}', which is itself a forward",
                module.path, name, target
            ),
            location: reexport.location.clone(),
            help: Some("Re-export from the defining module directly.".to_string()),
            url: None,
            fingerprint: Some(fingerprint_for_forward(
                ids::CHECK_FORWARDS_NO_CHAIN,
                ids::CODE_CHAINED_FORWARD,
                module.file.as_str(),
                module.path.as_str(),
                exposed,
            )),
            data: json!({
                "module": module.path.as_str(),
                "symbol": name,
                "via": target.as_str(),
                "next": target_display(&next.target),
            }),
        });
    }
}
