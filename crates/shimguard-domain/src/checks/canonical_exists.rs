use crate::checks::utils::{build_allowlist, forward_key, is_allowed};
use crate::fingerprint::fingerprint_for_forward;
use crate::model::{CrateModel, ModuleModel, ReexportDecl, ReexportSymbol, ReexportTarget};
use crate::policy::{CheckPolicy, EffectiveConfig};
use serde_json::json;
use shimguard_types::{ids, Finding, ModulePath};

pub fn run(model: &CrateModel, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_FORWARDS_CANONICAL_EXISTS) else {
        return;
    };
    let allow = build_allowlist(&policy.allow);

    for (module, reexport) in model.forwards() {
        let ReexportTarget::Internal(target) = &reexport.target else {
            continue;
        };
        let exposed = reexport.symbol.exposed_name();
        if is_allowed(allow.as_ref(), &forward_key(&module.path, exposed)) {
            continue;
        }

        match model.module(target) {
            None => {
                if names_an_item(model, target) {
                    // Enum variants or associated items. Also forwards into inline
                    // `mod x { .. }` blocks, whose items are never scanned.
                    continue;
                }
                out.push(finding(
                    policy,
                    module,
                    reexport,
                    target,
                    ids::CODE_MISSING_MODULE,
                    format!(
                        "'{}' forwards '{}' from missing module '{}'",
                        module.path, exposed, target
                    ),
                ));
            }
            Some(target_module) => {
                let ReexportSymbol::Named { name, .. } = &reexport.symbol else {
                    continue;
                };
                if provides(model, target_module, name, reexport) {
                    continue;
                }
                out.push(finding(
                    policy,
                    module,
                    reexport,
                    target,
                    ids::CODE_MISSING_SYMBOL,
                    format!(
                        "'{}' forwards '{}' but '{}' does not provide it",
                        module.path, name, target
                    ),
                ));
            }
        }
    }
}

/// Whether `target` module makes `name` available to importers through
/// anything other than `reexport` itself.
fn provides(
    model: &CrateModel,
    target: &ModuleModel,
    name: &str,
    reexport: &ReexportDecl,
) -> bool {
    target.defines(name)
        || target.reexport_of(name, reexport).is_some()
        // A glob could be supplying it; do not guess.
        || target.has_exported_glob()
        || model.module(&target.path.join(name)).is_some()
}

fn names_an_item(model: &CrateModel, path: &ModulePath) -> bool {
    let Some(parent) = path.parent() else {
        return false;
    };
    let Some(parent_module) = model.module(&parent) else {
        return false;
    };
    let last = path.last();
    parent_module.items.iter().any(|i| i.name == last) || parent_module.reexports_name(last)
}

fn finding(
    policy: &CheckPolicy,
    module: &ModuleModel,
    reexport: &ReexportDecl,
    target: &ModulePath,
    code: &str,
    message: String,
) -> Finding {
    let exposed = reexport.symbol.exposed_name();
    let help = if code == ids::CODE_MISSING_MODULE {
        "Point the forward at the module that currently defines the symbol."
    } else {
        "Forward from the module that now owns the symbol, or remove the forward."
    };
    Finding {
        severity: policy.severity,
        check_id: ids::CHECK_FORWARDS_CANONICAL_EXISTS.to_string(),
        code: code.to_string(),
        message,
        location: reexport.location.clone(),
        help: Some(help.to_string()),
        url: None,
        fingerprint: Some(fingerprint_for_forward(
            ids::CHECK_FORWARDS_CANONICAL_EXISTS,
            code,
            module.file.as_str(),
            module.path.as_str(),
            exposed,
        )),
        data: json!({
            "module": module.path.as_str(),
            "symbol": exposed,
            "target": target.as_str(),
        }),
    }
}
