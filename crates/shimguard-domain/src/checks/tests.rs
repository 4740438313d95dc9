use super::{canonical_exists, explicit, no_chain, no_fork};
use crate::model::{ItemKind, ReexportTarget, Visibility};
use crate::test_support::{
    aliased_forward, config_with_check, config_with_check_allow, glob_forward, item, model,
    module, named_forward,
};
use shimguard_types::{ids, Severity};

fn canonical_modules() -> Vec<crate::model::ModuleModel> {
    vec![
        module(
            "crate::domain::models::email_record",
            vec![item(ItemKind::Struct, "EmailRecord")],
            vec![],
        ),
        module(
            "crate::domain::models::report",
            vec![item(ItemKind::Struct, "Report")],
            vec![],
        ),
    ]
}

#[test]
fn explicit_flags_globs_only_under_legacy_prefixes() {
    let mut modules = canonical_modules();
    modules.push(module(
        "crate::business::models",
        vec![],
        vec![glob_forward("crate::domain::models::report", 4)],
    ));
    modules.push(module(
        "crate::domain::models",
        vec![],
        vec![glob_forward("crate::domain::models::report", 2)],
    ));
    let model = model(modules);

    let cfg = config_with_check(ids::CHECK_FORWARDS_EXPLICIT, Severity::Error);
    let mut out = Vec::new();
    explicit::run(&model, &cfg, &mut out);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_GLOB_REEXPORT);
    assert_eq!(out[0].data["module"], "crate::business::models");
    assert_eq!(out[0].data["target"], "crate::domain::models::report");
}

#[test]
fn explicit_ignores_private_globs_and_respects_allowlist() {
    let mut private_glob = glob_forward("crate::domain::models::report", 1);
    private_glob.visibility = Visibility::Private;
    let model = model(vec![
        module("crate::business::a", vec![], vec![private_glob]),
        module(
            "crate::business::b",
            vec![],
            vec![glob_forward("crate::domain::models::report", 1)],
        ),
    ]);

    let cfg = config_with_check_allow(
        ids::CHECK_FORWARDS_EXPLICIT,
        Severity::Error,
        vec!["crate::business::b::*"],
    );
    let mut out = Vec::new();
    explicit::run(&model, &cfg, &mut out);
    assert!(out.is_empty());
}

#[test]
fn explicit_flags_external_globs_too() {
    let mut reexport = glob_forward("ignored", 1);
    reexport.target = ReexportTarget::External("worldline_types".to_string());
    let model = model(vec![module("crate::business", vec![], vec![reexport])]);

    let cfg = config_with_check(ids::CHECK_FORWARDS_EXPLICIT, Severity::Warning);
    let mut out = Vec::new();
    explicit::run(&model, &cfg, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].data["target"], "worldline_types");
}

#[test]
fn canonical_exists_accepts_valid_forwards() {
    let mut modules = canonical_modules();
    modules.push(module(
        "crate::business::models::email_record",
        vec![],
        vec![named_forward(
            "crate::domain::models::email_record",
            "EmailRecord",
            1,
        )],
    ));
    modules.push(module(
        "crate::business::models::report",
        vec![],
        vec![aliased_forward("crate::domain::models::report", "Report", "LegacyReport")],
    ));
    let model = model(modules);

    let cfg = config_with_check(ids::CHECK_FORWARDS_CANONICAL_EXISTS, Severity::Error);
    let mut out = Vec::new();
    canonical_exists::run(&model, &cfg, &mut out);
    assert!(out.is_empty(), "unexpected findings: {out:?}");
}

#[test]
fn canonical_exists_reports_missing_module_and_symbol() {
    let mut modules = canonical_modules();
    modules.push(module(
        "crate::business::models::email_record",
        vec![],
        vec![
            named_forward("crate::domain::email_record", "EmailRecord", 1),
            named_forward("crate::domain::models::email_record", "Mailbox", 2),
        ],
    ));
    let model = model(modules);

    let cfg = config_with_check(ids::CHECK_FORWARDS_CANONICAL_EXISTS, Severity::Error);
    let mut out = Vec::new();
    canonical_exists::run(&model, &cfg, &mut out);

    let codes: Vec<&str> = out.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(codes, vec![ids::CODE_MISSING_MODULE, ids::CODE_MISSING_SYMBOL]);
    assert_eq!(out[0].data["target"], "crate::domain::email_record");
    assert_eq!(out[1].data["symbol"], "Mailbox");
    assert!(out.iter().all(|f| f.fingerprint.is_some()));
}

#[test]
fn canonical_exists_skips_item_paths_globs_and_child_modules() {
    let model = model(vec![
        module(
            "crate::domain",
            vec![item(ItemKind::Enum, "Status"), item(ItemKind::Mod, "inline")],
            vec![],
        ),
        module("crate::domain::models", vec![], vec![glob_forward("crate::domain", 1)]),
        module("crate::domain::models::report", vec![], vec![]),
        module(
            "crate::business",
            vec![],
            vec![
                // enum variant
                named_forward("crate::domain::Status", "Active", 1),
                // inline module the scanner does not model
                named_forward("crate::domain::inline", "Thing", 2),
                // provided through a glob
                named_forward("crate::domain::models", "Anything", 3),
                // child module
                named_forward("crate::domain::models", "report", 4),
            ],
        ),
    ]);

    let cfg = config_with_check(ids::CHECK_FORWARDS_CANONICAL_EXISTS, Severity::Error);
    let mut out = Vec::new();
    canonical_exists::run(&model, &cfg, &mut out);
    assert!(out.is_empty(), "unexpected findings: {out:?}");
}

#[test]
fn canonical_exists_ignores_external_and_private_uses() {
    let mut external = named_forward("ignored", "Value", 1);
    external.target = ReexportTarget::External("serde_json".to_string());
    let mut private = named_forward("crate::gone", "Thing", 2);
    private.visibility = Visibility::Private;
    let model = model(vec![module("crate::business", vec![], vec![external, private])]);

    let cfg = config_with_check(ids::CHECK_FORWARDS_CANONICAL_EXISTS, Severity::Error);
    let mut out = Vec::new();
    canonical_exists::run(&model, &cfg, &mut out);
    assert!(out.is_empty());
}

#[test]
fn no_fork_flags_legacy_copies_of_canonical_types() {
    let mut modules = canonical_modules();
    modules.push(module(
        "crate::business::models::report",
        vec![
            item(ItemKind::Struct, "Report"),
            item(ItemKind::TypeAlias, "EmailRecord"),
            item(ItemKind::Fn, "Report"),
        ],
        vec![],
    ));
    let model = model(modules);

    let cfg = config_with_check(ids::CHECK_FORWARDS_NO_FORK, Severity::Error);
    let mut out = Vec::new();
    no_fork::run(&model, &cfg, &mut out);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_FORKED_DEFINITION);
    assert_eq!(out[0].data["symbol"], "Report");
    assert_eq!(out[0].data["kind"], "struct");
    assert_eq!(out[0].data["canonical"][0], "crate::domain::models::report");
}

#[test]
fn no_fork_needs_legacy_prefixes() {
    let mut modules = canonical_modules();
    modules.push(module(
        "crate::business::models::report",
        vec![item(ItemKind::Struct, "Report")],
        vec![],
    ));
    let model = model(modules);

    let mut cfg = config_with_check(ids::CHECK_FORWARDS_NO_FORK, Severity::Error);
    cfg.legacy_prefixes.clear();
    let mut out = Vec::new();
    no_fork::run(&model, &cfg, &mut out);
    assert!(out.is_empty());
}

#[test]
fn no_chain_flags_forward_of_forward() {
    let mut modules = canonical_modules();
    modules.push(module(
        "crate::business::models::report",
        vec![],
        vec![named_forward("crate::domain::models::report", "Report", 1)],
    ));
    modules.push(module(
        "crate::reports",
        vec![],
        vec![named_forward("crate::business::models::report", "Report", 7)],
    ));
    let model = model(modules);

    let cfg = config_with_check(ids::CHECK_FORWARDS_NO_CHAIN, Severity::Warning);
    let mut out = Vec::new();
    no_chain::run(&model, &cfg, &mut out);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].severity, Severity::Warning);
    assert_eq!(out[0].data["module"], "crate::reports");
    assert_eq!(out[0].data["via"], "crate::business::models::report");
    assert_eq!(out[0].data["next"], "crate::domain::models::report");
}

#[test]
fn a_forward_is_never_its_own_next_hop() {
    let mut modules = canonical_modules();
    modules.push(module(
        "crate",
        vec![],
        vec![
            named_forward("crate", "Gone", 1),
            named_forward("crate::domain::models::report", "Report", 2),
            aliased_forward("crate", "Report", "Summary"),
        ],
    ));
    let model = model(modules);

    let mut chains = Vec::new();
    no_chain::run(
        &model,
        &config_with_check(ids::CHECK_FORWARDS_NO_CHAIN, Severity::Warning),
        &mut chains,
    );
    // Only `Summary` goes through another declaration.
    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0].data["symbol"], "Report");
    assert_eq!(chains[0].data["next"], "crate::domain::models::report");

    let mut missing = Vec::new();
    canonical_exists::run(
        &model,
        &config_with_check(ids::CHECK_FORWARDS_CANONICAL_EXISTS, Severity::Error),
        &mut missing,
    );
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].code, ids::CODE_MISSING_SYMBOL);
    assert_eq!(missing[0].data["symbol"], "Gone");
}

#[test]
fn disabled_checks_emit_nothing() {
    let model = model(vec![module(
        "crate::business",
        vec![],
        vec![glob_forward("crate::gone", 1)],
    )]);
    let cfg = config_with_check("forwards.unrelated", Severity::Error);

    let mut out = Vec::new();
    super::run_all(&model, &cfg, &mut out);
    assert!(out.is_empty());
}
