use crate::model::{
    CrateModel, ItemDecl, ItemKind, ModuleModel, ReexportDecl, ReexportSymbol, ReexportTarget,
    Visibility,
};
use crate::policy::{CheckPolicy, EffectiveConfig, FailOn};
use shimguard_types::{Location, ModulePath, RepoPath, Severity};
use std::collections::BTreeMap;

fn location(line: u32) -> Option<Location> {
    Some(Location {
        path: RepoPath::new("src/lib.rs"),
        line: Some(line),
        col: None,
    })
}

pub fn item(kind: ItemKind, name: &str) -> ItemDecl {
    ItemDecl {
        kind,
        name: name.to_string(),
        visibility: Visibility::Public,
        location: location(1),
    }
}

pub fn named_forward(target: &str, name: &str, line: u32) -> ReexportDecl {
    ReexportDecl {
        target: ReexportTarget::Internal(ModulePath::new(target)),
        symbol: ReexportSymbol::Named {
            name: name.to_string(),
            alias: None,
        },
        visibility: Visibility::Public,
        location: location(line),
    }
}

pub fn aliased_forward(target: &str, name: &str, alias: &str) -> ReexportDecl {
    ReexportDecl {
        symbol: ReexportSymbol::Named {
            name: name.to_string(),
            alias: Some(alias.to_string()),
        },
        ..named_forward(target, name, 1)
    }
}

pub fn glob_forward(target: &str, line: u32) -> ReexportDecl {
    ReexportDecl {
        symbol: ReexportSymbol::Glob,
        ..named_forward(target, "*", line)
    }
}

pub fn module(path: &str, items: Vec<ItemDecl>, reexports: Vec<ReexportDecl>) -> ModuleModel {
    let path = ModulePath::new(path);
    let file = if path.is_crate_root() {
        RepoPath::new("src/lib.rs")
    } else {
        RepoPath::new(format!("src/{}.rs", path.crate_relative().replace("::", "/")))
    };
    ModuleModel {
        path,
        file,
        items,
        reexports,
    }
}

pub fn model(modules: Vec<ModuleModel>) -> CrateModel {
    CrateModel {
        root: RepoPath::new("."),
        crate_name: "fixture".to_string(),
        modules,
    }
}

pub fn config_with_check(check_id: &str, severity: Severity) -> EffectiveConfig {
    config_with_check_allow(check_id, severity, Vec::new())
}

pub fn config_with_check_allow(
    check_id: &str,
    severity: Severity,
    allow: Vec<&str>,
) -> EffectiveConfig {
    let mut policy = CheckPolicy::enabled(severity);
    policy.allow = allow.into_iter().map(|s| s.to_string()).collect();

    let mut checks = BTreeMap::new();
    checks.insert(check_id.to_string(), policy);

    EffectiveConfig {
        profile: "test".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        legacy_prefixes: vec![ModulePath::new("crate::business")],
        checks,
    }
}
