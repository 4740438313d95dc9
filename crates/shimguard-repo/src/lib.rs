//! Repository adapters: discover a crate's sources and scan them into a module model.
//!
//! This crate is allowed to do filesystem IO. It never compiles or expands
//! macros; the model is built from a lexical scan of each file's top level.

#![forbid(unsafe_code)]

mod discover;
mod parse;

use anyhow::Context;
use camino::Utf8Path;
use shimguard_domain::model::{
    CrateModel, ItemDecl, ItemKind, ModuleModel, ReexportDecl, ReexportSymbol, ReexportTarget,
};
use shimguard_types::{Location, ModulePath, RepoPath};
use std::collections::BTreeSet;

pub use discover::{discover_sources, module_path_for, read_crate_name};

/// Fuzz-friendly API for testing scanning robustness without filesystem access.
pub mod fuzz {
    /// Scan arbitrary text as a Rust source file and return the number of
    /// declarations found. **Never panics** on any input.
    pub fn scan_source(text: &str) -> usize {
        let scanned = super::parse::scan_file(text);
        scanned.items.len() + scanned.uses.len()
    }
}

/// Build the in-memory crate model used by the forward checks.
///
/// `crate_root` is the directory containing the crate's `Cargo.toml` and `src/`.
pub fn build_crate_model(crate_root: &Utf8Path) -> anyhow::Result<CrateModel> {
    let files = discover_sources(crate_root).context("discover sources")?;
    let crate_name = read_crate_name(crate_root).context("read crate name")?;

    let mut scanned = Vec::with_capacity(files.len());
    let mut seen: BTreeSet<ModulePath> = BTreeSet::new();
    for file in files {
        let Some(module) = module_path_for(&file) else {
            continue;
        };
        if !seen.insert(module.clone()) {
            tracing::warn!(file = %file.as_str(), module = %module, "duplicate module file ignored");
            continue;
        }
        let abs = crate_root.join(file.as_str());
        let text = std::fs::read_to_string(&abs).with_context(|| format!("read {abs}"))?;
        let result = parse::scan_file(&text);
        tracing::debug!(
            file = %file.as_str(),
            items = result.items.len(),
            uses = result.uses.len(),
            "scanned source"
        );
        scanned.push((module, file, result));
    }

    let modules = scanned
        .into_iter()
        .map(|(path, file, result)| assemble_module(&seen, path, file, result))
        .collect();

    let mut model = CrateModel {
        root: RepoPath::from(crate_root),
        crate_name,
        modules,
    };
    model.modules.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(model)
}

fn assemble_module(
    known: &BTreeSet<ModulePath>,
    path: ModulePath,
    file: RepoPath,
    scanned: parse::ScannedFile,
) -> ModuleModel {
    let location = |line: u32| {
        Some(Location {
            path: file.clone(),
            line: Some(line),
            col: None,
        })
    };

    let items: Vec<ItemDecl> = scanned
        .items
        .into_iter()
        .map(|i| ItemDecl {
            kind: i.kind,
            name: i.name,
            visibility: i.visibility,
            location: location(i.line),
        })
        .collect();

    let inline_mods: BTreeSet<&str> = items
        .iter()
        .filter(|i| i.kind == ItemKind::Mod)
        .map(|i| i.name.as_str())
        .collect();

    let reexports = scanned
        .uses
        .into_iter()
        .map(|u| {
            let target = resolve_target(known, &inline_mods, &path, u.global, &u.module, &u.symbol);
            ReexportDecl {
                target,
                symbol: u.symbol,
                visibility: u.visibility,
                location: location(u.line),
            }
        })
        .collect();

    ModuleModel {
        path,
        file,
        items,
        reexports,
    }
}

/// Resolve the module part of a `use` path as seen from `current`.
///
/// `crate`, `self` and `super` anchor inside the crate. A bare first segment
/// is internal when it names a child module of `current`, and external
/// otherwise. A leading `::` is always external. With no module segments
/// (`pub use serde;`) the symbol itself is the first segment.
fn resolve_target(
    known: &BTreeSet<ModulePath>,
    child_mods: &BTreeSet<&str>,
    current: &ModulePath,
    global: bool,
    segments: &[String],
    symbol: &ReexportSymbol,
) -> ReexportTarget {
    let is_child = |name: &str| known.contains(&current.join(name)) || child_mods.contains(name);
    let external = || match symbol {
        ReexportSymbol::Named { name, .. } if segments.is_empty() => {
            ReexportTarget::External(name.clone())
        }
        _ => ReexportTarget::External(segments.join("::")),
    };
    if global {
        return external();
    }
    let Some(first) = segments.first() else {
        return match symbol {
            ReexportSymbol::Named { name, .. } if is_child(name) => {
                ReexportTarget::Internal(current.clone())
            }
            _ => external(),
        };
    };

    let mut base = match first.as_str() {
        "crate" => ModulePath::crate_root(),
        "self" => current.clone(),
        "super" => current.parent().unwrap_or_else(ModulePath::crate_root),
        name if is_child(name) => current.join(name),
        _ => return external(),
    };

    for segment in &segments[1..] {
        base = match segment.as_str() {
            "super" => base.parent().unwrap_or_else(ModulePath::crate_root),
            "self" => base,
            other => base.join(other),
        };
    }
    ReexportTarget::Internal(base)
}
