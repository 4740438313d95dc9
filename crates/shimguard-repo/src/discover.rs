use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use shimguard_types::{ModulePath, RepoPath};
use std::path::PathBuf;
use toml_edit::DocumentMut;
use walkdir::WalkDir;

/// Discover the Rust source files of the crate rooted at `crate_root`.
///
/// Returns crate-relative paths (`src/...`) in lexicographic order. Files under
/// `src/bin/` are separate crates and are skipped.
pub fn discover_sources(crate_root: &Utf8Path) -> anyhow::Result<Vec<RepoPath>> {
    let src = crate_root.join("src");
    if !src.is_dir() {
        bail!("source directory not found: {src}");
    }

    let mut out: Vec<RepoPath> = WalkDir::new(&src)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
        .filter(|p| p.extension() == Some("rs"))
        .map(|abs| {
            let rel = abs
                .strip_prefix(crate_root)
                .unwrap_or(&abs)
                .as_str()
                .replace('\\', "/");
            RepoPath::new(rel)
        })
        .filter(|p| module_path_for(p).is_some())
        .collect();

    out.sort();
    out.dedup();
    Ok(out)
}

/// Map a crate-relative source file to the module it defines.
///
/// `src/lib.rs` and `src/main.rs` are the crate root, `src/a/mod.rs` is
/// `crate::a`, `src/a/b.rs` is `crate::a::b`. Returns `None` for files that
/// cannot be modules of this crate (`src/bin/**`, non-identifier names).
pub fn module_path_for(file: &RepoPath) -> Option<ModulePath> {
    let segments: Vec<&str> = file.segments().collect();
    let (first, rest) = segments.split_first()?;
    if *first != "src" || rest.is_empty() {
        return None;
    }
    if rest.len() > 1 && rest[0] == "bin" {
        return None;
    }

    let (last, dirs) = rest.split_last()?;
    let stem = last.strip_suffix(".rs")?;

    let mut module: Vec<&str> = dirs.to_vec();
    match stem {
        "lib" | "main" if dirs.is_empty() => {}
        "mod" if !dirs.is_empty() => {}
        _ => module.push(stem),
    }

    if !module.iter().all(|s| is_identifier(s)) {
        return None;
    }

    Some(ModulePath::from_segments(module).anchored())
}

/// Crate name as Rust code spells it (`database-service` → `database_service`).
///
/// Read from `[package].name`; falls back to the directory name when the
/// manifest is missing or has no package table.
pub fn read_crate_name(crate_root: &Utf8Path) -> anyhow::Result<String> {
    let manifest = crate_root.join("Cargo.toml");
    let from_manifest = if manifest.is_file() {
        let text =
            std::fs::read_to_string(&manifest).with_context(|| format!("read {manifest}"))?;
        let doc = text
            .parse::<DocumentMut>()
            .with_context(|| format!("parse {manifest}"))?;
        doc.get("package")
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
            .map(|s| s.to_string())
    } else {
        None
    };

    let name = from_manifest
        .or_else(|| crate_root.file_name().map(|s| s.to_string()))
        .unwrap_or_else(|| "crate".to_string());
    Ok(name.replace('-', "_"))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
