//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    match manifest_dir.parent() {
        Some(parent) if manifest_dir.ends_with("xtask") => parent.to_path_buf(),
        _ => manifest_dir,
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(shimguard_types::ShimguardReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(shimguard_settings::ShimguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "shimguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "shimguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  conform           Validate fixture configs and golden reports");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
}

/// Token pattern for finding codes.
fn is_valid_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Check that a path is clean: no absolute paths, no `../`, forward slashes only.
fn is_clean_path(path: &str) -> bool {
    !(path.starts_with('/')
        || path.starts_with('\\')
        || path.contains("..")
        || path.contains('\\')
        // Windows drive letters like C:
        || (path.len() >= 2 && path.as_bytes()[1] == b':'))
}

/// Problems in one golden report that the schema cannot express.
fn report_hygiene(name: &str, value: &serde_json::Value) -> Vec<String> {
    let mut errors = Vec::new();

    if shimguard_test_util::normalize_nondeterministic(value.clone()) != *value {
        errors.push(format!(
            "{name}: timestamps and tool.version must use the golden placeholders"
        ));
    }

    let findings = value
        .get("findings")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();
    for (i, finding) in findings.iter().enumerate() {
        if let Some(path) = finding
            .get("location")
            .and_then(|loc| loc.get("path"))
            .and_then(|v| v.as_str())
            && !is_clean_path(path)
        {
            errors.push(format!(
                "{name}: finding[{i}].location.path '{path}' is not clean (no absolute, no ../, forward slashes only)"
            ));
        }
        if let Some(code) = finding.get("code").and_then(|v| v.as_str())
            && !is_valid_token(code)
        {
            errors.push(format!("{name}: finding[{i}].code '{code}' is not a valid token"));
        }
    }
    errors
}

fn fixture_dirs() -> anyhow::Result<Vec<PathBuf>> {
    let dir = fixtures_dir();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(&dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.join("Cargo.toml").exists() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn fixture_name(dir: &Path) -> String {
    dir.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Validate fixture configs and golden reports.
///
/// This checks:
/// 1. Every fixture `shimguard.toml` parses and resolves
/// 2. Every `expected.report.json` validates against the generated report schema
/// 3. Golden path and code hygiene, and placeholder normalization
fn conform() -> anyhow::Result<()> {
    let schema_value = serde_json::to_value(generate_report_schema())
        .context("Failed to convert report schema to JSON")?;
    let compiled = jsonschema::draft202012::new(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))?;
    println!("✓ shimguard.report.v1 schema compiles");

    let mut golden_count = 0;
    let mut errors = Vec::new();

    for dir in fixture_dirs()? {
        let name = fixture_name(&dir);

        let config_path = dir.join("shimguard.toml");
        if config_path.exists() {
            let text = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let resolved = shimguard_settings::parse_config_toml(&text).and_then(|cfg| {
                shimguard_settings::resolve_config(cfg, shimguard_settings::Overrides::default())
            });
            if let Err(err) = resolved {
                errors.push(format!("{name}: shimguard.toml: {err:#}"));
            }
        }

        let golden_path = dir.join("expected.report.json");
        if !golden_path.exists() {
            println!("  ✓ {name} (no golden report)");
            continue;
        }
        let content = fs::read_to_string(&golden_path)
            .with_context(|| format!("Failed to read {}", golden_path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as JSON", golden_path.display()))?;

        for err in compiled.iter_errors(&value) {
            errors.push(format!("{name}: schema validation: {err}"));
        }
        errors.extend(report_hygiene(&name, &value));

        golden_count += 1;
        println!("  ✓ {name}/expected.report.json validates");
    }

    if golden_count == 0 {
        bail!("No golden reports found in {}", fixtures_dir().display());
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {golden_count} golden reports pass conformance checks!");
    Ok(())
}

/// Validate that all check IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    use shimguard_types::explain::{all_check_ids, all_codes, lookup_explanation};

    let check_ids = all_check_ids();
    let codes = all_codes();
    let mut errors = Vec::new();

    for (kind, id) in check_ids
        .iter()
        .map(|id| ("Check ID", id))
        .chain(codes.iter().map(|code| ("Code", code)))
    {
        let Some(exp) = lookup_explanation(id) else {
            errors.push(format!("{kind} '{id}' has no explanation"));
            continue;
        };
        for (field, text) in [
            ("title", exp.title),
            ("description", exp.description),
            ("remediation", exp.remediation),
            ("example (before)", exp.examples.before),
            ("example (after)", exp.examples.after),
        ] {
            if text.trim().is_empty() {
                errors.push(format!("{kind} '{id}' has empty {field}"));
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
