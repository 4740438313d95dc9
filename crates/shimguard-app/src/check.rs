//! The `check` use case: scan a crate, evaluate forward policy, produce a report.

use anyhow::Context;
use camino::Utf8Path;
use shimguard_domain::SeverityCounts;
use shimguard_settings::{Overrides, ResolvedConfig};
use shimguard_types::{ReportEnvelope, SCHEMA_REPORT_V1, ShimguardReport, ToolMeta, Verdict};
use time::OffsetDateTime;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Crate root (directory containing `Cargo.toml` and `src/`).
    pub crate_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: ShimguardReport,
    pub resolved_config: ResolvedConfig,
    pub counts: SeverityCounts,
}

/// Run the check use case: parse config, scan the crate, evaluate policy, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        shimguard_settings::ShimguardConfigV1::default()
    } else {
        shimguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = shimguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let model =
        shimguard_repo::build_crate_model(input.crate_root).context("build crate model")?;
    tracing::info!(
        crate_name = %model.crate_name,
        modules = model.modules.len(),
        profile = %resolved.effective.profile,
        "scanned crate"
    );

    let shimguard_domain::DomainReport {
        verdict,
        findings,
        data,
        counts,
    } = shimguard_domain::evaluate(&model, &resolved.effective);

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "shimguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        findings,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
        counts,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
