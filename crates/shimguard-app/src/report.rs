use anyhow::Context;
use shimguard_render::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableVerdict,
};
use shimguard_types::{
    Finding, ReportEnvelope, SCHEMA_REPORT_V1, Severity, ShimguardData, ShimguardReport, ToolMeta,
    Verdict, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<ShimguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse shimguard v1 report")
}

/// Pretty JSON with a trailing newline.
pub fn serialize_report(report: &ShimguardReport) -> anyhow::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(report).context("serialize report")?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Report describing a failure of the tool itself, not of the scanned crate.
pub fn runtime_error_report(message: &str, started_at: OffsetDateTime) -> ShimguardReport {
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "shimguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict: Verdict::Fail,
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            help: Some("Check the crate root and config path, then re-run.".to_string()),
            url: None,
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: ShimguardData {
            findings_total: 1,
            findings_emitted: 1,
            ..ShimguardData::default()
        },
    }
}

pub fn to_renderable(report: &ShimguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdict::Pass,
            Verdict::Warn => RenderableVerdict::Warn,
            Verdict::Fail => RenderableVerdict::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            crate_name: report.data.crate_name.clone(),
            profile: report.data.profile.clone(),
            modules_scanned: report.data.modules_scanned,
            forwards_scanned: report.data.forwards_scanned,
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            truncated_reason: report.data.truncated_reason.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: f.check_id.clone(),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|l| RenderableLocation {
            path: l.path.as_str().to_string(),
            line: l.line,
            col: l.col,
        }),
        help: f.help.clone(),
    }
}
