use crate::{RenderableFinding, RenderableReport, RenderableSeverity, RenderableVerdict};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();
    let data = &report.data;

    out.push_str("# Shimguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdict::Pass => "PASS",
        RenderableVerdict::Warn => "WARN",
        RenderableVerdict::Fail => "FAIL",
    };
    out.push_str(&format!(
        "Verdict: **{}** for `{}` (profile `{}`)\n\n",
        verdict, data.crate_name, data.profile
    ));
    out.push_str("| Modules scanned | Forwards scanned | Findings (emitted / total) |\n");
    out.push_str("| ---: | ---: | ---: |\n");
    out.push_str(&format!(
        "| {} | {} | {} / {} |\n\n",
        data.modules_scanned, data.forwards_scanned, data.findings_emitted, data.findings_total
    ));

    if let Some(r) = &data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No stale or unsafe forwards found.\n");
        return out;
    }

    for (severity, heading) in [
        (RenderableSeverity::Error, "Errors"),
        (RenderableSeverity::Warning, "Warnings"),
        (RenderableSeverity::Info, "Notes"),
    ] {
        let group: Vec<&RenderableFinding> = report
            .findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect();
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!("## {} ({})\n\n", heading, group.len()));
        for f in group {
            push_finding(&mut out, f);
        }
        out.push('\n');
    }

    out
}

fn push_finding(out: &mut String, f: &RenderableFinding) {
    out.push_str(&format!("- `{}` / `{}`: {}\n", f.check_id, f.code, f.message));
    if let Some(loc) = &f.location {
        match loc.line {
            Some(line) => out.push_str(&format!("  - at `{}:{}`\n", loc.path, line)),
            None => out.push_str(&format!("  - at `{}`\n", loc.path)),
        }
    }
    if let Some(help) = &f.help {
        out.push_str(&format!("  - help: {}\n", help));
    }
}
