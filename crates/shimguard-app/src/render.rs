//! Render use cases and the small file-writing helpers the CLI shares.

use anyhow::Context;
use camino::Utf8Path;
use shimguard_render::RenderableReport;
use shimguard_types::ShimguardReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    shimguard_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    shimguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

/// Write a report as pretty JSON, creating parent directories.
pub fn write_report(path: &Utf8Path, report: &ShimguardReport) -> anyhow::Result<()> {
    let bytes = crate::report::serialize_report(report)?;
    write_bytes(path, &bytes)
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes())
}

fn write_bytes(path: &Utf8Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write {path}"))?;
    tracing::debug!(path = %path, bytes = bytes.len(), "wrote artifact");
    Ok(())
}
