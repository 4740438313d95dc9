//! CLI entry point for shimguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `shimguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use shimguard_app::{
    CheckInput, ExplainOutput, parse_report_json, render_annotations, render_markdown, run_check,
    run_explain, runtime_error_report, to_renderable, verdict_exit_code, write_report, write_text,
};
use shimguard_settings::Overrides;
use time::OffsetDateTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(
    name = "shimguard",
    version,
    about = "Guard legacy re-export shims against stale and forked forwards"
)]
struct Cli {
    /// Crate root (directory containing Cargo.toml and src/).
    #[arg(long, default_value = ".")]
    crate_root: Utf8PathBuf,

    /// Path to shimguard config TOML, relative to the crate root.
    #[arg(long, default_value = "shimguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|warn).
    #[arg(long)]
    profile: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long)]
    max_findings: Option<u32>,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan the crate's forwards and write artifacts.
    Check {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/shimguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/shimguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/shimguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/shimguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g. "forwards.explicit") or code (e.g. "glob_reexport").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Check {
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => cmd_check(&cli, report_out, write_markdown.then_some(markdown_out.as_path())),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn cmd_check(
    cli: &Cli,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let started_at = OffsetDateTime::now_utc();
    let crate_root = cli
        .crate_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.crate_root.clone());

    let result = (|| -> anyhow::Result<i32> {
        if !crate_root.is_dir() {
            anyhow::bail!("crate root does not exist: {}", crate_root);
        }
        // Missing config file is allowed (defaults apply).
        let cfg_path = crate_root.join(&cli.config);
        let cfg_text = match std::fs::read_to_string(&cfg_path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %cfg_path, "no config file; using defaults");
                String::new()
            }
            Err(err) => return Err(err).with_context(|| format!("read config {cfg_path}")),
        };

        let output = run_check(CheckInput {
            crate_root: &crate_root,
            config_text: &cfg_text,
            overrides: Overrides {
                profile: cli.profile.clone(),
                max_findings: cli.max_findings,
            },
        })?;

        write_report(report_out, &output.report).context("write report json")?;
        if let Some(markdown_out) = markdown_out {
            let md = render_markdown(&to_renderable(&output.report));
            write_text(markdown_out, &md).context("write markdown")?;
        }

        tracing::info!(
            verdict = ?output.report.verdict,
            errors = output.counts.error,
            warnings = output.counts.warning,
            "check finished"
        );
        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"), started_at);
            if let Err(write_err) = write_report(report_out, &report) {
                tracing::warn!(error = %format!("{write_err:#}"), "could not write runtime error report");
            }
            eprintln!("shimguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;

    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", shimguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                shimguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
