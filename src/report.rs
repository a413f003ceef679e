//! Reporte de resultados en stdout (texto o JSON).

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use parity_core::{ErrorClass, ParityOutcome, RunSummary};

use crate::app::ScenarioRun;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonRun<'a> {
    #[serde(flatten)]
    summary: &'a RunSummary,
    error: Option<String>,
    error_class: Option<ErrorClass>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    passed: bool,
    runs: Vec<JsonRun<'a>>,
}

pub fn write_report<W: Write>(out: &mut W, runs: &[ScenarioRun], format: ReportFormat) -> std::io::Result<()> {
    match format {
        ReportFormat::Text => write_text(out, runs),
        ReportFormat::Json => write_json(out, runs),
    }
}

fn write_json<W: Write>(out: &mut W, runs: &[ScenarioRun]) -> std::io::Result<()> {
    let report = JsonReport { passed: runs.iter().all(|r| r.summary.passed),
                              runs: runs.iter()
                                        .map(|r| JsonRun { summary: &r.summary,
                                                           error: r.error.as_ref().map(ToString::to_string),
                                                           error_class: r.error.as_ref().map(|e| e.class()) })
                                        .collect() };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

fn write_text<W: Write>(out: &mut W, runs: &[ScenarioRun]) -> std::io::Result<()> {
    for run in runs {
        let s = &run.summary;
        match (&run.error, &s.outcome) {
            (Some(e), _) => {
                let at = s.failed_at.map_or_else(|| "?".to_string(), |st| st.to_string());
                writeln!(out, "[FAIL] {} at {at}: {e}", s.scenario)?;
            }
            (None, Some(ParityOutcome::Mismatch(report))) => {
                writeln!(out, "[MISMATCH] {} (advisory)", s.scenario)?;
                writeln!(out, "{report}")?;
            }
            (None, _) => {
                writeln!(out, "[PASS] {} ({} ids)", s.scenario, s.expected.len())?;
            }
        }
        writeln!(out, "  model={} tokenizer={} run={}", s.model, s.tokenizer, s.run_id)?;
        if let Some(a) = &s.artifact {
            writeln!(out, "  artifact {} ({} bytes, sha256 {})", a.source_url, a.byte_len, a.sha256)?;
        }
    }
    // Un mismatch advisory no es error pero tampoco cuenta como aprobado.
    let failed = runs.iter().filter(|r| !r.summary.passed).count();
    writeln!(out, "{} passed, {failed} failed", runs.len() - failed)
}
