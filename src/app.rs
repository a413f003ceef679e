//! Orquestación: un `ParityRun` por escenario configurado.
//!
//! Cada escenario abre su propia sesión contra el motor (después de descargar
//! el artifact) y la suelta al terminar. Un escenario fallido no impide correr
//! los siguientes; el código de salida lo decide el primer fallo.

use std::io::Write;

use tracing::{error, info};

use parity_adapters::HttpArtifactFetcher;
use parity_core::{ArtifactSource, ParityError, ParityRun, RunPlan, RunSummary, TokenizerEngine};
use parity_persistence::PgTokenizerEngine;

use crate::config::HarnessConfig;
use crate::errors::HarnessError;
use crate::report::write_report;

/// Resultado de un escenario: el resumen siempre, el error si lo hubo.
#[derive(Debug)]
pub struct ScenarioRun {
    pub summary: RunSummary,
    pub error: Option<ParityError>,
}

/// Corre los planes en orden contra `source` y las sesiones que abre `connect`.
pub fn run_plans<S, E, C>(plans: &[RunPlan], source: &S, mut connect: C) -> Vec<ScenarioRun>
    where S: ArtifactSource + ?Sized,
          E: TokenizerEngine,
          C: FnMut() -> Result<E, ParityError>
{
    plans.iter()
         .map(|plan| {
             let mut run = ParityRun::new(plan.clone());
             info!(run = %run.id(), scenario = %plan.scenario.name, "starting parity run");
             let error = run.run_to_end(source, &mut connect).err();
             match &error {
                 None => info!(run = %run.id(), stage = %run.stage(), "parity run finished"),
                 Some(e) => error!(run = %run.id(), scenario = %plan.scenario.name, "parity run failed: {e}"),
             }
             ScenarioRun { summary: run.summary(),
                           error }
         })
         .collect()
}

/// Primer fallo, convertido en el error del proceso.
pub fn first_failure(runs: Vec<ScenarioRun>) -> Result<(), HarnessError> {
    match runs.into_iter().find_map(|r| r.error.map(|e| (r.summary.scenario, e))) {
        Some((scenario, source)) => Err(HarnessError::Run { scenario, source }),
        None => Ok(()),
    }
}

/// Punto de entrada del binario una vez validada la configuración.
pub fn execute<W: Write>(cfg: &HarnessConfig, out: &mut W) -> Result<(), HarnessError> {
    info!(db = %cfg.db.redacted_url(),
          hub = %cfg.hub_url,
          scenarios = cfg.plans.len(),
          mode = ?cfg.db.mode,
          "pgtok-parity starting");
    let fetcher = HttpArtifactFetcher::new(cfg.http_timeout)
        .map_err(|e| HarnessError::Config(format!("http client: {e}")))?;
    let runs = run_plans(&cfg.plans, &fetcher, || {
        PgTokenizerEngine::connect(&cfg.db).map_err(|e| ParityError::Connection(e.into()))
    });
    write_report(out, &runs, cfg.format)?;
    out.flush()?;
    first_failure(runs)
}
