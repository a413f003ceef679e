//! Configuración del harness.
//! Se arma a partir de la línea de comandos y se valida completa antes de
//! cualquier actividad de red o de base de datos.

use std::time::Duration;

use url::Url;

use parity_core::{find_scenario, MismatchPolicy, ModelName, ParityError, RunPlan, ScenarioSpec, TokenizerName,
                  BUILTIN_SCENARIOS};
use parity_persistence::{DbConfig, SessionMode};

use crate::cli::Cli;
use crate::errors::HarnessError;
use crate::report::ReportFormat;

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub db: DbConfig,
    pub hub_url: String,
    pub http_timeout: Option<Duration>,
    /// Un plan por escenario, en el orden pedido.
    pub plans: Vec<RunPlan>,
    pub format: ReportFormat,
}

impl HarnessConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, HarnessError> {
        if cli.db_url.trim().is_empty() {
            return Err(HarnessError::Config("--db-url must not be empty".into()));
        }
        let hub = Url::parse(&cli.hub_url).map_err(|e| HarnessError::Config(format!("invalid --hub-url {:?}: {e}", cli.hub_url)))?;
        if !matches!(hub.scheme(), "http" | "https") {
            return Err(HarnessError::Config(format!("--hub-url must be http(s), got {}", hub.scheme())));
        }

        let specs = select_scenarios(&cli.scenarios)?;
        if specs.len() != 1 && (cli.model_name.is_some() || cli.tokenizer_name.is_some()) {
            return Err(HarnessError::Usage("--model-name/--tokenizer-name require exactly one --scenario".into()));
        }

        let mut plans = Vec::with_capacity(specs.len());
        for spec in specs {
            let model = cli.model_name.clone().unwrap_or_else(|| spec.default_model_name());
            let tokenizer = cli.tokenizer_name.clone().unwrap_or_else(|| spec.default_tokenizer_name());
            let mut plan = RunPlan::new(spec.resolve(&cli.hub_url),
                                        ModelName::parse(&model).map_err(usage)?,
                                        TokenizerName::parse(&tokenizer).map_err(usage)?);
            plan.replace_existing = cli.replace;
            plan.cleanup = cli.cleanup;
            plan.determinism_rounds = cli.determinism_rounds;
            plan.mismatch_policy = if cli.advisory { MismatchPolicy::Advisory } else { MismatchPolicy::Fail };
            plans.push(plan);
        }

        let mode = if cli.persist { SessionMode::Persist } else { SessionMode::Rollback };
        Ok(Self { db: DbConfig::new(cli.db_url, mode),
                  hub_url: cli.hub_url,
                  http_timeout: cli.http_timeout_secs.map(Duration::from_secs),
                  plans,
                  format: cli.format })
    }
}

fn usage(e: ParityError) -> HarnessError {
    HarnessError::Usage(e.to_string())
}

/// Sin nombres se corren todos los escenarios; los repetidos se ignoran.
fn select_scenarios(names: &[String]) -> Result<Vec<&'static ScenarioSpec>, HarnessError> {
    if names.is_empty() {
        return Ok(BUILTIN_SCENARIOS.iter().collect());
    }
    let mut out: Vec<&'static ScenarioSpec> = Vec::new();
    for name in names {
        let spec = find_scenario(name).ok_or_else(|| {
                                          let known: Vec<_> = BUILTIN_SCENARIOS.iter().map(|s| s.name).collect();
                                          HarnessError::Usage(format!("unknown scenario {name:?} (known: {})", known.join(", ")))
                                      })?;
        if !out.iter().any(|s| s.name == spec.name) {
            out.push(spec);
        }
    }
    Ok(out)
}
