//! Implementación de `ParityRun`.

use log::{info, warn};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use super::{RunEventKind, RunLog, RunPlan, RunStage};
use crate::check::{compare, MismatchPolicy, ParityOutcome};
use crate::engine::{RegistrationRow, TokenizerEngine};
use crate::errors::{EngineCallError, ParityError};
use crate::model::{ArtifactProvenance, ExpectedSequence, TokenSequence, TokenizerArtifact};
use crate::source::ArtifactSource;
use crate::stages::register::release_names_best_effort;
use crate::stages::{bind_tokenizer, fetch_artifact, invoke_tokenizer, register_model, release_names};

/// Un run de verificación de paridad.
///
/// Orquesta las etapas en orden estricto y registra cada transición en su
/// `RunLog`. Invariantes:
/// - cada etapa exige que la anterior esté completa (`InvalidTransition`);
/// - tras un fallo toda llamada devuelve `RunHasFailed` (stop-on-failure);
/// - la sesión del motor se abre recién después de `Fetched`, así un fallo
///   de red nunca llega a escribir en el motor.
#[derive(Debug)]
pub struct ParityRun {
    id: Uuid,
    plan: RunPlan,
    stage: RunStage,
    failed_at: Option<RunStage>,
    log: RunLog,
    artifact: Option<TokenizerArtifact>,
    provenance: Option<ArtifactProvenance>,
    registration: Option<RegistrationRow>,
    /// El tokenizer fue creado por este run.
    bound: bool,
    produced: Option<TokenSequence>,
    outcome: Option<ParityOutcome>,
}

/// Resultado serializable de un run (completo o detenido).
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub scenario: String,
    pub model: String,
    pub tokenizer: String,
    pub input: String,
    pub artifact: Option<ArtifactProvenance>,
    pub registration: Option<String>,
    pub stage: RunStage,
    pub failed_at: Option<RunStage>,
    pub expected: ExpectedSequence,
    pub produced: Option<TokenSequence>,
    pub outcome: Option<ParityOutcome>,
    pub passed: bool,
    pub events: RunLog,
}

impl ParityRun {
    pub fn new(plan: RunPlan) -> Self {
        let id = Uuid::new_v4();
        let mut log = RunLog::default();
        log.append(id,
                   RunEventKind::RunInitialized { scenario: plan.scenario.name.clone(),
                                                  model: plan.model.to_string(),
                                                  tokenizer: plan.tokenizer.to_string() });
        Self { id,
               plan,
               stage: RunStage::Init,
               failed_at: None,
               log,
               artifact: None,
               provenance: None,
               registration: None,
               bound: false,
               produced: None,
               outcome: None }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn plan(&self) -> &RunPlan {
        &self.plan
    }

    /// Última etapa completada.
    pub fn stage(&self) -> RunStage {
        self.stage
    }

    /// Etapa en la que el run se detuvo, si falló.
    pub fn failed_at(&self) -> Option<RunStage> {
        self.failed_at
    }

    pub fn log(&self) -> &RunLog {
        &self.log
    }

    pub fn produced(&self) -> Option<&TokenSequence> {
        self.produced.as_ref()
    }

    pub fn outcome(&self) -> Option<&ParityOutcome> {
        self.outcome.as_ref()
    }

    /// Ejecuta todas las etapas. `connect` abre la sesión del motor y sólo se
    /// invoca si el artifact se obtuvo; la sesión se libera (drop) al salir,
    /// haya fallado o no alguna etapa.
    pub fn run_to_end<S, E, C>(&mut self, source: &S, connect: C) -> Result<ParityOutcome, ParityError>
        where S: ArtifactSource + ?Sized,
              E: TokenizerEngine,
              C: FnOnce() -> Result<E, ParityError>
    {
        self.fetch(source)?;
        let mut engine = match connect() {
            Ok(engine) => engine,
            Err(e) => {
                // La sesión es parte de la etapa de registro en el log.
                self.begin(RunStage::Registered)?;
                self.record_failure(RunStage::Registered, &e);
                return Err(e);
            }
        };
        let result = self.run_engine_stages(&mut engine);
        if self.plan.cleanup {
            self.cleanup(&mut engine);
        }
        result
    }

    fn run_engine_stages<E: TokenizerEngine + ?Sized>(&mut self, engine: &mut E) -> Result<ParityOutcome, ParityError> {
        self.register(engine)?;
        self.bind(engine)?;
        self.tokenize(engine)?;
        self.check()
    }

    /// INIT → FETCHED.
    pub fn fetch<S: ArtifactSource + ?Sized>(&mut self, source: &S) -> Result<ArtifactProvenance, ParityError> {
        self.begin(RunStage::Fetched)?;
        let result = fetch_artifact(source, &self.plan.scenario.artifact_url);
        let artifact = self.attempt(RunStage::Fetched, result)?;
        let provenance = artifact.provenance();
        self.artifact = Some(artifact);
        self.provenance = Some(provenance.clone());
        self.complete(RunStage::Fetched,
                      json!({ "bytes": provenance.byte_len, "sha256": provenance.sha256 }));
        Ok(provenance)
    }

    /// FETCHED → REGISTERED. Consume el artifact.
    pub fn register<E: TokenizerEngine + ?Sized>(&mut self, engine: &mut E) -> Result<RegistrationRow, ParityError> {
        self.begin(RunStage::Registered)?;
        let artifact = match self.artifact.take() {
            Some(a) => a,
            None => {
                let e = ParityError::InvalidTransition { expected: RunStage::Fetched,
                                                         found: self.stage };
                self.record_failure(RunStage::Registered, &e);
                return Err(e);
            }
        };
        let result = registration(&self.plan, engine, artifact);
        let row = self.attempt(RunStage::Registered, result)?;
        self.registration = Some(row.clone());
        self.complete(RunStage::Registered, json!({ "model": row.model, "result": row.result }));
        Ok(row)
    }

    /// REGISTERED → BOUND.
    pub fn bind<E: TokenizerEngine + ?Sized>(&mut self, engine: &mut E) -> Result<(), ParityError> {
        self.begin(RunStage::Bound)?;
        let result = bind_tokenizer(engine, &self.plan.tokenizer, &self.plan.model);
        let binding = self.attempt(RunStage::Bound, result)?;
        self.bound = true;
        self.complete(RunStage::Bound, json!({ "binding": binding.as_str() }));
        Ok(())
    }

    /// BOUND → TOKENIZED.
    pub fn tokenize<E: TokenizerEngine + ?Sized>(&mut self, engine: &mut E) -> Result<TokenSequence, ParityError> {
        self.begin(RunStage::Tokenized)?;
        let result = invoke_tokenizer(engine,
                                      &self.plan.scenario.input,
                                      &self.plan.tokenizer,
                                      self.plan.determinism_rounds);
        let produced = self.attempt(RunStage::Tokenized, result)?;
        self.produced = Some(produced.clone());
        self.complete(RunStage::Tokenized,
                      json!({ "ids": produced.len(), "rounds": self.plan.determinism_rounds.max(1) }));
        Ok(produced)
    }

    /// TOKENIZED → CHECKED. Con `MismatchPolicy::Fail` una discrepancia es
    /// `ParityMismatch`; con `Advisory` sólo se reporta.
    pub fn check(&mut self) -> Result<ParityOutcome, ParityError> {
        self.begin(RunStage::Checked)?;
        let Some(produced) = self.produced.as_ref() else {
            let e = ParityError::InvalidTransition { expected: RunStage::Tokenized,
                                                     found: self.stage };
            self.record_failure(RunStage::Checked, &e);
            return Err(e);
        };
        let outcome = compare(produced, &self.plan.scenario.expected);
        self.outcome = Some(outcome.clone());
        if let ParityOutcome::Mismatch(report) = &outcome {
            match self.plan.mismatch_policy {
                MismatchPolicy::Fail => {
                    let e = ParityError::ParityMismatch(report.clone());
                    self.record_failure(RunStage::Checked, &e);
                    return Err(e);
                }
                MismatchPolicy::Advisory => {
                    warn!("parity mismatch (advisory) scenario={}\n{report}", self.plan.scenario.name);
                }
            }
        }
        self.complete(RunStage::Checked, json!({ "match": outcome.is_match() }));
        self.log.append(self.id, RunEventKind::RunCompleted { passed: outcome.is_match() });
        Ok(outcome)
    }

    /// Borra lo que este run creó (best-effort): el tokenizer sólo si se ligó
    /// y el modelo sólo si se registró. Nombres ajenos nunca se tocan. Los
    /// fallos quedan en el log y nunca reemplazan el error de una etapa.
    pub fn cleanup<E: TokenizerEngine + ?Sized>(&mut self, engine: &mut E) -> Vec<EngineCallError> {
        let tokenizer = self.bound.then_some(&self.plan.tokenizer);
        let model = self.registration.as_ref().map(|r| &r.model);
        let errors = release_names_best_effort(engine, tokenizer, model);
        for e in &errors {
            self.log.append(self.id, RunEventKind::CleanupFailed { error: e.to_string() });
        }
        errors
    }

    pub fn summary(&self) -> RunSummary {
        let passed = self.failed_at.is_none() && self.outcome.as_ref().is_some_and(ParityOutcome::is_match);
        RunSummary { run_id: self.id,
                     scenario: self.plan.scenario.name.clone(),
                     model: self.plan.model.to_string(),
                     tokenizer: self.plan.tokenizer.to_string(),
                     input: self.plan.scenario.input.clone(),
                     artifact: self.provenance.clone(),
                     registration: self.registration.as_ref().map(|r| r.result.clone()),
                     stage: self.stage,
                     failed_at: self.failed_at,
                     expected: self.plan.scenario.expected.clone(),
                     produced: self.produced.clone(),
                     outcome: self.outcome.clone(),
                     passed,
                     events: self.log.clone() }
    }

    fn begin(&mut self, target: RunStage) -> Result<(), ParityError> {
        if let Some(at) = self.failed_at {
            return Err(ParityError::RunHasFailed(at));
        }
        let expected = target.previous().unwrap_or(RunStage::Init);
        if self.stage != expected || target == RunStage::Init {
            return Err(ParityError::InvalidTransition { expected,
                                                        found: self.stage });
        }
        info!("run={} stage={target} start", self.id);
        self.log.append(self.id, RunEventKind::StageStarted { stage: target });
        Ok(())
    }

    fn complete(&mut self, target: RunStage, detail: serde_json::Value) {
        self.stage = target;
        self.log.append(self.id, RunEventKind::StageFinished { stage: target, detail });
    }

    fn attempt<T>(&mut self, target: RunStage, result: Result<T, ParityError>) -> Result<T, ParityError> {
        result.inspect_err(|e| self.record_failure(target, e))
    }

    fn record_failure(&mut self, target: RunStage, error: &ParityError) {
        warn!("run={} stage={target} failed: {error}", self.id);
        self.failed_at = Some(target);
        self.log.append(self.id,
                        RunEventKind::StageFailed { stage: target,
                                                    class: error.class(),
                                                    error: error.to_string() });
    }
}

/// Registrar, liberando antes los nombres si el plan lo pide.
fn registration<E: TokenizerEngine + ?Sized>(plan: &RunPlan,
                                             engine: &mut E,
                                             artifact: TokenizerArtifact)
                                             -> Result<RegistrationRow, ParityError> {
    if plan.replace_existing {
        release_names(engine, &plan.tokenizer, &plan.model)
            .map_err(|source| ParityError::Registration { model: plan.model.to_string(),
                                                          source })?;
    }
    register_model(engine, &plan.model, artifact)
}
