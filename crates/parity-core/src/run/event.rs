//! Log append-only de un run.
//!
//! Cada transición de etapa deja un evento; el log completo se serializa en el
//! reporte JSON y permite reconstruir qué pasó sin mirar estado mutable.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::RunStage;
use crate::errors::ErrorClass;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEventKind {
    /// Primer evento de todo run.
    RunInitialized { scenario: String, model: String, tokenizer: String },
    StageStarted { stage: RunStage },
    /// `detail` lleva datos livianos de la etapa (bytes, filas, ids).
    StageFinished { stage: RunStage, detail: Value },
    /// Terminal: después de este evento el run no avanza (stop-on-failure).
    StageFailed { stage: RunStage, class: ErrorClass, error: String },
    /// Limpieza best-effort que no pudo completarse; no cambia el resultado.
    CleanupFailed { error: String },
    RunCompleted { passed: bool },
}

#[derive(Debug, Clone, Serialize)]
pub struct RunEvent {
    pub seq: u64,
    pub run_id: Uuid,
    pub kind: RunEventKind,
    pub ts: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RunLog {
    events: Vec<RunEvent>,
}

impl RunLog {
    pub fn append(&mut self, run_id: Uuid, kind: RunEventKind) -> &RunEvent {
        let seq = self.events.len() as u64;
        self.events.push(RunEvent { seq,
                                    run_id,
                                    kind,
                                    ts: Utc::now() });
        &self.events[self.events.len() - 1]
    }

    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    /// Nombres de variante en orden, útil para comparar runs.
    pub fn variants(&self) -> Vec<&'static str> {
        self.events
            .iter()
            .map(|e| match e.kind {
                RunEventKind::RunInitialized { .. } => "RunInitialized",
                RunEventKind::StageStarted { .. } => "StageStarted",
                RunEventKind::StageFinished { .. } => "StageFinished",
                RunEventKind::StageFailed { .. } => "StageFailed",
                RunEventKind::CleanupFailed { .. } => "CleanupFailed",
                RunEventKind::RunCompleted { .. } => "RunCompleted",
            })
            .collect()
    }
}
