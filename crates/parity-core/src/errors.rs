//! Taxonomía de errores del harness.
//!
//! Cada etapa del run tiene su variante en `ParityError`; todas se propagan
//! como `Result` (no hay rutas que capturen e impriman). `ErrorClass` agrupa
//! las variantes para decidir el código de salida del proceso.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::check::ParityReport;
use crate::model::TokenSequence;
use crate::run::RunStage;

/// Fallos al obtener el artifact del hub.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("http status {status}")]
    Status { status: u16 },
    #[error("body is not valid utf-8: {0}")]
    Decode(String),
}

/// Categoría de un fallo devuelto por el motor de tokenización.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineErrorKind {
    /// Objeto referenciado inexistente (modelo, tokenizer).
    NotFound,
    /// Nombre ya ocupado con una definición incompatible.
    Conflict,
    /// El motor rechazó la entrada (config inválida, error SQL).
    Rejected,
    /// La respuesta no tiene la forma esperada (filas, columnas, tipos).
    Protocol,
    /// Conexión caída o imposible de abrir.
    Connection,
    Unknown,
}

/// Error de una llamada RPC al motor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind:?}: {message}")]
pub struct EngineCallError {
    pub kind: EngineErrorKind,
    pub message: String,
}

impl EngineCallError {
    pub fn new(kind: EngineErrorKind, message: impl Into<String>) -> Self {
        Self { kind,
               message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::NotFound, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::Protocol, message)
    }
}

/// Error de un run de paridad.
#[derive(Debug, Error)]
pub enum ParityError {
    #[error("artifact fetch failed for {url}: {source}")]
    ArtifactFetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("could not open engine session: {0}")]
    Connection(#[source] EngineCallError),
    #[error("registration of model '{model}' failed: {source}")]
    Registration {
        model: String,
        #[source]
        source: EngineCallError,
    },
    #[error("binding tokenizer '{tokenizer}' to model '{model}' failed: {source}")]
    Binding {
        tokenizer: String,
        model: String,
        #[source]
        source: EngineCallError,
    },
    #[error("tokenization with '{tokenizer}' failed: {source}")]
    Tokenization {
        tokenizer: String,
        #[source]
        source: EngineCallError,
    },
    #[error("tokenizer '{tokenizer}' is not deterministic: round {round} produced {other}, round 1 produced {first}")]
    NonDeterministic {
        tokenizer: String,
        round: u32,
        first: TokenSequence,
        other: TokenSequence,
    },
    #[error("parity mismatch\n{0}")]
    ParityMismatch(Box<ParityReport>),
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("invalid stage transition: run is at {found}, {expected} required")]
    InvalidTransition { expected: RunStage, found: RunStage },
    #[error("run already failed at stage {0} (stop-on-failure)")]
    RunHasFailed(RunStage),
}

/// Clase gruesa de un error, estable para mapear a códigos de salida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    Network,
    Connection,
    Engine,
    Mismatch,
    Usage,
    Internal,
}

impl ParityError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ParityError::ArtifactFetch { .. } => ErrorClass::Network,
            ParityError::Connection(_) => ErrorClass::Connection,
            ParityError::Registration { .. } | ParityError::Binding { .. } | ParityError::Tokenization { .. } => {
                ErrorClass::Engine
            }
            ParityError::NonDeterministic { .. } | ParityError::ParityMismatch(_) => ErrorClass::Mismatch,
            ParityError::InvalidName(_) => ErrorClass::Usage,
            ParityError::InvalidTransition { .. } | ParityError::RunHasFailed(_) => ErrorClass::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_carries_status_and_url() {
        let e = ParityError::ArtifactFetch { url: "https://hub/x".into(),
                                             source: FetchError::Status { status: 404 } };
        assert_eq!(e.to_string(), "artifact fetch failed for https://hub/x: http status 404");
        assert_eq!(e.class(), ErrorClass::Network);
    }

    #[test]
    fn engine_stage_errors_share_a_class() {
        let src = EngineCallError::not_found("Model not found: m");
        let errs = [ParityError::Registration { model: "m".into(), source: src.clone() },
                    ParityError::Binding { tokenizer: "t".into(), model: "m".into(), source: src.clone() },
                    ParityError::Tokenization { tokenizer: "t".into(), source: src }];
        assert!(errs.iter().all(|e| e.class() == ErrorClass::Engine));
    }

    #[test]
    fn engine_call_error_display() {
        let e = EngineCallError::protocol("expected 1 row, got 0");
        assert_eq!(e.to_string(), "Protocol: expected 1 row, got 0");
    }
}
