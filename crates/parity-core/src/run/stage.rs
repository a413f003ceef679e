use std::fmt;

use serde::{Deserialize, Serialize};

/// Etapa de un run de paridad.
///
/// Las transiciones válidas son estrictamente lineales:
/// `Init` -> `Fetched` -> `Registered` -> `Bound` -> `Tokenized` -> `Checked`.
///
/// No se permiten reversiones, saltos ni reintentos. Un run que falla queda
/// detenido en la etapa que intentaba alcanzar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    Init,
    /// Artifact descargado y decodificado.
    Fetched,
    /// Modelo creado en el motor.
    Registered,
    /// Tokenizer ligado al modelo.
    Bound,
    /// Secuencia de ids obtenida (y estable entre rondas).
    Tokenized,
    /// Secuencia comparada contra la esperada.
    Checked,
}

impl RunStage {
    /// Etapa que debe estar completa para poder intentar `self`.
    pub fn previous(self) -> Option<RunStage> {
        match self {
            RunStage::Init => None,
            RunStage::Fetched => Some(RunStage::Init),
            RunStage::Registered => Some(RunStage::Fetched),
            RunStage::Bound => Some(RunStage::Registered),
            RunStage::Tokenized => Some(RunStage::Bound),
            RunStage::Checked => Some(RunStage::Tokenized),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunStage::Init => "INIT",
            RunStage::Fetched => "FETCHED",
            RunStage::Registered => "REGISTERED",
            RunStage::Bound => "BOUND",
            RunStage::Tokenized => "TOKENIZED",
            RunStage::Checked => "CHECKED",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
