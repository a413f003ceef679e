//! Nombres de objetos del lado del motor (`ModelHandle`, `TokenizerHandle`).
//!
//! Un nombre de modelo sigue la regla del catálogo:
//! - sólo letras ASCII, dígitos y `_`;
//! - comienza con una letra;
//! - longitud entre 1 y `MAX_MODEL_NAME_LEN` bytes;
//! - no es uno de los modelos incorporados del motor.
//!
//! El motor no valida nombres de tokenizer más allá de no ser vacíos, así que
//! aquí tampoco.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_MODEL_NAME_LEN, RESERVED_MODEL_NAMES};
use crate::errors::ParityError;

/// Nombre validado bajo el cual el motor guarda un modelo registrado.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelName(String);

impl ModelName {
    pub fn parse(name: &str) -> Result<Self, ParityError> {
        validate_model_name(name).map_err(ParityError::InvalidName)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Nombre bajo el cual el motor guarda una expresión de binding invocable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenizerName(String);

impl TokenizerName {
    pub fn parse(name: &str) -> Result<Self, ParityError> {
        if name.trim().is_empty() {
            return Err(ParityError::InvalidName("tokenizer name must not be empty".into()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenizerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_model_name(name: &str) -> Result<(), String> {
    let bytes = name.as_bytes();
    if let Some(&b) = bytes.iter().find(|b| !b.is_ascii_alphanumeric() && **b != b'_') {
        return Err(format!("invalid character {:?} in model name {name:?}", b as char));
    }
    if !(1..=MAX_MODEL_NAME_LEN).contains(&bytes.len()) {
        return Err(format!("model name length must be between 1 and {MAX_MODEL_NAME_LEN}, got {}", bytes.len()));
    }
    if !bytes[0].is_ascii_alphabetic() {
        return Err(format!("model name {name:?} must start with a letter"));
    }
    if RESERVED_MODEL_NAMES.contains(&name) {
        return Err(format!("model name {name:?} is reserved by the engine"));
    }
    Ok(())
}
