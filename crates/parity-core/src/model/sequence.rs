//! Secuencias de ids de token.
//!
//! `TokenSequence` es lo que produce el motor en una invocación;
//! `ExpectedSequence` es el vector congelado del tokenizer canónico. Ambas se
//! comparan por igualdad exacta (longitud, elementos y orden).

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Secuencia ordenada de ids producida por el motor. Nunca se muta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSequence(Vec<u32>);

impl TokenSequence {
    pub fn new(ids: Vec<u32>) -> Self {
        Self(ids)
    }

    /// Convierte los enteros con signo que devuelve la base de datos.
    /// Devuelve el primer id negativo como error.
    pub fn from_signed(ids: &[i64]) -> Result<Self, i64> {
        ids.iter()
           .map(|&id| u32::try_from(id).map_err(|_| id))
           .collect::<Result<Vec<_>, _>>()
           .map(Self)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Deref for TokenSequence {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ids(f, &self.0)
    }
}

/// Secuencia literal esperada, embebida en la definición del escenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpectedSequence(Vec<u32>);

impl ExpectedSequence {
    pub fn new(ids: Vec<u32>) -> Self {
        Self(ids)
    }

    pub fn from_static(ids: &'static [u32]) -> Self {
        Self(ids.to_vec())
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Deref for ExpectedSequence {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for ExpectedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ids(f, &self.0)
    }
}

fn write_ids(f: &mut fmt::Formatter<'_>, ids: &[u32]) -> fmt::Result {
    f.write_str("[")?;
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{id}")?;
    }
    f.write_str("]")
}
