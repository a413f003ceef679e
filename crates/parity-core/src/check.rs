//! Parity Checker: comparación exacta contra la secuencia esperada.
//!
//! Ante una discrepancia el reporte conserva ambas secuencias completas, el
//! primer índice divergente y los hunks de diferencia. Un split de subpalabra
//! corrido en uno suele verse como un `replace` de 1 → 2 ids; una normalización
//! faltante, como `insert`/`delete` localizados.

use std::fmt;
use std::ops::Range;

use serde::Serialize;
use similar::{capture_diff_slices, Algorithm, DiffTag};

use crate::model::{ExpectedSequence, TokenSequence};

/// Qué hacer cuando la secuencia producida difiere de la esperada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// La discrepancia es un error (`ParityError::ParityMismatch`).
    #[default]
    Fail,
    /// La discrepancia se reporta pero el run termina bien.
    Advisory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HunkTag {
    /// Ids esperados que faltan en la salida.
    Delete,
    /// Ids de más en la salida.
    Insert,
    Replace,
}

/// Tramo divergente entre ambas secuencias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffHunk {
    pub tag: HunkTag,
    pub expected: Range<usize>,
    pub produced: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParityReport {
    pub expected: ExpectedSequence,
    pub produced: TokenSequence,
    pub first_divergence: Option<usize>,
    pub hunks: Vec<DiffHunk>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParityOutcome {
    Match,
    Mismatch(Box<ParityReport>),
}

impl ParityOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ParityOutcome::Match)
    }
}

/// Igualdad exacta: misma longitud, mismos elementos, mismo orden.
pub fn compare(produced: &TokenSequence, expected: &ExpectedSequence) -> ParityOutcome {
    if produced.as_slice() == expected.as_slice() {
        return ParityOutcome::Match;
    }
    ParityOutcome::Mismatch(Box::new(ParityReport::build(produced.clone(), expected.clone())))
}

impl ParityReport {
    fn build(produced: TokenSequence, expected: ExpectedSequence) -> Self {
        let first_divergence = first_divergence(expected.as_slice(), produced.as_slice());
        let hunks = capture_diff_slices(Algorithm::Myers, expected.as_slice(), produced.as_slice())
            .iter()
            .filter_map(|op| {
                let (tag, old, new) = op.as_tag_tuple();
                let tag = match tag {
                    DiffTag::Equal => return None,
                    DiffTag::Delete => HunkTag::Delete,
                    DiffTag::Insert => HunkTag::Insert,
                    DiffTag::Replace => HunkTag::Replace,
                };
                Some(DiffHunk { tag,
                                expected: old,
                                produced: new })
            })
            .collect();
        Self { expected,
               produced,
               first_divergence,
               hunks }
    }
}

fn first_divergence(expected: &[u32], produced: &[u32]) -> Option<usize> {
    match expected.iter().zip(produced).position(|(e, p)| e != p) {
        Some(i) => Some(i),
        None if expected.len() != produced.len() => Some(expected.len().min(produced.len())),
        None => None,
    }
}

impl fmt::Display for ParityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  expected ({} ids): {}", self.expected.len(), self.expected)?;
        write!(f, "  produced ({} ids): {}", self.produced.len(), self.produced)?;
        if let Some(i) = self.first_divergence {
            let show = |v: Option<&u32>| v.map_or_else(|| "<end>".to_string(), u32::to_string);
            write!(f,
                   "\n  first divergence at index {i}: expected {}, produced {}",
                   show(self.expected.get(i)),
                   show(self.produced.get(i)))?;
        }
        for h in &self.hunks {
            write!(f,
                   "\n  {:?} expected[{}..{}] {:?} -> produced[{}..{}] {:?}",
                   h.tag,
                   h.expected.start,
                   h.expected.end,
                   &self.expected[h.expected.clone()],
                   h.produced.start,
                   h.produced.end,
                   &self.produced[h.produced.clone()])?;
        }
        Ok(())
    }
}
