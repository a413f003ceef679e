//! Catálogo de escenarios de paridad.
//!
//! Cada escenario fija un artifact del hub, una entrada literal y la secuencia
//! que produce el tokenizer canónico para esa entrada. Los vectores están
//! congelados: cambiarlos invalida la comparación.

use serde::Serialize;

use crate::constants::{DEFAULT_REVISION, TOKENIZER_FILE};
use crate::model::ExpectedSequence;

/// Definición estática de un escenario.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioSpec {
    pub name: &'static str,
    /// Repositorio del hub (`organización/modelo`).
    pub repo: &'static str,
    pub input: &'static str,
    pub expected: &'static [u32],
}

pub const BERT_BASE_UNCASED: ScenarioSpec = ScenarioSpec {
    name: "bert-base-uncased",
    repo: "google-bert/bert-base-uncased",
    input: "PostgreSQL is a powerful, open-source object-relational database system. It has over 15 years of active development.",
    expected: &[2695, 17603, 2015, 4160, 2140, 2003, 1037, 3928, 1010, 2330, 1011, 3120, 4874, 1011, 28771, 7809, 2291, 1012, 2009, 2038,
                2058, 2321, 2086, 1997, 3161, 2458, 1012],
};

pub const BERT_BASE_CHINESE: ScenarioSpec = ScenarioSpec {
    name: "bert-base-chinese",
    repo: "google-bert/bert-base-chinese",
    input: "我们中出了一个叛徒",
    expected: &[2769, 812, 704, 1139, 749, 671, 702, 1361, 2530],
};

pub const BUILTIN_SCENARIOS: &[ScenarioSpec] = &[BERT_BASE_UNCASED, BERT_BASE_CHINESE];

/// Escenario resuelto contra un hub concreto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub name: String,
    pub artifact_url: String,
    pub input: String,
    pub expected: ExpectedSequence,
}

impl ScenarioSpec {
    /// URL del `tokenizer.json` del repositorio en `hub_url`.
    pub fn artifact_url(&self, hub_url: &str) -> String {
        format!("{}/{}/resolve/{}/{}", hub_url.trim_end_matches('/'), self.repo, DEFAULT_REVISION, TOKENIZER_FILE)
    }

    pub fn resolve(&self, hub_url: &str) -> Scenario {
        Scenario { name: self.name.to_string(),
                   artifact_url: self.artifact_url(hub_url),
                   input: self.input.to_string(),
                   expected: ExpectedSequence::from_static(self.expected) }
    }

    /// Nombre de modelo por defecto: el del escenario con `_` en lugar de `-`.
    pub fn default_model_name(&self) -> String {
        self.name.replace('-', "_")
    }

    pub fn default_tokenizer_name(&self) -> String {
        format!("{}_tokenizer", self.default_model_name())
    }
}

pub fn find_scenario(name: &str) -> Option<&'static ScenarioSpec> {
    BUILTIN_SCENARIOS.iter().find(|s| s.name == name)
}
