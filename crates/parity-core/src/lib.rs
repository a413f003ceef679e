//! parity-core: verificación de paridad de tokenizers importados
//!
//! Un run descarga un artifact de tokenizer, lo registra en el motor de
//! tokenización de la base de datos, liga un tokenizer al modelo, tokeniza una
//! entrada fija y compara los ids contra la secuencia del tokenizer canónico.
//!
//! Este crate no conoce HTTP ni Postgres: ambos quedan detrás de
//! `ArtifactSource` y `TokenizerEngine` (ver `parity-adapters` y
//! `parity-persistence`). Las implementaciones en memoria de ambos traits
//! permiten ejercitar el run completo sin red ni base de datos.
pub mod check;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod model;
pub mod run;
pub mod scenario;
pub mod source;
pub mod stages;

pub use check::{compare, MismatchPolicy, ParityOutcome, ParityReport};
pub use engine::{InMemoryTokenizerEngine, RegistrationRow, TokenizerEngine};
pub use errors::{EngineCallError, EngineErrorKind, ErrorClass, FetchError, ParityError};
pub use model::{BindingExpr, ExpectedSequence, ModelName, TokenSequence, TokenizerArtifact, TokenizerName};
pub use run::{ParityRun, RunPlan, RunStage, RunSummary};
pub use scenario::{find_scenario, Scenario, ScenarioSpec, BUILTIN_SCENARIOS};
pub use source::{ArtifactSource, StaticArtifactSource};
