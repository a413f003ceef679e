//! parity-persistence
//!
//! Implementación Postgres (Diesel) de `TokenizerEngine`: cada llamada del
//! harness se traduce a una invocación SQL de las funciones del catálogo de
//! tokenizers instaladas por la extensión.
//!
//! Módulos:
//! - `pg`: `PgTokenizerEngine`, dueño de la conexión (ConnectionHandle).
//! - `config`: carga de configuración desde `.env` / entorno.
//! - `error`: mapeo de errores Diesel a `PersistenceError` y `EngineCallError`.

pub mod config;
pub mod error;
pub mod pg;

pub use config::{init_dotenv, DbConfig, SessionMode};
pub use error::PersistenceError;
pub use pg::PgTokenizerEngine;
