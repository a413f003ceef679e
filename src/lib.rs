//! pgtok-parity
//!
//! Binario de verificación de paridad de tokenizers importados en Postgres:
//! - `cli` / `config`: línea de comandos y validación previa a cualquier I/O.
//! - `app`: un run por escenario, con fetcher HTTP y sesión Postgres.
//! - `report`: salida en texto o JSON.
//! - `errors`: `HarnessError` y el contrato de códigos de salida.
//! - `logging`: subscriber de `tracing` sobre stderr.

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod report;
