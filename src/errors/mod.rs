//! Errores del binario.
//!
//! `HarnessError` envuelve los errores del run con el escenario que los
//! produjo y decide el código de salida.

pub mod harness_error;

pub use harness_error::HarnessError;
