//! Etapas del run como funciones libres.
//!
//! Cada etapa recibe explícitamente la sesión del motor (o la fuente de
//! artifacts) en lugar de depender de estado ambiente. `ParityRun` las
//! secuencia; también se pueden usar sueltas.

pub mod bind;
pub mod fetch;
pub mod register;
pub mod tokenize;

pub use bind::bind_tokenizer;
pub use fetch::fetch_artifact;
pub use register::{register_model, release_names};
pub use tokenize::invoke_tokenizer;
