//! Modelo de datos del harness (artifact, nombres, binding, secuencias).

pub mod artifact;
pub mod binding;
pub mod names;
pub mod sequence;

pub use artifact::{ArtifactProvenance, TokenizerArtifact};
pub use binding::BindingExpr;
pub use names::{ModelName, TokenizerName};
pub use sequence::{ExpectedSequence, TokenSequence};
