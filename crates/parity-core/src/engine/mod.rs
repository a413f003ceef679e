//! Superficie RPC del motor de tokenización.
//!
//! El motor (catálogo de modelos y tokenizers dentro de la base de datos) es
//! un colaborador externo; el harness sólo depende de estas llamadas. Cada
//! implementación posee su sesión: la conexión se libera al hacer drop.

mod memory;

use serde::Serialize;

pub use memory::{EngineCall, InMemoryTokenizerEngine};

use crate::errors::EngineCallError;
use crate::model::{BindingExpr, ModelName, TokenizerName};

/// Fila devuelta por la creación de un modelo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRow {
    pub model: ModelName,
    /// Primera columna de la fila, como texto (vacío cuando la función es `void`).
    pub result: String,
}

/// Llamadas al motor que el run necesita, todas sobre una sesión ya abierta.
pub trait TokenizerEngine {
    /// `create_huggingface_model(name, config)`; exactamente una fila.
    fn create_model(&mut self, name: &ModelName, config: &str) -> Result<RegistrationRow, EngineCallError>;

    /// `tokenizer_catalog.create_tokenizer(name, binding)`; sin valor de retorno.
    fn create_tokenizer(&mut self, name: &TokenizerName, binding: &BindingExpr) -> Result<(), EngineCallError>;

    /// `tokenizer_catalog.tokenize(input, tokenizer)`; primera columna de la única fila.
    fn tokenize(&mut self, input: &str, tokenizer: &TokenizerName) -> Result<Vec<i64>, EngineCallError>;

    /// Borra un tokenizer; un nombre ausente no es error.
    fn drop_tokenizer(&mut self, name: &TokenizerName) -> Result<(), EngineCallError>;

    /// Borra un modelo; un nombre ausente no es error.
    fn drop_model(&mut self, name: &ModelName) -> Result<(), EngineCallError>;
}

impl<E: TokenizerEngine + ?Sized> TokenizerEngine for &mut E {
    fn create_model(&mut self, name: &ModelName, config: &str) -> Result<RegistrationRow, EngineCallError> {
        (**self).create_model(name, config)
    }

    fn create_tokenizer(&mut self, name: &TokenizerName, binding: &BindingExpr) -> Result<(), EngineCallError> {
        (**self).create_tokenizer(name, binding)
    }

    fn tokenize(&mut self, input: &str, tokenizer: &TokenizerName) -> Result<Vec<i64>, EngineCallError> {
        (**self).tokenize(input, tokenizer)
    }

    fn drop_tokenizer(&mut self, name: &TokenizerName) -> Result<(), EngineCallError> {
        (**self).drop_tokenizer(name)
    }

    fn drop_model(&mut self, name: &ModelName) -> Result<(), EngineCallError> {
        (**self).drop_model(name)
    }
}
