//! Tokenizer Binder.

use log::info;

use crate::engine::TokenizerEngine;
use crate::errors::ParityError;
use crate::model::{BindingExpr, ModelName, TokenizerName};

/// Crea `tokenizer` ligado a `model`. Si el modelo no existe el motor falla
/// aquí, no más tarde al tokenizar.
pub fn bind_tokenizer<E: TokenizerEngine + ?Sized>(engine: &mut E,
                                                   tokenizer: &TokenizerName,
                                                   model: &ModelName)
                                                   -> Result<BindingExpr, ParityError> {
    let binding_error = |source| ParityError::Binding { tokenizer: tokenizer.to_string(),
                                                        model: model.to_string(),
                                                        source };
    let binding = BindingExpr::for_model(model)?;
    engine.create_tokenizer(tokenizer, &binding).map_err(binding_error)?;
    info!("bound tokenizer={tokenizer} binding={:?}", binding.as_str());
    Ok(binding)
}
