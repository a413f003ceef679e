//! Model Registrar.

use log::{info, warn};

use crate::engine::{RegistrationRow, TokenizerEngine};
use crate::errors::{EngineCallError, ParityError};
use crate::model::{ModelName, TokenizerArtifact, TokenizerName};

/// Registra el artifact bajo `model`. El artifact se consume: no sobrevive a
/// la etapa.
pub fn register_model<E: TokenizerEngine + ?Sized>(engine: &mut E,
                                                   model: &ModelName,
                                                   artifact: TokenizerArtifact)
                                                   -> Result<RegistrationRow, ParityError> {
    let row = engine.create_model(model, artifact.text())
                    .map_err(|source| ParityError::Registration { model: model.to_string(),
                                                                  source })?;
    info!("registered model={model} result={:?}", row.result);
    Ok(row)
}

/// Libera los nombres antes de registrar de nuevo: primero el tokenizer (que
/// referencia al modelo) y luego el modelo. Nombres ausentes no son error.
pub fn release_names<E: TokenizerEngine + ?Sized>(engine: &mut E,
                                                  tokenizer: &TokenizerName,
                                                  model: &ModelName)
                                                  -> Result<(), EngineCallError> {
    engine.drop_tokenizer(tokenizer)?;
    engine.drop_model(model)?;
    Ok(())
}

/// Igual que `release_names` pero sin propagar y sólo para los nombres
/// dados: cada fallo queda en el log y se devuelve al llamador.
pub(crate) fn release_names_best_effort<E: TokenizerEngine + ?Sized>(engine: &mut E,
                                                                      tokenizer: Option<&TokenizerName>,
                                                                      model: Option<&ModelName>)
                                                                      -> Vec<EngineCallError> {
    let mut errors = Vec::new();
    if let Some(tokenizer) = tokenizer {
        if let Err(e) = engine.drop_tokenizer(tokenizer) {
            warn!("cleanup: drop tokenizer={tokenizer} failed: {e}");
            errors.push(e);
        }
    }
    if let Some(model) = model {
        if let Err(e) = engine.drop_model(model) {
            warn!("cleanup: drop model={model} failed: {e}");
            errors.push(e);
        }
    }
    errors
}
