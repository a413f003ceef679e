//! Tokenization Invoker.

use log::{debug, info};

use crate::engine::TokenizerEngine;
use crate::errors::{EngineCallError, ParityError};
use crate::model::{TokenSequence, TokenizerName};

/// Tokeniza `input` `rounds` veces (mínimo una) y exige que todas las rondas
/// devuelvan la misma secuencia.
pub fn invoke_tokenizer<E: TokenizerEngine + ?Sized>(engine: &mut E,
                                                     input: &str,
                                                     tokenizer: &TokenizerName,
                                                     rounds: u32)
                                                     -> Result<TokenSequence, ParityError> {
    let first = tokenize_once(engine, input, tokenizer)?;
    for round in 2..=rounds.max(1) {
        let other = tokenize_once(engine, input, tokenizer)?;
        debug!("determinism round={round} tokenizer={tokenizer} ids={}", other.len());
        if other != first {
            return Err(ParityError::NonDeterministic { tokenizer: tokenizer.to_string(),
                                                       round,
                                                       first,
                                                       other });
        }
    }
    info!("tokenized with tokenizer={tokenizer} ids={} rounds={}", first.len(), rounds.max(1));
    Ok(first)
}

fn tokenize_once<E: TokenizerEngine + ?Sized>(engine: &mut E,
                                              input: &str,
                                              tokenizer: &TokenizerName)
                                              -> Result<TokenSequence, ParityError> {
    let tokenization_error = |source| ParityError::Tokenization { tokenizer: tokenizer.to_string(),
                                                                  source };
    let raw = engine.tokenize(input, tokenizer).map_err(tokenization_error)?;
    TokenSequence::from_signed(&raw)
        .map_err(|id| tokenization_error(EngineCallError::protocol(format!("negative token id {id}"))))
}
