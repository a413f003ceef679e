use std::collections::HashMap;

use serde_json::Value;

use super::{RegistrationRow, TokenizerEngine};
use crate::errors::{EngineCallError, EngineErrorKind};
use crate::model::{BindingExpr, ModelName, TokenizerName};

/// Llamada registrada por el motor en memoria (orden de invocación).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    CreateModel(String),
    CreateTokenizer { name: String, binding: String },
    Tokenize { input: String, tokenizer: String },
    DropTokenizer(String),
    DropModel(String),
}

#[derive(Debug, Clone)]
struct VocabModel {
    vocab: HashMap<String, u32>,
    unk: Option<u32>,
}

impl VocabModel {
    /// Lee `model.vocab` / `model.unk_token` con la forma de un `tokenizer.json`.
    fn from_config(config: &str) -> Result<Self, String> {
        let doc: Value = serde_json::from_str(config).map_err(|e| format!("config is not JSON: {e}"))?;
        let vocab = doc.pointer("/model/vocab")
                       .and_then(Value::as_object)
                       .ok_or_else(|| "config has no model.vocab object".to_string())?
                       .iter()
                       .filter_map(|(tok, id)| id.as_u64().and_then(|id| u32::try_from(id).ok()).map(|id| (tok.clone(), id)))
                       .collect::<HashMap<_, _>>();
        let unk = doc.pointer("/model/unk_token")
                     .and_then(Value::as_str)
                     .and_then(|t| vocab.get(t).copied());
        Ok(Self { vocab, unk })
    }

    fn encode(&self, input: &str) -> Result<Vec<i64>, String> {
        input.split_whitespace()
             .map(|w| self.vocab.get(w).copied().or(self.unk).map(i64::from).ok_or_else(|| format!("no id for {w:?} and no unk token")))
             .collect()
    }
}

/// Motor de tokenización en memoria.
///
/// Modela el catálogo con un vocabulario por palabra (split por espacios) leído
/// del artifact. Sirve para ejercitar el run completo sin base de datos:
/// - re-registrar un modelo sobrescribe (o se rechaza con
///   `rejecting_duplicates`, como hace el motor real);
/// - ligar un tokenizer a un modelo inexistente falla en `create_tokenizer`;
/// - `drifting` simula un motor no determinista.
#[derive(Debug, Default)]
pub struct InMemoryTokenizerEngine {
    models: HashMap<String, VocabModel>,
    tokenizers: HashMap<String, String>,
    calls: Vec<EngineCall>,
    reject_duplicates: bool,
    drifting: bool,
    tokenize_count: u32,
}

impl InMemoryTokenizerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nombres repetidos producen `Conflict` en vez de sobrescribir.
    pub fn rejecting_duplicates(mut self) -> Self {
        self.reject_duplicates = true;
        self
    }

    /// Cada `tokenize` agrega un id distinto al final de la secuencia.
    pub fn drifting(mut self) -> Self {
        self.drifting = true;
        self
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn has_tokenizer(&self, name: &str) -> bool {
        self.tokenizers.contains_key(name)
    }
}

impl TokenizerEngine for InMemoryTokenizerEngine {
    fn create_model(&mut self, name: &ModelName, config: &str) -> Result<RegistrationRow, EngineCallError> {
        self.calls.push(EngineCall::CreateModel(name.to_string()));
        let model = VocabModel::from_config(config).map_err(|m| EngineCallError::new(EngineErrorKind::Rejected, m))?;
        if self.reject_duplicates && self.models.contains_key(name.as_str()) {
            return Err(EngineCallError::new(EngineErrorKind::Conflict, format!("Model already exists: {name}")));
        }
        self.models.insert(name.to_string(), model);
        Ok(RegistrationRow { model: name.clone(),
                             result: String::new() })
    }

    fn create_tokenizer(&mut self, name: &TokenizerName, binding: &BindingExpr) -> Result<(), EngineCallError> {
        self.calls.push(EngineCall::CreateTokenizer { name: name.to_string(),
                                                      binding: binding.to_string() });
        let model = BindingExpr::referenced_model(binding.as_str())
            .ok_or_else(|| EngineCallError::new(EngineErrorKind::Rejected, format!("invalid tokenizer config: {binding}")))?;
        if !self.models.contains_key(&model) {
            return Err(EngineCallError::not_found(format!("Model not found: {model}")));
        }
        let conflict = self.tokenizers
                           .get(name.as_str())
                           .is_some_and(|bound| self.reject_duplicates || *bound != model);
        if conflict {
            return Err(EngineCallError::new(EngineErrorKind::Conflict, format!("Tokenizer already exists: {name}")));
        }
        self.tokenizers.insert(name.to_string(), model);
        Ok(())
    }

    fn tokenize(&mut self, input: &str, tokenizer: &TokenizerName) -> Result<Vec<i64>, EngineCallError> {
        self.calls.push(EngineCall::Tokenize { input: input.to_string(),
                                               tokenizer: tokenizer.to_string() });
        let model_name = self.tokenizers
                             .get(tokenizer.as_str())
                             .ok_or_else(|| EngineCallError::not_found(format!("Tokenizer not found: {tokenizer}")))?;
        let model = self.models
                        .get(model_name)
                        .ok_or_else(|| EngineCallError::not_found(format!("Model not found: {model_name}")))?;
        let mut ids = model.encode(input).map_err(|m| EngineCallError::new(EngineErrorKind::Rejected, m))?;
        self.tokenize_count += 1;
        if self.drifting {
            ids.push(i64::from(self.tokenize_count));
        }
        Ok(ids)
    }

    fn drop_tokenizer(&mut self, name: &TokenizerName) -> Result<(), EngineCallError> {
        self.calls.push(EngineCall::DropTokenizer(name.to_string()));
        self.tokenizers.remove(name.as_str());
        Ok(())
    }

    fn drop_model(&mut self, name: &ModelName) -> Result<(), EngineCallError> {
        self.calls.push(EngineCall::DropModel(name.to_string()));
        self.models.remove(name.as_str());
        Ok(())
    }
}
