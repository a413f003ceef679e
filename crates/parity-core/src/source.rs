//! Origen de artifacts de tokenizer.
//!
//! `ArtifactSource` es la costura que separa al run de la red: la
//! implementación HTTP vive en `parity-adapters`; aquí queda una fuente en
//! memoria para tests y ejecuciones sin red.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::errors::FetchError;
use crate::model::TokenizerArtifact;

/// Obtiene el documento de configuración publicado en `url`.
///
/// Contrato: un único intento por llamada, sin reintentos; estado no exitoso
/// → `FetchError::Status`; cuerpo devuelto sin modificar.
pub trait ArtifactSource {
    fn fetch(&self, url: &str) -> Result<TokenizerArtifact, FetchError>;
}

/// Fuente en memoria: responde con documentos o errores preconfigurados por
/// URL y registra cada pedido.
#[derive(Debug, Default)]
pub struct StaticArtifactSource {
    entries: HashMap<String, Result<String, FetchError>>,
    requests: RefCell<Vec<String>>,
}

impl StaticArtifactSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, body: impl Into<String>) -> Self {
        self.entries.insert(url.to_string(), Ok(body.into()));
        self
    }

    pub fn with_failure(mut self, url: &str, error: FetchError) -> Self {
        self.entries.insert(url.to_string(), Err(error));
        self
    }

    /// URLs pedidas, en orden.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl ArtifactSource for StaticArtifactSource {
    fn fetch(&self, url: &str) -> Result<TokenizerArtifact, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        match self.entries.get(url) {
            Some(Ok(body)) => Ok(TokenizerArtifact::from_text(url, body.clone())),
            Some(Err(e)) => Err(e.clone()),
            None => Err(FetchError::Status { status: 404 }),
        }
    }
}
