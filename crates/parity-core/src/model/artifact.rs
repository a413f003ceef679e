//! Artifact de tokenizer descargado del hub.
//!
//! Es un valor transitorio: lo crea el Fetcher, es inmutable y se consume al
//! entregarlo al Registrar. El contenido no se interpreta ni se valida aquí;
//! la validación estructural es responsabilidad del motor.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::FetchError;

/// Documento de configuración de tokenizer tal como se descargó.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerArtifact {
    source_url: String,
    text: String,
    sha256: String,
}

/// Datos de procedencia que sobreviven al artifact (van al reporte).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactProvenance {
    pub source_url: String,
    pub sha256: String,
    pub byte_len: usize,
}

impl TokenizerArtifact {
    /// Decodifica el cuerpo como UTF-8 sin modificarlo.
    pub fn from_bytes(source_url: impl Into<String>, bytes: Vec<u8>) -> Result<Self, FetchError> {
        let text = String::from_utf8(bytes).map_err(|e| FetchError::Decode(e.utf8_error().to_string()))?;
        Ok(Self::from_text(source_url, text))
    }

    pub fn from_text(source_url: impl Into<String>, text: String) -> Self {
        let sha256 = hex_digest(text.as_bytes());
        Self { source_url: source_url.into(),
               text,
               sha256 }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Contenido crudo; idéntico byte a byte a lo recibido.
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    pub fn provenance(&self) -> ArtifactProvenance {
        ArtifactProvenance { source_url: self.source_url.clone(),
                             sha256: self.sha256.clone(),
                             byte_len: self.text.len() }
    }
}

fn hex_digest(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
