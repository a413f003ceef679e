//! Expresión declarativa de binding tokenizer → modelo.
//!
//! El motor recibe la configuración del tokenizer como documento TOML
//! (`model = "<nombre>"`). La expresión se serializa con `toml` en lugar de
//! interpolar el nombre en un string, así comillas o saltos de línea en el
//! nombre nunca alteran la gramática del documento.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::names::ModelName;
use crate::errors::ParityError;

#[derive(Serialize, Deserialize)]
struct BindingDoc<'a> {
    model: &'a str,
}

/// Documento TOML ya serializado que liga un tokenizer a un modelo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingExpr {
    model: ModelName,
    text: String,
}

impl BindingExpr {
    pub fn for_model(model: &ModelName) -> Result<Self, ParityError> {
        let text = toml::to_string(&BindingDoc { model: model.as_str() })
            .map_err(|e| ParityError::InvalidName(format!("cannot encode binding for {model}: {e}")))?;
        Ok(Self { model: model.clone(),
                  text: text.trim_end().to_string() })
    }

    /// Modelo al que apunta la expresión.
    pub fn model(&self) -> &ModelName {
        &self.model
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Extrae el nombre de modelo referenciado por un documento de binding
    /// arbitrario. Lo usa el motor en memoria para resolver la dependencia.
    pub fn referenced_model(text: &str) -> Option<String> {
        let doc: toml::Value = toml::from_str(text).ok()?;
        doc.get("model")?.as_str().map(str::to_string)
    }
}

impl fmt::Display for BindingExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_model_assignment() {
        let m = ModelName::parse("model1").unwrap();
        let b = BindingExpr::for_model(&m).unwrap();
        assert_eq!(b.as_str(), r#"model = "model1""#);
        assert_eq!(b.model(), &m);
    }

    #[test]
    fn referenced_model_reads_back_the_name() {
        let m = ModelName::parse("bert_base_chinese").unwrap();
        let b = BindingExpr::for_model(&m).unwrap();
        assert_eq!(BindingExpr::referenced_model(b.as_str()).as_deref(), Some("bert_base_chinese"));
    }

    #[test]
    fn referenced_model_ignores_garbage() {
        assert_eq!(BindingExpr::referenced_model("model = "), None);
        assert_eq!(BindingExpr::referenced_model("other = \"x\""), None);
        assert_eq!(BindingExpr::referenced_model("model = 3"), None);
    }
}
