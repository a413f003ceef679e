use parity_core::{ErrorClass, ParityError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Uso inválido: {0}")]
    Usage(String),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("escenario {scenario}: {source}")]
    Run {
        scenario: String,
        #[source]
        source: ParityError,
    },
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Código de salida del proceso.
    ///
    /// | código | causa |
    /// |--------|-------|
    /// | 1 | discrepancia de paridad o tokenizer no determinista |
    /// | 2 | uso / configuración |
    /// | 3 | descarga del artifact |
    /// | 4 | conexión a la base |
    /// | 5 | llamada al motor |
    /// | 70 | error interno |
    pub fn exit_code(&self) -> i32 {
        match self {
            HarnessError::Usage(_) | HarnessError::Config(_) => 2,
            HarnessError::Run { source, .. } => match source.class() {
                ErrorClass::Mismatch => 1,
                ErrorClass::Usage => 2,
                ErrorClass::Network => 3,
                ErrorClass::Connection => 4,
                ErrorClass::Engine => 5,
                ErrorClass::Internal => 70,
            },
            HarnessError::Io(_) => 70,
        }
    }
}
