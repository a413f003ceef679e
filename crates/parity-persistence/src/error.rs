//! Errores de persistencia.
//! Mapea errores de Diesel / conexión a variantes semánticas y, desde ahí, a
//! `EngineCallError` que es lo que ve el run.

use diesel::result::{ConnectionError, DatabaseErrorKind, Error as DieselError};
use parity_core::{EngineCallError, EngineErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rejected by engine: {0}")]
    Rejected(String),
    #[error("unexpected result shape: {0}")]
    Protocol(String),
    #[error("unknown database error: {0}")]
    Unknown(String),
}

/// Los errores del catálogo llegan como `panic!`/`error!` del lado del
/// servidor, sin SQLSTATE específico; la categoría se infiere del mensaje.
fn classify_message(message: &str) -> PersistenceError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("already exists") {
        PersistenceError::AlreadyExists(message.to_string())
    } else if lower.contains("not found") || lower.contains("does not exist") {
        PersistenceError::NotFound(message.to_string())
    } else {
        PersistenceError::Rejected(message.to_string())
    }
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::Protocol("no rows returned".into()),
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation => Self::AlreadyExists(info.message().to_string()),
                DatabaseErrorKind::ClosedConnection => Self::Connection(info.message().to_string()),
                _ => classify_message(info.message()),
            },
            DieselError::DeserializationError(e) => Self::Protocol(format!("deser: {e}")),
            DieselError::SerializationError(e) => Self::Unknown(format!("ser: {e}")),
            DieselError::BrokenTransactionManager => Self::Connection("broken transaction manager".into()),
            DieselError::AlreadyInTransaction => Self::Unknown("already in transaction".into()),
            DieselError::QueryBuilderError(e) => Self::Unknown(format!("query builder: {e}")),
            DieselError::InvalidCString(e) => Self::Unknown(format!("invalid cstring: {e}")),
            other => Self::Unknown(format!("unhandled diesel error: {other:?}")),
        }
    }
}

impl From<ConnectionError> for PersistenceError {
    fn from(err: ConnectionError) -> Self {
        match err {
            ConnectionError::InvalidConnectionUrl(msg) => Self::Config(format!("invalid connection url: {msg}")),
            other => Self::Connection(other.to_string()),
        }
    }
}

impl From<PersistenceError> for EngineCallError {
    fn from(err: PersistenceError) -> Self {
        let kind = match &err {
            PersistenceError::Config(_) | PersistenceError::Connection(_) => EngineErrorKind::Connection,
            PersistenceError::AlreadyExists(_) => EngineErrorKind::Conflict,
            PersistenceError::NotFound(_) => EngineErrorKind::NotFound,
            PersistenceError::Rejected(_) => EngineErrorKind::Rejected,
            PersistenceError::Protocol(_) => EngineErrorKind::Protocol,
            PersistenceError::Unknown(_) => EngineErrorKind::Unknown,
        };
        EngineCallError::new(kind, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_messages_map_to_kinds() {
        let kind = |m: &str| EngineCallError::from(classify_message(m)).kind;
        assert_eq!(kind("Model already exists: model1"), EngineErrorKind::Conflict);
        assert_eq!(kind("Tokenizer not found: tok"), EngineErrorKind::NotFound);
        assert_eq!(kind("function tokenizer_catalog.tokenize(text, text) does not exist"),
                   EngineErrorKind::NotFound);
        assert_eq!(kind("invalid type: string, expected struct"), EngineErrorKind::Rejected);
    }

    #[test]
    fn missing_row_is_a_protocol_error() {
        let e = EngineCallError::from(PersistenceError::from(DieselError::NotFound));
        assert_eq!(e.kind, EngineErrorKind::Protocol);
    }

    #[test]
    fn bad_url_is_reported_as_connection_kind() {
        let e = PersistenceError::from(ConnectionError::InvalidConnectionUrl("nope".into()));
        assert!(matches!(e, PersistenceError::Config(_)));
        assert_eq!(EngineCallError::from(e).kind, EngineErrorKind::Connection);
    }
}
