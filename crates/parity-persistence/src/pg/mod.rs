//! Implementación Postgres (Diesel) de `TokenizerEngine`.
//!
//! - Una conexión por run (`PgConnection`, sin pool): el run abre la sesión
//!   después de obtener el artifact y la suelta al terminar.
//! - En `SessionMode::Rollback` la sesión entra en una transacción de test
//!   que nunca se confirma; nada de lo registrado sobrevive a la conexión.
//! - Todas las llamadas usan parámetros ligados, nunca interpolación.
//! - Cada llamada que devuelve valor exige exactamente una fila.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::{Array, Integer, Nullable, Text};
use log::{debug, info, warn};

use parity_core::{BindingExpr, EngineCallError, ModelName, RegistrationRow, TokenizerEngine, TokenizerName};

use crate::config::{DbConfig, SessionMode};
use crate::error::PersistenceError;

const CREATE_MODEL_SQL: &str = "SELECT create_huggingface_model($1, $2)::text AS result";
const CREATE_TOKENIZER_SQL: &str = "SELECT tokenizer_catalog.create_tokenizer($1, $2)";
const TOKENIZE_SQL: &str = "SELECT tokenizer_catalog.tokenize($1, $2) AS token_ids";
const DROP_TOKENIZER_SQL: &str = "SELECT tokenizer_catalog.drop_tokenizer($1)";
const DROP_MODEL_SQL: &str = "SELECT drop_huggingface_model($1)";
const EXTENSION_VERSION_SQL: &str = "SELECT extversion FROM pg_extension WHERE extname = 'pg_tokenizer'";

#[derive(QueryableByName, Debug)]
struct ResultRow {
    #[diesel(sql_type = Nullable<Text>)]
    result: Option<String>,
}

#[derive(QueryableByName, Debug)]
struct TokenIdsRow {
    #[diesel(sql_type = Nullable<Array<Nullable<Integer>>>)]
    token_ids: Option<Vec<Option<i32>>>,
}

#[derive(QueryableByName, Debug)]
struct ExtensionRow {
    #[diesel(sql_type = Text)]
    extversion: String,
}

/// Sesión sobre el motor de tokenización de una base Postgres.
pub struct PgTokenizerEngine {
    conn: PgConnection,
    mode: SessionMode,
    extension_version: Option<String>,
}

impl PgTokenizerEngine {
    /// Abre la conexión, fija el modo de sesión y sondea la extensión.
    /// Una extensión ausente sólo se advierte: el fallo real aparecerá en la
    /// primera llamada RPC con un mensaje más preciso.
    pub fn connect(cfg: &DbConfig) -> Result<Self, PersistenceError> {
        info!("opening engine session url={} mode={:?}", cfg.redacted_url(), cfg.mode);
        let mut conn = PgConnection::establish(&cfg.url)?;
        if cfg.mode == SessionMode::Rollback {
            conn.begin_test_transaction()?;
        }
        let extension_version = probe_extension(&mut conn)?;
        match &extension_version {
            Some(v) => info!("pg_tokenizer extension version {v}"),
            None => warn!("pg_tokenizer extension is not installed in this database"),
        }
        Ok(Self { conn,
                  mode: cfg.mode,
                  extension_version })
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn extension_version(&self) -> Option<&str> {
        self.extension_version.as_deref()
    }

    /// Sonda trivial de que la sesión sigue viva.
    pub fn ping(&mut self) -> Result<(), PersistenceError> {
        self.conn.batch_execute("SELECT 1;")?;
        Ok(())
    }

    fn exactly_one<T>(rows: Vec<T>, call: &str) -> Result<T, PersistenceError> {
        let count = rows.len();
        let mut rows = rows.into_iter();
        match (rows.next(), count) {
            (Some(row), 1) => Ok(row),
            _ => Err(PersistenceError::Protocol(format!("{call}: expected exactly one row, got {count}"))),
        }
    }

    fn create_model_row(&mut self, name: &ModelName, config: &str) -> Result<RegistrationRow, PersistenceError> {
        debug!("create_huggingface_model name={name} config_bytes={}", config.len());
        let rows: Vec<ResultRow> = diesel::sql_query(CREATE_MODEL_SQL).bind::<Text, _>(name.as_str())
                                                                      .bind::<Text, _>(config)
                                                                      .load(&mut self.conn)?;
        let row = Self::exactly_one(rows, "create_huggingface_model")?;
        Ok(RegistrationRow { model: name.clone(),
                             result: row.result.unwrap_or_default() })
    }

    fn tokenize_row(&mut self, input: &str, tokenizer: &TokenizerName) -> Result<Vec<i64>, PersistenceError> {
        debug!("tokenize tokenizer={tokenizer} input_chars={}", input.chars().count());
        let rows: Vec<TokenIdsRow> = diesel::sql_query(TOKENIZE_SQL).bind::<Text, _>(input)
                                                                    .bind::<Text, _>(tokenizer.as_str())
                                                                    .load(&mut self.conn)?;
        let row = Self::exactly_one(rows, "tokenize")?;
        let ids = row.token_ids
                     .ok_or_else(|| PersistenceError::Protocol("tokenize returned NULL".into()))?;
        ids.into_iter()
           .enumerate()
           .map(|(i, id)| {
               id.map(i64::from)
                 .ok_or_else(|| PersistenceError::Protocol(format!("tokenize returned NULL id at position {i}")))
           })
           .collect()
    }

    fn execute_named(&mut self, sql: &str, name: &str) -> Result<(), PersistenceError> {
        debug!("{sql} [{name}]");
        diesel::sql_query(sql).bind::<Text, _>(name).execute(&mut self.conn)?;
        Ok(())
    }
}

fn probe_extension(conn: &mut PgConnection) -> Result<Option<String>, PersistenceError> {
    let row: Option<ExtensionRow> = diesel::sql_query(EXTENSION_VERSION_SQL).get_result(conn).optional()?;
    Ok(row.map(|r| r.extversion))
}

impl TokenizerEngine for PgTokenizerEngine {
    fn create_model(&mut self, name: &ModelName, config: &str) -> Result<RegistrationRow, EngineCallError> {
        Ok(self.create_model_row(name, config)?)
    }

    fn create_tokenizer(&mut self, name: &TokenizerName, binding: &BindingExpr) -> Result<(), EngineCallError> {
        debug!("create_tokenizer name={name} binding={binding}");
        diesel::sql_query(CREATE_TOKENIZER_SQL).bind::<Text, _>(name.as_str())
                                               .bind::<Text, _>(binding.as_str())
                                               .execute(&mut self.conn)
                                               .map_err(PersistenceError::from)?;
        Ok(())
    }

    fn tokenize(&mut self, input: &str, tokenizer: &TokenizerName) -> Result<Vec<i64>, EngineCallError> {
        Ok(self.tokenize_row(input, tokenizer)?)
    }

    fn drop_tokenizer(&mut self, name: &TokenizerName) -> Result<(), EngineCallError> {
        Ok(self.execute_named(DROP_TOKENIZER_SQL, name.as_str())?)
    }

    fn drop_model(&mut self, name: &ModelName) -> Result<(), EngineCallError> {
        Ok(self.execute_named(DROP_MODEL_SQL, name.as_str())?)
    }
}

impl Drop for PgTokenizerEngine {
    fn drop(&mut self) {
        match self.mode {
            SessionMode::Rollback => info!("closing engine session (writes rolled back)"),
            SessionMode::Persist => info!("closing engine session"),
        }
    }
}
