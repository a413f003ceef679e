use clap::Parser;

use parity_core::constants::{DEFAULT_DETERMINISM_ROUNDS, DEFAULT_HUB_URL};

use crate::report::ReportFormat;

/// Verifica que los tokenizers importados en la base produzcan exactamente
/// los mismos ids que el tokenizer canónico del hub.
#[derive(Debug, Parser)]
#[command(name = "pgtok-parity")]
#[command(version)]
pub struct Cli {
    /// Cadena de conexión Postgres
    #[arg(long = "db-url", alias = "db_url", env = "DATABASE_URL", value_name = "URL", hide_env_values = true)]
    pub db_url: String,

    /// Escenario a correr (repetible); por defecto todos
    #[arg(long = "scenario", value_name = "NAME")]
    pub scenarios: Vec<String>,

    /// Nombre del modelo en el motor (sólo con un único escenario)
    #[arg(long, value_name = "NAME")]
    pub model_name: Option<String>,

    /// Nombre del tokenizer en el motor (sólo con un único escenario)
    #[arg(long, value_name = "NAME")]
    pub tokenizer_name: Option<String>,

    /// Hub desde el que se descargan los artifacts
    #[arg(long, env = "HF_ENDPOINT", default_value = DEFAULT_HUB_URL, value_name = "URL")]
    pub hub_url: String,

    /// Timeout HTTP en segundos; sin valor se usa el del cliente
    #[arg(long, value_name = "SECS")]
    pub http_timeout_secs: Option<u64>,

    /// Veces que se tokeniza la entrada para comprobar determinismo
    #[arg(long, default_value_t = DEFAULT_DETERMINISM_ROUNDS, value_parser = clap::value_parser!(u32).range(1..))]
    pub determinism_rounds: u32,

    /// Borrar tokenizer y modelo homónimos antes de registrar
    #[arg(long)]
    pub replace: bool,

    /// Confirmar las escrituras en el motor (por defecto todo se revierte)
    #[arg(long)]
    pub persist: bool,

    /// Borrar tokenizer y modelo al terminar
    #[arg(long, requires = "persist")]
    pub cleanup: bool,

    /// Reportar discrepancias sin fallar
    #[arg(long)]
    pub advisory: bool,

    /// Formato del reporte en stdout
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}
