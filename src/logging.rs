//! Logging del binario.
//!
//! Los crates de librería usan la fachada `log`; el subscriber de `tracing`
//! instalado aquí también recoge esos registros. Todo va a stderr para que
//! stdout quede sólo con el reporte.

use tracing_subscriber::EnvFilter;

/// Filtro por defecto cuando `RUST_LOG` no está definido.
pub const DEFAULT_FILTER: &str = "info";

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // Si ya había un subscriber global (tests), se conserva.
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_writer(std::io::stderr)
                                     .with_ansi(false)
                                     .try_init();
}
