//! Constantes compartidas por el harness.
//!
//! Los límites de nombres replican la regla del catálogo de tokenizers del
//! motor (`tokenizer_catalog`), de modo que un nombre inválido falle antes de
//! tocar red o base de datos.

/// Hub por defecto desde el que se descargan los artifacts de tokenizer.
pub const DEFAULT_HUB_URL: &str = "https://huggingface.co";

/// Revisión usada al resolver URLs de artifacts del hub.
pub const DEFAULT_REVISION: &str = "main";

/// Archivo de configuración de tokenizer dentro de un repositorio del hub.
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Longitud máxima (en bytes) de un nombre de modelo aceptado por el motor.
pub const MAX_MODEL_NAME_LEN: usize = 20;

/// Nombres que el motor reserva para sus modelos incorporados.
pub const RESERVED_MODEL_NAMES: &[&str] = &["bert", "tocken"];

/// Cantidad de rondas de tokenización por defecto para verificar determinismo.
pub const DEFAULT_DETERMINISM_ROUNDS: u32 = 2;
