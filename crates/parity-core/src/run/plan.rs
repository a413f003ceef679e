use serde::Serialize;

use crate::check::MismatchPolicy;
use crate::constants::DEFAULT_DETERMINISM_ROUNDS;
use crate::model::{ModelName, TokenizerName};
use crate::scenario::Scenario;

/// Todo lo que un run necesita saber antes de empezar.
#[derive(Debug, Clone, Serialize)]
pub struct RunPlan {
    pub scenario: Scenario,
    pub model: ModelName,
    pub tokenizer: TokenizerName,
    /// Borrar tokenizer/modelo homónimos antes de registrar.
    pub replace_existing: bool,
    /// Borrar tokenizer/modelo al terminar (best-effort).
    pub cleanup: bool,
    pub determinism_rounds: u32,
    pub mismatch_policy: MismatchPolicy,
}

impl RunPlan {
    pub fn new(scenario: Scenario, model: ModelName, tokenizer: TokenizerName) -> Self {
        Self { scenario,
               model,
               tokenizer,
               replace_existing: false,
               cleanup: false,
               determinism_rounds: DEFAULT_DETERMINISM_ROUNDS,
               mismatch_policy: MismatchPolicy::Fail }
    }
}
