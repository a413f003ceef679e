//! Run de paridad: máquina de estados lineal sobre las etapas.

mod core;
mod event;
mod plan;
mod stage;

pub use self::core::{ParityRun, RunSummary};
pub use event::{RunEvent, RunEventKind, RunLog};
pub use plan::RunPlan;
pub use stage::RunStage;
