pub mod logging;
mod orchestrator;
mod restart;

pub use orchestrator::{PatchStatus, PatchSummary, StartupDecision, StartupOrchestrator};
pub use restart::{CurrentProcessRelauncher, Relauncher};
