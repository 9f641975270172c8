mod engine;
mod types;

pub use engine::run_simulation;
pub use types::{Inputs, MonthlyEntry, SimulationResult};
