mod engine;
mod types;

pub use engine::{HORIZON_MONTHS, project, validate};
pub use types::{GrowthInput, MonthRow, ProjectError, Projection, Summary, TurnoverPolicy};
