mod requirement;
mod task;

pub use requirement::RequirementCommands;
pub use task::TaskCommands;
