pub mod csv;
pub mod export;
pub mod project;
pub mod retro;
pub mod sprint;
pub mod task;
pub mod user;

pub use csv::CsvCommands;
pub use export::ExportCommands;
pub use project::ProjectCommands;
pub use retro::RetroCommands;
pub use sprint::SprintCommands;
pub use task::{TaskAction, TaskCreateArgs, TaskListArgs, TaskStrategyCommands};
pub use user::UserCommands;
