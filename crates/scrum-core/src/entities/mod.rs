//! Entity structs for all scrumkit domain objects.
//!
//! Stored entities carry a store-assigned `id` and compare by it (see
//! [`crate::identity`]). Each has a matching `New*` struct holding the
//! fields a caller supplies on insert. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema`.

mod attachment;
mod project;
mod retrospective;
mod sprint;
mod task;
mod task_strategies;
mod user;

pub use attachment::Attachment;
pub use project::{NewProject, Project};
pub use retrospective::{NewRetrospective, Retrospective};
pub use sprint::{NewSprint, Sprint};
pub use task::{BugDetails, FeatureDetails, TaskCore, TaskEntity, TaskKind};
pub use task_strategies::{
    ComponentSetTask, JoinedTableTask, MappedBugTask, MappedFeatureTask, MappedSuperclassTask,
    NewComponentSetTask, NewJoinedTableTask, NewMappedSuperclassTask, NewSingleTableTask,
    SingleTableTask, Subclass,
};
pub use user::{NewUser, User};
