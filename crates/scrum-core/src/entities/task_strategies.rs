//! Task records as each mapping strategy stores them.
//!
//! The common columns live in [`TaskCore`]; what differs per strategy is
//! which subclasses it can hold and which element collection it owns.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::attachment::Attachment;
use super::task::{BugDetails, FeatureDetails, TaskCore, TaskEntity, TaskKind};
use crate::enums::TaskType;
use crate::errors::CoreError;

/// Single table: every subclass in one table, with a set of attachment names.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SingleTableTask {
    pub id: i64,
    #[serde(flatten)]
    pub core: TaskCore,
    pub kind: TaskKind,
    pub attachments: BTreeSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewSingleTableTask {
    #[serde(flatten)]
    pub core: TaskCore,
    pub kind: TaskKind,
    pub attachments: BTreeSet<String>,
}

impl NewSingleTableTask {
    #[must_use]
    pub const fn new(core: TaskCore, kind: TaskKind) -> Self {
        Self {
            core,
            kind,
            attachments: BTreeSet::new(),
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if any field breaks a rule.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.core.validate()?;
        self.kind.validate()
    }
}

/// Joined table: base row plus one subclass row, with comments keyed by author.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JoinedTableTask {
    pub id: i64,
    #[serde(flatten)]
    pub core: TaskCore,
    pub kind: TaskKind,
    /// Author → comment. One comment per author; a new one replaces the old.
    pub comments: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewJoinedTableTask {
    #[serde(flatten)]
    pub core: TaskCore,
    pub kind: TaskKind,
    pub comments: BTreeMap<String, String>,
}

impl NewJoinedTableTask {
    #[must_use]
    pub const fn new(core: TaskCore, kind: TaskKind) -> Self {
        Self {
            core,
            kind,
            comments: BTreeMap::new(),
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if any field breaks a rule.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.core.validate()?;
        self.kind.validate()
    }
}

/// A concrete subclass that can be stored on its own under the mapped
/// superclass strategy. The abstract `Task` base has no table there.
pub trait Subclass: Clone + Serialize + DeserializeOwned + JsonSchema {
    const TASK_TYPE: TaskType;

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if subclass fields are out of range.
    fn validate(&self) -> Result<(), CoreError>;
}

impl Subclass for BugDetails {
    const TASK_TYPE: TaskType = TaskType::Bug;

    fn validate(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

impl Subclass for FeatureDetails {
    const TASK_TYPE: TaskType = TaskType::Feature;

    fn validate(&self) -> Result<(), CoreError> {
        Self::validate(self)
    }
}

/// Mapped superclass: each subclass table repeats the common columns.
///
/// Ids are per subclass table, so a bug and a feature may share an id.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MappedSuperclassTask<D> {
    pub id: i64,
    #[serde(flatten)]
    pub core: TaskCore,
    pub details: D,
    pub comments: BTreeSet<String>,
}

pub type MappedBugTask = MappedSuperclassTask<BugDetails>;
pub type MappedFeatureTask = MappedSuperclassTask<FeatureDetails>;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewMappedSuperclassTask<D> {
    #[serde(flatten)]
    pub core: TaskCore,
    pub details: D,
    pub comments: BTreeSet<String>,
}

impl<D: Subclass> NewMappedSuperclassTask<D> {
    #[must_use]
    pub const fn new(core: TaskCore, details: D) -> Self {
        Self {
            core,
            details,
            comments: BTreeSet::new(),
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if any field breaks a rule.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.core.validate()?;
        self.details.validate()
    }
}

impl<D> PartialEq for MappedSuperclassTask<D> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<D> Eq for MappedSuperclassTask<D> {}

impl<D> std::hash::Hash for MappedSuperclassTask<D> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(&self.id, state);
    }
}

/// Component set: plain tasks owning a set of embedded attachment records.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ComponentSetTask {
    pub id: i64,
    #[serde(flatten)]
    pub core: TaskCore,
    pub attachments: BTreeSet<Attachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewComponentSetTask {
    #[serde(flatten)]
    pub core: TaskCore,
    pub attachments: BTreeSet<Attachment>,
}

impl NewComponentSetTask {
    #[must_use]
    pub const fn new(core: TaskCore) -> Self {
        Self {
            core,
            attachments: BTreeSet::new(),
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank title or attachment name.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.core.validate()?;
        for attachment in &self.attachments {
            crate::validate::non_blank("file_name", &attachment.file_name)?;
        }
        Ok(())
    }
}

crate::identity_eq!(SingleTableTask, JoinedTableTask, ComponentSetTask);

impl TaskEntity for SingleTableTask {
    fn id(&self) -> i64 {
        self.id
    }
    fn core(&self) -> &TaskCore {
        &self.core
    }
    fn task_type(&self) -> TaskType {
        self.kind.task_type()
    }
}

impl TaskEntity for JoinedTableTask {
    fn id(&self) -> i64 {
        self.id
    }
    fn core(&self) -> &TaskCore {
        &self.core
    }
    fn task_type(&self) -> TaskType {
        self.kind.task_type()
    }
}

impl<D: Subclass> TaskEntity for MappedSuperclassTask<D> {
    fn id(&self) -> i64 {
        self.id
    }
    fn core(&self) -> &TaskCore {
        &self.core
    }
    fn task_type(&self) -> TaskType {
        D::TASK_TYPE
    }
}

impl TaskEntity for ComponentSetTask {
    fn id(&self) -> i64 {
        self.id
    }
    fn core(&self) -> &TaskCore {
        &self.core
    }
    fn task_type(&self) -> TaskType {
        TaskType::Task
    }
}
