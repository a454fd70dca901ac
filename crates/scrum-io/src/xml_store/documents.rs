//! Element types for each XML document.
//!
//! Fields renamed with `@` are attributes (ids and foreign keys). Everything
//! else is a child element. Lists are wrapped: `<positives><positive>`.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use scrum_core::entities::{
    BugDetails, FeatureDetails, Project, Retrospective, SingleTableTask, Sprint, TaskCore,
    TaskKind, User,
};
use scrum_core::enums::{Priority, Severity, TaskStatus, TaskType};

use crate::error::IoError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlProject {
    #[serde(rename = "@id")]
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Project> for XmlProject {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
        }
    }
}

impl From<XmlProject> for Project {
    fn from(xml: XmlProject) -> Self {
        Self {
            id: xml.id,
            name: xml.name,
            description: xml.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlUser {
    #[serde(rename = "@id")]
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub joined_at: DateTime<Utc>,
}

impl From<&User> for XmlUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            active: user.active,
            last_login: user.last_login,
            joined_at: user.joined_at,
        }
    }
}

impl From<XmlUser> for User {
    fn from(xml: XmlUser) -> Self {
        Self {
            id: xml.id,
            name: xml.name,
            email: xml.email,
            bio: xml.bio,
            active: xml.active,
            last_login: xml.last_login,
            joined_at: xml.joined_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlSprint {
    #[serde(rename = "@id")]
    pub id: i64,
    #[serde(rename = "@project_id")]
    pub project_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<&Sprint> for XmlSprint {
    fn from(sprint: &Sprint) -> Self {
        Self {
            id: sprint.id,
            project_id: sprint.project_id,
            start_date: sprint.start_date,
            end_date: sprint.end_date,
        }
    }
}

impl From<XmlSprint> for Sprint {
    fn from(xml: XmlSprint) -> Self {
        Self {
            id: xml.id,
            project_id: xml.project_id,
            start_date: xml.start_date,
            end_date: xml.end_date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Improvements {
    #[serde(rename = "improvement", default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Positives {
    #[serde(rename = "positive", default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlRetrospective {
    #[serde(rename = "@id")]
    pub id: i64,
    #[serde(rename = "@sprint_id")]
    pub sprint_id: i64,
    pub summary: String,
    #[serde(default)]
    pub improvements: Improvements,
    #[serde(default)]
    pub positives: Positives,
}

impl From<&Retrospective> for XmlRetrospective {
    fn from(retro: &Retrospective) -> Self {
        Self {
            id: retro.id,
            sprint_id: retro.sprint_id,
            summary: retro.summary.clone(),
            improvements: Improvements {
                items: retro.improvements.clone(),
            },
            positives: Positives {
                items: retro.positives.clone(),
            },
        }
    }
}

impl From<XmlRetrospective> for Retrospective {
    fn from(xml: XmlRetrospective) -> Self {
        Self {
            id: xml.id,
            sprint_id: xml.sprint_id,
            summary: xml.summary,
            improvements: xml.improvements.items,
            positives: xml.positives.items,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentNames {
    #[serde(rename = "attachment", default)]
    pub items: Vec<String>,
}

/// A single-table task, subclass columns included when its type has them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlTask {
    #[serde(rename = "@id")]
    pub id: i64,
    #[serde(rename = "@task_type")]
    pub task_type: TaskType,
    #[serde(rename = "@sprint_id", default, skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<i64>,
    #[serde(rename = "@assignee_id", default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_to_reproduce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_value: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_criteria: Option<String>,
    #[serde(default)]
    pub attachments: AttachmentNames,
}

impl From<&SingleTableTask> for XmlTask {
    fn from(task: &SingleTableTask) -> Self {
        let mut xml = Self {
            id: task.id,
            task_type: task.kind.task_type(),
            sprint_id: task.core.sprint_id,
            assignee_id: task.core.assignee_id,
            title: task.core.title.clone(),
            description: task.core.description.clone(),
            status: task.core.status,
            priority: task.core.priority,
            severity: None,
            steps_to_reproduce: None,
            business_value: None,
            acceptance_criteria: None,
            attachments: AttachmentNames {
                items: task.attachments.iter().cloned().collect(),
            },
        };
        match &task.kind {
            TaskKind::Task => {}
            TaskKind::Bug(bug) => {
                xml.severity = Some(bug.severity);
                xml.steps_to_reproduce.clone_from(&bug.steps_to_reproduce);
            }
            TaskKind::Feature(feature) => {
                xml.business_value = Some(feature.business_value);
                xml.acceptance_criteria
                    .clone_from(&feature.acceptance_criteria);
            }
        }
        xml
    }
}

impl TryFrom<XmlTask> for SingleTableTask {
    type Error = IoError;

    /// Fails for a bug without a severity or a feature without a business value.
    fn try_from(xml: XmlTask) -> Result<Self, IoError> {
        let kind = match xml.task_type {
            TaskType::Task => TaskKind::Task,
            TaskType::Bug => TaskKind::Bug(BugDetails {
                severity: xml.severity.ok_or_else(|| {
                    IoError::Invalid(format!("bug task {} has no severity", xml.id))
                })?,
                steps_to_reproduce: xml.steps_to_reproduce,
            }),
            TaskType::Feature => TaskKind::Feature(FeatureDetails {
                business_value: xml.business_value.ok_or_else(|| {
                    IoError::Invalid(format!("feature task {} has no business_value", xml.id))
                })?,
                acceptance_criteria: xml.acceptance_criteria,
            }),
        };
        Ok(Self {
            id: xml.id,
            core: TaskCore {
                title: xml.title,
                description: xml.description,
                status: xml.status,
                priority: xml.priority,
                sprint_id: xml.sprint_id,
                assignee_id: xml.assignee_id,
            },
            kind,
            attachments: xml.attachments.items.into_iter().collect::<BTreeSet<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feature() -> SingleTableTask {
        SingleTableTask {
            id: 9,
            core: TaskCore::new("Dark mode").assigned_to(3),
            kind: TaskKind::Feature(FeatureDetails {
                business_value: 7,
                acceptance_criteria: Some("Toggle persists".into()),
            }),
            attachments: ["mock.png".to_string()].into_iter().collect(),
        }
    }

    #[test]
    fn feature_task_keeps_subclass_fields() {
        let xml = XmlTask::from(&feature());
        assert_eq!(xml.business_value, Some(7));
        assert!(xml.severity.is_none());

        let back = SingleTableTask::try_from(xml).unwrap();
        assert_eq!(back.kind, feature().kind);
        assert_eq!(back.core, feature().core);
        assert_eq!(back.attachments, feature().attachments);
    }

    #[test]
    fn bug_without_severity_is_invalid() {
        let mut xml = XmlTask::from(&feature());
        xml.task_type = TaskType::Bug;
        let err = SingleTableTask::try_from(xml).unwrap_err();
        assert!(matches!(err, IoError::Invalid(_)), "{err:?}");
    }

    #[test]
    fn optional_foreign_keys_are_omitted() {
        let xml = XmlTask::from(&feature());
        let text = quick_xml::se::to_string(&xml).unwrap();
        assert!(text.contains(r#"assignee_id="3""#), "{text}");
        assert!(!text.contains("sprint_id"), "{text}");
    }
}
