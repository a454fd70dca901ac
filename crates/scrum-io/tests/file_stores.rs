//! Both stores against a realistic set of entities in a temp directory.

use std::fs;

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;

use scrum_core::entities::{
    BugDetails, Project, Retrospective, SingleTableTask, Sprint, TaskCore, TaskKind, User,
};
use scrum_core::enums::{Severity, TaskStatus, TaskType};
use scrum_io::csv_store::{CsvRetrospective, CsvStore, CsvTask};
use scrum_io::xml_store::{XmlRetrospective, XmlStore, XmlTask, XmlUser};

fn user() -> User {
    User {
        id: 1,
        name: "Grace".into(),
        email: "grace@example.com".into(),
        bio: Some("Compilers".into()),
        active: true,
        last_login: None,
        joined_at: Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap(),
    }
}

fn sprint() -> Sprint {
    Sprint {
        id: 1,
        project_id: 1,
        start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 13).unwrap(),
    }
}

fn bug() -> SingleTableTask {
    SingleTableTask {
        id: 1,
        core: TaskCore::new("Login fails")
            .with_status(TaskStatus::InProgress)
            .in_sprint(1)
            .assigned_to(1),
        kind: TaskKind::Bug(BugDetails {
            severity: Severity::Blocker,
            steps_to_reproduce: Some("Open app, press login".into()),
        }),
        attachments: ["trace.log".to_string()].into_iter().collect(),
    }
}

fn retro() -> Retrospective {
    Retrospective {
        id: 1,
        sprint_id: 1,
        summary: "Mostly smooth".into(),
        improvements: vec!["Pair on reviews".into()],
        positives: vec!["Demo landed".into(), "No overtime".into()],
    }
}

#[test]
fn csv_store_holds_every_entity() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path());
    store.initialize().unwrap();

    let project = store
        .append(Project {
            id: 0,
            name: "Atlas".into(),
            description: Some("Mapping service".into()),
        })
        .unwrap();
    assert_eq!(project.id, 1);
    store.write_all(&[user()]).unwrap();
    store.write_all(&[sprint()]).unwrap();
    store.write_all(&[CsvTask::from(&bug())]).unwrap();
    store.write_all(&[CsvRetrospective::from(&retro())]).unwrap();

    let users: Vec<User> = store.read_all().unwrap();
    assert_eq!(users[0].email, "grace@example.com");
    assert_eq!(users[0].joined_at, user().joined_at);
    assert!(users[0].last_login.is_none());

    let sprints: Vec<Sprint> = store.read_all().unwrap();
    assert_eq!(sprints[0].length_days(), 12);

    let tasks: Vec<CsvTask> = store.read_all().unwrap();
    assert_eq!(tasks[0].task_type, TaskType::Bug);
    assert_eq!(tasks[0].core(), bug().core);

    let retros: Vec<CsvRetrospective> = store.read_all().unwrap();
    let back = Retrospective::from(retros[0].clone());
    assert_eq!(back.positives, retro().positives);

    let raw = fs::read_to_string(store.path_for::<CsvRetrospective>()).unwrap();
    assert!(raw.contains("Demo landed|No overtime"), "{raw}");
}

#[test]
fn xml_store_holds_every_entity() {
    let dir = tempfile::tempdir().unwrap();
    let store = XmlStore::new(dir.path());

    store.write_all(vec![XmlUser::from(&user())]).unwrap();
    store.write_all(vec![XmlTask::from(&bug())]).unwrap();
    store
        .write_all(vec![XmlRetrospective::from(&retro())])
        .unwrap();

    let users: Vec<User> = store
        .read_all::<XmlUser>()
        .unwrap()
        .into_iter()
        .map(User::from)
        .collect();
    assert_eq!(users[0].bio.as_deref(), Some("Compilers"));
    assert_eq!(users[0].joined_at, user().joined_at);

    let tasks = store.read_all::<XmlTask>().unwrap();
    let task = SingleTableTask::try_from(tasks[0].clone()).unwrap();
    assert_eq!(task.core, bug().core);
    assert_eq!(task.kind, bug().kind);
    assert_eq!(task.attachments, bug().attachments);

    let retros = store.read_all::<XmlRetrospective>().unwrap();
    let back = Retrospective::from(retros[0].clone());
    assert_eq!(back.improvements, retro().improvements);
    assert_eq!(back.positives, retro().positives);

    let raw = fs::read_to_string(store.path_for::<XmlTask>()).unwrap();
    assert!(raw.contains(r#"<task id="1" task_type="BUG" sprint_id="1" assignee_id="1">"#), "{raw}");
    assert!(raw.contains("<attachment>trace.log</attachment>"), "{raw}");
}
