use std::path::Path;

use scrum_core::entities::{Project, Retrospective, SingleTableTask, Sprint, User};
use scrum_db::repos::tasks::{TaskFilter, TaskRepository};
use scrum_db::service::ScrumService;
use scrum_io::csv_store::{CsvRetrospective, CsvStore, CsvTask};
use scrum_io::xml_store::{XmlProject, XmlRetrospective, XmlSprint, XmlStore, XmlTask, XmlUser};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExportCommands;
use crate::commands::shared::response::{FileSummary, FilesWritten};
use crate::context::AppContext;
use crate::output::output;

/// No row limit when exporting.
const ALL: u32 = u32::MAX;

/// Everything the file stores hold, read from the database in one pass.
struct Snapshot {
    projects: Vec<Project>,
    users: Vec<User>,
    sprints: Vec<Sprint>,
    tasks: Vec<SingleTableTask>,
    retrospectives: Vec<Retrospective>,
}

impl Snapshot {
    async fn load(svc: &ScrumService) -> anyhow::Result<Self> {
        let projects = svc.list_projects(ALL).await?;
        let mut sprints = Vec::new();
        for project in &projects {
            sprints.extend(svc.list_sprints_for_project(project.id).await?);
        }
        sprints.sort_by_key(|sprint| sprint.id);

        Ok(Self {
            users: svc.list_users(false, ALL).await?,
            tasks: svc
                .single_table_tasks()
                .list(&TaskFilter::with_limit(ALL))
                .await?,
            retrospectives: svc.list_retrospectives(ALL).await?,
            projects,
            sprints,
        })
    }
}

/// Handle `scrum export`.
pub async fn handle(
    action: &ExportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(&ctx.service).await?;
    let storage = &ctx.config.storage;
    let reply = match action {
        ExportCommands::Csv { dir } => {
            let dir = dir.clone().unwrap_or_else(|| storage.csv_dir.clone());
            export_csv(&snapshot, &dir)?
        }
        ExportCommands::Xml { dir } => {
            let dir = dir.clone().unwrap_or_else(|| storage.xml_dir.clone());
            export_xml(&snapshot, &dir)?
        }
    };
    tracing::info!(format = reply.format, dir = %reply.dir, "export finished");
    output(&reply, flags.format)
}

fn summary(path: &Path, records: usize) -> FileSummary {
    FileSummary {
        file: path.display().to_string(),
        records,
    }
}

fn export_csv(snapshot: &Snapshot, dir: &Path) -> anyhow::Result<FilesWritten> {
    let store = CsvStore::new(dir);
    let tasks = snapshot.tasks.iter().map(CsvTask::from).collect::<Vec<_>>();
    let retrospectives = snapshot
        .retrospectives
        .iter()
        .map(CsvRetrospective::from)
        .collect::<Vec<_>>();

    store.write_all(&snapshot.projects)?;
    store.write_all(&snapshot.users)?;
    store.write_all(&snapshot.sprints)?;
    store.write_all(&tasks)?;
    store.write_all(&retrospectives)?;

    Ok(FilesWritten {
        format: "csv",
        dir: dir.display().to_string(),
        files: vec![
            summary(&store.path_for::<Project>(), snapshot.projects.len()),
            summary(&store.path_for::<User>(), snapshot.users.len()),
            summary(&store.path_for::<Sprint>(), snapshot.sprints.len()),
            summary(&store.path_for::<CsvTask>(), tasks.len()),
            summary(&store.path_for::<CsvRetrospective>(), retrospectives.len()),
        ],
    })
}

fn export_xml(snapshot: &Snapshot, dir: &Path) -> anyhow::Result<FilesWritten> {
    let store = XmlStore::new(dir);
    let files = vec![
        summary(
            &store.write_all(snapshot.projects.iter().map(XmlProject::from).collect())?,
            snapshot.projects.len(),
        ),
        summary(
            &store.write_all(snapshot.users.iter().map(XmlUser::from).collect())?,
            snapshot.users.len(),
        ),
        summary(
            &store.write_all(snapshot.sprints.iter().map(XmlSprint::from).collect())?,
            snapshot.sprints.len(),
        ),
        summary(
            &store.write_all(snapshot.tasks.iter().map(XmlTask::from).collect())?,
            snapshot.tasks.len(),
        ),
        summary(
            &store.write_all(
                snapshot
                    .retrospectives
                    .iter()
                    .map(XmlRetrospective::from)
                    .collect(),
            )?,
            snapshot.retrospectives.len(),
        ),
    ];

    Ok(FilesWritten {
        format: "xml",
        dir: dir.display().to_string(),
        files,
    })
}
