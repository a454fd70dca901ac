use anyhow::bail;
use scrum_core::entities::NewSprint;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SprintCommands;
use crate::commands::shared::parse::parse_date;
use crate::commands::shared::response::Deleted;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scrum sprint`.
pub async fn handle(
    action: &SprintCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        SprintCommands::Create {
            project,
            start,
            end,
        } => {
            let new = NewSprint {
                project_id: *project,
                start_date: parse_date(start, "start")?,
                end_date: parse_date(end, "end")?,
            };
            output(&svc.create_sprint(&new).await?, flags.format)
        }
        SprintCommands::Get { id } => output(&svc.get_sprint(*id).await?, flags.format),
        SprintCommands::List { project, on } => {
            let sprints = match (project, on) {
                (Some(project_id), _) => svc.list_sprints_for_project(*project_id).await?,
                (None, Some(date)) => svc.sprints_active_on(parse_date(date, "on")?).await?,
                (None, None) => bail!("either --project or --on is required"),
            };
            output(&sprints, flags.format)
        }
        SprintCommands::Delete { id } => {
            svc.delete_sprint(*id).await?;
            output(&Deleted::new("sprint", *id), flags.format)
        }
    }
}
