use anyhow::{anyhow, bail};
use scrum_core::entities::NewRetrospective;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RetroCommands;
use crate::commands::shared::response::Deleted;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scrum retro`.
pub async fn handle(
    action: &RetroCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        RetroCommands::Create {
            sprint,
            summary,
            improvements,
            positives,
        } => {
            let new = NewRetrospective {
                sprint_id: *sprint,
                summary: summary.clone(),
                improvements: improvements.clone(),
                positives: positives.clone(),
            };
            output(&svc.create_retrospective(&new).await?, flags.format)
        }
        RetroCommands::Get { id, sprint } => {
            let retro = match (id, sprint) {
                (_, Some(sprint_id)) => svc
                    .get_retrospective_for_sprint(*sprint_id)
                    .await?
                    .ok_or_else(|| anyhow!("sprint {sprint_id} has no retrospective"))?,
                (Some(id), None) => svc.get_retrospective(*id).await?,
                (None, None) => bail!("either a retrospective ID or --sprint is required"),
            };
            output(&retro, flags.format)
        }
        RetroCommands::Delete { id } => {
            svc.delete_retrospective(*id).await?;
            output(&Deleted::new("retrospective", *id), flags.format)
        }
    }
}
