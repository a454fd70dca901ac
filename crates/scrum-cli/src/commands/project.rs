use scrum_core::entities::NewProject;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::response::{Deleted, Membership};
use crate::context::AppContext;
use crate::output::output;

/// Handle `scrum project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        ProjectCommands::Create { name, description } => {
            let new = NewProject::new(name, description.as_deref());
            output(&svc.create_project(&new).await?, flags.format)
        }
        ProjectCommands::Get { id } => output(&svc.get_project(*id).await?, flags.format),
        ProjectCommands::List { member, limit } => {
            let projects = match member {
                Some(user_id) => svc.list_projects_for_user(*user_id).await?,
                None => {
                    let limit =
                        effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
                    svc.list_projects(limit).await?
                }
            };
            output(&projects, flags.format)
        }
        ProjectCommands::Delete { id } => {
            svc.delete_project(*id).await?;
            output(&Deleted::new("project", *id), flags.format)
        }
        ProjectCommands::AddMember {
            project_id,
            user_id,
        } => {
            let changed = svc.add_member(*project_id, *user_id).await?;
            let reply = Membership {
                project_id: *project_id,
                user_id: *user_id,
                member: true,
                changed,
            };
            output(&reply, flags.format)
        }
        ProjectCommands::RemoveMember {
            project_id,
            user_id,
        } => {
            let changed = svc.remove_member(*project_id, *user_id).await?;
            let reply = Membership {
                project_id: *project_id,
                user_id: *user_id,
                member: false,
                changed,
            };
            output(&reply, flags.format)
        }
        ProjectCommands::Members { project_id } => {
            // Surface NotFound for an unknown project instead of an empty list.
            svc.get_project(*project_id).await?;
            output(&svc.list_members(*project_id).await?, flags.format)
        }
    }
}
