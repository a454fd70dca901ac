use anyhow::{anyhow, bail};
use scrum_core::entities::NewUser;
use scrum_db::updates::user::UserUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::response::Deleted;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scrum user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        UserCommands::Create {
            name,
            email,
            bio,
            inactive,
        } => {
            let mut new = NewUser::new(name, email);
            new.bio.clone_from(bio);
            new.active = !inactive;
            output(&svc.create_user(&new).await?, flags.format)
        }
        UserCommands::Get { id, email } => {
            let user = match (id, email) {
                (_, Some(email)) => svc
                    .find_user_by_email(email)
                    .await?
                    .ok_or_else(|| anyhow!("no user with email '{email}'"))?,
                (Some(id), None) => svc.get_user(*id).await?,
                (None, None) => bail!("either a user ID or --email is required"),
            };
            output(&user, flags.format)
        }
        UserCommands::List { active, limit } => {
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            output(&svc.list_users(*active, limit).await?, flags.format)
        }
        UserCommands::Update {
            id,
            name,
            email,
            bio,
            clear_bio,
            active,
        } => {
            if name.is_none() && email.is_none() && bio.is_none() && !clear_bio && active.is_none() {
                bail!("At least one of --name, --email, --bio, --clear-bio or --active must be provided");
            }
            let mut builder = UserUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(email) = email {
                builder = builder.email(email);
            }
            if bio.is_some() || *clear_bio {
                builder = builder.bio(bio.clone());
            }
            if let Some(active) = active {
                builder = builder.active(*active);
            }
            output(&svc.update_user(*id, &builder.build()).await?, flags.format)
        }
        UserCommands::Delete { id } => {
            svc.delete_user(*id).await?;
            output(&Deleted::new("user", *id), flags.format)
        }
        UserCommands::Login { id } => output(&svc.record_login(*id).await?, flags.format),
    }
}
