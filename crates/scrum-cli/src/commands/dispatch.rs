use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Sprint { action } => commands::sprint::handle(&action, ctx, flags).await,
        Commands::Retro { action } => commands::retro::handle(&action, ctx, flags).await,
        Commands::Task { strategy } => commands::task::handle(&strategy, ctx, flags).await,
        Commands::Export { action } => commands::export::handle(&action, ctx, flags).await,
        Commands::Csv { action } => commands::csv::handle(&action, &ctx.config, flags),
    }
}
