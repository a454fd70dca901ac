use anyhow::{Context, bail};
use serde::Serialize;

use scrum_core::entities::{
    BugDetails, FeatureDetails, NewComponentSetTask, NewJoinedTableTask, NewMappedSuperclassTask,
    NewSingleTableTask, TaskCore, TaskKind,
};
use scrum_core::enums::{Priority, Severity, TaskStatus, TaskType};
use scrum_db::repos::tasks::{TaskFilter, TaskRepository};
use scrum_db::updates::task::TaskUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{TaskAction, TaskCreateArgs, TaskListArgs, TaskStrategyCommands};
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_attachment, parse_enum, parse_optional_enum};
use crate::commands::shared::response::Deleted;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scrum task <strategy> <action>`.
pub async fn handle(
    strategy: &TaskStrategyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    let action = strategy.action();
    let default_limit = ctx.config.general.default_limit;
    match strategy {
        TaskStrategyCommands::SingleTable { .. } => {
            run(&svc.single_table_tasks(), action, single_table, default_limit, flags).await
        }
        TaskStrategyCommands::JoinedTable { .. } => {
            run(&svc.joined_table_tasks(), action, joined_table, default_limit, flags).await
        }
        TaskStrategyCommands::MappedBug { .. } => {
            run(&svc.mapped_bug_tasks(), action, mapped_bug, default_limit, flags).await
        }
        TaskStrategyCommands::MappedFeature { .. } => {
            run(&svc.mapped_feature_tasks(), action, mapped_feature, default_limit, flags).await
        }
        TaskStrategyCommands::ComponentSet { .. } => {
            run(&svc.component_set_tasks(), action, component_set, default_limit, flags).await
        }
    }
}

async fn run<R>(
    repo: &R,
    action: &TaskAction,
    build: fn(&TaskCreateArgs) -> anyhow::Result<R::NewTask>,
    default_limit: u32,
    flags: &GlobalFlags,
) -> anyhow::Result<()>
where
    R: TaskRepository,
    R::Task: Serialize,
{
    match action {
        TaskAction::Create(args) => {
            let new = build(args)?;
            output(&repo.create(&new).await?, flags.format)
        }
        TaskAction::Get { id } => output(&repo.get(*id).await?, flags.format),
        TaskAction::List(args) => {
            let filter = filter(args, flags.limit, default_limit)?;
            output(&repo.list(&filter).await?, flags.format)
        }
        TaskAction::Status { id, status } => {
            let update = TaskUpdateBuilder::new()
                .status(parse_enum::<TaskStatus>(status, "status")?)
                .build();
            output(&repo.update(*id, &update).await?, flags.format)
        }
        TaskAction::Delete { id } => {
            repo.delete(*id).await?;
            output(&Deleted::new("task", *id), flags.format)
        }
    }
}

fn filter(args: &TaskListArgs, global_limit: Option<u32>, default_limit: u32) -> anyhow::Result<TaskFilter> {
    let mut filter = TaskFilter::with_limit(effective_limit(args.limit, global_limit, default_limit));
    if let Some(status) = parse_optional_enum::<TaskStatus>(args.status.as_deref(), "status")? {
        filter = filter.status(status);
    }
    if let Some(priority) = parse_optional_enum::<Priority>(args.priority.as_deref(), "priority")? {
        filter = filter.priority(priority);
    }
    if let Some(sprint_id) = args.sprint {
        filter = filter.sprint(sprint_id);
    }
    if let Some(assignee_id) = args.assignee {
        filter = filter.assignee(assignee_id);
    }
    Ok(filter)
}

fn core(args: &TaskCreateArgs) -> anyhow::Result<TaskCore> {
    let mut core = TaskCore::new(&args.title);
    core.description.clone_from(&args.description);
    if let Some(status) = parse_optional_enum(args.status.as_deref(), "status")? {
        core = core.with_status(status);
    }
    if let Some(priority) = parse_optional_enum(args.priority.as_deref(), "priority")? {
        core = core.with_priority(priority);
    }
    core.sprint_id = args.sprint;
    core.assignee_id = args.assignee;
    Ok(core)
}

fn bug_details(args: &TaskCreateArgs) -> anyhow::Result<BugDetails> {
    let severity = args
        .severity
        .as_deref()
        .context("bug tasks need --severity")?;
    Ok(BugDetails {
        severity: parse_enum::<Severity>(severity, "severity")?,
        steps_to_reproduce: args.steps.clone(),
    })
}

fn feature_details(args: &TaskCreateArgs) -> anyhow::Result<FeatureDetails> {
    let business_value = args
        .business_value
        .context("feature tasks need --business-value")?;
    Ok(FeatureDetails {
        business_value,
        acceptance_criteria: args.acceptance_criteria.clone(),
    })
}

/// `--type` picks the subclass, defaulting to a bug or feature when only
/// that subclass's fields were given.
fn kind(args: &TaskCreateArgs) -> anyhow::Result<TaskKind> {
    let task_type = match args.task_type.as_deref() {
        Some(raw) => parse_enum::<TaskType>(raw, "type")?,
        None if args.severity.is_some() => TaskType::Bug,
        None if args.business_value.is_some() => TaskType::Feature,
        None => TaskType::Task,
    };
    Ok(match task_type {
        TaskType::Task => TaskKind::Task,
        TaskType::Bug => TaskKind::Bug(bug_details(args)?),
        TaskType::Feature => TaskKind::Feature(feature_details(args)?),
    })
}

fn reject_subclass_type(args: &TaskCreateArgs, allowed: TaskType) -> anyhow::Result<()> {
    if let Some(raw) = args.task_type.as_deref() {
        let task_type = parse_enum::<TaskType>(raw, "type")?;
        if task_type != allowed {
            bail!("this strategy only stores {allowed} tasks, not {task_type}");
        }
    }
    Ok(())
}

fn single_table(args: &TaskCreateArgs) -> anyhow::Result<NewSingleTableTask> {
    let mut new = NewSingleTableTask::new(core(args)?, kind(args)?);
    new.attachments.extend(args.attachments.iter().cloned());
    Ok(new)
}

fn joined_table(args: &TaskCreateArgs) -> anyhow::Result<NewJoinedTableTask> {
    if !args.attachments.is_empty() {
        bail!("joined-table tasks do not take attachments");
    }
    Ok(NewJoinedTableTask::new(core(args)?, kind(args)?))
}

fn mapped_bug(args: &TaskCreateArgs) -> anyhow::Result<NewMappedSuperclassTask<BugDetails>> {
    reject_subclass_type(args, TaskType::Bug)?;
    Ok(NewMappedSuperclassTask::new(core(args)?, bug_details(args)?))
}

fn mapped_feature(
    args: &TaskCreateArgs,
) -> anyhow::Result<NewMappedSuperclassTask<FeatureDetails>> {
    reject_subclass_type(args, TaskType::Feature)?;
    Ok(NewMappedSuperclassTask::new(core(args)?, feature_details(args)?))
}

fn component_set(args: &TaskCreateArgs) -> anyhow::Result<NewComponentSetTask> {
    reject_subclass_type(args, TaskType::Task)?;
    let mut new = NewComponentSetTask::new(core(args)?);
    for spec in &args.attachments {
        new.attachments.insert(parse_attachment(spec)?);
    }
    Ok(new)
}
