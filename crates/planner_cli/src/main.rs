//! Command-line host for `planner_core`.
//!
//! # Responsibility
//! - Load config and a JSON snapshot, then print one derived view.
//! - Keep output plain text and deterministic for a given clock.

use clap::{Parser, Subcommand};
use log::info;
use planner_core::time::label::{
    completed_group_label, completed_time_label, task_date_label, today_view_date_label,
};
use planner_core::time::is_overdue;
use planner_core::{
    init_logging_to, load_config, AreaKey, GoalListParams, Planner, PlannerConfig, ProjectId,
    ProjectListParams, Snapshot, Task, ViewContext,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "planner", version, about = "Print planner views from a snapshot")]
struct Cli {
    /// TOML config with `[logging]` and `[views]` sections.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON snapshot of areas, projects, goals and tasks.
    #[arg(long)]
    snapshot: PathBuf,

    /// Include done tasks where the view allows it.
    #[arg(long)]
    show_completed: bool,

    #[command(subcommand)]
    view: View,
}

#[derive(Subcommand)]
enum View {
    /// Due today or overdue, grouped by area.
    Today,
    /// Dated tasks by relative day.
    Upcoming,
    /// Tasks with no due date and no project.
    Inbox,
    /// Done tasks by day.
    Completed,
    /// Tasks by timeframe column.
    Kanban,
    /// Projects by status column.
    Projects,
    Goals,
    /// Tasks grouped by area.
    Areas,
    /// One project's steps with their tasks.
    Board { project: ProjectId },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PlannerConfig::default(),
    };
    init_logging_to(&config.logging.level, config.logging.target())?;

    let content = std::fs::read_to_string(&cli.snapshot)?;
    let snapshot: Snapshot = serde_json::from_str(&content)?;
    let planner = Planner::from_snapshot(snapshot, planner_core::SystemClock)?;
    info!(
        "event=cli_view module=cli status=start tasks={}",
        planner.tasks().len()
    );

    let mut params = config.views.clone();
    params.show_completed |= cli.show_completed;
    let ctx = planner.view_context();

    match cli.view {
        View::Today => {
            for group in planner.list_today(&params) {
                println!("# {}", area_heading(&ctx, group.key));
                for task in group.tasks {
                    let label = task
                        .due_date
                        .map(|due| today_view_date_label(due, ctx.now))
                        .unwrap_or_default();
                    println!("{}", task_line(task, &label, &ctx));
                }
            }
        }
        View::Upcoming => {
            for group in planner.list_upcoming(&params) {
                println!("# {}", group.key.label());
                for task in group.tasks {
                    let label = task
                        .due_date
                        .map(|due| task_date_label(due, ctx.now))
                        .unwrap_or_default();
                    println!("{}", task_line(task, &label, &ctx));
                }
            }
        }
        View::Inbox => {
            for task in planner.list_inbox(&params) {
                println!("{}", task_line(task, "", &ctx));
            }
        }
        View::Completed => {
            for group in planner.list_completed() {
                println!("# {}", completed_group_label(group.key));
                for task in group.tasks {
                    let label = task
                        .completion
                        .done_at()
                        .map(completed_time_label)
                        .unwrap_or_default();
                    println!("{}", task_line(task, &label, &ctx));
                }
            }
        }
        View::Kanban => {
            for column in planner.list_by_timeframe(&params) {
                println!("# {} ({})", column.key.label(), column.tasks.len());
                for task in column.tasks {
                    println!("{}", task_line(task, "", &ctx));
                }
            }
        }
        View::Projects => {
            let list_params = ProjectListParams {
                selected_areas: params.selected_areas.clone(),
                ..ProjectListParams::default()
            };
            for column in planner.list_projects_by_status(&list_params) {
                println!("# {} ({})", column.status.label(), column.projects.len());
                for project in column.projects {
                    let progress = project.step_progress();
                    println!("  {} {}/{}", project.title, progress.done, progress.total);
                }
            }
        }
        View::Goals => {
            let list_params = GoalListParams {
                selected_areas: params.selected_areas.clone(),
                ..GoalListParams::default()
            };
            for goal in planner.list_goals(&list_params) {
                let progress = planner.goal_progress(goal.id)?;
                println!(
                    "  {} [{:?}] {}/{} projects finished",
                    goal.title, goal.status, progress.done, progress.total
                );
            }
        }
        View::Areas => {
            for group in planner.list_by_area(&params) {
                println!("# {} ({})", area_heading(&ctx, group.key), group.tasks.len());
                for task in group.tasks {
                    println!("{}", task_line(task, "", &ctx));
                }
            }
        }
        View::Board { project } => {
            let board = planner.project_board(project, &params)?;
            println!(
                "{} steps {}/{} tasks {}/{}",
                board.project.title,
                board.step_progress.done,
                board.step_progress.total,
                board.task_progress.done,
                board.task_progress.total
            );
            for group in board.steps {
                let mark = if group.step.completed { "x" } else { " " };
                println!("# [{mark}] {}", group.step.title);
                for task in group.tasks {
                    println!("{}", task_line(task, "", &ctx));
                }
            }
            if !board.unassigned.is_empty() {
                println!("# Unassigned");
                for task in board.unassigned {
                    println!("{}", task_line(task, "", &ctx));
                }
            }
        }
    }
    Ok(())
}

fn area_heading(ctx: &ViewContext<'_>, key: AreaKey) -> String {
    match key {
        AreaKey::Area(id) => ctx
            .area(id)
            .map(|area| area.name.clone())
            .unwrap_or_else(|| id.to_string()),
        AreaKey::NoArea => "No area".to_string(),
    }
}

fn task_line(task: &Task, label: &str, ctx: &ViewContext<'_>) -> String {
    let mark = if task.cancelled().is_some() {
        "-"
    } else if task.completed().is_some() {
        "x"
    } else {
        " "
    };
    let overdue = if is_overdue(task, ctx.now) { " !" } else { "" };
    let interval = task
        .time_interval
        .map(|interval| format!(" {interval}"))
        .unwrap_or_default();
    if label.is_empty() {
        format!("  [{mark}] {}{interval}{overdue}", task.title)
    } else {
        format!("  [{mark}] {} ({label}){interval}{overdue}", task.title)
    }
}
