use chrono::NaiveDate;
use planner_core::{
    GoalDraft, GoalListParams, GoalStatus, ListSort, ManualClock, Planner, ProjectDraft,
    ProjectListParams, ProjectPatch, ProjectStatus, ReferenceError, StoreError, TaskDraft,
    ValidationError, ViewParams,
};
use std::collections::BTreeSet;
use uuid::Uuid;

fn planner() -> Planner<ManualClock> {
    let now = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    Planner::with_clock(ManualClock::new(now))
}

fn step_titles(planner: &Planner<ManualClock>, project: Uuid) -> Vec<(String, i64)> {
    planner
        .project(project)
        .unwrap()
        .ordered_steps()
        .iter()
        .map(|step| (step.title.clone(), step.order))
        .collect()
}

#[test]
fn add_step_appends_and_defaults_blank_titles() {
    let mut planner = planner();
    let area = planner.create_area("work", "blue").unwrap();
    let project = planner.create_project(ProjectDraft::new("Website", area)).unwrap();

    planner.add_step(project, "Research").unwrap();
    planner.add_step(project, "  ").unwrap();

    assert_eq!(
        step_titles(&planner, project),
        vec![("Research".to_string(), 1), ("New Step".to_string(), 2)]
    );
}

#[test]
fn move_step_renumbers_orders() {
    let mut planner = planner();
    let area = planner.create_area("work", "blue").unwrap();
    let project = planner.create_project(ProjectDraft::new("Website", area)).unwrap();
    planner.add_step(project, "a").unwrap();
    planner.add_step(project, "b").unwrap();
    let c = planner.add_step(project, "c").unwrap();

    planner.move_step(project, c, 0).unwrap();
    assert_eq!(
        step_titles(&planner, project),
        vec![
            ("c".to_string(), 1),
            ("a".to_string(), 2),
            ("b".to_string(), 3)
        ]
    );

    planner.move_step(project, c, 99).unwrap();
    assert_eq!(step_titles(&planner, project)[2], ("c".to_string(), 3));
}

#[test]
fn toggle_rename_and_remove_step() {
    let mut planner = planner();
    let area = planner.create_area("work", "blue").unwrap();
    let project = planner.create_project(ProjectDraft::new("Website", area)).unwrap();
    let step = planner.add_step(project, "Design").unwrap();

    assert!(planner.toggle_step(project, step).unwrap());
    assert_eq!(planner.project(project).unwrap().step_progress().done, 1);

    planner.rename_step(project, step, "Visual design").unwrap();
    assert_eq!(
        planner.rename_step(project, step, " ").unwrap_err(),
        StoreError::Validation(ValidationError::BlankTitle)
    );

    let mut draft = TaskDraft::new("mockups");
    draft.project = Some(project);
    draft.step = Some(step);
    let task = planner.create_task(draft).unwrap();

    planner.remove_step(project, step).unwrap();
    assert!(planner.project(project).unwrap().steps.is_empty());
    let task = planner.task(task).unwrap();
    assert_eq!(task.step, None);
    assert_eq!(task.project, Some(project));
}

#[test]
fn project_board_counts_done_tasks_regardless_of_show_completed() {
    let mut planner = planner();
    let area = planner.create_area("work", "blue").unwrap();
    let project = planner.create_project(ProjectDraft::new("Website", area)).unwrap();
    let step = planner.add_step(project, "Build").unwrap();
    let mut draft = TaskDraft::new("code");
    draft.project = Some(project);
    draft.step = Some(step);
    let code = planner.create_task(draft).unwrap();
    let mut draft = TaskDraft::new("deploy");
    draft.project = Some(project);
    draft.step = Some(step);
    planner.create_task(draft).unwrap();
    planner.toggle_task_done(code).unwrap();

    let board = planner.project_board(project, &ViewParams::default()).unwrap();
    assert_eq!(board.steps.len(), 1);
    assert_eq!(board.steps[0].tasks.len(), 2);
    assert_eq!(board.steps[0].progress.done, 1);
    assert_eq!(board.steps[0].tasks[1].id(), code);
}

#[test]
fn project_dates_and_area_are_validated() {
    let mut planner = planner();
    let area = planner.create_area("work", "blue").unwrap();
    let ghost = Uuid::now_v7();
    assert_eq!(
        planner.create_project(ProjectDraft::new("x", ghost)).unwrap_err(),
        StoreError::InvalidReference(ReferenceError::MissingArea(ghost))
    );

    let project = planner.create_project(ProjectDraft::new("x", area)).unwrap();
    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let err = planner
        .update_project(
            project,
            ProjectPatch {
                start_date: Some(Some(start)),
                end_date: Some(Some(end)),
                ..ProjectPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, StoreError::Validation(ValidationError::ReversedDateRange));
    assert_eq!(planner.project(project).unwrap().start_date, None);
}

#[test]
fn area_in_use_cannot_be_removed() {
    let mut planner = planner();
    let area = planner.create_area("work", "blue").unwrap();
    let project = planner.create_project(ProjectDraft::new("x", area)).unwrap();

    assert_eq!(
        planner.remove_area(area).unwrap_err(),
        StoreError::InvalidReference(ReferenceError::AreaInUse(area))
    );
    planner.remove_project(project).unwrap();
    planner.remove_area(area).unwrap();
    assert!(planner.areas().is_empty());
}

#[test]
fn goal_progress_follows_finished_projects() {
    let mut planner = planner();
    let area = planner.create_area("health", "green").unwrap();
    let run = planner.create_project(ProjectDraft::new("Run", area)).unwrap();
    let swim = planner.create_project(ProjectDraft::new("Swim", area)).unwrap();
    let goal = planner.create_goal(GoalDraft::new("Triathlon", area)).unwrap();

    assert_eq!(planner.goal_progress(goal).unwrap().total, 0);
    assert_eq!(planner.goal_progress(goal).unwrap().ratio(), 0.0);

    planner.attach_project(goal, run).unwrap();
    planner.attach_project(goal, swim).unwrap();
    planner.attach_project(goal, swim).unwrap();
    planner.update_project_status(run, ProjectStatus::Finished).unwrap();

    let progress = planner.goal_progress(goal).unwrap();
    assert_eq!((progress.done, progress.total), (1, 2));
    assert_eq!(progress.percentage(), 50.0);

    planner.detach_project(goal, swim).unwrap();
    assert!(planner.goal_progress(goal).unwrap().is_complete());

    let ghost = Uuid::now_v7();
    assert_eq!(
        planner.attach_project(goal, ghost).unwrap_err(),
        StoreError::InvalidReference(ReferenceError::MissingProject(ghost))
    );
}

#[test]
fn lists_filter_by_status_and_sort_by_start_date() {
    let mut planner = planner();
    let area = planner.create_area("work", "blue").unwrap();
    let mut late = ProjectDraft::new("late", area);
    late.start_date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0);
    planner.create_project(late).unwrap();
    planner.create_project(ProjectDraft::new("undated", area)).unwrap();
    let mut early = ProjectDraft::new("early", area);
    early.start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0);
    early.status = ProjectStatus::Active;
    planner.create_project(early).unwrap();

    let params = ProjectListParams {
        sort_by: ListSort::Date,
        ..ProjectListParams::default()
    };
    let titles = planner
        .list_projects(&params)
        .iter()
        .map(|project| project.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["early", "late", "undated"]);

    let params = ProjectListParams {
        selected_statuses: BTreeSet::from([ProjectStatus::Active]),
        ..ProjectListParams::default()
    };
    assert_eq!(planner.list_projects(&params).len(), 1);

    planner.create_goal(GoalDraft::new("g1", area)).unwrap();
    let mut active = GoalDraft::new("g2", area);
    active.status = GoalStatus::Active;
    planner.create_goal(active).unwrap();
    let params = GoalListParams {
        selected_statuses: BTreeSet::from([GoalStatus::Active]),
        ..GoalListParams::default()
    };
    let goals = planner.list_goals(&params);
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].title, "g2");
}
