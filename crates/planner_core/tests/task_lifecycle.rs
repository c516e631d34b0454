use chrono::{Duration, NaiveDate};
use planner_core::{
    Completion, EntityKind, InvalidState, ManualClock, Planner, ProjectDraft, ReferenceError,
    StoreError, TaskDraft, TaskPatch, Timestamp, ValidationError,
};
use uuid::Uuid;

fn at(day: u32, hour: u32, minute: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn planner() -> Planner<ManualClock> {
    Planner::with_clock(ManualClock::new(at(15, 9, 0)))
}

#[test]
fn toggle_cycles_open_completed_open_and_clears_cancelled() {
    let mut planner = planner();
    let id = planner.create_task(TaskDraft::new("write report")).unwrap();

    assert_eq!(
        planner.toggle_task_done(id).unwrap(),
        Completion::Completed(at(15, 9, 0))
    );
    assert_eq!(planner.toggle_task_done(id).unwrap(), Completion::Open);

    planner.clock().advance(Duration::hours(1));
    planner.cancel_task(id).unwrap();
    let task = planner.task(id).unwrap();
    assert_eq!(task.cancelled(), Some(at(15, 10, 0)));
    assert_eq!(task.completed(), None);

    assert_eq!(planner.toggle_task_done(id).unwrap(), Completion::Open);
    assert!(!planner.task(id).unwrap().is_done());
}

#[test]
fn cancelling_a_completed_task_clears_completion() {
    let mut planner = planner();
    let id = planner.create_task(TaskDraft::new("call bank")).unwrap();
    planner.toggle_task_done(id).unwrap();
    planner.cancel_task(id).unwrap();

    let task = planner.task(id).unwrap();
    assert!(task.completed().is_none());
    assert!(task.cancelled().is_some());
}

#[test]
fn patch_never_leaves_both_timestamps_set() {
    let mut planner = planner();
    let id = planner.create_task(TaskDraft::new("plan trip")).unwrap();
    planner.cancel_task(id).unwrap();

    planner
        .update_task(
            id,
            TaskPatch {
                completed: Some(Some(at(15, 12, 0))),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    let task = planner.task(id).unwrap();
    assert_eq!(task.completed(), Some(at(15, 12, 0)));
    assert_eq!(task.cancelled(), None);

    let err = planner
        .update_task(
            id,
            TaskPatch {
                title: Some("renamed".to_string()),
                completed: Some(Some(at(15, 12, 0))),
                cancelled: Some(Some(at(15, 12, 0))),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidState(InvalidState::CompletedAndCancelled)
    );
    assert_eq!(planner.task(id).unwrap().title, "plan trip");
}

#[test]
fn created_is_stamped_from_the_clock_and_titles_are_trimmed() {
    let mut planner = planner();
    let id = planner.create_task(TaskDraft::new("  water plants  ")).unwrap();
    let task = planner.task(id).unwrap();
    assert_eq!(task.title, "water plants");
    assert_eq!(task.created(), at(15, 9, 0));

    assert_eq!(
        planner.create_task(TaskDraft::new("   ")).unwrap_err(),
        StoreError::Validation(ValidationError::BlankTitle)
    );
}

#[test]
fn missing_ids_are_not_found() {
    let mut planner = planner();
    let ghost = Uuid::now_v7();
    assert_eq!(
        planner.toggle_task_done(ghost).unwrap_err(),
        StoreError::NotFound(EntityKind::Task, ghost)
    );
    assert_eq!(
        planner.remove_task(ghost).unwrap_err(),
        StoreError::NotFound(EntityKind::Task, ghost)
    );
    assert_eq!(
        planner.update_project_status(ghost, planner_core::ProjectStatus::Active).unwrap_err(),
        StoreError::NotFound(EntityKind::Project, ghost)
    );
}

#[test]
fn reassigning_a_task_moves_its_derived_area() {
    let mut planner = planner();
    let work = planner.create_area("work", "blue").unwrap();
    let health = planner.create_area("health", "green").unwrap();
    let p1 = planner.create_project(ProjectDraft::new("Launch", work)).unwrap();
    let p2 = planner.create_project(ProjectDraft::new("Marathon", health)).unwrap();

    let mut draft = TaskDraft::new("draft slides");
    draft.project = Some(p1);
    let id = planner.create_task(draft).unwrap();
    assert_eq!(planner.task_area(id).unwrap(), Some(work));

    planner.assign_task_to_project(id, Some(p2)).unwrap();
    assert_eq!(planner.task_area(id).unwrap(), Some(health));

    planner.assign_task_to_project(id, None).unwrap();
    assert_eq!(planner.task_area(id).unwrap(), None);
}

#[test]
fn moving_a_project_between_areas_moves_its_tasks() {
    let mut planner = planner();
    let work = planner.create_area("work", "blue").unwrap();
    let home = planner.create_area("home", "red").unwrap();
    let project = planner.create_project(ProjectDraft::new("Garden", work)).unwrap();
    let mut draft = TaskDraft::new("buy seeds");
    draft.project = Some(project);
    let id = planner.create_task(draft).unwrap();

    planner
        .update_project(
            project,
            planner_core::ProjectPatch {
                area: Some(home),
                ..planner_core::ProjectPatch::default()
            },
        )
        .unwrap();
    assert_eq!(planner.task_area(id).unwrap(), Some(home));
}

#[test]
fn removing_a_project_clears_task_references_and_goal_links() {
    let mut planner = planner();
    let work = planner.create_area("work", "blue").unwrap();
    let project = planner.create_project(ProjectDraft::new("Launch", work)).unwrap();
    let step = planner.add_step(project, "Research").unwrap();
    let goal = planner
        .create_goal(planner_core::GoalDraft::new("Grow", work))
        .unwrap();
    planner.attach_project(goal, project).unwrap();

    let mut draft = TaskDraft::new("interview users");
    draft.project = Some(project);
    draft.step = Some(step);
    let id = planner.create_task(draft).unwrap();

    planner.remove_project(project).unwrap();

    let task = planner.task(id).unwrap();
    assert_eq!(task.project, None);
    assert_eq!(task.step, None);
    assert_eq!(planner.task_area(id).unwrap(), None);
    assert!(planner.goal(goal).unwrap().project_ids.is_empty());
}

#[test]
fn steps_must_belong_to_the_task_project() {
    let mut planner = planner();
    let work = planner.create_area("work", "blue").unwrap();
    let p1 = planner.create_project(ProjectDraft::new("One", work)).unwrap();
    let p2 = planner.create_project(ProjectDraft::new("Two", work)).unwrap();
    let s1 = planner.add_step(p1, "first").unwrap();
    let s2 = planner.add_step(p2, "second").unwrap();

    let loose = planner.create_task(TaskDraft::new("loose")).unwrap();
    assert_eq!(
        planner.assign_task_to_step(loose, Some(s1)).unwrap_err(),
        StoreError::InvalidReference(ReferenceError::StepWithoutProject(s1))
    );

    planner.assign_task_to_project(loose, Some(p1)).unwrap();
    assert_eq!(
        planner.assign_task_to_step(loose, Some(s2)).unwrap_err(),
        StoreError::InvalidReference(ReferenceError::StepNotInProject {
            step: s2,
            project: p1
        })
    );
    planner.assign_task_to_step(loose, Some(s1)).unwrap();
    assert_eq!(planner.task(loose).unwrap().step, Some(s1));

    planner.assign_task_to_project(loose, Some(p1)).unwrap();
    assert_eq!(planner.task(loose).unwrap().step, Some(s1));

    planner.assign_task_to_project(loose, Some(p2)).unwrap();
    assert_eq!(planner.task(loose).unwrap().step, None);
}

#[test]
fn unknown_project_reference_is_rejected_without_change() {
    let mut planner = planner();
    let id = planner.create_task(TaskDraft::new("t")).unwrap();
    let ghost = Uuid::now_v7();
    assert_eq!(
        planner.assign_task_to_project(id, Some(ghost)).unwrap_err(),
        StoreError::InvalidReference(ReferenceError::MissingProject(ghost))
    );
    assert_eq!(planner.task(id).unwrap().project, None);
}

#[test]
fn clearing_the_due_date_drops_the_interval() {
    let mut planner = planner();
    let id = planner.create_task(TaskDraft::new("dentist")).unwrap();
    let due = planner_core::time::encode_due_date_time(
        NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
        Some(chrono::NaiveTime::from_hms_opt(14, 0, 0).unwrap()),
        Some(chrono::NaiveTime::from_hms_opt(15, 0, 0).unwrap()),
    )
    .unwrap();
    planner.update_task_due_date(id, Some(due)).unwrap();
    let task = planner.task(id).unwrap();
    assert_eq!(task.due_date, Some(at(16, 14, 0)));
    assert_eq!(task.time_interval.unwrap().to_string(), "14:00-15:00");

    planner.update_task_due_date(id, None).unwrap();
    let task = planner.task(id).unwrap();
    assert_eq!(task.due_date, None);
    assert_eq!(task.time_interval, None);
}

#[test]
fn due_interval_must_start_at_the_due_time() {
    let mut planner = planner();
    let id = planner.create_task(TaskDraft::new("standup")).unwrap();

    assert_eq!(
        planner_core::DueDateTime::decode(at(20, 0, 0), Some("09:00")).unwrap_err(),
        ValidationError::IntervalStartMismatch {
            due: "2024-01-20T00:00".to_string(),
            interval: "09:00".to_string(),
        }
    );
    assert!(planner_core::DueDateTime::decode(at(20, 14, 0), Some("09:00-10:00")).is_err());

    let due = planner_core::DueDateTime::decode(at(20, 9, 0), Some("09:00")).unwrap();
    planner.update_task_due_date(id, Some(due)).unwrap();
    let task = planner.task(id).unwrap();
    assert_eq!(task.due_date, Some(at(20, 9, 0)));
    assert_eq!(task.time_interval.unwrap().to_string(), "09:00");
    assert_eq!(task.due(), Some(due));
}
