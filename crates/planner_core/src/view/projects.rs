//! Project list: area/status filtering with the list sort options.

use super::filter::area_selected;
use super::{ListSort, ProjectListParams, ViewContext};
use crate::model::area::AreaId;
use crate::model::project::Project;
use crate::time::Timestamp;
use std::cmp::Ordering;

/// Filtered and stably sorted projects.
pub fn project_list<'a>(ctx: &ViewContext<'a>, params: &ProjectListParams) -> Vec<&'a Project> {
    let mut projects = ctx
        .projects
        .iter()
        .filter(|project| area_selected(&params.selected_areas, Some(project.area)))
        .filter(|project| {
            params.selected_statuses.is_empty() || params.selected_statuses.contains(&project.status)
        })
        .collect::<Vec<_>>();

    match params.sort_by {
        ListSort::None => {}
        ListSort::Status => projects.sort_by_key(|project| project.status),
        ListSort::Date => projects.sort_by(|a, b| compare_start_dates(a.start_date, b.start_date)),
        ListSort::Area => {
            projects.sort_by(|a, b| compare_area_names(ctx, a.area, b.area));
        }
    }
    projects
}

/// Earliest first; undated last.
pub(crate) fn compare_start_dates(a: Option<Timestamp>, b: Option<Timestamp>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => left.cmp(&right),
    }
}

/// Case-insensitive area name order; unresolved areas last.
pub(crate) fn compare_area_names(ctx: &ViewContext<'_>, a: AreaId, b: AreaId) -> Ordering {
    let name = |id: AreaId| ctx.area(id).map(|area| area.name.to_lowercase());
    match (name(a), name(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => left.cmp(&right),
    }
}
