//! Board projection.
//!
//! [`project`] partitions requirements and tasks into four lanes under a
//! viewpoint and a date window. It is a pure function of its inputs: the
//! current user is passed in through [`BoardQuery`], never read from
//! ambient state, and every lane is ordered newest first with ties broken
//! by id so repeated calls return identical output.

use std::cmp::Reverse;

use serde::Serialize;

use crate::entities::{Requirement, Task};
use crate::enums::{TaskStatus, Viewpoint};
use crate::lifecycle::completion_days;
use crate::window::DateWindow;

/// Who is looking and over which days.
#[derive(Debug, Clone, Copy)]
pub struct BoardQuery<'a> {
    pub viewpoint: Viewpoint,
    /// The current user. Only consulted under [`Viewpoint::Personal`].
    pub user_id: &'a str,
    pub window: DateWindow,
}

impl<'a> BoardQuery<'a> {
    #[must_use]
    pub const fn team(window: DateWindow) -> Self {
        Self {
            viewpoint: Viewpoint::Team,
            user_id: "",
            window,
        }
    }

    #[must_use]
    pub const fn personal(user_id: &'a str, window: DateWindow) -> Self {
        Self {
            viewpoint: Viewpoint::Personal,
            user_id,
            window,
        }
    }

    fn keeps_requirement(&self, requirement: &Requirement) -> bool {
        if !self.window.contains(requirement.created_at) {
            return false;
        }
        match self.viewpoint {
            Viewpoint::Team => requirement.is_in_pool(),
            Viewpoint::Personal => requirement.is_pending_for(self.user_id),
        }
    }

    fn keeps_task(&self, task: &Task) -> bool {
        if !self.window.contains(task.created_at) {
            return false;
        }
        match self.viewpoint {
            Viewpoint::Team => true,
            Viewpoint::Personal => task.created_by == self.user_id,
        }
    }
}

/// Lanes of the board, each newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board<'a> {
    pub pool: Vec<&'a Requirement>,
    pub in_progress: Vec<&'a Task>,
    pub pending_confirm: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

/// Partition `requirements` and `tasks` into lanes.
#[must_use]
pub fn project<'a>(
    requirements: &'a [Requirement],
    tasks: &'a [Task],
    query: &BoardQuery<'_>,
) -> Board<'a> {
    let mut pool: Vec<&Requirement> = requirements
        .iter()
        .filter(|r| query.keeps_requirement(r))
        .collect();
    pool.sort_by(|a, b| newest_first((a.created_at, &a.id), (b.created_at, &b.id)));

    let mut board = Board {
        pool,
        in_progress: Vec::new(),
        pending_confirm: Vec::new(),
        completed: Vec::new(),
    };
    for task in tasks.iter().filter(|t| query.keeps_task(t)) {
        match task.status {
            TaskStatus::InProgress => board.in_progress.push(task),
            TaskStatus::PendingConfirm => board.pending_confirm.push(task),
            TaskStatus::Completed => board.completed.push(task),
        }
    }
    for lane in [
        &mut board.in_progress,
        &mut board.pending_confirm,
        &mut board.completed,
    ] {
        lane.sort_by(|a, b| newest_first((a.created_at, &a.id), (b.created_at, &b.id)));
    }

    tracing::debug!(
        viewpoint = %query.viewpoint,
        window = %query.window,
        pool = board.pool.len(),
        in_progress = board.in_progress.len(),
        pending_confirm = board.pending_confirm.len(),
        completed = board.completed.len(),
        "projected board"
    );
    board
}

fn newest_first<T: Ord, I: Ord>(a: (T, I), b: (T, I)) -> std::cmp::Ordering {
    (Reverse(a.0), a.1).cmp(&(Reverse(b.0), b.1))
}

/// Summary figures shown above the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub pool: usize,
    pub in_progress: usize,
    pub pending_confirm: usize,
    pub completed: usize,
    pub total_tasks: usize,
    /// Sum of per-task completion days, each rounded up.
    pub total_completion_days: i64,
    /// Average completion days, to one decimal. Zero with no completed tasks.
    pub average_completion_days: f64,
}

impl Board<'_> {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> BoardStats {
        let days: Vec<i64> = self.completed.iter().filter_map(|t| completion_days(t)).collect();
        let total_completion_days: i64 = days.iter().sum();
        let average_completion_days = if days.is_empty() {
            0.0
        } else {
            (total_completion_days as f64 / days.len() as f64 * 10.0).round() / 10.0
        };

        BoardStats {
            pool: self.pool.len(),
            in_progress: self.in_progress.len(),
            pending_confirm: self.pending_confirm.len(),
            completed: self.completed.len(),
            total_tasks: self.in_progress.len() + self.pending_confirm.len() + self.completed.len(),
            total_completion_days,
            average_completion_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dispatch::{DispatchRequest, dispatch};
    use crate::entities::AssigneeStatus;
    use crate::enums::Priority;
    use crate::ids::SequentialIds;

    fn ts(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()
    }

    fn october() -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 31).unwrap(),
        )
        .unwrap()
    }

    fn requirement(id: &str, created_at: DateTime<Utc>, assignees: &[&str]) -> Requirement {
        Requirement {
            id: id.into(),
            space_id: "spc-1".into(),
            title: format!("Requirement {id}"),
            description: "details".into(),
            priority: Priority::Medium,
            source: "manual".into(),
            source_url: None,
            image_url: None,
            document_url: None,
            created_by: "pm".into(),
            created_at,
            assignees: assignees
                .iter()
                .map(|u| AssigneeStatus::pending(*u, *u))
                .collect(),
        }
    }

    fn task(id: &str, owner: &str, status: TaskStatus, created_at: DateTime<Utc>) -> Task {
        Task {
            id: id.into(),
            space_id: "spc-1".into(),
            requirement_id: None,
            title: id.into(),
            description: String::new(),
            status,
            created_by: owner.into(),
            created_at,
            updated_at: created_at,
            completed_at: (status == TaskStatus::Completed).then(|| created_at + chrono::Duration::hours(30)),
            git_repos: vec![],
        }
    }

    fn tasks() -> Vec<Task> {
        vec![
            task("t1", "u1", TaskStatus::InProgress, ts(3, 9)),
            task("t3", "u2", TaskStatus::InProgress, ts(5, 9)),
            task("t2", "u1", TaskStatus::InProgress, ts(5, 9)),
            task("t4", "u2", TaskStatus::PendingConfirm, ts(6, 9)),
            task("t5", "u1", TaskStatus::Completed, ts(7, 9)),
            task("t6", "u1", TaskStatus::Completed, ts(8, 9)),
            task("t0", "u1", TaskStatus::InProgress, Utc.with_ymd_and_hms(2026, 9, 30, 23, 0, 0).unwrap()),
        ]
    }

    fn ids<'a>(lane: &[&'a Task]) -> Vec<&'a str> {
        lane.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn team_view_orders_newest_first_with_id_tiebreak() {
        let tasks = tasks();
        let board = project(&[], &tasks, &BoardQuery::team(october()));
        assert_eq!(ids(&board.in_progress), vec!["t2", "t3", "t1"]);
        assert_eq!(ids(&board.pending_confirm), vec!["t4"]);
        assert_eq!(ids(&board.completed), vec!["t6", "t5"]);
    }

    #[test]
    fn personal_view_keeps_own_tasks() {
        let tasks = tasks();
        let board = project(&[], &tasks, &BoardQuery::personal("u2", october()));
        assert_eq!(ids(&board.in_progress), vec!["t3"]);
        assert_eq!(ids(&board.pending_confirm), vec!["t4"]);
        assert!(board.completed.is_empty());
    }

    #[test]
    fn projection_is_pure() {
        let reqs = vec![
            requirement("r2", ts(4, 9), &["u1"]),
            requirement("r1", ts(4, 9), &["u1"]),
        ];
        let tasks = tasks();
        let query = BoardQuery::team(october());
        let first = project(&reqs, &tasks, &query);
        let second = project(&reqs, &tasks, &query);
        assert_eq!(first, second);
        let pool: Vec<&str> = first.pool.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(pool, vec!["r1", "r2"]);
    }

    #[test]
    fn dispatched_requirement_leaves_personal_pool_only() {
        let ids_gen = SequentialIds::starting_at(1);
        let mut reqs = vec![
            requirement("r1", ts(10, 9), &["u1", "u2"]),
            requirement("r-empty", ts(10, 9), &[]),
        ];
        let new_task = dispatch(&mut reqs[0], &DispatchRequest::new("u1"), &ids_gen, ts(11, 9)).unwrap();
        let tasks = vec![new_task];

        let team = project(&reqs, &tasks, &BoardQuery::team(october()));
        assert_eq!(team.pool.len(), 1);
        assert_eq!(team.pool[0].id, "r1");

        let mine = project(&reqs, &tasks, &BoardQuery::personal("u1", october()));
        assert!(mine.pool.is_empty());
        assert_eq!(mine.in_progress.len(), 1);

        let theirs = project(&reqs, &tasks, &BoardQuery::personal("u2", october()));
        assert_eq!(theirs.pool.len(), 1);
        assert!(theirs.in_progress.is_empty());
    }

    #[test]
    fn window_filters_by_creation_day() {
        let tasks = tasks();
        let board = project(&[], &tasks, &BoardQuery::team(october()));
        assert!(!ids(&board.in_progress).contains(&"t0"));
        let all = project(&[], &tasks, &BoardQuery::team(DateWindow::all_time()));
        assert!(ids(&all.in_progress).contains(&"t0"));
    }

    #[test]
    fn stats_round_days_up_and_average_to_one_decimal() {
        let mut tasks = tasks();
        tasks[5].completed_at = Some(tasks[5].created_at + chrono::Duration::hours(50));
        let board = project(&[], &tasks, &BoardQuery::team(october()));
        let stats = board.stats();
        assert_eq!(stats.total_tasks, 6);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.total_completion_days, 2 + 3);
        assert!((stats.average_completion_days - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_of_empty_board() {
        let board = project(&[], &[], &BoardQuery::team(october()));
        let stats = board.stats();
        assert_eq!(stats.total_tasks, 0);
        assert!(stats.average_completion_days.abs() < f64::EPSILON);
    }
}
