use chrono::NaiveDate;
use guidance_core::model::LearningPath;
use guidance_core::progress::{
    Deadline, NextCheckpoint, OverallTotals, aggregate_totals, next_checkpoint, path_totals,
    upcoming_deadlines,
};

use crate::vm::time_fmt::{format_date_opt, format_datetime};

//
// ─── DASHBOARD CARDS ──────────────────────────────────────────────────────────
//

/// One path card on the dashboard grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathCardVm {
    pub id: i64,
    pub domain: String,
    pub percent: u8,
    pub progress_label: String,
    pub overdue_count: usize,
    pub created_str: Option<String>,
    pub next_label: String,
    pub next_overdue: bool,
}

impl PathCardVm {
    fn from_path(path: &LearningPath, today: NaiveDate) -> Self {
        let totals = path_totals(&path.path, today);
        let (next_label, next_overdue) = match next_checkpoint(&path.path, today) {
            NextCheckpoint::AllCompleted => ("All topics completed".to_string(), false),
            NextCheckpoint::Upcoming { label, due, overdue, .. } => (
                format!("Next: {label} (due {})", format_date_opt(due)),
                overdue,
            ),
        };
        Self {
            id: path.id,
            domain: path.domain.clone(),
            percent: totals.progress,
            progress_label: format!("{} / {} topics", totals.completed, totals.total),
            overdue_count: totals.overdue,
            created_str: path.created_at.map(format_datetime),
            next_label,
            next_overdue,
        }
    }
}

#[must_use]
pub fn map_path_cards(paths: &[LearningPath], today: NaiveDate) -> Vec<PathCardVm> {
    paths.iter().map(|p| PathCardVm::from_path(p, today)).collect()
}

//
// ─── STAT TILES ───────────────────────────────────────────────────────────────
//

/// The dashboard's headline numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatTilesVm {
    pub paths: String,
    pub topics: String,
    pub completed: String,
    pub failed: String,
    pub pending: String,
    pub progress: String,
}

#[must_use]
pub fn map_stat_tiles(paths: &[LearningPath]) -> StatTilesVm {
    let OverallTotals {
        paths,
        topics,
        completed,
        failed,
        pending,
        progress,
    } = aggregate_totals(paths);
    StatTilesVm {
        paths: paths.to_string(),
        topics: topics.to_string(),
        completed: completed.to_string(),
        failed: failed.to_string(),
        pending: pending.to_string(),
        progress: format!("{progress}%"),
    }
}

//
// ─── DEADLINES ────────────────────────────────────────────────────────────────
//

/// One row of the upcoming-deadlines list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeadlineRowVm {
    pub domain: String,
    pub topic: String,
    pub due_str: String,
    pub overdue: bool,
}

impl From<&Deadline> for DeadlineRowVm {
    fn from(deadline: &Deadline) -> Self {
        Self {
            domain: deadline.domain.clone(),
            topic: deadline.topic.clone(),
            due_str: format_date_opt(deadline.end_date),
            overdue: deadline.overdue,
        }
    }
}

/// The first `limit` pending deadlines across every path.
#[must_use]
pub fn map_deadline_rows(
    paths: &[LearningPath],
    today: NaiveDate,
    limit: usize,
) -> Vec<DeadlineRowVm> {
    upcoming_deadlines(paths, today)
        .iter()
        .take(limit)
        .map(DeadlineRowVm::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidance_core::model::{Topic, TopicStatus};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn topic(name: &str, status: TopicStatus, end: Option<NaiveDate>) -> Topic {
        let mut t = Topic::draft(name, 3);
        t.status = status;
        t.end_date = end;
        t
    }

    fn path(domain: &str, topics: Vec<Topic>) -> LearningPath {
        LearningPath {
            id: 1,
            domain: domain.to_string(),
            created_at: None,
            path: topics,
        }
    }

    #[test]
    fn card_shows_progress_and_overdue_next_topic() {
        let today = day(2024, 6, 10);
        let p = path(
            "Rust",
            vec![
                topic("Basics", TopicStatus::Completed, Some(day(2024, 6, 1))),
                topic("Ownership", TopicStatus::Pending, Some(day(2024, 6, 5))),
                topic("Traits", TopicStatus::Pending, Some(day(2024, 6, 20))),
            ],
        );
        let cards = map_path_cards(&[p], today);
        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.percent, 33);
        assert_eq!(card.progress_label, "1 / 3 topics");
        assert_eq!(card.overdue_count, 1);
        assert!(card.next_label.contains("Ownership"));
        assert!(card.next_overdue);
    }

    #[test]
    fn finished_path_card_says_so() {
        let today = day(2024, 6, 10);
        let p = path(
            "SQL",
            vec![topic("Joins", TopicStatus::Completed, None)],
        );
        let cards = map_path_cards(&[p], today);
        assert_eq!(cards[0].next_label, "All topics completed");
        assert_eq!(cards[0].percent, 100);
    }

    #[test]
    fn stat_tiles_sum_across_paths() {
        let a = path(
            "Rust",
            vec![
                topic("Basics", TopicStatus::Completed, None),
                topic("Ownership", TopicStatus::Pending, None),
            ],
        );
        let b = path("SQL", vec![topic("Joins", TopicStatus::Failed, None)]);
        let tiles = map_stat_tiles(&[a, b]);
        assert_eq!(tiles.paths, "2");
        assert_eq!(tiles.topics, "3");
        assert_eq!(tiles.completed, "1");
        assert_eq!(tiles.failed, "1");
        assert_eq!(tiles.progress, "33%");
    }

    #[test]
    fn deadline_rows_are_capped_and_ordered() {
        let today = day(2024, 6, 10);
        let p = path(
            "Rust",
            vec![
                topic("Late", TopicStatus::Pending, Some(day(2024, 6, 1))),
                topic("Soon", TopicStatus::Pending, Some(day(2024, 6, 12))),
                topic("Later", TopicStatus::Pending, Some(day(2024, 6, 30))),
            ],
        );
        let rows = map_deadline_rows(&[p], today, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].topic, "Late");
        assert!(rows[0].overdue);
        assert_eq!(rows[1].topic, "Soon");
        assert!(!rows[1].overdue);
    }
}
