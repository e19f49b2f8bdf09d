//! Derived-state computation over learning paths.
//!
//! Everything here is a pure function over the authoritative entities: no
//! network access, no caches, no side effects. Views recompute these
//! aggregates from the current in-memory entities on every render.

use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::model::{LearningPath, Topic, TopicStatus};

//
// ─── PER-TOPIC PREDICATES ─────────────────────────────────────────────────────
//

/// True iff the topic is pending and its end date is strictly before `today`.
///
/// Comparison is calendar-date only; completed and failed topics are never
/// overdue, nor is a topic with no end date.
#[must_use]
pub fn is_overdue(topic: &Topic, today: NaiveDate) -> bool {
    topic.status == TopicStatus::Pending && topic.end_date.is_some_and(|due| due < today)
}

//
// ─── PROGRESS ─────────────────────────────────────────────────────────────────
//

/// Completed-over-total percentage, rounded half-up. Exactly 0 for an empty
/// sequence. 1/3 → 33, 2/3 → 67.
#[must_use]
pub fn progress_percent(topics: &[Topic]) -> u8 {
    let total = topics.len();
    if total == 0 {
        return 0;
    }
    let completed = completed_count(topics);
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = (100.0 * completed as f64 / total as f64).round() as u8;
    percent
}

/// Exact completed-over-total ratio in `[0, 1]`; 0.0 for an empty sequence.
///
/// The progress sort orders by this rather than the rounded percentage so
/// that paths differing by less than half a percent do not tie artificially.
#[must_use]
pub fn completion_ratio(topics: &[Topic]) -> f64 {
    if topics.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = completed_count(topics) as f64 / topics.len() as f64;
    ratio
}

#[must_use]
pub fn completed_count(topics: &[Topic]) -> usize {
    topics.iter().filter(|t| t.is_completed()).count()
}

//
// ─── NEXT CHECKPOINT ──────────────────────────────────────────────────────────
//

/// The next topic to work on within a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextCheckpoint {
    /// Every topic is completed. Label only, no due date.
    AllCompleted,
    /// First not-completed topic in sequence order.
    Upcoming {
        index: usize,
        label: String,
        due: Option<NaiveDate>,
        overdue: bool,
    },
}

/// First topic in sequence order whose status is not `Completed`.
///
/// Sequence order is authoritative here; callers sort topics by start date
/// once at load time (`sort_topics_by_start`), never per lookup.
#[must_use]
pub fn next_checkpoint(topics: &[Topic], today: NaiveDate) -> NextCheckpoint {
    topics
        .iter()
        .enumerate()
        .find(|(_, t)| !t.is_completed())
        .map_or(NextCheckpoint::AllCompleted, |(index, topic)| {
            NextCheckpoint::Upcoming {
                index,
                label: topic.topic.clone(),
                due: topic.end_date,
                overdue: is_overdue(topic, today),
            }
        })
}

//
// ─── TOTALS ───────────────────────────────────────────────────────────────────
//

/// Status counts for a single path's topic sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathTotals {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub progress: u8,
}

#[must_use]
pub fn path_totals(topics: &[Topic], today: NaiveDate) -> PathTotals {
    let mut totals = PathTotals {
        total: topics.len(),
        ..PathTotals::default()
    };
    for topic in topics {
        match topic.status {
            TopicStatus::Completed => totals.completed += 1,
            TopicStatus::Failed => totals.failed += 1,
            TopicStatus::Pending => totals.pending += 1,
        }
        if is_overdue(topic, today) {
            totals.overdue += 1;
        }
    }
    totals.progress = progress_percent(topics);
    totals
}

/// Grand totals across all of a user's paths, with overall progress computed
/// over the summed counts (same formula as per-path progress).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverallTotals {
    pub paths: usize,
    pub topics: usize,
    pub completed: usize,
    pub failed: usize,
    pub pending: usize,
    pub progress: u8,
}

#[must_use]
pub fn aggregate_totals(paths: &[LearningPath]) -> OverallTotals {
    let mut totals = OverallTotals {
        paths: paths.len(),
        ..OverallTotals::default()
    };
    for path in paths {
        totals.topics += path.path.len();
        for topic in &path.path {
            match topic.status {
                TopicStatus::Completed => totals.completed += 1,
                TopicStatus::Failed => totals.failed += 1,
                TopicStatus::Pending => totals.pending += 1,
            }
        }
    }
    if totals.topics > 0 {
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let percent = (100.0 * totals.completed as f64 / totals.topics as f64).round() as u8;
        totals.progress = percent;
    }
    totals
}

//
// ─── FILTER & SORT ────────────────────────────────────────────────────────────
//

/// Case-insensitive substring match on the path domain. An empty or
/// whitespace-only query matches everything; order is preserved.
#[must_use]
pub fn filter_by_domain(paths: &[LearningPath], query: &str) -> Vec<LearningPath> {
    let needle = query.trim().to_lowercase();
    paths
        .iter()
        .filter(|p| needle.is_empty() || p.domain.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Ordering applied to the dashboard's path list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Descending by creation time; missing timestamps sort as epoch 0.
    #[default]
    Recent,
    /// Ascending, case-insensitive, by domain.
    Alphabetical,
    /// Descending by exact completion ratio.
    Progress,
}

impl SortMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Recent => "recent",
            SortMode::Alphabetical => "alphabetical",
            SortMode::Progress => "progress",
        }
    }

    /// Parses a select-control value, defaulting to `Recent`.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        match value {
            "alphabetical" => SortMode::Alphabetical,
            "progress" => SortMode::Progress,
            _ => SortMode::Recent,
        }
    }
}

/// Sorts paths in place. All modes use a stable sort, so sorting an
/// already-sorted list is a no-op.
pub fn sort_paths(paths: &mut [LearningPath], mode: SortMode) {
    match mode {
        SortMode::Recent => {
            paths.sort_by_key(|p| Reverse(p.created_at.map_or(0, |t| t.timestamp_millis())));
        }
        SortMode::Alphabetical => {
            paths.sort_by_key(|p| p.domain.to_lowercase());
        }
        SortMode::Progress => {
            paths.sort_by(|a, b| {
                completion_ratio(&b.path).total_cmp(&completion_ratio(&a.path))
            });
        }
    }
}

/// Sorts a topic sequence by start date, in place. Topics without a start
/// date keep their relative order at the end. Applied once per load; all
/// later index-based lookups rely on this order staying put.
pub fn sort_topics_by_start(topics: &mut [Topic]) {
    topics.sort_by_key(|t| t.start_date.map_or(NaiveDate::MAX, |d| d));
}

//
// ─── DEADLINES ────────────────────────────────────────────────────────────────
//

/// A pending topic's due entry in the dashboard deadline list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deadline {
    pub domain: String,
    pub topic: String,
    pub end_date: Option<NaiveDate>,
    pub overdue: bool,
}

/// All pending topics across all paths, ascending by due date; topics with
/// no due date come last.
#[must_use]
pub fn upcoming_deadlines(paths: &[LearningPath], today: NaiveDate) -> Vec<Deadline> {
    let mut deadlines: Vec<Deadline> = paths
        .iter()
        .flat_map(|path| {
            path.path
                .iter()
                .filter(|t| t.is_pending())
                .map(|t| Deadline {
                    domain: path.domain.clone(),
                    topic: t.topic.clone(),
                    end_date: t.end_date,
                    overdue: is_overdue(t, today),
                })
        })
        .collect();
    deadlines.sort_by_key(|d| d.end_date.map_or(NaiveDate::MAX, |d| d));
    deadlines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn topic(label: &str, status: TopicStatus, end: Option<NaiveDate>) -> Topic {
        let mut t = Topic::draft(label, 1);
        t.status = status;
        t.end_date = end;
        t
    }

    fn path(id: i64, domain: &str, topics: Vec<Topic>) -> LearningPath {
        LearningPath {
            id,
            domain: domain.into(),
            created_at: None,
            path: topics,
        }
    }

    const TODAY: fn() -> NaiveDate = || date(2024, 6, 15);

    #[test]
    fn overdue_requires_pending_and_past_end_date() {
        let yesterday = date(2024, 6, 14);
        assert!(is_overdue(
            &topic("t", TopicStatus::Pending, Some(yesterday)),
            TODAY()
        ));
        // Completed topics are never overdue, regardless of end date.
        assert!(!is_overdue(
            &topic("t", TopicStatus::Completed, Some(yesterday)),
            TODAY()
        ));
        assert!(!is_overdue(
            &topic("t", TopicStatus::Failed, Some(yesterday)),
            TODAY()
        ));
        // Due today is not overdue: the comparison is strict.
        assert!(!is_overdue(
            &topic("t", TopicStatus::Pending, Some(TODAY())),
            TODAY()
        ));
        assert!(!is_overdue(&topic("t", TopicStatus::Pending, None), TODAY()));
    }

    #[test]
    fn progress_percent_rounds_half_up_and_zeroes_on_empty() {
        assert_eq!(progress_percent(&[]), 0);

        let one_of_three = vec![
            topic("a", TopicStatus::Completed, None),
            topic("b", TopicStatus::Pending, None),
            topic("c", TopicStatus::Failed, None),
        ];
        assert_eq!(progress_percent(&one_of_three), 33);

        let two_of_three = vec![
            topic("a", TopicStatus::Completed, None),
            topic("b", TopicStatus::Completed, None),
            topic("c", TopicStatus::Pending, None),
        ];
        assert_eq!(progress_percent(&two_of_three), 67);

        let half_of_eight: Vec<Topic> = (0..8)
            .map(|i| {
                topic(
                    "t",
                    if i < 4 {
                        TopicStatus::Completed
                    } else {
                        TopicStatus::Pending
                    },
                    None,
                )
            })
            .collect();
        assert_eq!(progress_percent(&half_of_eight), 50);
    }

    #[test]
    fn next_checkpoint_uses_sequence_order() {
        let topics = vec![
            topic("done", TopicStatus::Completed, None),
            topic("up next", TopicStatus::Pending, Some(date(2024, 6, 10))),
            topic("later", TopicStatus::Pending, Some(date(2024, 6, 1))),
        ];
        // The earlier-dated "later" topic must not win: position decides.
        let next = next_checkpoint(&topics, TODAY());
        assert_eq!(
            next,
            NextCheckpoint::Upcoming {
                index: 1,
                label: "up next".into(),
                due: Some(date(2024, 6, 10)),
                overdue: true,
            }
        );

        // Failed topics still need attention, so they count as "next".
        let failed_first = vec![topic("failed", TopicStatus::Failed, None)];
        assert!(matches!(
            next_checkpoint(&failed_first, TODAY()),
            NextCheckpoint::Upcoming { index: 0, .. }
        ));
    }

    #[test]
    fn all_completed_checkpoint_has_no_due_date() {
        let topics = vec![
            topic("a", TopicStatus::Completed, Some(date(2024, 1, 1))),
            topic("b", TopicStatus::Completed, Some(date(2024, 2, 1))),
        ];
        assert_eq!(next_checkpoint(&topics, TODAY()), NextCheckpoint::AllCompleted);
    }

    #[test]
    fn aggregate_totals_sums_across_paths() {
        let make = |total: usize, completed: usize| {
            (0..total)
                .map(|i| {
                    topic(
                        "t",
                        if i < completed {
                            TopicStatus::Completed
                        } else {
                            TopicStatus::Pending
                        },
                        None,
                    )
                })
                .collect::<Vec<_>>()
        };
        let paths = vec![
            path(1, "Rust", make(2, 1)),
            path(2, "Go", make(4, 2)),
            path(3, "SQL", make(6, 3)),
        ];
        let totals = aggregate_totals(&paths);
        assert_eq!(totals.paths, 3);
        assert_eq!(totals.topics, 12);
        assert_eq!(totals.completed, 6);
        assert_eq!(totals.pending, 6);
        assert_eq!(totals.failed, 0);
        assert_eq!(totals.progress, 50);
    }

    #[test]
    fn path_totals_count_overdue_pending_topics() {
        let topics = vec![
            topic("a", TopicStatus::Pending, Some(date(2024, 6, 1))),
            topic("b", TopicStatus::Completed, Some(date(2024, 6, 1))),
            topic("c", TopicStatus::Pending, Some(date(2024, 7, 1))),
        ];
        let totals = path_totals(&topics, TODAY());
        assert_eq!(totals.total, 3);
        assert_eq!(totals.overdue, 1);
        assert_eq!(totals.pending, 2);
        assert_eq!(totals.progress, 33);
    }

    #[test]
    fn empty_filter_returns_all_in_order() {
        let paths = vec![path(1, "Rust", vec![]), path(2, "Go", vec![])];
        let filtered = filter_by_domain(&paths, "");
        assert_eq!(filtered, paths);
        let filtered = filter_by_domain(&paths, "   ");
        assert_eq!(filtered, paths);
    }

    #[test]
    fn filter_matches_case_insensitive_substring() {
        let paths = vec![
            path(1, "Machine Learning", vec![]),
            path(2, "Frontend", vec![]),
        ];
        let filtered = filter_by_domain(&paths, "LEARN");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn alphabetical_sort_is_idempotent() {
        let mut paths = vec![
            path(1, "go", vec![]),
            path(2, "Rust", vec![]),
            path(3, "", vec![]),
        ];
        sort_paths(&mut paths, SortMode::Alphabetical);
        let once = paths.clone();
        sort_paths(&mut paths, SortMode::Alphabetical);
        assert_eq!(paths, once);
        assert_eq!(paths[0].domain, "");
        assert_eq!(paths[1].domain, "go");
    }

    #[test]
    fn recent_sort_treats_missing_timestamp_as_epoch() {
        let mut paths = vec![
            path(1, "old", vec![]),
            path(2, "new", vec![]),
            path(3, "undated", vec![]),
        ];
        paths[0].created_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        paths[1].created_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        sort_paths(&mut paths, SortMode::Recent);
        assert_eq!(paths[0].id, 2);
        assert_eq!(paths[1].id, 1);
        assert_eq!(paths[2].id, 3);
    }

    #[test]
    fn progress_sort_uses_exact_ratio() {
        let make = |total: usize, completed: usize| {
            (0..total)
                .map(|i| {
                    topic(
                        "t",
                        if i < completed {
                            TopicStatus::Completed
                        } else {
                            TopicStatus::Pending
                        },
                        None,
                    )
                })
                .collect::<Vec<_>>()
        };
        // 199/400 and 100/200 both round to 50%, but the ratios differ.
        let mut paths = vec![
            path(1, "a", make(400, 199)),
            path(2, "b", make(200, 100)),
            path(3, "c", vec![]),
        ];
        sort_paths(&mut paths, SortMode::Progress);
        assert_eq!(paths[0].id, 2);
        assert_eq!(paths[1].id, 1);
        // Zero topics sorts as ratio 0, last.
        assert_eq!(paths[2].id, 3);
    }

    #[test]
    fn topics_sort_by_start_date_with_undated_last() {
        let mut undated = topic("undated", TopicStatus::Pending, None);
        let mut june = topic("june", TopicStatus::Pending, None);
        june.start_date = Some(date(2024, 6, 10));
        let mut may = topic("may", TopicStatus::Pending, None);
        may.start_date = Some(date(2024, 5, 1));
        undated.start_date = None;

        let mut list = vec![undated, june, may];
        sort_topics_by_start(&mut list);
        assert_eq!(list[0].topic, "may");
        assert_eq!(list[1].topic, "june");
        assert_eq!(list[2].topic, "undated");
    }

    #[test]
    fn deadlines_list_pending_topics_ascending_by_due() {
        let mut late = topic("late", TopicStatus::Pending, Some(date(2024, 6, 1)));
        late.start_date = Some(date(2024, 5, 1));
        let soon = topic("soon", TopicStatus::Pending, Some(date(2024, 6, 20)));
        let done = topic("done", TopicStatus::Completed, Some(date(2024, 5, 1)));
        let undated = topic("undated", TopicStatus::Pending, None);
        let paths = vec![
            path(1, "Rust", vec![soon, done]),
            path(2, "Go", vec![late, undated]),
        ];
        let deadlines = upcoming_deadlines(&paths, TODAY());
        assert_eq!(deadlines.len(), 3);
        assert_eq!(deadlines[0].topic, "late");
        assert!(deadlines[0].overdue);
        assert_eq!(deadlines[1].topic, "soon");
        assert!(!deadlines[1].overdue);
        assert_eq!(deadlines[2].topic, "undated");
    }
}
