//! Calendar projection of a path's topic schedule.
//!
//! Topics map to displayable events with an inclusive start and an exclusive
//! end, carrying the topic's positional index so that selecting an event
//! resolves back to the exact topic. Index, not content: topic labels are not
//! guaranteed unique within a path.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::model::{Topic, TopicStatus};
use crate::progress::is_overdue;

//
// ─── EVENT PROJECTION ─────────────────────────────────────────────────────────
//

/// A topic rendered as a calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Position of the topic in the (start-date-sorted) sequence.
    pub index: usize,
    pub title: String,
    pub status: TopicStatus,
    pub overdue: bool,
    /// Inclusive first day.
    pub start: NaiveDate,
    /// Exclusive day after the last covered day.
    pub end: NaiveDate,
}

impl CalendarEvent {
    /// True if the event covers the given day.
    #[must_use]
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }
}

/// Projects each topic to an event.
///
/// Start defaults to `today` when absent; the end is the day after
/// `end_date` so an event spans across its final day, defaulting to the day
/// after the start.
#[must_use]
pub fn project_events(topics: &[Topic], today: NaiveDate) -> Vec<CalendarEvent> {
    topics
        .iter()
        .enumerate()
        .map(|(index, topic)| {
            let start = topic.start_date.unwrap_or(today);
            let end = topic
                .end_date
                .unwrap_or(start)
                .checked_add_days(Days::new(1))
                .unwrap_or(NaiveDate::MAX);
            CalendarEvent {
                index,
                title: topic.topic.clone(),
                status: topic.status,
                overdue: is_overdue(topic, today),
                start,
                end: end.max(start.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)),
            }
        })
        .collect()
}

//
// ─── MONTH GRID ───────────────────────────────────────────────────────────────
//

/// One day cell of a month view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading/trailing days that pad the first and last week.
    pub in_month: bool,
    /// Indices into the event slice the grid was built from.
    pub events: Vec<usize>,
}

/// A month laid out in Sunday-first weeks, with events bucketed per day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<DayCell>>,
}

impl MonthGrid {
    /// Builds the grid for the month containing `anchor`.
    ///
    /// # Panics
    ///
    /// Never panics for dates representable by `NaiveDate`.
    #[must_use]
    pub fn for_month(anchor: NaiveDate, events: &[CalendarEvent]) -> Self {
        let year = anchor.year();
        let month = anchor.month();
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .expect("first of an existing month is valid");
        let lead = u64::from(first.weekday().num_days_from_sunday());
        let mut day = first
            .checked_sub_days(Days::new(lead))
            .unwrap_or(first);

        let mut weeks = Vec::new();
        loop {
            let mut week = Vec::with_capacity(7);
            for _ in 0..7 {
                let cell_events = events
                    .iter()
                    .enumerate()
                    .filter(|(_, ev)| ev.covers(day))
                    .map(|(i, _)| i)
                    .collect();
                week.push(DayCell {
                    date: day,
                    in_month: day.year() == year && day.month() == month,
                    events: cell_events,
                });
                day = day.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
            }
            weeks.push(week);
            let past_month = day.year() > year || (day.year() == year && day.month() > month);
            if past_month && day.weekday() == Weekday::Sun {
                break;
            }
        }

        Self { year, month, weeks }
    }
}

/// First day of the month before the one containing `anchor`.
#[must_use]
pub fn prev_month(anchor: NaiveDate) -> NaiveDate {
    let (year, month) = if anchor.month() == 1 {
        (anchor.year() - 1, 12)
    } else {
        (anchor.year(), anchor.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(anchor)
}

/// First day of the month after the one containing `anchor`.
#[must_use]
pub fn next_month(anchor: NaiveDate) -> NaiveDate {
    let (year, month) = if anchor.month() == 12 {
        (anchor.year() + 1, 1)
    } else {
        (anchor.year(), anchor.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(anchor)
}
