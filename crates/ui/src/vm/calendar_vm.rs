use chrono::{Datelike, NaiveDate};
use guidance_core::calendar::{CalendarEvent, MonthGrid};
use guidance_core::model::TopicStatus;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One event chip inside a day cell. `topic_index` resolves back to the
/// topic in the start-date-sorted sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventChipVm {
    pub topic_index: usize,
    /// "N. Title" with the 1-based position in the sequence.
    pub label: String,
    pub status_class: &'static str,
}

/// One rendered day of the month grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCellVm {
    pub day_label: String,
    pub in_month: bool,
    pub is_today: bool,
    pub events: Vec<EventChipVm>,
}

/// A month of the detail-view calendar, ready for rsx.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthVm {
    pub title: String,
    pub weeks: Vec<Vec<DayCellVm>>,
}

fn status_class(event: &CalendarEvent) -> &'static str {
    if event.overdue {
        return "event event--overdue";
    }
    match event.status {
        TopicStatus::Completed => "event event--completed",
        TopicStatus::Failed => "event event--failed",
        TopicStatus::Pending => "event event--pending",
    }
}

#[must_use]
pub fn map_month(anchor: NaiveDate, events: &[CalendarEvent], today: NaiveDate) -> MonthVm {
    let grid = MonthGrid::for_month(anchor, events);
    let title = anchor.format("%B %Y").to_string();
    let weeks = grid
        .weeks
        .iter()
        .map(|week| {
            week.iter()
                .map(|cell| DayCellVm {
                    day_label: cell.date.day().to_string(),
                    in_month: cell.in_month,
                    is_today: cell.date == today,
                    events: cell
                        .events
                        .iter()
                        .filter_map(|&i| events.get(i))
                        .map(|event| EventChipVm {
                            topic_index: event.index,
                            label: format!("{}. {}", event.index + 1, event.title),
                            status_class: status_class(event),
                        })
                        .collect(),
                })
                .collect()
        })
        .collect();
    MonthVm { title, weeks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidance_core::calendar::project_events;
    use guidance_core::model::Topic;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_title_and_week_shape() {
        let today = day(2024, 6, 10);
        let vm = map_month(today, &[], today);
        assert_eq!(vm.title, "June 2024");
        assert!(vm.weeks.len() >= 5);
        for week in &vm.weeks {
            assert_eq!(week.len(), 7);
        }
    }

    #[test]
    fn event_chip_lands_on_its_days_and_keeps_the_topic_index() {
        let today = day(2024, 6, 10);
        let mut topic = Topic::draft("Ownership", 3);
        topic.start_date = Some(day(2024, 6, 10));
        topic.end_date = Some(day(2024, 6, 12));
        let events = project_events(&[topic], today);

        let vm = map_month(today, &events, today);
        let chips: Vec<&EventChipVm> = vm
            .weeks
            .iter()
            .flatten()
            .flat_map(|cell| &cell.events)
            .collect();
        // Covers the 10th through the 12th inclusive.
        assert_eq!(chips.len(), 3);
        assert!(chips.iter().all(|c| c.topic_index == 0));
        assert_eq!(chips[0].label, "1. Ownership");
        assert!(chips.iter().all(|c| c.status_class.contains("pending")));
    }

    #[test]
    fn todays_cell_is_marked() {
        let today = day(2024, 6, 10);
        let vm = map_month(today, &[], today);
        let marked: Vec<&DayCellVm> = vm
            .weeks
            .iter()
            .flatten()
            .filter(|cell| cell.is_today)
            .collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].day_label, "10");
    }
}
