//! Hourly grids for the day and week views.

use chrono::NaiveDate;

use crate::models::event::CalendarEvent;
use crate::services::event_index::EventIndex;
use crate::utils::date::{days_inclusive, week_bounds};

pub const HOURS_PER_DAY: usize = 24;

/// `00:00` through `23:00`.
pub fn hour_labels() -> Vec<String> {
    (0..HOURS_PER_DAY).map(|hour| format!("{:02}:00", hour)).collect()
}

/// One date's events split into untimed ones and 24 hour slots.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    /// Events without a time-of-day, in index order.
    pub untimed: Vec<&'a CalendarEvent>,
    /// `slots[h]` holds the events whose time-of-day falls in hour `h`.
    pub slots: Vec<Vec<&'a CalendarEvent>>,
}

impl<'a> DayColumn<'a> {
    pub fn new(
        index: &'a EventIndex,
        date: NaiveDate,
        selected: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        let mut column = Self {
            date,
            is_today: date == today,
            is_selected: selected == Some(date),
            untimed: Vec::new(),
            slots: vec![Vec::new(); HOURS_PER_DAY],
        };

        for event in index.events_on(date) {
            match event.hour() {
                Some(hour) => column.slots[hour as usize].push(event),
                None => column.untimed.push(event),
            }
        }

        column
    }

    pub fn events_at(&self, hour: u32) -> &[&'a CalendarEvent] {
        self.slots
            .get(hour as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn event_count(&self) -> usize {
        self.untimed.len() + self.slots.iter().map(Vec::len).sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid<'a> {
    pub hour_labels: Vec<String>,
    pub columns: Vec<DayColumn<'a>>,
}

impl<'a> TimeGrid<'a> {
    fn from_dates(
        index: &'a EventIndex,
        dates: impl IntoIterator<Item = NaiveDate>,
        selected: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        Self {
            hour_labels: hour_labels(),
            columns: dates
                .into_iter()
                .map(|date| DayColumn::new(index, date, selected, today))
                .collect(),
        }
    }
}

/// Seven columns, Monday through Sunday of the week containing `focus`;
/// fewer when the week runs past the end of the calendar.
pub fn week_grid(
    index: &EventIndex,
    focus: NaiveDate,
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> TimeGrid<'_> {
    let (start, end) = week_bounds(focus);
    TimeGrid::from_dates(index, days_inclusive(start, end), selected, today)
}

/// A single column for `focus`.
pub fn day_grid(
    index: &EventIndex,
    focus: NaiveDate,
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> TimeGrid<'_> {
    TimeGrid::from_dates(index, [focus], selected, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{ProjectRecord, RecordId, RecordSet, TaskRecord};
    use crate::models::settings::SpanPolicy;
    use crate::services::event_index::EventIndexBuilder;
    use chrono::Weekday;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_index() -> EventIndex {
        let mut project = ProjectRecord::new("1", "Portal");
        project.start = Some("2024-06-12".into());
        project.tasks = vec![
            TaskRecord {
                id: RecordId::new("t1"),
                project_id: None,
                name: "Kickoff".into(),
                description: None,
                status: None,
                started_at: Some("2024-06-12 09:30:00".into()),
            },
            TaskRecord {
                id: RecordId::new("t2"),
                project_id: None,
                name: "Review".into(),
                description: None,
                status: None,
                started_at: Some("2024-06-12 09:05:00".into()),
            },
        ];
        EventIndexBuilder::new(SpanPolicy::Point).build(&RecordSet {
            projects: vec![project],
            ..RecordSet::default()
        })
    }

    #[test]
    fn test_hour_labels() {
        let labels = hour_labels();
        assert_eq!(labels.len(), 24);
        assert_eq!(labels[0], "00:00");
        assert_eq!(labels[9], "09:00");
        assert_eq!(labels[23], "23:00");
    }

    #[test]
    fn test_week_runs_monday_to_sunday() {
        let index = EventIndex::empty(SpanPolicy::Point);
        let grid = week_grid(&index, date(2024, 6, 16), None, date(2024, 6, 12));

        assert_eq!(grid.columns.len(), 7);
        assert_eq!(grid.columns[0].date, date(2024, 6, 10));
        assert_eq!(grid.columns[0].date.weekday(), Weekday::Mon);
        assert_eq!(grid.columns[6].date, date(2024, 6, 16));
        assert!(grid.columns[2].is_today);
    }

    #[test]
    fn test_week_grid_stops_at_calendar_end() {
        let index = EventIndex::empty(SpanPolicy::Point);
        let grid = week_grid(&index, NaiveDate::MAX, None, date(2024, 6, 12));

        assert!(!grid.columns.is_empty());
        assert!(grid.columns.len() <= 7);
        assert_eq!(grid.columns.last().map(|column| column.date), Some(NaiveDate::MAX));
    }

    #[test]
    fn test_timed_events_land_in_hour_slots() {
        let index = sample_index();
        let grid = day_grid(&index, date(2024, 6, 12), Some(date(2024, 6, 12)), date(2024, 1, 1));

        assert_eq!(grid.columns.len(), 1);
        let column = &grid.columns[0];
        assert!(column.is_selected);
        assert!(!column.is_today);

        let at_nine: Vec<&str> = column.events_at(9).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(at_nine, vec!["Review", "Kickoff"]);
        assert!(column.events_at(10).is_empty());
        assert!(column.events_at(99).is_empty());
    }

    #[test]
    fn test_untimed_events_are_kept_apart() {
        let index = sample_index();
        let grid = week_grid(&index, date(2024, 6, 12), None, date(2024, 1, 1));

        let wednesday = &grid.columns[2];
        assert_eq!(wednesday.untimed.len(), 1);
        assert_eq!(wednesday.untimed[0].title, "Início: Portal");
        assert_eq!(wednesday.event_count(), 3);
        assert_eq!(grid.columns[0].event_count(), 0);
    }
}
