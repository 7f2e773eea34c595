//! Agenda aggregation.
//!
//! Groups the events of the visible range into per-day buckets with a fixed
//! category order, and summarizes a single selected day.

use chrono::{Datelike, NaiveDate};

use crate::app::state::ProjectFilter;
use crate::models::event::{chronological, CalendarEvent, EventCategory};
use crate::services::event_index::EventIndex;
use crate::utils::date::DateRange;
use crate::utils::locale::Locale;

const DEFAULT_ACTIVITY_COLOR: &str = "#48bb78";

/// Dot colors for known time-slot activity families, first match wins.
const ACTIVITY_COLORS: [(&str, &str); 4] = [
    ("Comunidade", "#4299e1"),
    ("Tambo", "#805ad5"),
    ("Alguns", "#ed8936"),
    ("TINDESSA", "#f56565"),
];

/// Events of one day, bucketed by category.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAgenda<'a> {
    pub date: NaiveDate,
    pub project_starts: Vec<&'a CalendarEvent>,
    pub tasks: Vec<&'a CalendarEvent>,
    pub comments: Vec<&'a CalendarEvent>,
    pub project_ends: Vec<&'a CalendarEvent>,
    pub time_slots: Vec<&'a CalendarEvent>,
}

impl<'a> DayAgenda<'a> {
    fn collect(date: NaiveDate, events: &'a [CalendarEvent]) -> Self {
        let bucket = |category: EventCategory| {
            let mut bucket: Vec<&CalendarEvent> = events
                .iter()
                .filter(|event| event.category == category)
                .collect();
            bucket.sort_by(|a, b| chronological(a, b));
            bucket
        };

        Self {
            date,
            project_starts: bucket(EventCategory::ProjectStart),
            tasks: bucket(EventCategory::Task),
            comments: bucket(EventCategory::Comment),
            project_ends: bucket(EventCategory::ProjectEnd),
            time_slots: bucket(EventCategory::TimeSlot),
        }
    }

    /// Buckets in display order, skipping none.
    pub fn sections(&self) -> [(EventCategory, &[&'a CalendarEvent]); 5] {
        [
            (EventCategory::ProjectStart, self.project_starts.as_slice()),
            (EventCategory::Task, self.tasks.as_slice()),
            (EventCategory::Comment, self.comments.as_slice()),
            (EventCategory::ProjectEnd, self.project_ends.as_slice()),
            (EventCategory::TimeSlot, self.time_slots.as_slice()),
        ]
    }

    pub fn len(&self) -> usize {
        self.sections().iter().map(|(_, events)| events.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgendaView<'a> {
    /// No project filter yet; nothing has been asked of the backend.
    NoProjectSelected,
    /// A filter is active but nothing falls inside the range.
    Empty { range: DateRange },
    /// Days with at least one event, ascending.
    Days(Vec<DayAgenda<'a>>),
}

impl<'a> AgendaView<'a> {
    pub fn build(index: &'a EventIndex, range: DateRange, filter: &ProjectFilter) -> Self {
        if !filter.is_active() {
            return Self::NoProjectSelected;
        }

        let days: Vec<DayAgenda<'a>> = index
            .within(range)
            .filter(|(_, events)| !events.is_empty())
            .map(|(key, events)| DayAgenda::collect(key.date(), events))
            .collect();

        if days.is_empty() {
            Self::Empty { range }
        } else {
            Self::Days(days)
        }
    }

    /// Upper-cased month and year of the date the agenda is anchored on.
    pub fn header_label(display_date: NaiveDate, locale: Locale) -> String {
        locale
            .month_year(display_date.year(), display_date.month())
            .to_uppercase()
    }

    pub fn days(&self) -> &[DayAgenda<'a>] {
        match self {
            Self::Days(days) => days,
            _ => &[],
        }
    }
}

/// Dot color for a time-slot activity label.
pub fn activity_color(label: &str) -> &'static str {
    ACTIVITY_COLORS
        .iter()
        .find(|(family, _)| label.contains(family))
        .map_or(DEFAULT_ACTIVITY_COLOR, |(_, color)| *color)
}

/// Summary of the selected day for a details panel.
#[derive(Debug, Clone, PartialEq)]
pub enum DayDetails<'a> {
    NoSelection,
    Selected(DaySummary<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary<'a> {
    pub date: NaiveDate,
    pub project_events: Vec<&'a CalendarEvent>,
    pub time_slot_events: Vec<&'a CalendarEvent>,
    pub tasks: usize,
    pub comments: usize,
    pub total: usize,
}

impl<'a> DayDetails<'a> {
    pub fn for_selection(index: &'a EventIndex, selected: Option<NaiveDate>) -> Self {
        let Some(date) = selected else {
            return Self::NoSelection;
        };

        let events = index.events_on(date);
        let count = |category: EventCategory| {
            events
                .iter()
                .filter(|event| event.category == category)
                .count()
        };

        Self::Selected(DaySummary {
            date,
            project_events: events
                .iter()
                .filter(|event| event.category.is_project_milestone())
                .collect(),
            time_slot_events: events
                .iter()
                .filter(|event| event.category == EventCategory::TimeSlot)
                .collect(),
            tasks: count(EventCategory::Task),
            comments: count(EventCategory::Comment),
            total: events.len(),
        })
    }
}
