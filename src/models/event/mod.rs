// Event module
// Canonical calendar event derived from backend records

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::utils::date::DateKey;

/// Kind of record an event was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventCategory {
    ProjectStart,
    ProjectEnd,
    Task,
    Comment,
    TimeSlot,
}

impl EventCategory {
    pub const ALL: [EventCategory; 5] = [
        Self::ProjectStart,
        Self::ProjectEnd,
        Self::Task,
        Self::Comment,
        Self::TimeSlot,
    ];

    /// Hex color tag used by every renderer.
    pub fn color(self) -> &'static str {
        match self {
            Self::ProjectStart => "#4299e1",
            Self::ProjectEnd => "#f56565",
            Self::Task => "#ed8936",
            Self::Comment => "#805ad5",
            Self::TimeSlot => "#48bb78",
        }
    }

    pub fn is_project_milestone(self) -> bool {
        matches!(self, Self::ProjectStart | Self::ProjectEnd)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ProjectStart => "project-start",
            Self::ProjectEnd => "project-end",
            Self::Task => "task",
            Self::Comment => "comment",
            Self::TimeSlot => "time-slot",
        };
        f.write_str(label)
    }
}

/// Index-based back-reference into the `RecordSet` an event was built from.
///
/// Resolve it with `RecordSet::resolve`; it is only meaningful against that
/// same record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SourceRef {
    Project { project: usize },
    Task { project: usize, task: usize },
    Comment { project: usize, comment: usize },
    TimeSlot { slot: usize, entry: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub date: DateKey,
    pub category: EventCategory,
    pub title: String,
    pub color: &'static str,
    pub time: Option<NaiveTime>,
    pub source: SourceRef,
}

impl CalendarEvent {
    /// Create an untimed event colored by its category.
    pub fn new(
        date: impl Into<DateKey>,
        category: EventCategory,
        title: impl Into<String>,
        source: SourceRef,
    ) -> Self {
        Self {
            date: date.into(),
            category,
            title: title.into(),
            color: category.color(),
            time: None,
            source,
        }
    }

    pub fn with_time(mut self, time: Option<NaiveTime>) -> Self {
        self.time = time;
        self
    }

    pub fn with_color(mut self, color: &'static str) -> Self {
        self.color = color;
        self
    }

    pub fn hour(&self) -> Option<u32> {
        self.time.map(|time| time.hour())
    }

    /// `HH:MM` label, if timed.
    pub fn time_label(&self) -> Option<String> {
        self.time.map(|time| time.format("%H:%M").to_string())
    }
}

/// Intra-day ordering: untimed events first, then ascending time-of-day.
///
/// Use with a stable sort so equal keys keep record order.
pub fn chronological(a: &CalendarEvent, b: &CalendarEvent) -> Ordering {
    a.time.cmp(&b.time)
}
