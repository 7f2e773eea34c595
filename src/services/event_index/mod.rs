//! Event index construction.
//!
//! Normalizes the backend's projects (with their tasks and comments) and the
//! legacy time slots into one date-keyed index of [`CalendarEvent`]s. The
//! index is always rebuilt from scratch for a record set; nothing patches it
//! in place.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::event::{chronological, CalendarEvent, EventCategory, SourceRef};
use crate::models::record::{ProjectRecord, RecordSet, TimeSlotRecord};
use crate::models::settings::{Settings, SpanPolicy};
use crate::utils::date::{
    days_inclusive, parse_date_part, parse_time_of_day, parse_timestamp_time, DateKey, DateRange,
};
use crate::utils::locale::Locale;

/// Longest comment excerpt used as an event title.
const COMMENT_TITLE_CHARS: usize = 80;

/// A single record whose date could not be used. Never aborts a build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{record} has an invalid {field} '{value}'")]
    InvalidDate {
        record: String,
        field: &'static str,
        value: String,
    },
}

/// Counters collected while building an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub events: usize,
    pub skipped_records: usize,
    /// Projects that were asked for range expansion but fell back to points.
    pub range_fallbacks: usize,
}

/// Date key → events on that day, ordered untimed-first then by time-of-day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventIndex {
    policy: SpanPolicy,
    days: BTreeMap<DateKey, Vec<CalendarEvent>>,
}

impl EventIndex {
    pub fn empty(policy: SpanPolicy) -> Self {
        Self {
            policy,
            days: BTreeMap::new(),
        }
    }

    /// Span policy this index was built with.
    pub fn policy(&self) -> SpanPolicy {
        self.policy
    }

    pub fn get(&self, key: &DateKey) -> &[CalendarEvent] {
        self.days.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn events_on(&self, date: NaiveDate) -> &[CalendarEvent] {
        self.get(&DateKey::new(date))
    }

    pub fn has_events(&self, date: NaiveDate) -> bool {
        !self.events_on(date).is_empty()
    }

    /// Number of distinct days with at least one event.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn total_events(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &DateKey> {
        self.days.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &[CalendarEvent])> {
        self.days.iter().map(|(key, events)| (key, events.as_slice()))
    }

    /// Days inside `range`, ascending.
    pub fn within(&self, range: DateRange) -> impl Iterator<Item = (&DateKey, &[CalendarEvent])> {
        let start = range.start.min(range.end);
        let end = range.start.max(range.end);
        let bounds = DateKey::new(start)..=DateKey::new(end);
        self.days
            .range(bounds)
            .map(|(key, events)| (key, events.as_slice()))
    }
}

pub struct EventIndexBuilder {
    policy: SpanPolicy,
    locale: Locale,
    max_range_days: u32,
}

impl EventIndexBuilder {
    pub fn new(policy: SpanPolicy) -> Self {
        Self {
            policy,
            locale: Locale::default(),
            max_range_days: Settings::default().max_range_days,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            policy: settings.span_policy,
            locale: settings.locale,
            max_range_days: settings.max_range_days,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_max_range_days(mut self, max_range_days: u32) -> Self {
        self.max_range_days = max_range_days.max(1);
        self
    }

    pub fn policy(&self) -> SpanPolicy {
        self.policy
    }

    pub fn build(&self, records: &RecordSet) -> EventIndex {
        self.build_with_report(records).0
    }

    pub fn build_with_report(&self, records: &RecordSet) -> (EventIndex, BuildReport) {
        let mut collector = Collector::new(self.policy);

        for (index, project) in records.projects.iter().enumerate() {
            self.collect_project(&mut collector, index, project);
        }

        for (index, slot) in records.time_slots.iter().enumerate() {
            self.collect_time_slot(&mut collector, index, slot);
        }

        let (index, report) = collector.finish();
        log::debug!(
            "Built event index: {} events on {} days ({} policy, {} records skipped)",
            report.events,
            index.len(),
            index.policy(),
            report.skipped_records
        );
        (index, report)
    }

    fn collect_project(&self, collector: &mut Collector, index: usize, project: &ProjectRecord) {
        self.collect_milestones(collector, index, project);

        for (task_index, task) in project.tasks.iter().enumerate() {
            let label = format!("task {} of project {}", task.id, project.id);
            let Some(date) = collector.date_field(&label, "data_criacao", task.started_at.as_deref())
            else {
                continue;
            };
            let time = task.started_at.as_deref().and_then(parse_timestamp_time);
            collector.push(
                CalendarEvent::new(
                    date,
                    EventCategory::Task,
                    task.name.clone(),
                    SourceRef::Task {
                        project: index,
                        task: task_index,
                    },
                )
                .with_time(time),
            );
        }

        for (comment_index, comment) in project.comments.iter().enumerate() {
            let label = format!("comment {} of project {}", comment.id, project.id);
            let Some(date) = collector.date_field(&label, "data", comment.created_at.as_deref())
            else {
                continue;
            };
            let time = comment.created_at.as_deref().and_then(parse_timestamp_time);
            collector.push(
                CalendarEvent::new(
                    date,
                    EventCategory::Comment,
                    comment_title(&comment.author, &comment.text),
                    SourceRef::Comment {
                        project: index,
                        comment: comment_index,
                    },
                )
                .with_time(time),
            );
        }
    }

    fn collect_milestones(&self, collector: &mut Collector, index: usize, project: &ProjectRecord) {
        let label = format!("project {}", project.id);
        let start = collector.date_field(&label, "data_inicio", project.start.as_deref());
        let end = collector.date_field(&label, "data_fim", project.end.as_deref());
        let source = SourceRef::Project { project: index };

        let start_event = |date: NaiveDate| {
            CalendarEvent::new(
                date,
                EventCategory::ProjectStart,
                self.locale.project_start_title(&project.name),
                source,
            )
        };
        let end_event = |date: NaiveDate| {
            CalendarEvent::new(
                date,
                EventCategory::ProjectEnd,
                self.locale.project_end_title(&project.name),
                source,
            )
        };

        if let (SpanPolicy::Range, Some(start), Some(end)) = (self.policy, start, end) {
            if start < end && self.fits_range(start, end) {
                for day in days_inclusive(start, end) {
                    collector.push(start_event(day));
                }
                return;
            }
            if start > end || !self.fits_range(start, end) {
                log::warn!(
                    "Project {} span {}..{} cannot be expanded as a range; indexing start and end only",
                    project.id,
                    start,
                    end
                );
                collector.report.range_fallbacks += 1;
            }
        }

        if let Some(start) = start {
            collector.push(start_event(start));
        }
        if let Some(end) = end {
            collector.push(end_event(end));
        }
    }

    fn collect_time_slot(&self, collector: &mut Collector, index: usize, slot: &TimeSlotRecord) {
        let label = format!("time slot #{}", index);
        let Some(date) = collector.date_field(&label, "data", slot.date.as_deref()) else {
            return;
        };

        for (entry_index, entry) in slot.entries.iter().enumerate() {
            let activity = entry.label(slot);
            let raw_time = entry.time.as_deref().map(str::trim).filter(|t| !t.is_empty());
            let title = match raw_time {
                Some(time) => format!("{} - {}", time, activity),
                None => activity.to_string(),
            };

            collector.push(
                CalendarEvent::new(
                    date,
                    EventCategory::TimeSlot,
                    title,
                    SourceRef::TimeSlot {
                        slot: index,
                        entry: entry_index,
                    },
                )
                .with_time(raw_time.and_then(parse_time_of_day)),
            );
        }
    }

    fn fits_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        let span = (end - start).num_days() + 1;
        span >= 1 && span <= i64::from(self.max_range_days)
    }
}

struct Collector {
    days: BTreeMap<DateKey, Vec<CalendarEvent>>,
    policy: SpanPolicy,
    report: BuildReport,
}

impl Collector {
    fn new(policy: SpanPolicy) -> Self {
        Self {
            days: BTreeMap::new(),
            policy,
            report: BuildReport::default(),
        }
    }

    fn push(&mut self, event: CalendarEvent) {
        self.report.events += 1;
        self.days.entry(event.date).or_default().push(event);
    }

    /// Parse an optional timestamp field. Absent or blank values are silently
    /// `None`; malformed ones are logged and counted as a skipped record.
    fn date_field(&mut self, record: &str, field: &'static str, raw: Option<&str>) -> Option<NaiveDate> {
        let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;
        match parse_date_part(raw) {
            Some(date) => Some(date),
            None => {
                let err = RecordError::InvalidDate {
                    record: record.to_string(),
                    field,
                    value: raw.to_string(),
                };
                log::warn!("Skipping {}", err);
                self.report.skipped_records += 1;
                None
            }
        }
    }

    fn finish(mut self) -> (EventIndex, BuildReport) {
        for events in self.days.values_mut() {
            events.sort_by(chronological);
        }

        (
            EventIndex {
                policy: self.policy,
                days: self.days,
            },
            self.report,
        )
    }
}

fn comment_title(author: &str, text: &str) -> String {
    let text = text.trim();
    let excerpt: String = if text.chars().count() > COMMENT_TITLE_CHARS {
        let cut: String = text.chars().take(COMMENT_TITLE_CHARS).collect();
        format!("{}...", cut.trim_end())
    } else {
        text.to_string()
    };

    if author.trim().is_empty() {
        excerpt
    } else {
        format!("{}: {}", author.trim(), excerpt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{CommentRecord, RecordId, TaskRecord, TimeSlotEntry};
    use pretty_assertions::assert_eq;

    fn key(raw: &str) -> DateKey {
        raw.parse().unwrap()
    }

    fn project(id: i64, start: Option<&str>, end: Option<&str>) -> ProjectRecord {
        let mut project = ProjectRecord::new(id, format!("Projeto {}", id));
        project.start = start.map(str::to_string);
        project.end = end.map(str::to_string);
        project
    }

    fn task(id: i64, started_at: &str) -> TaskRecord {
        TaskRecord {
            id: RecordId::from(id),
            project_id: None,
            name: format!("Tarefa {}", id),
            description: None,
            status: None,
            started_at: Some(started_at.to_string()),
        }
    }

    fn comment(id: i64, created_at: &str) -> CommentRecord {
        CommentRecord {
            id: RecordId::from(id),
            project_id: None,
            author: "Ana".to_string(),
            created_at: Some(created_at.to_string()),
            text: format!("Comentário {}", id),
        }
    }

    fn records(projects: Vec<ProjectRecord>) -> RecordSet {
        RecordSet {
            projects,
            ..RecordSet::default()
        }
    }

    #[test]
    fn test_empty_record_set_gives_empty_index() {
        for policy in [SpanPolicy::Point, SpanPolicy::Range] {
            let index = EventIndexBuilder::new(policy).build(&RecordSet::default());
            assert!(index.is_empty());
            assert_eq!(index.total_events(), 0);
        }
    }

    #[test]
    fn test_same_day_project_has_start_and_end_under_both_policies() {
        let records = records(vec![project(1, Some("2024-06-10"), Some("2024-06-10"))]);

        for policy in [SpanPolicy::Point, SpanPolicy::Range] {
            let index = EventIndexBuilder::new(policy).build(&records);
            assert_eq!(index.len(), 1, "policy {}", policy);

            let categories: Vec<_> = index
                .get(&key("2024-06-10"))
                .iter()
                .map(|event| event.category)
                .collect();
            assert_eq!(
                categories,
                vec![EventCategory::ProjectStart, EventCategory::ProjectEnd]
            );
        }
    }

    #[test]
    fn test_range_policy_expands_inclusive_days() {
        let records = records(vec![project(1, Some("2024-06-01"), Some("2024-06-03T18:00:00"))]);
        let index = EventIndexBuilder::new(SpanPolicy::Range).build(&records);

        assert_eq!(index.len(), 3);
        for day in ["2024-06-01", "2024-06-02", "2024-06-03"] {
            let events = index.get(&key(day));
            assert_eq!(events.len(), 1, "day {}", day);
            assert_eq!(events[0].category, EventCategory::ProjectStart);
            assert_eq!(events[0].color, EventCategory::ProjectStart.color());
        }
    }

    #[test]
    fn test_point_policy_emits_only_endpoints() {
        let records = records(vec![project(1, Some("2024-06-01"), Some("2024-06-03"))]);
        let index = EventIndexBuilder::new(SpanPolicy::Point).build(&records);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get(&key("2024-06-01"))[0].title, "Início: Projeto 1");
        assert_eq!(index.get(&key("2024-06-03"))[0].title, "Conclusão: Projeto 1");
        assert!(index.get(&key("2024-06-02")).is_empty());
    }

    #[test]
    fn test_range_policy_falls_back_for_inverted_span() {
        let records = records(vec![project(1, Some("2024-06-05"), Some("2024-06-01"))]);
        let (index, report) = EventIndexBuilder::new(SpanPolicy::Range).build_with_report(&records);

        assert_eq!(index.len(), 2);
        assert_eq!(report.range_fallbacks, 1);
    }

    #[test]
    fn test_range_policy_without_end_emits_only_start() {
        let records = records(vec![project(1, Some("2024-06-05T08:00:00"), None)]);
        let (index, report) = EventIndexBuilder::new(SpanPolicy::Range).build_with_report(&records);

        assert_eq!(index.total_events(), 1);
        assert_eq!(report.range_fallbacks, 0);
        let events = index.get(&key("2024-06-05"));
        assert_eq!(events[0].category, EventCategory::ProjectStart);
        assert_eq!(events[0].title, "Início: Projeto 1");
    }

    #[test]
    fn test_range_policy_respects_max_range_days() {
        let records = records(vec![project(1, Some("2024-01-01"), Some("2024-12-31"))]);
        let index = EventIndexBuilder::new(SpanPolicy::Range)
            .with_max_range_days(30)
            .build(&records);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_missing_timestamps_are_skipped_silently() {
        let records = records(vec![project(1, None, Some("2024-06-03")), project(2, None, None)]);
        let (index, report) = EventIndexBuilder::new(SpanPolicy::Point).build_with_report(&records);

        assert_eq!(index.total_events(), 1);
        assert_eq!(report.skipped_records, 0);
    }

    #[test]
    fn test_malformed_date_skips_only_that_record() {
        let mut broken = project(1, Some("not-a-date"), Some("2024-06-03"));
        broken.tasks.push(task(10, "2024-06-04 10:00:00"));
        broken.tasks.push(task(11, "31/12/2024"));
        let healthy = project(2, Some("2024-06-05"), None);

        let (index, report) =
            EventIndexBuilder::new(SpanPolicy::Point).build_with_report(&records(vec![broken, healthy]));

        assert_eq!(report.skipped_records, 2);
        assert_eq!(index.total_events(), 3);
        assert_eq!(index.get(&key("2024-06-04"))[0].title, "Tarefa 10");
        assert_eq!(index.get(&key("2024-06-05"))[0].category, EventCategory::ProjectStart);
    }

    #[test]
    fn test_events_sorted_untimed_first_then_by_time() {
        let mut p = project(1, Some("2024-06-10T09:00:00"), None);
        p.tasks.push(task(1, "2024-06-10 15:00:00"));
        p.tasks.push(task(2, "2024-06-10T08:15:00"));
        p.comments.push(comment(3, "2024-06-10 08:15:00"));
        p.tasks.push(task(4, "2024-06-10"));

        let index = EventIndexBuilder::new(SpanPolicy::Point).build(&records(vec![p]));
        let events = index.get(&key("2024-06-10"));
        let summary: Vec<_> = events
            .iter()
            .map(|event| (event.category, event.time_label()))
            .collect();

        assert_eq!(
            summary,
            vec![
                (EventCategory::ProjectStart, None),
                (EventCategory::Task, None),
                (EventCategory::Task, Some("08:15".to_string())),
                (EventCategory::Comment, Some("08:15".to_string())),
                (EventCategory::Task, Some("15:00".to_string())),
            ]
        );
    }

    #[test]
    fn test_every_event_key_matches_source_date_part() {
        let mut p = project(1, Some("2024-06-10 23:59:59"), Some("2024-07-01T00:00:00"));
        p.tasks.push(task(1, "2024-06-20T12:00:00"));
        p.comments.push(comment(2, "2024-06-21 07:00"));
        let records = records(vec![p]);
        let index = EventIndexBuilder::new(SpanPolicy::Point).build(&records);

        for (key, events) in index.iter() {
            for event in events {
                assert_eq!(&event.date, key);
                let raw = match records.resolve(&event.source).unwrap() {
                    crate::models::record::SourceRecord::Project(project) => {
                        if event.category == EventCategory::ProjectStart {
                            project.start.clone()
                        } else {
                            project.end.clone()
                        }
                    }
                    crate::models::record::SourceRecord::Task(_, task) => task.started_at.clone(),
                    crate::models::record::SourceRecord::Comment(_, comment) => {
                        comment.created_at.clone()
                    }
                    crate::models::record::SourceRecord::TimeSlot(slot, _) => slot.date.clone(),
                };
                assert_eq!(parse_date_part(&raw.unwrap()), Some(key.date()));
            }
        }
    }

    #[test]
    fn test_time_slots_emit_one_event_per_entry() {
        let records = RecordSet {
            time_slots: vec![
                TimeSlotRecord {
                    date: Some("2024-06-12".to_string()),
                    kind: None,
                    entries: vec![
                        TimeSlotEntry {
                            time: Some("14:00".to_string()),
                            activity: Some("Comunidade - visita".to_string()),
                        },
                        TimeSlotEntry {
                            time: Some("09:00".to_string()),
                            activity: Some("Tambo".to_string()),
                        },
                    ],
                },
                TimeSlotRecord {
                    date: None,
                    kind: None,
                    entries: vec![TimeSlotEntry {
                        time: Some("10:00".to_string()),
                        activity: None,
                    }],
                },
            ],
            ..RecordSet::default()
        };

        let index = EventIndexBuilder::new(SpanPolicy::Point).build(&records);
        let titles: Vec<_> = index
            .get(&key("2024-06-12"))
            .iter()
            .map(|event| event.title.as_str())
            .collect();
        assert_eq!(titles, vec!["09:00 - Tambo", "14:00 - Comunidade - visita"]);
        assert_eq!(index.total_events(), 2);
    }

    #[test]
    fn test_english_titles() {
        let records = records(vec![project(1, Some("2024-06-10"), Some("2024-06-11"))]);
        let index = EventIndexBuilder::new(SpanPolicy::Point)
            .with_locale(Locale::En)
            .build(&records);
        assert_eq!(index.get(&key("2024-06-10"))[0].title, "Start: Projeto 1");
        assert_eq!(index.get(&key("2024-06-11"))[0].title, "End: Projeto 1");
    }

    #[test]
    fn test_comment_title_truncates_long_text() {
        let long = "x".repeat(200);
        let title = comment_title("Ana", &long);
        assert!(title.starts_with("Ana: "));
        assert!(title.ends_with("..."));
        assert_eq!(title.chars().count(), "Ana: ".len() + COMMENT_TITLE_CHARS + 3);
    }

    #[test]
    fn test_within_limits_days_to_range() {
        let records = records(vec![project(1, Some("2024-06-01"), Some("2024-06-30"))]);
        let index = EventIndexBuilder::new(SpanPolicy::Point).build(&records);
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        );
        assert_eq!(index.within(range).count(), 1);
    }
}
