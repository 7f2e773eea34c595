use std::sync::Arc;

use chrono::NaiveDate;

use super::navigation::NavigationStateMachine;
use super::state::{NavigationState, ProjectFilter, ViewMode};
use crate::models::event::CalendarEvent;
use crate::models::record::{RecordId, RecordSet, SourceRecord};
use crate::models::settings::Settings;
use crate::services::agenda::{AgendaView, DayDetails};
use crate::services::data_source::{CalendarDataSource, FetchCompletion, FetchError, FetchTicket};
use crate::services::event_index::{BuildReport, EventIndex, EventIndexBuilder};
use crate::views::{build_view, CalendarView, GridOptions, MonthGrid};

/// What happened to a fetch result offered to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The records replaced the previous ones and the index was rebuilt.
    Applied(BuildReport),
    /// Superseded by a newer request or a filter change; ignored.
    Stale,
    /// The fetch failed; the previous records are kept.
    Failed(FetchError),
}

/// Navigation state plus the last accepted records and their index.
pub struct CalendarSession {
    settings: Settings,
    builder: EventIndexBuilder,
    navigation: NavigationStateMachine,
    records: Arc<RecordSet>,
    index: EventIndex,
    last_error: Option<String>,
    issued_generation: u64,
    applied_generation: u64,
}

impl CalendarSession {
    pub fn new(settings: Settings, today: NaiveDate) -> Self {
        let builder = EventIndexBuilder::from_settings(&settings);
        let index = EventIndex::empty(builder.policy());
        Self {
            settings,
            builder,
            navigation: NavigationStateMachine::new(today),
            records: Arc::new(RecordSet::default()),
            index,
            last_error: None,
            issued_generation: 0,
            applied_generation: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings and rebuild the index from the current records.
    pub fn update_settings(&mut self, settings: Settings) {
        self.builder = EventIndexBuilder::from_settings(&settings);
        self.settings = settings;
        self.rebuild();
    }

    pub fn navigation(&self) -> &NavigationStateMachine {
        &self.navigation
    }

    pub fn state(&self) -> &NavigationState {
        self.navigation.state()
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn shared_records(&self) -> Arc<RecordSet> {
        Arc::clone(&self.records)
    }

    pub fn index(&self) -> &EventIndex {
        &self.index
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // Navigation

    pub fn step(&mut self, delta: i32) {
        self.navigation.step(delta);
    }

    pub fn previous(&mut self) {
        self.navigation.previous();
    }

    pub fn next(&mut self) {
        self.navigation.next();
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.navigation.go_to_today(today);
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.navigation.set_view_mode(mode);
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.navigation.select_date(date);
    }

    pub fn drill_into_month(&mut self, date: NaiveDate) {
        self.navigation.drill_into_month(date);
    }

    // Fetching

    /// Ticket for the first load, using whatever filter is active.
    pub fn initial_load(&mut self) -> FetchTicket {
        self.issue_ticket()
    }

    /// Change the project filter. Returns a ticket to fetch when it changed.
    pub fn set_filter(&mut self, filter: ProjectFilter) -> Option<FetchTicket> {
        if self.navigation.set_filter(filter) {
            Some(self.issue_ticket())
        } else {
            None
        }
    }

    /// Ticket to re-fetch the current filter.
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue_ticket()
    }

    fn issue_ticket(&mut self) -> FetchTicket {
        self.issued_generation += 1;
        FetchTicket {
            generation: self.issued_generation,
            filter: self.navigation.project_filter().clone(),
        }
    }

    pub fn apply(&mut self, completion: FetchCompletion) -> FetchOutcome {
        self.apply_response(&completion.ticket, completion.result)
    }

    /// Offer a fetch result. Only the newest response for the current filter
    /// is accepted.
    pub fn apply_response(
        &mut self,
        ticket: &FetchTicket,
        result: Result<RecordSet, FetchError>,
    ) -> FetchOutcome {
        if &ticket.filter != self.navigation.project_filter()
            || ticket.generation <= self.applied_generation
        {
            log::debug!(
                "Discarding stale fetch #{} for {} (current filter {}, last applied #{})",
                ticket.generation,
                ticket.filter,
                self.navigation.project_filter(),
                self.applied_generation
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(records) => {
                self.applied_generation = ticket.generation;
                self.records = Arc::new(records);
                self.last_error = None;
                let report = self.rebuild();
                log::info!(
                    "Applied fetch #{} for {}: {} projects, {} time slots, {} events",
                    ticket.generation,
                    ticket.filter,
                    self.records.projects.len(),
                    self.records.time_slots.len(),
                    report.events
                );
                FetchOutcome::Applied(report)
            }
            Err(err) => {
                log::warn!(
                    "Fetch #{} for {} failed, keeping previous data: {}",
                    ticket.generation,
                    ticket.filter,
                    err
                );
                self.last_error = Some(err.to_string());
                FetchOutcome::Failed(err)
            }
        }
    }

    /// Issue a ticket for the current filter and fetch it synchronously.
    pub fn fetch_now(&mut self, source: &dyn CalendarDataSource) -> FetchOutcome {
        let ticket = self.issue_ticket();
        let result = source.fetch(&ticket.filter);
        self.apply_response(&ticket, result)
    }

    fn rebuild(&mut self) -> BuildReport {
        let (index, report) = self.builder.build_with_report(&self.records);
        self.index = index;
        report
    }

    // View-models

    pub fn grid_options(&self) -> GridOptions {
        GridOptions::from_settings(&self.settings)
    }

    pub fn title(&self) -> String {
        self.navigation.title(self.settings.locale)
    }

    pub fn view(&self, today: NaiveDate) -> CalendarView<'_> {
        build_view(&self.index, self.navigation.state(), today, self.grid_options())
    }

    /// Month grid of the focus month for a side calendar.
    pub fn mini_calendar(&self, today: NaiveDate) -> MonthGrid<'_> {
        crate::views::month_grid_for(
            &self.index,
            self.navigation.focus_date(),
            self.navigation.selected_date(),
            today,
            self.grid_options(),
        )
    }

    pub fn agenda(&self) -> AgendaView<'_> {
        AgendaView::build(
            &self.index,
            self.navigation.visible_range(),
            self.navigation.project_filter(),
        )
    }

    pub fn agenda_header(&self) -> String {
        AgendaView::header_label(self.state().display_date(), self.settings.locale)
    }

    pub fn day_details(&self) -> DayDetails<'_> {
        DayDetails::for_selection(&self.index, self.navigation.selected_date())
    }

    pub fn project_options(&self) -> Vec<(RecordId, String)> {
        self.records.project_options()
    }

    /// Record an event was derived from.
    pub fn source_of(&self, event: &CalendarEvent) -> Option<SourceRecord<'_>> {
        self.records.resolve(&event.source)
    }
}
