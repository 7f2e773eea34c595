use chrono::{Datelike, NaiveDate};

use super::state::{NavigationState, ProjectFilter, ViewMode};
use crate::utils::date::{self, DateRange};
use crate::utils::locale::Locale;

/// Owns [`NavigationState`]; every mutation goes through one of these
/// transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStateMachine {
    state: NavigationState,
}

impl NavigationStateMachine {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: NavigationState::new(today),
        }
    }

    pub fn from_state(state: NavigationState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn focus_date(&self) -> NaiveDate {
        self.state.focus_date
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.state.selected_date
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    pub fn project_filter(&self) -> &ProjectFilter {
        &self.state.project_filter
    }

    /// Move the focus by `delta` units of the active view mode.
    pub fn step(&mut self, delta: i32) {
        let current = self.state.focus_date;
        let next = match self.state.view_mode {
            ViewMode::Day => date::shift_days(current, i64::from(delta)),
            ViewMode::Week => date::shift_days(current, i64::from(delta) * 7),
            ViewMode::Month => date::shift_months(current, delta),
            ViewMode::Year => date::shift_years(current, delta),
        };

        match next {
            Some(next) => self.state.focus_date = next,
            None => log::warn!(
                "Cannot move {} by {} {} units; keeping focus",
                current,
                delta,
                self.state.view_mode
            ),
        }
    }

    pub fn previous(&mut self) {
        self.step(-1);
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.state.focus_date = today;
        self.state.selected_date = Some(today);
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.state.view_mode = mode;
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.state.selected_date = Some(date);
        self.state.focus_date = date;
    }

    /// Clicking a day in the year grid opens its month.
    pub fn drill_into_month(&mut self, date: NaiveDate) {
        self.select_date(date);
        self.state.view_mode = ViewMode::Month;
    }

    /// Returns true when the filter changed, i.e. when a refetch is due.
    pub fn set_filter(&mut self, filter: ProjectFilter) -> bool {
        if self.state.project_filter == filter {
            return false;
        }
        self.state.project_filter = filter;
        true
    }

    pub fn title(&self, locale: Locale) -> String {
        view_title(self.state.view_mode, self.state.focus_date, locale)
    }

    pub fn visible_range(&self) -> DateRange {
        visible_range(self.state.view_mode, self.state.focus_date)
    }
}

/// Header title for a view; depends only on the mode and the focus date.
pub fn view_title(mode: ViewMode, focus: NaiveDate, locale: Locale) -> String {
    match mode {
        ViewMode::Day => locale.long_date(focus),
        ViewMode::Week => {
            let (start, end) = date::week_bounds(focus);
            locale.week_span(start, end)
        }
        ViewMode::Month => locale.month_year(focus.year(), focus.month()),
        ViewMode::Year => focus.year().to_string(),
    }
}

/// Days covered by a view.
pub fn visible_range(mode: ViewMode, focus: NaiveDate) -> DateRange {
    match mode {
        ViewMode::Day => DateRange::single(focus),
        ViewMode::Week => {
            let (start, end) = date::week_bounds(focus);
            DateRange::new(start, end)
        }
        ViewMode::Month => {
            let start = focus.with_day(1).unwrap_or(focus);
            let last = date::days_in_month(focus.year(), focus.month());
            DateRange::new(start, focus.with_day(last).unwrap_or(focus))
        }
        ViewMode::Year => {
            let start = focus.with_ordinal(1).unwrap_or(focus);
            let end = NaiveDate::from_ymd_opt(focus.year(), 12, 31).unwrap_or(focus);
            DateRange::new(start, end)
        }
    }
}
