//! Shared types for calendar views.

use crate::models::settings::Settings;

use super::month_view::MonthGrid;
use super::time_grid::TimeGrid;
use super::year_view::YearGrid;

/// Layout knobs taken from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridOptions {
    /// Leftmost column of month grids: 0 = Sunday, 1 = Monday, ...
    pub first_day_of_week: u8,
}

impl GridOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            first_day_of_week: settings.first_day_of_week % 7,
        }
    }
}

/// View-model for whichever mode is active.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarView<'a> {
    Day(TimeGrid<'a>),
    Week(TimeGrid<'a>),
    Month(MonthGrid<'a>),
    Year(YearGrid<'a>),
}
