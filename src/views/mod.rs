//! View-model generation for the calendar grids.
//!
//! Every function here is pure over an [`EventIndex`], the navigation state
//! and an injected "today"; renderers only read the returned structures.

use chrono::{Datelike, NaiveDate};

use crate::app::state::{NavigationState, ViewMode};
use crate::services::event_index::EventIndex;

pub mod month_view;
pub mod time_grid;
pub mod types;
pub mod year_view;

pub use month_view::{month_grid, month_grid_for, DayCell, MonthCell, MonthGrid};
pub use time_grid::{day_grid, week_grid, DayColumn, TimeGrid};
pub use types::{CalendarView, GridOptions};
pub use year_view::{year_grid, YearGrid};

/// View-model for the active view mode.
pub fn build_view<'a>(
    index: &'a EventIndex,
    state: &NavigationState,
    today: NaiveDate,
    options: GridOptions,
) -> CalendarView<'a> {
    let focus = state.focus_date;
    let selected = state.selected_date;

    match state.view_mode {
        ViewMode::Day => CalendarView::Day(day_grid(index, focus, selected, today)),
        ViewMode::Week => CalendarView::Week(week_grid(index, focus, selected, today)),
        ViewMode::Month => {
            CalendarView::Month(month_grid_for(index, focus, selected, today, options))
        }
        ViewMode::Year => {
            CalendarView::Year(year_grid(index, focus.year(), selected, today, options))
        }
    }
}
