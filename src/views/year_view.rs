use chrono::NaiveDate;

use super::month_view::{month_grid, MonthGrid};
use super::types::GridOptions;
use crate::services::event_index::EventIndex;

#[derive(Debug, Clone, PartialEq)]
pub struct YearGrid<'a> {
    pub year: i32,
    /// January through December.
    pub months: Vec<MonthGrid<'a>>,
}

impl YearGrid<'_> {
    /// Days across the whole year that carry at least one event.
    pub fn busy_days(&self) -> usize {
        self.months
            .iter()
            .map(|month| month.days().filter(|cell| cell.has_events).count())
            .sum()
    }
}

pub fn year_grid(
    index: &EventIndex,
    year: i32,
    selected: Option<NaiveDate>,
    today: NaiveDate,
    options: GridOptions,
) -> YearGrid<'_> {
    YearGrid {
        year,
        months: (1..=12)
            .map(|month| month_grid(index, year, month, selected, today, options))
            .collect(),
    }
}
