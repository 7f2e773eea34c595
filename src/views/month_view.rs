use chrono::{Datelike, NaiveDate, Weekday};

use super::types::GridOptions;
use crate::models::event::CalendarEvent;
use crate::services::event_index::EventIndex;
use crate::utils::date::{days_in_month, leading_blank_days};
use crate::utils::locale::Locale;

const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// One day of a month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub day: u32,
    pub has_events: bool,
    pub is_selected: bool,
    pub is_today: bool,
    pub events: &'a [CalendarEvent],
}

#[derive(Debug, Clone, PartialEq)]
pub enum MonthCell<'a> {
    /// Blank cell before day 1.
    Placeholder,
    Day(DayCell<'a>),
}

impl<'a> MonthCell<'a> {
    pub fn day(&self) -> Option<&DayCell<'a>> {
        match self {
            Self::Placeholder => None,
            Self::Day(cell) => Some(cell),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid<'a> {
    pub year: i32,
    pub month: u32,
    pub first_day_of_week: u8,
    /// Leading placeholders followed by one cell per day.
    pub cells: Vec<MonthCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    /// Cells in rows of seven; the last row may be shorter.
    pub fn rows(&self) -> impl Iterator<Item = &[MonthCell<'a>]> {
        self.cells.chunks(7)
    }

    pub fn leading_placeholders(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, MonthCell::Placeholder))
            .count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell<'a>> {
        self.cells.iter().filter_map(MonthCell::day)
    }

    /// Column headings in grid order, abbreviated to three letters.
    pub fn weekday_headers(&self, locale: Locale) -> Vec<String> {
        weekday_headers(self.first_day_of_week, locale)
    }
}

/// Weekday columns starting at `first_day_of_week` (0 = Sunday).
pub fn column_weekdays(first_day_of_week: u8) -> [Weekday; 7] {
    let first = usize::from(first_day_of_week % 7);
    std::array::from_fn(|column| SUNDAY_FIRST[(first + column) % 7])
}

pub fn weekday_headers(first_day_of_week: u8, locale: Locale) -> Vec<String> {
    column_weekdays(first_day_of_week)
        .iter()
        .map(|weekday| locale.weekday_name(*weekday).chars().take(3).collect())
        .collect()
}

/// Month grid for `year`/`month`. Invalid months yield an empty grid.
pub fn month_grid<'a>(
    index: &'a EventIndex,
    year: i32,
    month: u32,
    selected: Option<NaiveDate>,
    today: NaiveDate,
    options: GridOptions,
) -> MonthGrid<'a> {
    let mut grid = MonthGrid {
        year,
        month,
        first_day_of_week: options.first_day_of_week,
        cells: Vec::new(),
    };

    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        log::warn!("Cannot lay out month {}-{:02}", year, month);
        return grid;
    }

    let blanks = leading_blank_days(year, month, options.first_day_of_week);
    let day_count = days_in_month(year, month);
    grid.cells.reserve((blanks + day_count) as usize);
    grid.cells.extend((0..blanks).map(|_| MonthCell::Placeholder));

    for day in 1..=day_count {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        let events = index.events_on(date);
        grid.cells.push(MonthCell::Day(DayCell {
            date,
            day,
            has_events: !events.is_empty(),
            is_selected: selected == Some(date),
            is_today: date == today,
            events,
        }));
    }

    grid
}

/// Month grid of the month containing `focus`; also serves the mini calendar.
pub fn month_grid_for(
    index: &EventIndex,
    focus: NaiveDate,
    selected: Option<NaiveDate>,
    today: NaiveDate,
    options: GridOptions,
) -> MonthGrid<'_> {
    month_grid(index, focus.year(), focus.month(), selected, today, options)
}
