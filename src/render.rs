//! Plain-text rendering of session view-models for the terminal.

use std::fmt::Write;

use project_calendar::app::CalendarSession;
use project_calendar::models::event::{CalendarEvent, EventCategory};
use project_calendar::services::agenda::{activity_color, AgendaView, DayDetails};
use project_calendar::utils::locale::Locale;
use project_calendar::views::{CalendarView, MonthCell, MonthGrid, TimeGrid};

use chrono::NaiveDate;

pub fn session(session: &CalendarSession, today: NaiveDate) -> String {
    let locale = session.settings().locale;
    let mut out = String::new();

    let _ = writeln!(out, "{}", session.title());
    let _ = writeln!(out, "{}", "=".repeat(session.title().chars().count()));
    if let Some(error) = session.last_error() {
        let _ = writeln!(out, "! {}", error);
    }
    out.push('\n');

    match session.view(today) {
        CalendarView::Month(grid) => month(&mut out, &grid, locale),
        CalendarView::Year(grid) => {
            for month_grid in &grid.months {
                let _ = writeln!(out, "{}", locale.month_year(grid.year, month_grid.month));
                month(&mut out, month_grid, locale);
                out.push('\n');
            }
        }
        CalendarView::Week(grid) | CalendarView::Day(grid) => time_grid(&mut out, &grid, locale),
    }

    out.push('\n');
    agenda(&mut out, session, locale);
    out.push('\n');
    details(&mut out, session.day_details(), locale);
    out
}

fn month(out: &mut String, grid: &MonthGrid<'_>, locale: Locale) {
    let headers: Vec<String> = grid
        .weekday_headers(locale)
        .iter()
        .map(|name| format!("{:>5}", name))
        .collect();
    let _ = writeln!(out, "{}", headers.concat());

    for row in grid.rows() {
        let mut line = String::new();
        for cell in row {
            let text = match cell {
                MonthCell::Placeholder => String::new(),
                MonthCell::Day(day) => {
                    let marker = if day.is_selected {
                        '>'
                    } else if day.is_today {
                        '#'
                    } else {
                        ' '
                    };
                    let busy = if day.has_events { "*" } else { "" };
                    format!("{}{}{}", marker, day.day, busy)
                }
            };
            let _ = write!(line, "{:>5}", text);
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

fn time_grid(out: &mut String, grid: &TimeGrid<'_>, locale: Locale) {
    for column in &grid.columns {
        let marker = if column.is_today { format!(" ({})", locale.today()) } else { String::new() };
        let _ = writeln!(out, "{}{}", locale.long_date(column.date), marker);

        for event in &column.untimed {
            let _ = writeln!(out, "        {}", event_line(event));
        }
        for (hour, label) in grid.hour_labels.iter().enumerate() {
            for event in column.events_at(hour as u32) {
                let _ = writeln!(out, "  {}  {}", label, event_line(event));
            }
        }
    }
}

fn agenda(out: &mut String, session: &CalendarSession, locale: Locale) {
    let _ = writeln!(out, "Agenda - {}", session.agenda_header());

    match session.agenda() {
        AgendaView::NoProjectSelected => {
            let _ = writeln!(out, "  {}", locale.no_project_selected());
        }
        AgendaView::Empty { .. } => {
            let _ = writeln!(out, "  {}", locale.empty_agenda());
        }
        AgendaView::Days(days) => {
            for day in days {
                let _ = writeln!(out, "  {}", locale.long_date(day.date));
                for (_, events) in day.sections() {
                    for event in events {
                        let _ = writeln!(out, "    {}", event_line(event));
                    }
                }
            }
        }
    }
}

fn details(out: &mut String, details: DayDetails<'_>, locale: Locale) {
    match details {
        DayDetails::NoSelection => {
            let _ = writeln!(out, "{}", locale.no_date_selected());
        }
        DayDetails::Selected(summary) => {
            let _ = writeln!(
                out,
                "{}: {} project, {} time slot, {} task, {} comment ({} total)",
                locale.short_date(summary.date),
                summary.project_events.len(),
                summary.time_slot_events.len(),
                summary.tasks,
                summary.comments,
                summary.total
            );
        }
    }
}

fn event_line(event: &CalendarEvent) -> String {
    let color = match event.category {
        EventCategory::TimeSlot => activity_color(&event.title),
        _ => event.color,
    };
    match event.time_label() {
        Some(time) if event.category != EventCategory::TimeSlot => {
            format!("[{}] {} {} ({})", event.category, time, event.title, color)
        }
        _ => format!("[{}] {} ({})", event.category, event.title, color),
    }
}
