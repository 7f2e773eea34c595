//! Display language for titles, labels and placeholders.
//!
//! Only the two languages the backend's users actually read are supported;
//! names are kept in plain tables rather than pulled from a locale database.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

const PT_MONTHS: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];
const PT_MONTHS_SHORT: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];
const PT_WEEKDAYS: [&str; 7] = [
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
    "domingo",
];

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const EN_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const EN_WEEKDAYS: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

impl Locale {
    pub fn month_name(self, month: u32) -> &'static str {
        let index = (month.clamp(1, 12) - 1) as usize;
        match self {
            Self::PtBr => PT_MONTHS[index],
            Self::En => EN_MONTHS[index],
        }
    }

    pub fn month_short_name(self, month: u32) -> &'static str {
        let index = (month.clamp(1, 12) - 1) as usize;
        match self {
            Self::PtBr => PT_MONTHS_SHORT[index],
            Self::En => EN_MONTHS_SHORT[index],
        }
    }

    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        let index = weekday.num_days_from_monday() as usize;
        match self {
            Self::PtBr => PT_WEEKDAYS[index],
            Self::En => EN_WEEKDAYS[index],
        }
    }

    /// `segunda-feira, 10 de junho de 2024` / `Monday, June 10, 2024`
    pub fn long_date(self, date: NaiveDate) -> String {
        let weekday = self.weekday_name(date.weekday());
        let month = self.month_name(date.month());
        match self {
            Self::PtBr => format!("{}, {} de {} de {}", weekday, date.day(), month, date.year()),
            Self::En => format!("{}, {} {}, {}", weekday, month, date.day(), date.year()),
        }
    }

    /// `10 de jun. - 16 de junho de 2024` / `Jun 10 - June 16, 2024`
    pub fn week_span(self, start: NaiveDate, end: NaiveDate) -> String {
        let start_month = self.month_short_name(start.month());
        let end_month = self.month_name(end.month());
        match self {
            Self::PtBr => format!(
                "{} de {} - {} de {} de {}",
                start.day(),
                start_month,
                end.day(),
                end_month,
                end.year()
            ),
            Self::En => format!(
                "{} {} - {} {}, {}",
                start_month,
                start.day(),
                end_month,
                end.day(),
                end.year()
            ),
        }
    }

    /// `junho de 2024` / `June 2024`
    pub fn month_year(self, year: i32, month: u32) -> String {
        match self {
            Self::PtBr => format!("{} de {}", self.month_name(month), year),
            Self::En => format!("{} {}", self.month_name(month), year),
        }
    }

    /// `10/06/2024` / `06/10/2024`
    pub fn short_date(self, date: NaiveDate) -> String {
        match self {
            Self::PtBr => date.format("%d/%m/%Y").to_string(),
            Self::En => date.format("%m/%d/%Y").to_string(),
        }
    }

    pub fn project_start_title(self, name: &str) -> String {
        match self {
            Self::PtBr => format!("Início: {}", name),
            Self::En => format!("Start: {}", name),
        }
    }

    pub fn project_end_title(self, name: &str) -> String {
        match self {
            Self::PtBr => format!("Conclusão: {}", name),
            Self::En => format!("End: {}", name),
        }
    }

    pub fn no_project_selected(self) -> &'static str {
        match self {
            Self::PtBr => "Selecione um projeto para ver a agenda",
            Self::En => "Select a project to see the agenda",
        }
    }

    pub fn empty_agenda(self) -> &'static str {
        match self {
            Self::PtBr => "Nenhuma atividade agendada para este período",
            Self::En => "No activities scheduled for this period",
        }
    }

    pub fn no_date_selected(self) -> &'static str {
        match self {
            Self::PtBr => "Selecione uma data para ver os detalhes",
            Self::En => "Select a date to see its details",
        }
    }

    pub fn today(self) -> &'static str {
        match self {
            Self::PtBr => "Hoje",
            Self::En => "Today",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PtBr => write!(f, "pt-BR"),
            Self::En => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt-br" | "pt_br" | "pt" => Ok(Self::PtBr),
            "en" | "en-us" | "en_us" => Ok(Self::En),
            other => Err(format!("Unsupported locale '{}'", other)),
        }
    }
}
