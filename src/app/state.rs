use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::record::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        };
        f.write_str(name)
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!(
                "Unknown view mode '{}' (expected day, week, month or year)",
                other
            )),
        }
    }
}

/// Which projects the backend is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ProjectFilter {
    /// Nothing selected yet; the agenda asks the user to pick a project.
    #[default]
    None,
    /// The "all projects" sentinel.
    All,
    Project(RecordId),
}

impl ProjectFilter {
    pub const ALL_SENTINEL: &'static str = "all";

    /// Interpret a selector value: empty means none, `all` is the sentinel,
    /// anything else is a project id.
    pub fn from_selector(value: &str) -> Self {
        match value.trim() {
            "" => Self::None,
            v if v.eq_ignore_ascii_case(Self::ALL_SENTINEL) => Self::All,
            id => Self::Project(RecordId::new(id)),
        }
    }

    /// Value of the backend's `projeto_id` query parameter, if any.
    pub fn query_value(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::All => Some(Self::ALL_SENTINEL),
            Self::Project(id) => Some(id.as_str()),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for ProjectFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::All => f.write_str(Self::ALL_SENTINEL),
            Self::Project(id) => write!(f, "project {}", id),
        }
    }
}

/// Navigation state owned by [`super::navigation::NavigationStateMachine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub focus_date: NaiveDate,
    pub selected_date: Option<NaiveDate>,
    pub view_mode: ViewMode,
    pub project_filter: ProjectFilter,
}

impl NavigationState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            focus_date: today,
            selected_date: None,
            view_mode: ViewMode::default(),
            project_filter: ProjectFilter::default(),
        }
    }

    /// Date the detail panels describe: the selection, else the focus.
    pub fn display_date(&self) -> NaiveDate {
        self.selected_date.unwrap_or(self.focus_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_round_trip_names() {
        for mode in ViewMode::ALL {
            assert_eq!(mode.to_string().parse::<ViewMode>().unwrap(), mode);
        }
        assert!("quarter".parse::<ViewMode>().is_err());
    }

    #[test]
    fn test_filter_from_selector() {
        assert_eq!(ProjectFilter::from_selector(""), ProjectFilter::None);
        assert_eq!(ProjectFilter::from_selector("ALL"), ProjectFilter::All);
        assert_eq!(
            ProjectFilter::from_selector(" 42 "),
            ProjectFilter::Project(RecordId::from(42))
        );
    }

    #[test]
    fn test_filter_query_value() {
        assert_eq!(ProjectFilter::None.query_value(), None);
        assert_eq!(ProjectFilter::All.query_value(), Some("all"));
        assert_eq!(ProjectFilter::Project(RecordId::from(7)).query_value(), Some("7"));
    }
}
