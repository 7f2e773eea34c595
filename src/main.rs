// Project Calendar
// Command-line entry point: fetch once, print the active view and agenda

mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use project_calendar::app::{CalendarSession, Clock, FetchOutcome, ProjectFilter, SystemClock, ViewMode};
use project_calendar::models::settings::Settings;
use project_calendar::services::data_source::{FetchDispatcher, HttpDataSource};
use project_calendar::services::settings::SettingsService;

#[derive(Parser)]
#[command(name = "project-calendar")]
#[command(about = "Show project milestones, tasks, comments and time slots as a calendar")]
struct Cli {
    /// Only show this project (backend id)
    #[arg(short, long, conflicts_with = "all")]
    project: Option<String>,

    /// Show every project
    #[arg(long)]
    all: bool,

    /// Granularity: day, week, month or year
    #[arg(long, default_value = "month")]
    view: ViewMode,

    /// Focus and select this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Read settings from this TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the backend URL from the settings
    #[arg(long)]
    backend: Option<String>,
}

impl Cli {
    fn filter(&self) -> ProjectFilter {
        if self.all {
            ProjectFilter::All
        } else {
            self.project
                .as_deref()
                .map_or(ProjectFilter::None, ProjectFilter::from_selector)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = load_settings_or_default(cli.config.clone());
    if let Some(backend) = &cli.backend {
        settings.backend_url = backend.clone();
    }
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;

    let today = SystemClock.today();
    let mut session = CalendarSession::new(settings, today);
    session.set_view_mode(cli.view);
    if let Some(date) = cli.date {
        session.select_date(date);
    }

    let ticket = match session.set_filter(cli.filter()) {
        Some(ticket) => ticket,
        None => session.initial_load(),
    };

    // The blocking client must be created and dropped outside the runtime.
    let source = HttpDataSource::new(session.settings())?;
    log::info!("Loading calendar data from {}", source.base_url());
    let (dispatcher, mut completions) = FetchDispatcher::new(Arc::new(source));

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let completion = runtime.block_on(async {
        dispatcher.dispatch(ticket);
        completions.recv().await
    });
    drop(runtime);

    let completion = completion.ok_or_else(|| anyhow!("Fetch finished without a result"))?;
    match session.apply(completion) {
        FetchOutcome::Applied(report) if report.skipped_records > 0 => {
            log::warn!("{} records had unusable dates", report.skipped_records);
        }
        FetchOutcome::Failed(err) => eprintln!("Could not load calendar data: {}", err),
        _ => {}
    }

    print!("{}", render::session(&session, today));
    Ok(())
}

fn load_settings_or_default(path: Option<PathBuf>) -> Settings {
    let service = match path {
        Some(path) => Ok(SettingsService::with_path(path)),
        None => SettingsService::new(),
    };

    match service.and_then(|service| service.load()) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {:#}, using defaults", e);
            Settings::default()
        }
    }
}
