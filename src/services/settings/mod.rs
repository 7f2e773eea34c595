// Settings service module
// Loads and saves the TOML configuration file

mod service;

pub use service::SettingsService;
