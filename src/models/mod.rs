// Module exports for models
// Backend records, derived events and user settings

pub mod event;
pub mod record;
pub mod settings;
