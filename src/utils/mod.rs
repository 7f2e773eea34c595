// Utility modules
// Pure helpers with no knowledge of records or views

pub mod date;
pub mod locale;
