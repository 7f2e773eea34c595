// Service module exports

pub mod agenda;
pub mod data_source;
pub mod event_index;
pub mod settings;
