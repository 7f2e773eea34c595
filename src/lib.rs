// Project Calendar Library
// Exports all modules for testing and reuse

pub mod app;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;
