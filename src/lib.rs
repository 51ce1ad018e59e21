//! Human Shuffle: browse random people from the random-person API, filtered
//! by name, gender and nationality and sorted by name or age.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod web;
