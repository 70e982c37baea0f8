// Export our modules for use in binaries and tests
pub mod api;
pub mod chart;
pub mod config;
pub mod domain;

pub use domain::{MapView, Page, TemporalTab, Theme};
