mod config;

pub use config::{init_app_config, Config, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
