use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "atlas-crimen-tui", version, about = "Atlas al Crimen - Santander TUI")]
pub struct CliArgs {
    /// Print backend statistics and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the HTTP timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl CliArgs {
    /// CLI flags win by being written into the environment before the
    /// configuration is read.
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("ATLAS_API_URL", url);
        }
        if let Some(timeout) = &self.timeout {
            std::env::set_var("ATLAS_HTTP_TIMEOUT_SECS", timeout.to_string());
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
