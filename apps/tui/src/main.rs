mod api;
mod app;
mod chart;
mod cli;
mod config;
mod domain;
mod event;
mod terminal;
mod ui;

use clap::Parser;
use color_eyre::Result;

use crate::api::ApiClient;
use crate::app::App;
use crate::cli::CliArgs;
use crate::domain::Page;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = config::init_app_config();
    let client = ApiClient::new(&config)?;

    // Without a terminal there is nothing to draw; print the backend
    // summary instead.
    if args.headless || !is_terminal() {
        return event::run_headless(&client, args.json).await;
    }

    let mut app = App::new(client, config.debug);
    app.enter_page(Page::Dashboard);

    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup_terminal_state();

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
