use pesa_tui::app::App;
use pesa_tui::config::Config;
use pesa_tui::logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = Config::from_env()?;
    logging::init(&config)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting pesa");

    // Initialize and run the TUI application
    let mut app = App::new(&config)?;
    app.run()?;
    Ok(())
}
