//! Tabula - Main Entry Point
//!
//! Renders a filtered, sorted and paginated users listing as plain text.

use anyhow::Result;
use tabula::app::{actions, commands, dispatch, logging};
use tabula::states::AppConfig;

fn main() -> Result<()> {
    let matches = commands::new().get_matches();

    let config_path = dispatch::config_path(&matches);
    let config = AppConfig::try_load(config_path.as_deref())?;
    let _guard = logging::init(&config.log)?;

    tracing::info!("Starting Tabula...");

    let action = dispatch::handler(&matches)?;
    let output = actions::handle(action, &config)?;
    println!("{output}");

    Ok(())
}
