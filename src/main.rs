use anyhow::{Context, Result};
use haunted_house::{AppConfig, HauntedHouseApp};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::default();
    log::info!(
        "Starting '{}' at {}x{}",
        config.surface_label,
        config.window_size.0,
        config.window_size.1
    );

    let app = HauntedHouseApp::new(config).context("failed to set up the viewer")?;
    app.run().context("viewer exited with an error")?;
    Ok(())
}
