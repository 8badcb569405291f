#[cfg(target_os = "windows")]
mod app;
mod config;
#[cfg(target_os = "windows")]
mod runtime;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::StandaloneConfig;

#[cfg(target_os = "windows")]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let config = StandaloneConfig::parse();
    match app::run(&config) {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::error!(error = ?err, "standalone host failed");
            harmoniq_host_window::platform::show_fatal_error(
                "Harmoniq Standalone",
                &format!("{err:#}"),
            );
            Err(err)
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let config = StandaloneConfig::parse();
    anyhow::bail!(
        "cannot host {}: native host windows are only implemented for Windows",
        config.plugin.display()
    )
}
