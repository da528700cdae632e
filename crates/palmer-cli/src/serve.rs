//! Serve command implementation for the Palmer CLI.
//!
//! Loads the dataset once and starts the dashboard server.

use std::path::Path;
use std::sync::Arc;

use palmer_server::ServerConfig;

use crate::colors;
use crate::dashboard;

/// Start the interactive dashboard server.
pub async fn execute(data: Option<&Path>, config: ServerConfig) -> anyhow::Result<()> {
    let dataset = Arc::new(dashboard::load(data)?);

    println!(
        "\n{}Palmer Server{} - {}",
        colors::BOLD,
        colors::RESET,
        config.title
    );
    println!("{}", colors::rule());

    println!(
        "{}  ◆ Data:{} {} ({} rows)",
        colors::CYAN,
        colors::RESET,
        data.map_or_else(|| "bundled sample".to_string(), |p| p.display().to_string()),
        dataset.len()
    );
    println!(
        "{}  ◆ Server:{} http://{}:{}",
        colors::CYAN,
        colors::RESET,
        config.host,
        config.port
    );
    println!(
        "{}  ◆ WebSocket:{} ws://{}:{}/ws",
        colors::CYAN,
        colors::RESET,
        config.host,
        config.port
    );
    println!("{}", colors::rule());
    println!("{}Press Ctrl+C to stop{}", colors::GREEN, colors::RESET);
    println!();

    palmer_server::serve(dataset, config).await?;

    Ok(())
}
