//! Palmer CLI - reactive dashboard over the Palmer penguin data.

mod colors;
mod dashboard;
mod export;
mod inputs;
mod serve;
mod show;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::dashboard::FilterArgs;
use crate::show::Format;

#[derive(Parser)]
#[command(name = "palmer")]
#[command(about = "Reactive dashboard over the Palmer penguin data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive dashboard server
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Penguin CSV to load instead of the bundled sample
        #[arg(long)]
        data: Option<PathBuf>,

        /// Page title
        #[arg(long, default_value = "Palmer Penguins")]
        title: String,

        /// Print the dashboard URL to open in a browser
        #[arg(long)]
        open: bool,
    },

    /// Render outputs in the terminal
    Show {
        #[command(flatten)]
        filters: FilterArgs,

        /// Render only this output (e.g. histogram_plot)
        #[arg(short, long)]
        output: Option<String>,

        /// Representation to print
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Export the dashboard as a standalone HTML file
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output path for HTML file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the dashboard inputs with their domains and defaults
    Inputs {
        /// Print the input definitions as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Helper to format palmer-core errors with recovery hints
    let format_error = |err: anyhow::Error| -> anyhow::Error {
        let hinted = err
            .downcast_ref::<palmer_core::Error>()
            .or_else(|| match err.downcast_ref::<palmer_server::ServerError>() {
                Some(palmer_server::ServerError::Core(e)) => Some(e),
                _ => None,
            })
            .map(palmer_core::Error::with_hint);
        match hinted {
            Some(message) => anyhow::anyhow!("{}", message),
            None => err,
        }
    };

    match cli.command {
        Commands::Serve {
            host,
            port,
            data,
            title,
            open,
        } => {
            let config = palmer_server::ServerConfig {
                host,
                port,
                open_browser: open,
                title,
            };
            serve::execute(data.as_deref(), config)
                .await
                .map_err(format_error)?;
        }

        Commands::Show {
            filters,
            output,
            format,
        } => {
            show::execute(&filters, output.as_deref(), format).map_err(format_error)?;
        }

        Commands::Export { filters, output } => {
            export::execute(&filters, output.as_deref()).map_err(format_error)?;
        }

        Commands::Inputs { json } => {
            inputs::execute(json).map_err(format_error)?;
        }
    }

    Ok(())
}
