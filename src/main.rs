use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use forecast_gateway::viewer::{self, GatewayClient, Locale, Viewer};
use forecast_gateway::{ForecastGateway, GatewayConfig, logging, web};

/// Midday weather forecast gateway and terminal viewer
#[derive(Debug, Parser)]
#[command(name = "forecast-gateway", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP gateway
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the midday forecast for a coordinate as JSON
    Weather {
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<String>,
    },
    /// Print the coordinates of a place as JSON
    Coordinates {
        location: String,
    },
    /// Interactive viewer against a running gateway
    View {
        /// Gateway base URL
        #[arg(long)]
        gateway: Option<String>,
        /// Display language (en or ru)
        #[arg(long)]
        lang: Option<Locale>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = GatewayConfig::load_from_path(cli.config.clone())?;
    logging::init_logging(&config.logging, cli.verbose)?;

    match cli.command {
        Command::Serve { port } => {
            let gateway = ForecastGateway::from_config(&config)?;
            web::run(gateway, port.unwrap_or(config.server.port)).await
        }
        Command::Weather { lat, lon } => {
            let gateway = ForecastGateway::from_config(&config)?;
            let forecast = gateway.get_weather(lat.as_deref(), lon.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&forecast)?);
            Ok(())
        }
        Command::Coordinates { location } => {
            let gateway = ForecastGateway::from_config(&config)?;
            let coordinate = gateway.get_coordinates(Some(&location)).await?;
            println!("{}", serde_json::to_string_pretty(&coordinate)?);
            Ok(())
        }
        Command::View { gateway, lang } => {
            let url = gateway.unwrap_or_else(|| config.viewer.gateway_url.clone());
            let locale = match lang {
                Some(locale) => locale,
                None => config
                    .viewer
                    .language
                    .parse()
                    .map_err(anyhow::Error::msg)
                    .context("Invalid viewer language in config")?,
            };
            let client = GatewayClient::new(&url)?;
            viewer::prompt::run(Viewer::new(client, locale)).await
        }
    }
}
