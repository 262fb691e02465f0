//! Terminal forecast viewer
//!
//! A headless view model ([`Viewer`]) that talks to the gateway through
//! [`GatewayApi`], a text renderer, and an interactive prompt on top.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Coordinate, ForecastEntry};

pub mod client;
pub mod locale;
pub mod prompt;
pub mod render;
pub mod state;

pub use client::GatewayClient;
pub use locale::Locale;
pub use render::render;
pub use state::{ViewState, Viewer};

/// Gateway operations the viewer needs
#[async_trait]
pub trait GatewayApi: Send + Sync {
    async fn weather(&self, at: Coordinate) -> Result<Vec<ForecastEntry>>;
    async fn coordinates(&self, location: &str) -> Result<Coordinate>;
    /// Address of the gateway's interactive API documentation
    fn docs_url(&self) -> String;
}
