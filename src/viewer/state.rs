//! Viewer state and the actions that change it
//!
//! The whole view is one [`ViewState`] value. Every change replaces the
//! published snapshot wholesale, so a renderer never sees half an update.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::GatewayApi;
use super::locale::Locale;
use crate::models::{Coordinate, ForecastEntry};

/// Place name the search box starts with
pub const DEFAULT_SEARCH_TEXT: &str = "Moscow";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Text in the place search box
    pub search_text: String,
    /// Coordinate of the last fetch
    pub active: Coordinate,
    /// Coordinate being edited, promoted to `active` on submit
    pub staged: Coordinate,
    pub locale: Locale,
    pub loading: bool,
    /// Result of the last completed forecast fetch
    pub forecast: Arc<Vec<ForecastEntry>>,
}

impl ViewState {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            search_text: DEFAULT_SEARCH_TEXT.to_string(),
            active: Coordinate::default(),
            staged: Coordinate::default(),
            locale,
            loading: false,
            forecast: Arc::new(Vec::new()),
        }
    }
}

/// Owns the view state and drives the gateway
pub struct Viewer<G> {
    gateway: G,
    state: ViewState,
    updates: watch::Sender<ViewState>,
}

impl<G: GatewayApi> Viewer<G> {
    pub fn new(gateway: G, locale: Locale) -> Self {
        let state = ViewState::new(locale);
        let (updates, _) = watch::channel(state.clone());
        Self {
            gateway,
            state,
            updates,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Receive every published snapshot, including the in-flight ones
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.updates.subscribe()
    }

    fn publish(&self) {
        self.updates.send_replace(self.state.clone());
    }

    /// Initial load for the starting coordinate
    pub async fn mount(&mut self) {
        let at = self.state.active;
        self.fetch_weather(at).await;
    }

    /// Resolve the search text, then load the forecast for it
    ///
    /// If the place cannot be resolved the current forecast stays on screen.
    pub async fn fetch_by_place(&mut self) {
        self.state.loading = true;
        self.publish();

        match self.gateway.coordinates(&self.state.search_text).await {
            Ok(at) => {
                self.state.active = at;
                self.fetch_weather(at).await;
            }
            Err(e) => {
                warn!(
                    "Could not resolve '{}': {:#}",
                    self.state.search_text, e
                );
                self.state.loading = false;
                self.publish();
            }
        }
    }

    /// Promote the staged coordinate and load its forecast
    pub async fn fetch_by_coordinates(&mut self) {
        self.state.active = self.state.staged;
        let at = self.state.active;
        self.fetch_weather(at).await;
    }

    async fn fetch_weather(&mut self, at: Coordinate) {
        self.state.loading = true;
        self.publish();

        let forecast = match self.gateway.weather(at).await {
            Ok(forecast) => forecast,
            Err(e) => {
                warn!("Forecast fetch failed for ({}): {:#}", at.format_coordinates(), e);
                Vec::new()
            }
        };
        debug!("Showing {} forecast entries", forecast.len());

        self.state.forecast = Arc::new(forecast);
        self.state.loading = false;
        self.publish();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
        self.publish();
    }

    pub fn stage_latitude(&mut self, latitude: f64) {
        self.state.staged.latitude = latitude;
        self.publish();
    }

    pub fn stage_longitude(&mut self, longitude: f64) {
        self.state.staged.longitude = longitude;
        self.publish();
    }

    pub fn toggle_language(&mut self) {
        self.state.locale = self.state.locale.toggled();
        self.publish();
    }

    #[must_use]
    pub fn documentation_url(&self) -> String {
        self.gateway.docs_url()
    }

    /// Open the gateway's API documentation in the system browser
    pub fn open_documentation(&self) -> Result<()> {
        let url = self.documentation_url();
        webbrowser::open(&url).with_context(|| format!("Failed to open browser at {url}"))
    }
}
