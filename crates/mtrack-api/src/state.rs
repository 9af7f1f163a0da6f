//! Shared handler state.
use std::sync::Arc;

use mtrack_core::{Clock, MtrackError};
use mtrack_report::ReportRenderer;

use crate::config::ServerConfig;
use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub renderer: Arc<ReportRenderer>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(clock: Arc<dyn Clock>, renderer: ReportRenderer) -> Result<Self, MtrackError> {
        let metrics = Metrics::new()
            .map_err(|e| MtrackError::ConfigError(format!("metrics registry: {}", e)))?;
        Ok(Self {
            clock,
            renderer: Arc::new(renderer),
            metrics: Arc::new(metrics),
        })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, MtrackError> {
        Self::new(config.clock()?, config.renderer()?)
    }
}
