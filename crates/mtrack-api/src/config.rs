//! Server configuration from the environment.
//!
//! | Variable            | Default        |
//! |---------------------|----------------|
//! | `MTRACK_ADDR`       | `0.0.0.0:8787` |
//! | `MTRACK_TEMPLATES`  | built-in set   |
//! | `MTRACK_UTC_OFFSET` | host time zone |

use std::net::SocketAddr;
use std::sync::Arc;

use mtrack_core::{Clock, MtrackError, OffsetClock, SystemClock};
use mtrack_report::ReportRenderer;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub templates_path: Option<String>,
    pub utc_offset: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, MtrackError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MtrackError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_addr = get("MTRACK_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| MtrackError::ConfigError(format!("MTRACK_ADDR '{}': {}", raw_addr, e)))?;

        let utc_offset = get("MTRACK_UTC_OFFSET");
        if let Some(offset) = &utc_offset {
            OffsetClock::parse(offset)?;
        }

        Ok(Self {
            addr,
            templates_path: get("MTRACK_TEMPLATES"),
            utc_offset,
        })
    }

    /// Factory wall clock
    pub fn clock(&self) -> Result<Arc<dyn Clock>, MtrackError> {
        Ok(match &self.utc_offset {
            Some(offset) => Arc::new(OffsetClock::parse(offset)?),
            None => Arc::new(SystemClock),
        })
    }

    pub fn renderer(&self) -> Result<ReportRenderer, MtrackError> {
        match &self.templates_path {
            Some(path) => ReportRenderer::load(path),
            None => ReportRenderer::builtin(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8787)),
            templates_path: None,
            utc_offset: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<ServerConfig, MtrackError> {
        let env: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]).unwrap(), ServerConfig::default());
        assert_eq!(config(&[("MTRACK_ADDR", "  ")]).unwrap(), ServerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("MTRACK_ADDR", "127.0.0.1:9000"),
            ("MTRACK_UTC_OFFSET", "+07:00"),
            ("MTRACK_TEMPLATES", "/etc/mtrack/templates.yaml"),
        ])
        .unwrap();
        assert_eq!(cfg.addr.port(), 9000);
        assert_eq!(cfg.utc_offset.as_deref(), Some("+07:00"));
        assert_eq!(cfg.templates_path.as_deref(), Some("/etc/mtrack/templates.yaml"));
        assert!(cfg.clock().is_ok());
    }

    #[test]
    fn test_bad_values_are_config_errors() {
        let err = config(&[("MTRACK_ADDR", "not-an-address")]).unwrap_err();
        assert!(err.to_string().starts_with("CONFIG/"));

        let err = config(&[("MTRACK_UTC_OFFSET", "Asia/Bangkok")]).unwrap_err();
        assert!(matches!(err, MtrackError::ConfigError(_)));
    }
}
