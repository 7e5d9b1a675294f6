//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::routing::Method;

/// Root of a route table file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouteTableConfig {
    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Route definitions, registered in order.
    pub routes: Vec<RouteConfig>,
}

/// One route: which handler serves `method` on `path`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// HTTP method token (e.g. "GET").
    pub method: Method,

    /// Path template (e.g. "/users/:id").
    pub path: String,

    /// Name the serving layer resolves to a handler.
    pub handler: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
