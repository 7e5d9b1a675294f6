//! Route table configuration.
//!
//! # Data Flow
//! ```text
//! routes.toml
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouteTableConfig (validated)
//!     → Router::from_config (handlers resolved by name)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal files
//! - Validation separates syntactic (serde) from semantic checks and reports
//!   every problem at once
//! - Template syntax (`:name`, `*`) is checked by the router itself

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ObservabilityConfig, RouteConfig, RouteTableConfig};
pub use validation::{validate_config, ValidationError};
