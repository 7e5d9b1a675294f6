//! Radix-tree HTTP routing engine.
//!
//! Routes are registered once at startup with [`Router::add`] and looked up
//! per request with [`Router::find`], which fills a caller-owned [`Context`]
//! with the selected handler and the captured path parameters.

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::schema::RouteTableConfig;
pub use http::{handler_fn, Context, Handler, HandlerResult, HttpError, Outcome};
pub use http::handler::{method_not_allowed_handler, not_found_handler};
pub use routing::{Method, RouteError, Router, SharedRouter};
