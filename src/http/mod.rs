//! Handler-facing types.
//!
//! # Data Flow
//! ```text
//! serving layer
//!     → Router::find(method, path, &mut Context)
//!     → context.rs (selected handler, route template, parameter slots)
//!     → Context::invoke() → handler.rs (user handler or sentinel)
//!     → HandlerResult back to the serving layer
//! ```
//!
//! # Design Decisions
//! - Not-found and method-not-allowed are ordinary handlers, invoked the
//!   same way as registered ones
//! - The context is owned by one request at a time and reused via `reset`

pub mod context;
pub mod handler;

pub use context::{Context, Outcome};
pub use handler::{handler_fn, Handler, HandlerResult, HttpError};
