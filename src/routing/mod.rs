//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     Router::add(method, "/users/:id", handler)
//!     → insert.rs (parse template, walk and split the radix tree)
//!     → node.rs (arena of static / param / wildcard nodes)
//!
//! Request Lookup (per request):
//!     Router::find(method, path, &mut Context)
//!     → search.rs (static > param > wildcard, backtracking on dead ends)
//!     → Context filled with handler, route template, parameter values
//! ```
//!
//! # Design Decisions
//! - Build then serve: `add` takes `&mut self`, `find` takes `&self`, so the
//!   borrow checker enforces that no registration races a lookup
//! - Routes that change at runtime go through `SharedRouter`, which swaps
//!   whole snapshots
//! - Lookups never fail; misses select a sentinel handler

pub mod error;
pub mod insert;
pub mod method;
pub mod node;
pub mod router;
pub mod search;
pub mod shared;

pub use error::RouteError;
pub use method::{Method, MethodTable};
pub use router::{RouteInfo, Router};
pub use shared::SharedRouter;
