//! Observability subsystem.
//!
//! # Design Decisions
//! - The library only emits `tracing` events: `debug` while building the
//!   tree, `trace` on the lookup hot path
//! - Installing a subscriber is left to binaries (see `logging.rs`)

pub mod logging;
