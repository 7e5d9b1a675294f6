//! Shared helpers for the integration suites.

#![allow(dead_code)]

use std::sync::Arc;

use route_trie::{handler_fn, Context, Handler, Router};

/// A handler that always succeeds. Each call returns a distinct handler, so
/// tests can tell routes apart by identity.
pub fn ok() -> Handler {
    handler_fn(|_| Ok(()))
}

/// Whether `ctx` selected exactly `expected`.
pub fn selected(ctx: &Context, expected: &Handler) -> bool {
    Arc::ptr_eq(ctx.handler(), expected)
}

/// Run one lookup on a fresh, correctly sized context.
pub fn lookup(router: &Router, method: &str, path: &str) -> Context {
    let mut ctx = router.new_context();
    router.find(method, path, &mut ctx);
    ctx
}

/// Owned `(name, value)` pairs, for comparisons.
pub fn params(ctx: &Context) -> Vec<(String, String)> {
    ctx.params()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect()
}
