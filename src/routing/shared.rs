//! Copy-on-write router snapshots for route tables that change at runtime.
//!
//! # Design Decisions
//! - Readers load the current snapshot without locking; a lookup that started
//!   on an old snapshot finishes on it
//! - Writers clone the current tree, mutate the clone and publish it; a
//!   writer mutex keeps concurrent updates from losing each other's routes

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::http::Context;
use crate::routing::{RouteError, Router};

pub struct SharedRouter {
    current: ArcSwap<Router>,
    writer: Mutex<()>,
}

impl SharedRouter {
    pub fn new(router: Router) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
            writer: Mutex::new(()),
        }
    }

    /// The published snapshot.
    pub fn load(&self) -> Arc<Router> {
        self.current.load_full()
    }

    /// Replace the published tree wholesale.
    pub fn store(&self, router: Router) {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.current.store(Arc::new(router));
    }

    /// Apply `f` to a copy of the current tree and publish the result. If `f`
    /// fails, the published tree is left as it was.
    pub fn update<F>(&self, f: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Router) -> Result<(), RouteError>,
    {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = Router::clone(&self.current.load());
        f(&mut next)?;

        tracing::debug!(routes = next.routes().len(), "Publishing router snapshot");
        self.current.store(Arc::new(next));
        Ok(())
    }

    /// Look up against the current snapshot, growing `ctx` first if routes
    /// added since it was created need more parameter slots.
    pub fn find(&self, method: &str, path: &str, ctx: &mut Context) {
        let router = self.current.load();
        ctx.ensure_capacity(router.max_params());
        router.find(method, path, ctx);
    }
}

impl From<Router> for SharedRouter {
    fn from(router: Router) -> Self {
        Self::new(router)
    }
}

impl Default for SharedRouter {
    fn default() -> Self {
        Self::new(Router::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{handler_fn, Outcome};
    use crate::routing::Method;

    #[test]
    fn test_update_publishes_new_routes() {
        let shared = SharedRouter::default();
        let before = shared.load();

        shared
            .update(|router| router.get("/users/:id", handler_fn(|_| Ok(()))))
            .unwrap();

        let mut ctx = Context::default();
        shared.find("GET", "/users/7", &mut ctx);
        assert_eq!(ctx.outcome(), Outcome::Matched);
        assert_eq!(ctx.param("id"), Some("7"));

        // The old snapshot is untouched.
        before.find("GET", "/users/7", &mut ctx);
        assert_eq!(ctx.outcome(), Outcome::NotFound);
    }

    #[test]
    fn test_failed_update_keeps_current_tree() {
        let mut router = Router::new();
        router.get("/a", handler_fn(|_| Ok(()))).unwrap();
        let shared = SharedRouter::from(router);

        let err = shared
            .update(|router| {
                router.add(Method::Get, "/b", handler_fn(|_| Ok(())))?;
                router.add(Method::Get, "", handler_fn(|_| Ok(())))
            })
            .unwrap_err();
        assert_eq!(err, RouteError::EmptyPath);
        assert_eq!(shared.load().routes().len(), 1);
    }

    #[test]
    fn test_store_replaces_tree() {
        let shared = SharedRouter::default();
        let mut router = Router::new();
        router.post("/x", handler_fn(|_| Ok(()))).unwrap();
        shared.store(router);

        let mut ctx = Context::default();
        shared.find("GET", "/x", &mut ctx);
        assert_eq!(ctx.outcome(), Outcome::MethodNotAllowed);
    }
}
