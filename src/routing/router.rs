//! The route tree.
//!
//! # Responsibilities
//! - Own the node arena and the largest parameter count seen
//! - Build a tree from a declarative route table
//! - List and render the registered routes for diagnostics

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::config::schema::RouteTableConfig;
use crate::http::{Context, Handler};
use crate::routing::method::Method;
use crate::routing::node::{Node, NodeId, ROOT};
use crate::routing::RouteError;

/// Radix-tree router.
///
/// ```
/// use route_trie::{handler_fn, Method, Outcome, Router};
///
/// let mut router = Router::new();
/// router.add(Method::Get, "/users/:id", handler_fn(|_| Ok(()))).unwrap();
///
/// let mut ctx = router.new_context();
/// router.find("GET", "/users/42", &mut ctx);
/// assert_eq!(ctx.outcome(), Outcome::Matched);
/// assert_eq!(ctx.param("id"), Some("42"));
/// ```
#[derive(Clone)]
pub struct Router {
    pub(crate) nodes: Vec<Node>,
    pub(crate) max_params: usize,
}

/// One registered (method, template) pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RouteInfo {
    pub path: String,
    pub method: Method,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
            max_params: 0,
        }
    }

    /// Build a router from a route table, resolving each route's handler by
    /// name.
    pub fn from_config<F>(config: &RouteTableConfig, mut resolve: F) -> Result<Self, RouteError>
    where
        F: FnMut(&str) -> Option<Handler>,
    {
        let mut router = Self::new();
        for route in &config.routes {
            let handler =
                resolve(&route.handler).ok_or_else(|| RouteError::UnresolvedHandler {
                    method: route.method.to_string(),
                    path: route.path.clone(),
                    name: route.handler.clone(),
                })?;
            router.add(route.method, &route.path, handler)?;
        }

        tracing::info!(
            routes = config.routes.len(),
            nodes = router.nodes.len(),
            max_params = router.max_params,
            "Route table built"
        );
        Ok(router)
    }

    /// Register a `GET` route.
    pub fn get(&mut self, path: &str, handler: Handler) -> Result<(), RouteError> {
        self.add(Method::Get, path, handler)
    }

    /// Register a `POST` route.
    pub fn post(&mut self, path: &str, handler: Handler) -> Result<(), RouteError> {
        self.add(Method::Post, path, handler)
    }

    /// Register a `PUT` route.
    pub fn put(&mut self, path: &str, handler: Handler) -> Result<(), RouteError> {
        self.add(Method::Put, path, handler)
    }

    /// Register a `PATCH` route.
    pub fn patch(&mut self, path: &str, handler: Handler) -> Result<(), RouteError> {
        self.add(Method::Patch, path, handler)
    }

    /// Register a `DELETE` route.
    pub fn delete(&mut self, path: &str, handler: Handler) -> Result<(), RouteError> {
        self.add(Method::Delete, path, handler)
    }

    /// Register a `HEAD` route.
    pub fn head(&mut self, path: &str, handler: Handler) -> Result<(), RouteError> {
        self.add(Method::Head, path, handler)
    }

    /// Register an `OPTIONS` route.
    pub fn options(&mut self, path: &str, handler: Handler) -> Result<(), RouteError> {
        self.add(Method::Options, path, handler)
    }

    /// Largest number of parameters any route captures.
    pub fn max_params(&self) -> usize {
        self.max_params
    }

    /// A context with enough parameter slots for every route.
    pub fn new_context(&self) -> Context {
        Context::with_capacity(self.max_params)
    }

    /// Every registered route, sorted by path then method.
    pub fn routes(&self) -> Vec<RouteInfo> {
        let mut routes: Vec<RouteInfo> = self
            .nodes
            .iter()
            .filter_map(|node| node.real_path.as_ref().map(|path| (node, path)))
            .flat_map(|(node, path)| {
                node.handlers.methods().map(move |method| RouteInfo {
                    path: path.to_string(),
                    method,
                })
            })
            .collect();
        routes.sort();
        routes
    }

    /// Indented rendering of the tree, one node per line.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let node = &self.nodes[id];
        write!(
            f,
            "{:indent$}{:?} {}",
            "",
            String::from_utf8_lossy(&node.prefix),
            node.kind,
            indent = depth * 2
        )?;
        if node.has_handlers() {
            write!(f, " {:?}", node.handlers)?;
        }
        if let Some(path) = &node.real_path {
            write!(f, " -> {path}")?;
        }
        writeln!(f)?;

        for &child in &node.children {
            self.write_node(f, child, depth + 1)?;
        }
        Ok(())
    }

    pub(crate) fn attach_route(&mut self, id: NodeId, method: Method, route: Terminal) {
        let node = &mut self.nodes[id];
        if node.handlers.insert(method, route.handler).is_some() {
            tracing::debug!(%method, path = %route.real_path, "Replacing existing handler");
        }
        self.max_params = self.max_params.max(route.param_names.len());
        node.real_path = Some(route.real_path);
        node.param_names = route.param_names;
    }
}

/// What a route leaves on the node where it terminates.
pub(crate) struct Terminal {
    pub handler: Handler,
    pub real_path: Arc<str>,
    pub param_names: Arc<[String]>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, ROOT, 0)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("nodes", &self.nodes.len())
            .field("max_params", &self.max_params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;
    use crate::http::handler_fn;

    fn ok() -> Handler {
        handler_fn(|_| Ok(()))
    }

    #[test]
    fn test_routes_listing() {
        let mut router = Router::new();
        router.post("/users", ok()).unwrap();
        router.get("/users", ok()).unwrap();
        router.get("/users/:id", ok()).unwrap();

        let listed: Vec<(String, Method)> = router
            .routes()
            .into_iter()
            .map(|r| (r.path, r.method))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("/users".to_string(), Method::Get),
                ("/users".to_string(), Method::Post),
                ("/users/:id".to_string(), Method::Get),
            ]
        );
        assert_eq!(router.max_params(), 1);
        assert_eq!(router.new_context().capacity(), 1);
    }

    #[test]
    fn test_dump() {
        let mut router = Router::new();
        router.get("/search", ok()).unwrap();
        router.get("/support", ok()).unwrap();

        let dump = router.dump();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "\"/s\" static");
        assert_eq!(lines[1], "  \"earch\" static [Get] -> /search");
        assert_eq!(lines[2], "  \"upport\" static [Get] -> /support");
    }

    #[test]
    fn test_from_config() {
        let config = RouteTableConfig {
            routes: vec![
                RouteConfig {
                    method: Method::Get,
                    path: "/health".into(),
                    handler: "health".into(),
                },
                RouteConfig {
                    method: Method::Delete,
                    path: "/users/:id".into(),
                    handler: "remove_user".into(),
                },
            ],
            ..Default::default()
        };

        let router = Router::from_config(&config, |_| Some(ok())).unwrap();
        assert_eq!(router.routes().len(), 2);

        let err = Router::from_config(&config, |name| (name == "health").then(ok)).unwrap_err();
        assert_eq!(
            err,
            RouteError::UnresolvedHandler {
                method: "DELETE".into(),
                path: "/users/:id".into(),
                name: "remove_user".into(),
            }
        );
    }
}
