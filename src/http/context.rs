//! Per-request match context.
//!
//! # Responsibilities
//! - Hold the selected handler and the template of the matched route
//! - Hold captured parameter values as byte ranges into the request path
//! - Keep the search scratch stack so lookups stop allocating once warm
//!
//! # Design Decisions
//! - Parameter slots are sized by the caller (see `Router::new_context`);
//!   the router only writes into slots that already exist
//! - Parameter names are shared with the tree node, not copied

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use serde::Serialize;

use crate::http::handler::{not_found_handler, Handler, HandlerResult};
use crate::routing::search::Frame;

/// How a lookup ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Matched,
    NotFound,
    MethodNotAllowed,
}

pub struct Context {
    request_path: String,
    route: Option<Arc<str>>,
    param_names: Arc<[String]>,
    values: Vec<Range<usize>>,
    captured: usize,
    handler: Handler,
    outcome: Outcome,
    pub(crate) frames: Vec<Frame>,
}

impl Context {
    /// Context with `slots` parameter slots.
    pub fn with_capacity(slots: usize) -> Self {
        Self {
            request_path: String::new(),
            route: None,
            param_names: Arc::from(Vec::new()),
            values: vec![0..0; slots],
            captured: 0,
            handler: not_found_handler(),
            outcome: Outcome::NotFound,
            frames: Vec::new(),
        }
    }

    /// Clear everything from the previous request, keeping allocations.
    pub fn reset(&mut self) {
        self.request_path.clear();
        self.clear_match();
    }

    /// Grow the slot count to at least `slots`.
    pub fn ensure_capacity(&mut self, slots: usize) {
        if self.values.len() < slots {
            self.values.resize(slots, 0..0);
        }
    }

    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Value of the parameter `name` (`*` for the wildcard).
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// `(name, value)` pairs in declaration order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.param_names
            .iter()
            .map(String::as_str)
            .zip(self.param_values())
    }

    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    pub fn param_values(&self) -> impl Iterator<Item = &str> + '_ {
        self.values[..self.captured]
            .iter()
            .map(|range| &self.request_path[range.clone()])
    }

    /// Template of the matched route, e.g. `/users/:id`.
    pub fn path(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn request_path(&self) -> &str {
        &self.request_path
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn set_handler(&mut self, handler: Handler) {
        self.handler = handler;
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Run the selected handler against this context.
    pub fn invoke(&mut self) -> HandlerResult {
        let handler = self.handler.clone();
        handler(self)
    }

    pub(crate) fn begin(&mut self, request_path: &str) {
        self.request_path.clear();
        self.request_path.push_str(request_path);
        self.clear_match();
    }

    /// Write a captured value into `slot`. Returns `false` when the slot
    /// does not exist.
    pub(crate) fn capture(&mut self, slot: usize, range: Range<usize>) -> bool {
        match self.values.get_mut(slot) {
            Some(value) => {
                *value = range;
                true
            }
            None => false,
        }
    }

    pub(crate) fn resolve(
        &mut self,
        outcome: Outcome,
        handler: Handler,
        route: Option<Arc<str>>,
        param_names: Arc<[String]>,
        captured: usize,
    ) {
        self.outcome = outcome;
        self.handler = handler;
        self.route = route;
        self.param_names = param_names;
        self.captured = captured;
    }

    fn clear_match(&mut self) {
        self.route = None;
        self.param_names = Arc::from(Vec::new());
        self.captured = 0;
        self.handler = not_found_handler();
        self.outcome = Outcome::NotFound;
        self.frames.clear();
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("request_path", &self.request_path)
            .field("route", &self.route)
            .field("params", &self.params().collect::<Vec<_>>())
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
