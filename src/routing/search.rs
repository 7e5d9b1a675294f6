//! Request lookup.
//!
//! # Responsibilities
//! - Walk the tree for a request path, static before param before wildcard
//! - Remember lower-priority alternatives as fallback frames and backtrack to
//!   the most recent one on a dead end
//! - Capture parameter values and pick the handler or a sentinel
//!
//! # Design Decisions
//! - The frame stack lives in the `Context`, so a warm context never allocates
//! - A parameter matches one non-empty segment; a wildcard matches the rest,
//!   including nothing when the path ends right before it
//! - Once the path is consumed on a node with routes, a wrong method yields
//!   method-not-allowed instead of searching further

use std::sync::Arc;

use crate::http::handler::{method_not_allowed_handler, Handler};
use crate::http::{Context, Outcome};
use crate::routing::method::Method;
use crate::routing::node::{Children, NodeId, NodeKind, ROOT};
use crate::routing::router::Router;

/// A lower-priority child to try if the current branch dead-ends.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Param or wildcard child to enter.
    node: NodeId,
    /// Offset into the request path where that child starts matching.
    pos: usize,
    /// Parameters captured before that child.
    captured: usize,
}

/// Where a fully consumed path ended up, with the final capture count.
enum Terminal<'a> {
    Found(NodeId, &'a Handler, usize),
    MethodNotAllowed(NodeId, usize),
}

impl Router {
    /// Look up `method` and `path`, filling `ctx` with the selected handler,
    /// the matched template and the captured parameters.
    ///
    /// Never fails: a miss selects the not-found or method-not-allowed
    /// sentinel handler.
    pub fn find(&self, method: &str, path: &str, ctx: &mut Context) {
        let method = method.parse::<Method>().ok();
        let path = if path.is_empty() { "/" } else { path };
        ctx.begin(path);

        let bytes = path.as_bytes();
        let mut frames = std::mem::take(&mut ctx.frames);
        let mut cur = ROOT;
        let mut pos = 0;
        let mut captured = 0;

        loop {
            if let Some(next) = self.consume(cur, bytes, &mut pos, &mut captured, ctx) {
                if next {
                    if let Some(child) = self.descend(cur, bytes, pos, captured, &mut frames) {
                        cur = child;
                        continue;
                    }
                } else if let Some(terminal) = self.terminal(cur, method, captured, ctx) {
                    self.settle(terminal, ctx);
                    break;
                }
            }

            match frames.pop() {
                Some(frame) => {
                    tracing::trace!(path, pos = frame.pos, "Backtracking");
                    cur = frame.node;
                    pos = frame.pos;
                    captured = frame.captured;
                }
                None => {
                    tracing::trace!(path, "No route matched");
                    break;
                }
            }
        }

        frames.clear();
        ctx.frames = frames;
    }

    /// Match node `id` against the path at `pos`. Returns `None` on mismatch,
    /// otherwise whether any path is left.
    fn consume(
        &self,
        id: NodeId,
        bytes: &[u8],
        pos: &mut usize,
        captured: &mut usize,
        ctx: &mut Context,
    ) -> Option<bool> {
        let node = &self.nodes[id];
        let rest = &bytes[*pos..];

        match node.kind {
            NodeKind::Static => {
                if !rest.starts_with(&node.prefix) {
                    return None;
                }
                *pos += node.prefix.len();
            }
            NodeKind::Param => {
                let len = rest.iter().position(|&b| b == b'/').unwrap_or(rest.len());
                if len == 0 || !ctx.capture(*captured, *pos..*pos + len) {
                    return None;
                }
                *captured += 1;
                *pos += len;
            }
            NodeKind::Wildcard => {
                if !ctx.capture(*captured, *pos..bytes.len()) {
                    return None;
                }
                *captured += 1;
                *pos = bytes.len();
            }
        }
        Some(*pos < bytes.len())
    }

    /// Pick the best child for the rest of the path, stacking the others.
    fn descend(
        &self,
        id: NodeId,
        bytes: &[u8],
        pos: usize,
        captured: usize,
        frames: &mut Vec<Frame>,
    ) -> Option<NodeId> {
        let stat = self.nodes.static_child(id, bytes[pos]);
        let param = self.nodes.child_of_kind(id, NodeKind::Param);
        let wildcard = self.nodes.child_of_kind(id, NodeKind::Wildcard);
        let best = stat.or(param).or(wildcard)?;

        // Wildcard goes in first so the param fallback pops first.
        for alt in [wildcard, param].into_iter().flatten() {
            if alt != best {
                frames.push(Frame {
                    node: alt,
                    pos,
                    captured,
                });
            }
        }
        Some(best)
    }

    /// Resolve the handler once the path is consumed on node `id`.
    fn terminal<'a>(
        &'a self,
        id: NodeId,
        method: Option<Method>,
        captured: usize,
        ctx: &mut Context,
    ) -> Option<Terminal<'a>> {
        let node = &self.nodes[id];
        if let Some(handler) = node.handler(method) {
            return Some(Terminal::Found(id, handler, captured));
        }

        // A trailing wildcard also matches an empty remainder.
        let end = ctx.request_path().len();
        let wildcard = match self.nodes.child_of_kind(id, NodeKind::Wildcard) {
            Some(w) if ctx.capture(captured, end..end) => Some(w),
            _ => None,
        };
        if let Some(w) = wildcard {
            if let Some(handler) = self.nodes[w].handler(method) {
                return Some(Terminal::Found(w, handler, captured + 1));
            }
        }

        if node.has_handlers() {
            return Some(Terminal::MethodNotAllowed(id, captured));
        }
        match wildcard {
            Some(w) if self.nodes[w].has_handlers() => {
                Some(Terminal::MethodNotAllowed(w, captured + 1))
            }
            _ => None,
        }
    }

    fn settle(&self, terminal: Terminal<'_>, ctx: &mut Context) {
        let (id, outcome, handler, captured) = match terminal {
            Terminal::Found(id, handler, captured) => {
                (id, Outcome::Matched, handler.clone(), captured)
            }
            Terminal::MethodNotAllowed(id, captured) => (
                id,
                Outcome::MethodNotAllowed,
                method_not_allowed_handler(),
                captured,
            ),
        };
        let node = &self.nodes[id];
        ctx.resolve(
            outcome,
            handler,
            node.real_path.clone(),
            Arc::clone(&node.param_names),
            captured,
        );
    }
}
