//! Route registration: template parsing and radix-tree insertion.
//!
//! # Responsibilities
//! - Normalize and validate route templates
//! - Force node boundaries in front of `:name` and `*` segments
//! - Walk the tree by longest common prefix, splitting nodes as needed
//!
//! # Design Decisions
//! - Registration errors are returned before the tree is touched
//! - Re-registering a (method, path) pair replaces the handler
//! - One terminal node cannot carry two different parameter-name lists;
//!   `/users/:id` then `/users/:name` is rejected

use std::mem;
use std::sync::Arc;

use crate::http::Handler;
use crate::routing::method::Method;
use crate::routing::node::{Children, Node, NodeId, NodeKind, ROOT};
use crate::routing::router::{Router, Terminal};
use crate::routing::RouteError;

/// A route template with parameter names stripped out.
///
/// `/users/:id/files/*` becomes `/users/:/files/*` with names `["id", "*"]`.
#[derive(Debug, PartialEq, Eq)]
struct Template {
    stripped: String,
    names: Vec<String>,
    /// Intermediate insertions: end offset into `stripped` and node kind.
    splits: Vec<(usize, NodeKind)>,
    /// Kind of the node the full template ends on.
    kind: NodeKind,
}

impl Template {
    fn parse(path: &str) -> Result<Self, RouteError> {
        let mut stripped = String::with_capacity(path.len());
        let mut names = Vec::new();
        let mut splits = Vec::new();
        let mut rest = path;

        while let Some(pos) = rest.find([':', '*']) {
            stripped.push_str(&rest[..pos]);
            splits.push((stripped.len(), NodeKind::Static));

            if rest.as_bytes()[pos] == b'*' {
                if pos + 1 != rest.len() {
                    return Err(RouteError::WildcardNotLast { path: path.to_string() });
                }
                stripped.push('*');
                names.push("*".to_string());
                splits.push((stripped.len(), NodeKind::Wildcard));
                rest = "";
                break;
            }

            let tail = &rest[pos + 1..];
            let end = tail.find('/').unwrap_or(tail.len());
            if end == 0 {
                return Err(RouteError::EmptyParamName { path: path.to_string() });
            }
            stripped.push(':');
            names.push(tail[..end].to_string());
            splits.push((stripped.len(), NodeKind::Param));
            rest = &tail[end..];
        }
        stripped.push_str(rest);

        let kind = match splits.last() {
            Some(&(end, kind)) if end == stripped.len() => {
                splits.pop();
                kind
            }
            _ => NodeKind::Static,
        };

        Ok(Self {
            stripped,
            names,
            splits,
            kind,
        })
    }
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

impl Router {
    /// Register `handler` for `method` on `path`.
    ///
    /// Paths are literal segments, `:name` parameter segments and an optional
    /// trailing `*` wildcard. A missing leading `/` is added.
    pub fn add(&mut self, method: Method, path: &str, handler: Handler) -> Result<(), RouteError> {
        if path.is_empty() {
            return Err(RouteError::EmptyPath);
        }
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let template = Template::parse(&path)?;
        let param_names: Arc<[String]> = Arc::from(template.names);
        self.check_conflict(&template.stripped, &path, &param_names)?;

        let stripped = template.stripped.as_bytes();
        for &(end, kind) in &template.splits {
            self.insert(method, &stripped[..end], kind, None);
        }
        self.insert(
            method,
            stripped,
            template.kind,
            Some(Terminal {
                handler,
                real_path: Arc::from(path.as_str()),
                param_names: param_names.clone(),
            }),
        );

        tracing::debug!(%method, %path, params = param_names.len(), "Route registered");
        Ok(())
    }

    /// Reject a template whose terminal node already names its parameters
    /// differently. Runs before any mutation.
    fn check_conflict(&self, stripped: &str, path: &str, names: &[String]) -> Result<(), RouteError> {
        let Some(id) = self.locate(stripped.as_bytes()) else {
            return Ok(());
        };
        let node = &self.nodes[id];
        if node.real_path.is_some() && *node.param_names != *names {
            return Err(RouteError::ParamConflict {
                path: path.to_string(),
                existing: node.param_names.to_vec(),
                new: names.to_vec(),
            });
        }
        Ok(())
    }

    /// Node whose accumulated prefix is exactly `text`, if one exists.
    fn locate(&self, mut text: &[u8]) -> Option<NodeId> {
        let mut cur = ROOT;
        loop {
            let prefix = &self.nodes[cur].prefix;
            if !text.starts_with(prefix) {
                return None;
            }
            text = &text[prefix.len()..];
            match text.first() {
                None => return Some(cur),
                Some(&byte) => cur = self.nodes.child_with_first_byte(cur, byte)?,
            }
        }
    }

    fn insert(&mut self, method: Method, mut text: &[u8], kind: NodeKind, route: Option<Terminal>) {
        let mut cur = ROOT;
        loop {
            let prefix_len = self.nodes[cur].prefix.len();

            if prefix_len == 0 {
                // Fresh root adopts the text.
                let node = &mut self.nodes[cur];
                node.set_prefix(text.to_vec());
                if let Some(route) = route {
                    node.kind = kind;
                    self.attach_route(cur, method, route);
                }
                return;
            }

            let lcp = common_prefix_len(text, &self.nodes[cur].prefix);

            if lcp < prefix_len {
                self.split(cur, lcp);
                if lcp == text.len() {
                    if let Some(route) = route {
                        self.attach_route(cur, method, route);
                    }
                } else {
                    self.push_child(cur, kind, &text[lcp..], method, route);
                }
                return;
            }

            if lcp < text.len() {
                text = &text[lcp..];
                if let Some(child) = self.nodes.child_with_first_byte(cur, text[0]) {
                    cur = child;
                    continue;
                }
                self.push_child(cur, kind, text, method, route);
                return;
            }

            // Exact match: the node already exists.
            if let Some(route) = route {
                self.attach_route(cur, method, route);
            }
            return;
        }
    }

    /// Shrink `id` to its first `at` bytes. The remainder, with all routes
    /// and children, moves into a new child.
    fn split(&mut self, id: NodeId, at: usize) {
        let child_id = self.nodes.len();
        let node = &mut self.nodes[id];

        let tail = node.prefix.split_off(at);
        let mut child = Node::new(mem::replace(&mut node.kind, NodeKind::Static), tail, Some(id));
        child.children = mem::take(&mut node.children);
        child.handlers = mem::take(&mut node.handlers);
        child.real_path = node.real_path.take();
        child.param_names = mem::replace(&mut node.param_names, Arc::from(Vec::new()));
        node.children.push(child_id);

        for &grandchild in &child.children {
            self.nodes[grandchild].parent = Some(child_id);
        }
        self.nodes.push(child);
    }

    fn push_child(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        prefix: &[u8],
        method: Method,
        route: Option<Terminal>,
    ) {
        let id = self.nodes.len();
        self.nodes.push(Node::new(kind, prefix.to_vec(), Some(parent)));
        self.nodes[parent].children.push(id);
        if let Some(route) = route {
            self.attach_route(id, method, route);
        }
    }
}
