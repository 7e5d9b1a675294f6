//! Arena-allocated radix tree nodes.
//!
//! # Design Decisions
//! - Nodes live in one `Vec` owned by the router and refer to each other by
//!   [`NodeId`]; the parent link is a plain index, so the tree is `Send + Sync`
//!   without any reference counting between nodes. Lookups never follow it
//!   upward; it is kept accurate across splits for tree inspection
//! - Prefixes are raw bytes: a split may fall inside a multi-byte character
//! - A node's prefix never spans a `:` or `*`; parameter and wildcard nodes
//!   carry exactly that one byte as their prefix

use std::fmt;
use std::sync::Arc;

use crate::http::Handler;
use crate::routing::method::{Method, MethodTable};

/// Stable index of a node in the router's arena.
pub type NodeId = usize;

/// Index of the root node.
pub const ROOT: NodeId = 0;

/// What a node matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Literal bytes.
    Static,
    /// One `/`-delimited segment (`:name`).
    Param,
    /// Everything that is left (`*`).
    Wildcard,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Static => "static",
            NodeKind::Param => "param",
            NodeKind::Wildcard => "wildcard",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub prefix: Vec<u8>,
    pub kind: NodeKind,
    pub first_byte: u8,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    /// Registered template, set only where a route terminates.
    pub real_path: Option<Arc<str>>,
    /// Parameter names from the root down to this node, in order.
    pub param_names: Arc<[String]>,
    pub handlers: MethodTable,
}

impl Node {
    /// Create a childless node without routes.
    pub fn new(kind: NodeKind, prefix: Vec<u8>, parent: Option<NodeId>) -> Self {
        Self {
            first_byte: prefix.first().copied().unwrap_or(0),
            prefix,
            kind,
            children: Vec::new(),
            parent,
            real_path: None,
            param_names: Arc::from(Vec::new()),
            handlers: MethodTable::default(),
        }
    }

    /// Root placeholder: empty prefix, no handlers.
    pub fn root() -> Self {
        Self::new(NodeKind::Static, Vec::new(), None)
    }

    pub fn set_prefix(&mut self, prefix: Vec<u8>) {
        self.first_byte = prefix.first().copied().unwrap_or(0);
        self.prefix = prefix;
    }

    pub fn handler(&self, method: Option<Method>) -> Option<&Handler> {
        method.and_then(|m| self.handlers.get(m))
    }

    pub fn has_handlers(&self) -> bool {
        !self.handlers.is_empty()
    }
}

/// Child lookups over the arena. These are the only places that walk
/// `children`.
pub trait Children {
    fn node(&self, id: NodeId) -> &Node;

    /// Static child whose prefix starts with `byte`.
    fn static_child(&self, id: NodeId, byte: u8) -> Option<NodeId> {
        self.node(id).children.iter().copied().find(|&c| {
            let child = self.node(c);
            child.kind == NodeKind::Static && child.first_byte == byte
        })
    }

    fn child_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .find(|&c| self.node(c).kind == kind)
    }

    /// Any child starting with `byte`; `:` and `*` select param and
    /// wildcard children since static prefixes never start with them.
    fn child_with_first_byte(&self, id: NodeId, byte: u8) -> Option<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .find(|&c| self.node(c).first_byte == byte)
    }
}

impl Children for [Node] {
    fn node(&self, id: NodeId) -> &Node {
        &self[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Vec<Node> {
        let mut nodes = vec![Node::root()];
        nodes[ROOT].set_prefix("/users/".into());
        for (kind, prefix) in [
            (NodeKind::Static, "new"),
            (NodeKind::Param, ":"),
            (NodeKind::Wildcard, "*"),
        ] {
            let id = nodes.len();
            nodes.push(Node::new(kind, prefix.into(), Some(ROOT)));
            nodes[ROOT].children.push(id);
        }
        nodes
    }

    #[test]
    fn test_child_lookup() {
        let nodes = arena();
        let tree = nodes.as_slice();

        assert_eq!(tree.static_child(ROOT, b'n'), Some(1));
        assert_eq!(tree.static_child(ROOT, b':'), None);
        assert_eq!(tree.child_of_kind(ROOT, NodeKind::Param), Some(2));
        assert_eq!(tree.child_of_kind(ROOT, NodeKind::Wildcard), Some(3));
        assert_eq!(tree.child_with_first_byte(ROOT, b'*'), Some(3));
        assert_eq!(tree.child_with_first_byte(ROOT, b'x'), None);
    }

    #[test]
    fn test_prefix_tracks_first_byte() {
        let mut node = Node::root();
        assert_eq!(node.first_byte, 0);
        assert!(!node.has_handlers());

        node.set_prefix("/a/".into());
        assert_eq!(node.first_byte, b'/');
        assert_eq!(NodeKind::Param.to_string(), "param");
    }
}
