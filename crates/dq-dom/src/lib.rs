//! dq DOM - Document Object Model
//!
//! Arena-based live document tree. Nodes are addressed by [`NodeId`] and
//! never freed; detached nodes stay in the arena until the tree is dropped.

mod classlist;
mod document;
pub mod events;
mod interner;
mod node;
pub mod properties;
mod style;
mod tree;

pub use classlist::ClassList;
pub use document::Document;
pub use events::{Event, EventPhase, Listener, ListenerId, ListenerOptions};
pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use properties::PropertyTarget;
pub use style::StyleDeclaration;
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node ID does not exist in this tree
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    /// Insertion would create a cycle or put a node where it cannot live
    #[error("Hierarchy request error: cannot insert {child:?} into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Operation needs an element but got another node kind
    #[error("Invalid node type for {0:?}")]
    InvalidNodeType(NodeId),

    /// Reference node is not a child of the given parent
    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
}
