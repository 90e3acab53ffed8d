//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree used by the module runtime. Nodes live in a single
//! `Vec` and are addressed by [`NodeId`]; [`NodeRef`] pairs an id with a
//! shared handle to its tree so callers can hold on to individual nodes.

mod classlist;
mod document;
mod handle;
mod node;
mod operations;
mod tree;

pub use classlist::ClassList;
pub use document::Document;
pub use handle::{NodeRef, SharedTree};
pub use node::{ElementData, Node, NodeData, NodeType};
pub use operations::{DomError, DomResult};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check this id points at a node slot
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
