//! Node handles
//!
//! A [`NodeRef`] is a cheap clone of a shared tree pointer plus a node id.
//! Borrows of the tree are scoped to each call, so handles can be stored and
//! passed across await points freely.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{DomError, DomResult, DomTree, NodeId, NodeType};

/// Tree shared between every handle into it
pub type SharedTree = Rc<RefCell<DomTree>>;

/// Handle to one node of a shared tree
#[derive(Clone)]
pub struct NodeRef {
    tree: SharedTree,
    id: NodeId,
}

impl NodeRef {
    pub fn new(tree: SharedTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &SharedTree {
        &self.tree
    }

    /// Check both handles point into the same tree
    pub fn same_tree(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree)
    }

    fn at(&self, id: NodeId) -> NodeRef {
        NodeRef::new(Rc::clone(&self.tree), id)
    }

    fn check_tree(&self, other: &NodeRef) -> DomResult<()> {
        if self.same_tree(other) {
            Ok(())
        } else {
            Err(DomError::WrongDocument)
        }
    }

    pub fn node_type(&self) -> Option<NodeType> {
        self.tree.borrow().node_type(self.id)
    }

    pub fn parent(&self) -> Option<NodeRef> {
        let parent = self.tree.borrow().parent(self.id)?;
        Some(self.at(parent))
    }

    pub fn children(&self) -> Vec<NodeRef> {
        let ids = self.tree.borrow().children(self.id).to_vec();
        ids.into_iter().map(|id| self.at(id)).collect()
    }

    pub fn append_child(&self, child: &NodeRef) -> DomResult<()> {
        self.check_tree(child)?;
        self.tree.borrow_mut().append_child(self.id, child.id)?;
        Ok(())
    }

    pub fn remove_child(&self, child: &NodeRef) -> DomResult<()> {
        self.check_tree(child)?;
        self.tree.borrow_mut().remove_child(self.id, child.id)?;
        Ok(())
    }

    /// Check `child` is a direct child of this node
    pub fn contains_child(&self, child: &NodeRef) -> bool {
        self.same_tree(child) && self.tree.borrow().is_child(self.id, child.id)
    }

    pub fn add_class(&self, class: &str) -> bool {
        self.tree.borrow_mut().add_class(self.id, class)
    }

    pub fn remove_class(&self, class: &str) -> bool {
        self.tree.borrow_mut().remove_class(self.id, class)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.tree.borrow().has_class(self.id, class)
    }

    pub fn set_id(&self, value: &str) -> DomResult<()> {
        self.tree.borrow_mut().set_id(self.id, value)
    }

    pub fn element_id(&self) -> Option<String> {
        self.tree.borrow().id(self.id).map(str::to_string)
    }

    pub fn is_template(&self) -> bool {
        self.tree.borrow().template_content(self.id).is_some()
    }

    /// Move `child` into this template's inert content
    pub fn append_to_template(&self, child: &NodeRef) -> DomResult<()> {
        self.check_tree(child)?;
        self.tree.borrow_mut().append_to_template(self.id, child.id)
    }

    /// Fresh detached copies of this template's content
    pub fn import_template(&self) -> DomResult<Vec<NodeRef>> {
        let ids = self.tree.borrow_mut().import_template(self.id)?;
        Ok(ids.into_iter().map(|id| self.at(id)).collect())
    }

    /// Create a detached element in the same tree
    pub fn create_element(&self, tag: &str) -> NodeRef {
        let id = self.tree.borrow_mut().create_element(tag);
        self.at(id)
    }

    /// Create a detached text node in the same tree
    pub fn create_text(&self, content: &str) -> NodeRef {
        let id = self.tree.borrow_mut().create_text(content);
        self.at(id)
    }

    pub fn text_content(&self) -> String {
        self.tree.borrow().text_content(self.id)
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.same_tree(other)
    }
}

impl Eq for NodeRef {}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree.borrow();
        match tree.get(self.id).and_then(|n| n.as_element()) {
            Some(e) => write!(f, "NodeRef({:?} <{}>)", self.id, e.tag),
            None => write!(f, "NodeRef({:?})", self.id),
        }
    }
}
