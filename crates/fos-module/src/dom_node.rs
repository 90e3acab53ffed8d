//! Display-tree capability
//!
//! The lifecycle only needs a handful of operations on its element. They are
//! collected in [`DomNode`] so modules can run against any tree; the fOS
//! in-memory DOM ([`NodeRef`]) is the stock implementation.

use std::fmt;

use fos_dom::{DomResult, NodeRef, NodeType};

/// How a node takes part in ancestor traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A real element: traversal continues through it
    Element,
    /// Top of a tree (document): traversal stops
    Root,
    /// Text, comments and anything else
    Other,
}

/// Operations a module performs on its display element
pub trait DomNode: Clone + PartialEq + fmt::Debug + 'static {
    fn kind(&self) -> NodeKind;

    fn parent(&self) -> Option<Self>;

    fn children(&self) -> Vec<Self>;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    fn has_class(&self, class: &str) -> bool;

    /// Append `child` as last child, moving it from any previous parent
    fn append_child(&self, child: &Self) -> DomResult<()>;

    fn remove_child(&self, child: &Self) -> DomResult<()>;

    /// Check `child` is currently a direct child of this node
    fn contains_child(&self, child: &Self) -> bool;

    /// Detached copies of a template definition's content, or `None` when
    /// this node is not a template definition
    fn import_template(&self) -> DomResult<Option<Vec<Self>>>;

    /// Detached scratch element owned by the same tree
    fn create_container(&self) -> Self;
}

impl DomNode for NodeRef {
    fn kind(&self) -> NodeKind {
        match self.node_type() {
            Some(NodeType::Element) => NodeKind::Element,
            Some(NodeType::Document) => NodeKind::Root,
            _ => NodeKind::Other,
        }
    }

    fn parent(&self) -> Option<Self> {
        NodeRef::parent(self)
    }

    fn children(&self) -> Vec<Self> {
        NodeRef::children(self)
    }

    fn add_class(&self, class: &str) {
        NodeRef::add_class(self, class);
    }

    fn remove_class(&self, class: &str) {
        NodeRef::remove_class(self, class);
    }

    fn has_class(&self, class: &str) -> bool {
        NodeRef::has_class(self, class)
    }

    fn append_child(&self, child: &Self) -> DomResult<()> {
        NodeRef::append_child(self, child)
    }

    fn remove_child(&self, child: &Self) -> DomResult<()> {
        NodeRef::remove_child(self, child)
    }

    fn contains_child(&self, child: &Self) -> bool {
        NodeRef::contains_child(self, child)
    }

    fn import_template(&self) -> DomResult<Option<Vec<Self>>> {
        if !self.is_template() {
            return Ok(None);
        }
        NodeRef::import_template(self).map(Some)
    }

    fn create_container(&self) -> Self {
        self.create_element("div")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::Document;

    #[test]
    fn test_node_kinds() {
        let doc = Document::default();
        let text = doc.create_text("hello");

        assert_eq!(DomNode::kind(&doc.body()), NodeKind::Element);
        assert_eq!(DomNode::kind(&doc.root()), NodeKind::Root);
        assert_eq!(DomNode::kind(&text), NodeKind::Other);
    }

    #[test]
    fn test_import_template_only_for_templates() {
        let doc = Document::default();
        let template = doc.create_template();
        let item = doc.create_element("li");
        template.append_to_template(&item).unwrap();

        let imported = DomNode::import_template(&template).unwrap().unwrap();
        assert_eq!(imported.len(), 1);
        assert_ne!(imported[0], item);

        assert_eq!(DomNode::import_template(&doc.body()).unwrap(), None);
    }

    #[test]
    fn test_container_is_detached() {
        let doc = Document::default();
        let container = doc.body().create_container();

        assert_eq!(DomNode::parent(&container), None);
        assert!(DomNode::children(&container).is_empty());
        assert!(container.same_tree(&doc.body()));
    }
}
