//! DOM Tree (arena-based allocation)

use crate::{ClassList, DomError, DomResult, Node, NodeData, NodeId, NodeType};

/// Arena-based DOM tree
///
/// Slot 0 always holds the document node. Removed nodes stay in the arena
/// (detached) so ids held elsewhere never dangle.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.create_document();
        tree
    }

    /// Document root
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached document node (a secondary root)
    pub fn create_document(&mut self) -> NodeId {
        self.push(Node::document())
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached `<template>` element
    pub fn create_template(&mut self) -> NodeId {
        self.push(Node::template())
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.get(id).map(Node::node_type)
    }

    /// Parent of a node, `None` when detached or at a root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Children in document order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Check whether `child` is a direct child of `parent`
    pub fn is_child(&self, parent: NodeId, child: NodeId) -> bool {
        self.parent(child) == Some(parent)
    }

    /// Check whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn detach(&mut self, child: NodeId) {
        let parent = self.nodes[child.index()].parent;
        if parent.is_valid() {
            self.nodes[parent.index()].children.retain(|&c| c != child);
            self.nodes[child.index()].parent = NodeId::NONE;
        }
    }

    /// Create an element already attached as the last child of `parent`
    pub(crate) fn append_new_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let child = self.create_element(tag);
        self.nodes[child.index()].parent = parent;
        self.nodes[parent.index()].children.push(child);
        child
    }

    /// Append `child` as the last child of `parent`, moving it out of any
    /// previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if !self.node(parent)?.is_container() {
            return Err(DomError::HierarchyRequest);
        }
        if self.node(child)?.node_type() == NodeType::Document {
            return Err(DomError::HierarchyRequest);
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        self.detach(child);
        self.nodes[child.index()].parent = parent;
        self.nodes[parent.index()].children.push(child);
        Ok(child)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.node(parent)?;
        if self.node(child)?.parent != parent {
            return Err(DomError::NotAChild);
        }
        self.detach(child);
        tracing::trace!("removed node {:?} from {:?}", child, parent);
        Ok(child)
    }

    /// Move `child` into the inert content of a `<template>`
    pub fn append_to_template(&mut self, template: NodeId, child: NodeId) -> DomResult<()> {
        let is_template = self
            .node(template)?
            .as_element()
            .is_some_and(|e| e.is_template());
        if !is_template {
            return Err(DomError::InvalidNodeType);
        }
        if self.node(child)?.node_type() == NodeType::Document {
            return Err(DomError::HierarchyRequest);
        }

        self.detach(child);
        if let Some(content) = self.nodes[template.index()]
            .as_element_mut()
            .and_then(|e| e.template_content.as_mut())
        {
            content.push(child);
        }
        Ok(())
    }

    /// Inert content of a `<template>`, `None` for any other node
    pub fn template_content(&self, id: NodeId) -> Option<&[NodeId]> {
        self.get(id)?
            .as_element()?
            .template_content
            .as_deref()
    }

    /// Deep-clone the content of a `<template>` into fresh detached nodes
    pub fn import_template(&mut self, id: NodeId) -> DomResult<Vec<NodeId>> {
        let content = self
            .template_content(id)
            .ok_or(DomError::InvalidNodeType)?
            .to_vec();
        content
            .into_iter()
            .map(|node| self.clone_node(node, true))
            .collect()
    }

    /// Clone a node; `deep` also clones descendants and template content
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> DomResult<NodeId> {
        let source = self.node(id)?.clone();
        if source.node_type() == NodeType::Document {
            return Err(DomError::InvalidNodeType);
        }

        let mut data = source.data;
        let content = match &mut data {
            NodeData::Element(e) => e.template_content.take(),
            _ => None,
        };
        let copy = self.push(Node {
            parent: NodeId::NONE,
            children: Vec::new(),
            data,
        });

        if let Some(content) = content {
            let cloned = if deep {
                content
                    .iter()
                    .map(|&node| self.clone_node(node, true))
                    .collect::<DomResult<Vec<_>>>()?
            } else {
                Vec::new()
            };
            if let Some(e) = self.nodes[copy.index()].as_element_mut() {
                e.template_content = Some(cloned);
            }
        }

        if deep {
            for child in source.children {
                let cloned = self.clone_node(child, true)?;
                self.nodes[cloned.index()].parent = copy;
                self.nodes[copy.index()].children.push(cloned);
            }
        }
        Ok(copy)
    }

    /// Class list of an element
    pub fn class_list(&self, id: NodeId) -> Option<&ClassList> {
        self.get(id)?.as_element().map(|e| &e.classes)
    }

    /// Add a class; false when the node is not an element or already had it
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        self.get_mut(id)
            .and_then(Node::as_element_mut)
            .is_some_and(|e| e.classes.add(class))
    }

    /// Remove a class; false when nothing was removed
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        self.get_mut(id)
            .and_then(Node::as_element_mut)
            .is_some_and(|e| e.classes.remove(class))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_list(id).is_some_and(|c| c.contains(class))
    }

    /// Set the id attribute of an element
    pub fn set_id(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        let element = self
            .get_mut(id)
            .ok_or(DomError::NotFound)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType)?;
        element.id = Some(value.to_string());
        Ok(())
    }

    /// The id attribute of an element
    pub fn id(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element()?.id.as_deref()
    }

    /// Depth-first search below `root` for an element with the given id
    pub fn get_element_by_id(&self, root: NodeId, value: &str) -> Option<NodeId> {
        for &child in self.children(root) {
            if self.id(child) == Some(value) {
                return Some(child);
            }
            if let Some(found) = self.get_element_by_id(child, value) {
                return Some(found);
            }
        }
        None
    }

    /// Concatenated text of a node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            out.push_str(text);
        }
        for &child in self.children(id) {
            self.collect_text(child, out);
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_parent() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");

        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, span).unwrap();

        assert_eq!(tree.parent(span), Some(div));
        assert_eq!(tree.parent(div), Some(tree.root()));
        assert_eq!(tree.parent(tree.root()), None);
        assert_eq!(tree.children(div), &[span]);
    }

    #[test]
    fn test_secondary_document_is_detached() {
        let mut tree = DomTree::new();
        assert_eq!(tree.node_type(tree.root()), Some(NodeType::Document));

        let other = tree.create_document();
        assert_ne!(other, tree.root());
        assert_eq!(tree.node_type(other), Some(NodeType::Document));
        assert_eq!(tree.parent(other), None);
        assert_eq!(
            tree.append_child(tree.root(), other),
            Err(DomError::HierarchyRequest)
        );
    }

    #[test]
    fn test_append_moves_between_parents() {
        let mut tree = DomTree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("div");
        let child = tree.create_text("hello");

        tree.append_child(a, child).unwrap();
        tree.append_child(b, child).unwrap();

        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[child]);
    }

    #[test]
    fn test_hierarchy_errors() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("div");
        let text = tree.create_text("x");
        tree.append_child(outer, inner).unwrap();

        assert_eq!(tree.append_child(inner, outer), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(outer, outer), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(text, inner), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(outer, tree.root()), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(outer, NodeId(999)), Err(DomError::NotFound));
    }

    #[test]
    fn test_remove_child() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p = tree.create_element("p");
        tree.append_child(div, p).unwrap();

        assert_eq!(tree.remove_child(div, p), Ok(p));
        assert_eq!(tree.parent(p), None);
        assert_eq!(tree.remove_child(div, p), Err(DomError::NotAChild));
    }

    #[test]
    fn test_template_import_clones_content() {
        let mut tree = DomTree::new();
        let template = tree.create_template();
        let item = tree.create_element("li");
        let label = tree.create_text("first");
        tree.append_child(item, label).unwrap();
        tree.append_to_template(template, item).unwrap();

        assert!(tree.children(template).is_empty());
        assert_eq!(tree.template_content(template), Some(&[item][..]));

        let imported = tree.import_template(template).unwrap();
        assert_eq!(imported.len(), 1);
        assert_ne!(imported[0], item);
        assert_eq!(tree.text_content(imported[0]), "first");
        // Original content untouched
        assert_eq!(tree.template_content(template), Some(&[item][..]));
    }

    #[test]
    fn test_import_non_template() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        assert_eq!(tree.import_template(div), Err(DomError::InvalidNodeType));
        assert_eq!(tree.append_to_template(div, div), Err(DomError::InvalidNodeType));
    }

    #[test]
    fn test_shallow_clone() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.add_class(div, "card");
        let child = tree.create_element("p");
        tree.append_child(div, child).unwrap();

        let copy = tree.clone_node(div, false).unwrap();
        assert!(tree.has_class(copy, "card"));
        assert!(tree.children(copy).is_empty());
        assert_eq!(tree.clone_node(tree.root(), true), Err(DomError::InvalidNodeType));
    }

    #[test]
    fn test_classes_and_ids() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let text = tree.create_text("t");
        tree.append_child(tree.root(), div).unwrap();

        assert!(tree.add_class(div, "module-active"));
        assert!(!tree.add_class(div, "module-active"));
        assert!(!tree.add_class(text, "module-active"));
        assert!(tree.has_class(div, "module-active"));
        assert!(tree.remove_class(div, "module-active"));
        assert!(!tree.has_class(div, "module-active"));

        tree.set_id(div, "main").unwrap();
        assert_eq!(tree.set_id(text, "nope"), Err(DomError::InvalidNodeType));
        assert_eq!(tree.get_element_by_id(tree.root(), "main"), Some(div));
        assert_eq!(tree.get_element_by_id(tree.root(), "other"), None);
    }
}
