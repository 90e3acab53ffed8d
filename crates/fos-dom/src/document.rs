//! Document - High-level document API

use std::cell::RefCell;
use std::rc::Rc;

use crate::{DomTree, NodeId, NodeRef, SharedTree};

/// HTML Document
///
/// Owns the shared tree and caches the `<html>`, `<head>` and `<body>`
/// skeleton created at construction.
pub struct Document {
    tree: SharedTree,
    /// Document URL
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a new document with the html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let root = tree.root();
        let html = tree.append_new_element(root, "html");
        let head = tree.append_new_element(html, "head");
        let body = tree.append_new_element(html, "body");

        Self {
            tree: Rc::new(RefCell::new(tree)),
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Shared tree backing this document
    pub fn tree(&self) -> SharedTree {
        Rc::clone(&self.tree)
    }

    /// Handle to any node of this document
    pub fn node(&self, id: NodeId) -> NodeRef {
        NodeRef::new(self.tree(), id)
    }

    /// The document node itself
    pub fn root(&self) -> NodeRef {
        self.node(NodeId::ROOT)
    }

    /// Get `<html>` element
    pub fn document_element(&self) -> NodeRef {
        self.node(self.html_element)
    }

    /// Get `<head>` element
    pub fn head(&self) -> NodeRef {
        self.node(self.head_element)
    }

    /// Get `<body>` element
    pub fn body(&self) -> NodeRef {
        self.node(self.body_element)
    }

    /// Create a detached element
    pub fn create_element(&self, tag: &str) -> NodeRef {
        let id = self.tree.borrow_mut().create_element(tag);
        self.node(id)
    }

    /// Create a detached `<template>`
    pub fn create_template(&self) -> NodeRef {
        let id = self.tree.borrow_mut().create_template();
        self.node(id)
    }

    /// Create a detached text node
    pub fn create_text(&self, content: &str) -> NodeRef {
        let id = self.tree.borrow_mut().create_text(content);
        self.node(id)
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeRef> {
        let found = self.tree.borrow().get_element_by_id(NodeId::ROOT, id)?;
        Some(self.node(found))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
