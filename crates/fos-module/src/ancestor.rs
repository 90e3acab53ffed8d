//! Ancestor traversal
//!
//! Walks from a node up through its parents. Only [`NodeKind::Element`]
//! nodes are visited: reaching the document root, a non-element node or the
//! top of a detached subtree ends the walk.

use crate::{DomNode, NodeKind};

/// Iterator over a node and its element ancestors, nearest first
#[derive(Debug, Clone)]
pub struct AncestorWalker<N> {
    next: Option<N>,
}

impl<N: DomNode> AncestorWalker<N> {
    /// Start at `start` (inclusive)
    pub fn new(start: N) -> Self {
        Self { next: Some(start) }
    }
}

impl<N: DomNode> Iterator for AncestorWalker<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let current = self.next.take()?;
        if current.kind() != NodeKind::Element {
            return None;
        }
        self.next = current.parent();
        Some(current)
    }
}

/// Visit `start` and its element ancestors while `visit` returns true.
///
/// Returns the element for which `visit` returned false, or `None` when the
/// walk ran out of elements first.
pub fn walk_ancestors<N, F>(start: N, mut visit: F) -> Option<N>
where
    N: DomNode,
    F: FnMut(&N) -> bool,
{
    AncestorWalker::new(start).find(|node| !visit(node))
}

/// Nearest element, `start` included, that carries `class`
pub fn closest_with_class<N: DomNode>(start: N, class: &str) -> Option<N> {
    walk_ancestors(start, |node| !node.has_class(class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::{Document, NodeRef};

    /// body > section.panel > div.card > span
    fn nested() -> (Document, NodeRef, NodeRef, NodeRef) {
        let doc = Document::default();
        let section = doc.create_element("section");
        let card = doc.create_element("div");
        let span = doc.create_element("span");
        section.add_class("panel");
        card.add_class("card");
        doc.body().append_child(&section).unwrap();
        section.append_child(&card).unwrap();
        card.append_child(&span).unwrap();
        (doc, section, card, span)
    }

    #[test]
    fn test_walker_order() {
        let (doc, section, card, span) = nested();
        let visited: Vec<_> = AncestorWalker::new(span.clone()).collect();
        assert_eq!(
            visited,
            vec![span, card, section, doc.body(), doc.document_element()]
        );
    }

    #[test]
    fn test_closest_includes_start() {
        let (_doc, _section, card, span) = nested();
        assert_eq!(closest_with_class(card.clone(), "card"), Some(card.clone()));
        assert_eq!(closest_with_class(span, "card"), Some(card));
    }

    #[test]
    fn test_closest_missing() {
        let (_doc, _section, _card, span) = nested();
        assert_eq!(closest_with_class(span, "sidebar"), None);
    }

    #[test]
    fn test_walk_stops_on_false() {
        let (_doc, section, _card, span) = nested();
        let mut steps = 0;
        let stopped = walk_ancestors(span, |node| {
            steps += 1;
            !node.has_class("panel")
        });
        assert_eq!(stopped, Some(section));
        assert_eq!(steps, 3);
    }

    #[test]
    fn test_non_element_start() {
        let doc = Document::default();
        let text = doc.create_text("label");
        doc.body().append_child(&text).unwrap();

        assert_eq!(AncestorWalker::new(text).count(), 0);
        assert_eq!(AncestorWalker::new(doc.root()).count(), 0);
    }

    #[test]
    fn test_detached_subtree() {
        let doc = Document::default();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        outer.append_child(&inner).unwrap();

        assert_eq!(AncestorWalker::new(inner).count(), 2);
    }
}
