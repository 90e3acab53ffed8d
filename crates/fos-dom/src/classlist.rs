//! Class list (DOMTokenList for the `class` attribute)
//!
//! Order-preserving, duplicate-free set of class tokens.

/// Space-separated class tokens of an element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create empty class list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a token, returns false when it was already present or empty
    pub fn add(&mut self, token: &str) -> bool {
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Remove a token, returns true when something was removed
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        self.tokens.len() != before
    }

    /// Serialized attribute value
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove() {
        let mut list = ClassList::new();
        assert!(list.add("module-active"));
        assert!(!list.add("module-active"));
        assert!(!list.add(""));
        assert_eq!(list.len(), 1);

        assert!(list.remove("module-active"));
        assert!(!list.remove("module-active"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_value_keeps_insertion_order() {
        let mut list = ClassList::new();
        list.add("card");
        list.add("module-loaded");
        list.add("card");
        assert_eq!(list.value(), "card module-loaded");

        list.remove("card");
        assert_eq!(list.value(), "module-loaded");
    }
}
