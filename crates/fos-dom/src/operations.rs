//! DOM Node Operations
//!
//! Error type shared by tree mutation: appendChild, removeChild, cloneNode.

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting ancestor)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Nodes belong to different trees
    #[error("Wrong document")]
    WrongDocument,
    /// Invalid node type for the operation
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Node is not a child
    #[error("Node is not a child")]
    NotAChild,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomError::NotAChild.to_string(), "Node is not a child");
        assert_eq!(DomError::HierarchyRequest.to_string(), "Hierarchy request error");
    }
}
