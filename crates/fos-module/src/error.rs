//! Module errors

use fos_dom::DomError;

/// Result type for module lifecycle operations
pub type ModuleResult<T> = Result<T, ModuleError>;

/// Failures surfaced by the module lifecycle
///
/// Cloneable so one failure can be handed to the `on_error` hook, returned
/// from [`Module::error`](crate::Module::error) and re-raised from `load`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModuleError {
    #[error("Stylesheet failed to load: {0}")]
    Style(String),

    #[error("Data request failed: {0}")]
    Data(String),

    #[error("Template failed to load: {0}")]
    Template(String),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("Module error: {0}")]
    Failed(String),

    /// Raised when `error()` is called without a cause
    #[error("Module error")]
    Unspecified,
}

impl Default for ModuleError {
    fn default() -> Self {
        Self::Unspecified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ModuleError::Style("/css/card.css".into()).to_string(),
            "Stylesheet failed to load: /css/card.css"
        );
        assert_eq!(ModuleError::default().to_string(), "Module error");
        assert_eq!(
            ModuleError::from(DomError::NotAChild).to_string(),
            "DOM error: Node is not a child"
        );
    }
}
