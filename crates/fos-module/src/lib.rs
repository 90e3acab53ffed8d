//! fOS Modules
//!
//! Lifecycle core for UI modules bound to a DOM element.
//!
//! A module loads its children, stylesheets, data and template (in that
//! order), mounts the template nodes into its element, and toggles CSS
//! markers as it is shown, hidden, enabled, disabled or put in an error
//! state. Destroying a module removes what it mounted and restores the
//! markers the element carried before the module existed.
//!
//! # Example
//! ```rust,ignore
//! use fos_module::{Document, Module, ModuleOptions};
//!
//! let doc = Document::default();
//! let card = doc.create_element("div");
//! let content = doc.create_element("p");
//! doc.body().append_child(&card)?;
//!
//! let mut module = Module::new(Some(card), ModuleOptions::new().with_template_node(content));
//! smol::block_on(module.load())?;
//! smol::block_on(module.show());
//! module.destroy();
//! ```

mod ancestor;
mod collaborators;
mod dom_node;
mod error;
mod module;
mod options;

pub use ancestor::{AncestorWalker, closest_with_class, walk_ancestors};
pub use collaborators::{
    Collaborators, DataFetcher, ImmediateTransition, StyleLoader, TemplateLoader, TimedTransition,
    TransitionWaiter, Unconfigured,
};
pub use dom_node::{DomNode, NodeKind};
pub use error::{ModuleError, ModuleResult};
pub use module::{LoadStatus, Module};
pub use options::{
    DataSource, ErrorHook, Hook, Hooks, Method, ModuleClasses, ModuleOptions, RequestOptions,
    Template,
};

// Re-export the stock DOM for callers that do not bring their own
pub use fos_dom::{Document, NodeRef};
