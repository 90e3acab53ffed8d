//! Module lifecycle
//!
//! A [`Module`] owns the lifecycle of one display element: loading its
//! children, styles, data and template, mounting the template nodes, toggling
//! the active/disabled/error markers, and putting the element back the way
//! it was found on [`Module::destroy`].

use std::collections::BTreeMap;

use fos_dom::NodeRef;
use futures::future::{self, LocalBoxFuture};
use serde_json::Value;

use crate::ancestor::closest_with_class;
use crate::options::Hooks;
use crate::{
    Collaborators, DataSource, DomNode, ModuleError, ModuleOptions, ModuleResult, Template,
};

/// Progress of [`Module::load`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
}

/// A composable UI module bound to one display element
#[derive(Debug)]
pub struct Module<N: DomNode = NodeRef> {
    element: Option<N>,
    options: ModuleOptions<N>,
    collaborators: Collaborators<N>,
    children: BTreeMap<String, Module<N>>,

    loaded: bool,
    active: bool,
    disabled: bool,
    errored: bool,
    load_status: LoadStatus,

    /// Nodes appended to `element` by the last successful load
    mounted: Vec<N>,
    data: Option<Value>,

    original_disabled: bool,
    original_errored: bool,
}

impl<N: DomNode> Module<N> {
    /// Create a module using the default collaborators
    pub fn new(element: Option<N>, options: ModuleOptions<N>) -> Self {
        Self::with_collaborators(element, options, Collaborators::default())
    }

    /// Create a module loading through `collaborators`.
    ///
    /// Disabled or error markers already present on the element are kept as
    /// the module's initial state and restored again by `destroy`.
    pub fn with_collaborators(
        element: Option<N>,
        options: ModuleOptions<N>,
        collaborators: Collaborators<N>,
    ) -> Self {
        if element.is_none() {
            tracing::error!("module created without an element; DOM updates will be skipped");
        }

        let (original_disabled, original_errored) = match &element {
            Some(el) => (
                el.has_class(&options.classes.disabled),
                el.has_class(&options.classes.error),
            ),
            None => (false, false),
        };

        let mut module = Self {
            element,
            options,
            collaborators,
            children: BTreeMap::new(),
            loaded: false,
            active: false,
            disabled: false,
            errored: false,
            load_status: LoadStatus::NotLoaded,
            mounted: Vec::new(),
            data: None,
            original_disabled,
            original_errored,
        };

        if original_disabled {
            module.apply_disabled(true);
        }
        if original_errored {
            module.apply_error(&ModuleError::default());
        }
        module
    }

    pub fn element(&self) -> Option<&N> {
        self.element.as_ref()
    }

    pub fn options(&self) -> &ModuleOptions<N> {
        &self.options
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_errored(&self) -> bool {
        self.errored
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    /// Nodes mounted by the last successful load, in document order
    pub fn mounted_nodes(&self) -> &[N] {
        &self.mounted
    }

    /// Data resolved by the last successful load
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn was_originally_disabled(&self) -> bool {
        self.original_disabled
    }

    pub fn was_originally_errored(&self) -> bool {
        self.original_errored
    }

    /// Add a child under `name`, returning any child it replaces
    pub fn add_child(&mut self, name: impl Into<String>, child: Module<N>) -> Option<Module<N>> {
        self.children.insert(name.into(), child)
    }

    /// Detach a child without destroying it
    pub fn remove_child(&mut self, name: &str) -> Option<Module<N>> {
        self.children.remove(name)
    }

    pub fn child(&self, name: &str) -> Option<&Module<N>> {
        self.children.get(name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Module<N>> {
        self.children.get_mut(name)
    }

    /// Children in name order
    pub fn children(&self) -> impl Iterator<Item = (&str, &Module<N>)> {
        self.children.iter().map(|(name, child)| (name.as_str(), child))
    }

    /// Load children, styles, data and template, then mount the template.
    ///
    /// Runs once: after a successful load further calls resolve immediately.
    /// On failure the error path runs and the same error is returned.
    pub fn load(&mut self) -> LocalBoxFuture<'_, ModuleResult<()>> {
        Box::pin(async move {
            if self.loaded {
                return Ok(());
            }

            self.load_status = LoadStatus::Loading;
            tracing::debug!("loading module with {} children", self.children.len());

            match self.fetch_and_mount().await {
                Ok(()) => {
                    tracing::info!("module loaded, {} nodes mounted", self.mounted.len());
                    Ok(())
                }
                Err(err) => {
                    tracing::warn!("module load failed: {}", err);
                    Err(self.error(Some(err)).await)
                }
            }
        })
    }

    async fn fetch_and_mount(&mut self) -> ModuleResult<()> {
        self.load_children().await?;
        self.collaborators.styles.load_css(&self.options.styles).await?;
        let data = self.resolve_data().await?;
        let nodes = self.resolve_template().await?;
        self.mount(nodes)?;

        self.data = data;
        self.loaded = true;
        self.load_status = LoadStatus::Loaded;
        self.set_marker(&self.options.classes.loaded, true);
        Hooks::fire(self.options.hooks.on_load.as_ref());
        Ok(())
    }

    /// Load every child concurrently; the first failure in name order wins
    /// once all of them have settled.
    async fn load_children(&mut self) -> ModuleResult<()> {
        let outcomes = future::join_all(self.children.values_mut().map(Module::load)).await;
        outcomes.into_iter().collect()
    }

    async fn resolve_data(&self) -> ModuleResult<Option<Value>> {
        match &self.options.data {
            None => Ok(None),
            Some(DataSource::Value(value)) => Ok(Some(value.clone())),
            Some(DataSource::Fetch(url)) => {
                let options = self.options.request_options.as_ref();
                let value = self.collaborators.data.fetch_data(url, options).await?;
                Ok(Some(value))
            }
        }
    }

    async fn resolve_template(&self) -> ModuleResult<Vec<N>> {
        match &self.options.template {
            Template::None => Ok(Vec::new()),
            Template::Node(node) => match node.import_template()? {
                Some(content) => Ok(content),
                None => Ok(vec![node.clone()]),
            },
            Template::Identifier(identifier) => {
                let Some(element) = &self.element else {
                    tracing::warn!("no element to load template `{}` for", identifier);
                    return Ok(Vec::new());
                };
                let container = element.create_container();
                self.collaborators
                    .templates
                    .load_template(identifier, &container)
                    .await?;
                Ok(container.children())
            }
        }
    }

    fn mount(&mut self, nodes: Vec<N>) -> ModuleResult<()> {
        let Some(element) = self.element.clone() else {
            if !nodes.is_empty() {
                tracing::warn!("no element to mount {} nodes into", nodes.len());
            }
            return Ok(());
        };
        for node in nodes {
            element.append_child(&node)?;
            self.mounted.push(node);
        }
        Ok(())
    }

    /// Remove tracked nodes that are still children of the element
    fn unmount(&mut self) {
        let mounted = std::mem::take(&mut self.mounted);
        let Some(element) = &self.element else {
            return;
        };
        for node in mounted {
            if !element.contains_child(&node) {
                tracing::debug!("mounted node {:?} already detached", node);
                continue;
            }
            if let Err(err) = element.remove_child(&node) {
                tracing::debug!("could not unmount {:?}: {}", node, err);
            }
        }
    }

    fn set_marker(&self, class: &str, present: bool) {
        if let Some(element) = &self.element {
            if present {
                element.add_class(class);
            } else {
                element.remove_class(class);
            }
        }
    }

    fn apply_active(&mut self, active: bool) {
        self.set_marker(&self.options.classes.active, active);
        self.active = active;
        let hooks = &self.options.hooks;
        Hooks::fire(if active { hooks.on_show.as_ref() } else { hooks.on_hide.as_ref() });
    }

    fn apply_disabled(&mut self, disabled: bool) {
        self.set_marker(&self.options.classes.disabled, disabled);
        self.disabled = disabled;
        let hooks = &self.options.hooks;
        Hooks::fire(if disabled { hooks.on_disable.as_ref() } else { hooks.on_enable.as_ref() });
    }

    fn apply_error(&mut self, err: &ModuleError) {
        self.set_marker(&self.options.classes.error, true);
        self.set_marker(&self.options.classes.loaded, false);
        self.errored = true;
        self.loaded = false;
        self.load_status = LoadStatus::NotLoaded;
        self.unmount();
        self.options.hooks.fire_error(err);
    }

    /// Add the active marker and wait for the transition
    pub async fn show(&mut self) {
        self.apply_active(true);
        self.wait_for_transition().await;
    }

    /// Remove the active marker and wait for the transition
    pub async fn hide(&mut self) {
        self.apply_active(false);
        self.wait_for_transition().await;
    }

    /// Show when inactive, hide when active
    pub async fn toggle(&mut self) {
        if self.active {
            self.hide().await;
        } else {
            self.show().await;
        }
    }

    pub async fn enable(&mut self) {
        self.apply_disabled(false);
        self.wait_for_transition().await;
    }

    pub async fn disable(&mut self) {
        self.apply_disabled(true);
        self.wait_for_transition().await;
    }

    /// Put the module in its error state.
    ///
    /// The module is considered unloaded afterwards; anything it mounted is
    /// removed. Resolves with `err` (or a default error) without raising it.
    pub async fn error(&mut self, err: Option<ModuleError>) -> ModuleError {
        let err = err.unwrap_or_default();
        self.apply_error(&err);
        self.wait_for_transition().await;
        err
    }

    /// Wait until any transition on the element has finished
    pub async fn wait_for_transition(&self) {
        if let Some(element) = &self.element {
            self.collaborators
                .transitions
                .wait_for_transition(element)
                .await;
        }
    }

    /// Nearest element carrying `class`, walking up from `start`.
    ///
    /// Without `start` the walk begins at the element's parent, or at the
    /// element itself when it has none.
    pub fn closest_ancestor_by_class(&self, class: &str, start: Option<&N>) -> Option<N> {
        let start = match start {
            Some(node) => node.clone(),
            None => {
                let element = self.element.as_ref()?;
                element.parent().unwrap_or_else(|| element.clone())
            }
        };
        closest_with_class(start, class)
    }

    /// Tear the module down and restore the element's original markers.
    ///
    /// Children are destroyed first. The module is not meant to be reused.
    pub fn destroy(&mut self) {
        for (name, mut child) in std::mem::take(&mut self.children) {
            tracing::debug!("destroying child module `{}`", name);
            child.destroy();
        }

        self.loaded = false;
        self.active = false;
        self.disabled = false;
        self.errored = false;
        self.load_status = LoadStatus::NotLoaded;
        self.data = None;

        let classes = &self.options.classes;
        self.set_marker(&classes.loaded, false);
        self.set_marker(&classes.active, false);
        self.set_marker(&classes.disabled, self.original_disabled);
        self.set_marker(&classes.error, self.original_errored);

        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::Document;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_new_module_is_idle() {
        let doc = Document::default();
        let module = Module::new(Some(doc.create_element("div")), ModuleOptions::new());

        assert!(!module.is_loaded());
        assert!(!module.is_active());
        assert!(!module.is_disabled());
        assert!(!module.is_errored());
        assert_eq!(module.load_status(), LoadStatus::NotLoaded);
        assert!(module.mounted_nodes().is_empty());
        assert_eq!(module.children().count(), 0);
    }

    #[test]
    fn test_construction_picks_up_markers() {
        let doc = Document::default();
        let element = doc.create_element("div");
        element.add_class("module-disabled");
        element.add_class("module-error");

        let errors = Rc::new(Cell::new(0));
        let seen = Rc::clone(&errors);
        let module = Module::new(
            Some(element),
            ModuleOptions::new().on_error(move |err| {
                assert_eq!(err, &ModuleError::Unspecified);
                seen.set(seen.get() + 1);
            }),
        );

        assert!(module.is_disabled());
        assert!(module.is_errored());
        assert!(module.was_originally_disabled());
        assert!(module.was_originally_errored());
        assert_eq!(errors.get(), 1);
    }

    #[test]
    fn test_missing_element_degrades() {
        smol::block_on(async {
            let mut module: Module = Module::new(None, ModuleOptions::new());
            module.show().await;
            module.disable().await;
            assert!(module.is_active());
            assert!(module.is_disabled());
            assert_eq!(module.closest_ancestor_by_class("panel", None), None);

            module.load().await.unwrap();
            assert!(module.is_loaded());

            module.destroy();
            assert!(!module.is_loaded());
        });
    }

    #[test]
    fn test_toggle() {
        smol::block_on(async {
            let doc = Document::default();
            let element = doc.create_element("div");
            let mut module = Module::new(Some(element.clone()), ModuleOptions::new());

            module.toggle().await;
            assert!(module.is_active());
            assert!(element.has_class("module-active"));

            module.toggle().await;
            assert!(!module.is_active());
            assert!(!element.has_class("module-active"));
        });
    }

    #[test]
    fn test_child_management() {
        let doc = Document::default();
        let mut parent = Module::new(Some(doc.create_element("div")), ModuleOptions::new());
        let first = Module::new(Some(doc.create_element("div")), ModuleOptions::new());
        let second = Module::new(Some(doc.create_element("div")), ModuleOptions::new());

        assert!(parent.add_child("nav", first).is_none());
        assert!(parent.add_child("nav", second).is_some());
        assert!(parent.child("nav").is_some());
        assert!(parent.child_mut("nav").is_some());

        let names: Vec<_> = parent.children().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["nav"]);

        assert!(parent.remove_child("nav").is_some());
        assert!(parent.child("nav").is_none());
    }
}
