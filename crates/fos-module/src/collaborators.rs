//! External collaborators
//!
//! Style loading, data fetching, template loading and transition detection
//! live outside the lifecycle core. Each is a narrow object-safe trait
//! returning a boxed local future so implementations can be swapped per
//! module.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use serde_json::Value;
use url::Url;

use crate::{DomNode, ModuleError, ModuleResult, RequestOptions};

/// Loads stylesheets
pub trait StyleLoader {
    fn load_css<'a>(&'a self, urls: &'a [String]) -> LocalBoxFuture<'a, ModuleResult<()>>;
}

/// Fetches a module's data payload
pub trait DataFetcher {
    fn fetch_data<'a>(
        &'a self,
        url: &'a Url,
        options: Option<&'a RequestOptions>,
    ) -> LocalBoxFuture<'a, ModuleResult<Value>>;
}

/// Fills `container` with the markup behind `identifier`
pub trait TemplateLoader<N> {
    fn load_template<'a>(
        &'a self,
        identifier: &'a str,
        container: &'a N,
    ) -> LocalBoxFuture<'a, ModuleResult<()>>;
}

/// Resolves once any running transition on `element` has finished
pub trait TransitionWaiter<N> {
    fn wait_for_transition<'a>(&'a self, element: &'a N) -> LocalBoxFuture<'a, ()>;
}

/// The collaborator set a module loads through
pub struct Collaborators<N> {
    pub styles: Rc<dyn StyleLoader>,
    pub data: Rc<dyn DataFetcher>,
    pub templates: Rc<dyn TemplateLoader<N>>,
    pub transitions: Rc<dyn TransitionWaiter<N>>,
}

impl<N: DomNode> Collaborators<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style_loader(mut self, loader: impl StyleLoader + 'static) -> Self {
        self.styles = Rc::new(loader);
        self
    }

    pub fn with_data_fetcher(mut self, fetcher: impl DataFetcher + 'static) -> Self {
        self.data = Rc::new(fetcher);
        self
    }

    pub fn with_template_loader(mut self, loader: impl TemplateLoader<N> + 'static) -> Self {
        self.templates = Rc::new(loader);
        self
    }

    pub fn with_transition_waiter(mut self, waiter: impl TransitionWaiter<N> + 'static) -> Self {
        self.transitions = Rc::new(waiter);
        self
    }
}

impl<N: DomNode> Default for Collaborators<N> {
    fn default() -> Self {
        Self {
            styles: Rc::new(Unconfigured),
            data: Rc::new(Unconfigured),
            templates: Rc::new(Unconfigured),
            transitions: Rc::new(ImmediateTransition),
        }
    }
}

impl<N> Clone for Collaborators<N> {
    fn clone(&self) -> Self {
        Self {
            styles: Rc::clone(&self.styles),
            data: Rc::clone(&self.data),
            templates: Rc::clone(&self.templates),
            transitions: Rc::clone(&self.transitions),
        }
    }
}

impl<N> fmt::Debug for Collaborators<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Default loaders: nothing to load succeeds, anything else fails
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl StyleLoader for Unconfigured {
    fn load_css<'a>(&'a self, urls: &'a [String]) -> LocalBoxFuture<'a, ModuleResult<()>> {
        Box::pin(async move {
            if urls.is_empty() {
                Ok(())
            } else {
                Err(ModuleError::Style(format!(
                    "no style loader configured for {}",
                    urls.join(", ")
                )))
            }
        })
    }
}

impl DataFetcher for Unconfigured {
    fn fetch_data<'a>(
        &'a self,
        url: &'a Url,
        _options: Option<&'a RequestOptions>,
    ) -> LocalBoxFuture<'a, ModuleResult<Value>> {
        Box::pin(async move {
            Err::<Value, _>(ModuleError::Data(format!(
                "no data fetcher configured for {url}"
            )))
        })
    }
}

impl<N: DomNode> TemplateLoader<N> for Unconfigured {
    fn load_template<'a>(
        &'a self,
        identifier: &'a str,
        _container: &'a N,
    ) -> LocalBoxFuture<'a, ModuleResult<()>> {
        Box::pin(async move {
            Err::<(), _>(ModuleError::Template(format!(
                "no template loader configured for `{identifier}`"
            )))
        })
    }
}

/// Treats every element as having no running transition
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateTransition;

impl<N: DomNode> TransitionWaiter<N> for ImmediateTransition {
    fn wait_for_transition<'a>(&'a self, _element: &'a N) -> LocalBoxFuture<'a, ()> {
        Box::pin(async {})
    }
}

/// Waits a fixed duration when the element carries an animated class
#[derive(Debug, Clone)]
pub struct TimedTransition {
    duration: Duration,
    animated_classes: Vec<String>,
}

impl TimedTransition {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            animated_classes: Vec::new(),
        }
    }

    /// Elements with this class are considered to be transitioning
    pub fn with_animated_class(mut self, class: impl Into<String>) -> Self {
        self.animated_classes.push(class.into());
        self
    }

    fn is_animated<N: DomNode>(&self, element: &N) -> bool {
        self.animated_classes.iter().any(|c| element.has_class(c))
    }
}

impl<N: DomNode> TransitionWaiter<N> for TimedTransition {
    fn wait_for_transition<'a>(&'a self, element: &'a N) -> LocalBoxFuture<'a, ()> {
        Box::pin(async move {
            if self.is_animated(element) {
                tracing::trace!("waiting {:?} for transition on {:?}", self.duration, element);
                smol::Timer::after(self.duration).await;
            }
        })
    }
}
