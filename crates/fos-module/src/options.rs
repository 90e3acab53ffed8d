//! Module options
//!
//! Every option is optional and presence-based: a value the caller sets
//! replaces the default outright, empty strings included.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::ModuleError;

/// Lifecycle hook
pub type Hook = Rc<dyn Fn()>;

/// Hook receiving the failure that put the module in its error state
pub type ErrorHook = Rc<dyn Fn(&ModuleError)>;

/// CSS markers toggled on the module element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleClasses {
    #[serde(rename = "loadedClass")]
    pub loaded: String,
    #[serde(rename = "activeClass")]
    pub active: String,
    #[serde(rename = "disabledClass")]
    pub disabled: String,
    #[serde(rename = "errorClass")]
    pub error: String,
}

impl Default for ModuleClasses {
    fn default() -> Self {
        Self {
            loaded: "module-loaded".to_string(),
            active: "module-active".to_string(),
            disabled: "module-disabled".to_string(),
            error: "module-error".to_string(),
        }
    }
}

/// Source of the markup mounted on load
#[derive(Debug, Clone, PartialEq)]
pub enum Template<N> {
    /// Nothing is mounted
    None,
    /// Identifier resolved by the template loader
    Identifier(String),
    /// A template definition (its content is cloned) or a realized node
    /// (mounted as-is)
    Node(N),
}

impl<N> Default for Template<N> {
    fn default() -> Self {
        Self::None
    }
}

/// Data payload resolved on load
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// Already-resolved value
    Value(Value),
    /// Fetch descriptor handed to the data fetcher
    Fetch(Url),
}

impl DataSource {
    /// Parse a fetch descriptor
    pub fn fetch(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::Fetch(Url::parse(url)?))
    }
}

impl From<Value> for DataSource {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Url> for DataSource {
    fn from(url: Url) -> Self {
        Self::Fetch(url)
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

/// Request options forwarded verbatim to the data fetcher
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_json(self, json: &str) -> Self {
        self.with_header("Content-Type", "application/json")
            .with_body(json)
    }
}

/// Lifecycle hooks; unset hooks do nothing
#[derive(Clone, Default)]
pub struct Hooks {
    pub on_load: Option<Hook>,
    pub on_show: Option<Hook>,
    pub on_hide: Option<Hook>,
    pub on_enable: Option<Hook>,
    pub on_disable: Option<Hook>,
    pub on_error: Option<ErrorHook>,
}

impl Hooks {
    pub(crate) fn fire(hook: Option<&Hook>) {
        if let Some(hook) = hook {
            hook();
        }
    }

    pub(crate) fn fire_error(&self, err: &ModuleError) {
        if let Some(hook) = &self.on_error {
            hook(err);
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_load", &self.on_load.is_some())
            .field("on_show", &self.on_show.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .field("on_enable", &self.on_enable.is_some())
            .field("on_disable", &self.on_disable.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Effective configuration of a module
#[derive(Debug, Clone)]
pub struct ModuleOptions<N> {
    pub classes: ModuleClasses,
    /// Stylesheet URLs
    pub styles: Vec<String>,
    pub template: Template<N>,
    pub data: Option<DataSource>,
    pub request_options: Option<RequestOptions>,
    pub hooks: Hooks,
}

impl<N> Default for ModuleOptions<N> {
    fn default() -> Self {
        Self {
            classes: ModuleClasses::default(),
            styles: Vec::new(),
            template: Template::None,
            data: None,
            request_options: None,
            hooks: Hooks::default(),
        }
    }
}

impl<N> ModuleOptions<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes(mut self, classes: ModuleClasses) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_loaded_class(mut self, class: impl Into<String>) -> Self {
        self.classes.loaded = class.into();
        self
    }

    pub fn with_active_class(mut self, class: impl Into<String>) -> Self {
        self.classes.active = class.into();
        self
    }

    pub fn with_disabled_class(mut self, class: impl Into<String>) -> Self {
        self.classes.disabled = class.into();
        self
    }

    pub fn with_error_class(mut self, class: impl Into<String>) -> Self {
        self.classes.error = class.into();
        self
    }

    /// Add one stylesheet URL
    pub fn with_style(mut self, url: impl Into<String>) -> Self {
        self.styles.push(url.into());
        self
    }

    /// Replace the stylesheet list
    pub fn with_styles<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.styles = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_template(mut self, template: Template<N>) -> Self {
        self.template = template;
        self
    }

    /// Template resolved by identifier through the template loader
    pub fn with_template_id(self, identifier: impl Into<String>) -> Self {
        self.with_template(Template::Identifier(identifier.into()))
    }

    /// Template definition or realized node
    pub fn with_template_node(self, node: N) -> Self {
        self.with_template(Template::Node(node))
    }

    pub fn with_data(mut self, data: impl Into<DataSource>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_request_options(mut self, options: RequestOptions) -> Self {
        self.request_options = Some(options);
        self
    }

    pub fn on_load(mut self, hook: impl Fn() + 'static) -> Self {
        self.hooks.on_load = Some(Rc::new(hook));
        self
    }

    pub fn on_show(mut self, hook: impl Fn() + 'static) -> Self {
        self.hooks.on_show = Some(Rc::new(hook));
        self
    }

    pub fn on_hide(mut self, hook: impl Fn() + 'static) -> Self {
        self.hooks.on_hide = Some(Rc::new(hook));
        self
    }

    pub fn on_enable(mut self, hook: impl Fn() + 'static) -> Self {
        self.hooks.on_enable = Some(Rc::new(hook));
        self
    }

    pub fn on_disable(mut self, hook: impl Fn() + 'static) -> Self {
        self.hooks.on_disable = Some(Rc::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl Fn(&ModuleError) + 'static) -> Self {
        self.hooks.on_error = Some(Rc::new(hook));
        self
    }
}
