// URL binding: substitute parameter values into a parsed template, then
// canonicalize the result

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::params::{to_param_string, BoundParams};
use crate::error::Result;

use super::ast::{is_word_char, TemplatePart, UrlTemplate};
use super::parser::TemplateParser;

type DefaultFn = dyn Fn() -> Value + Send + Sync;

/// Static default for a parameter, or a function producing one per bind
#[derive(Clone)]
pub enum ParamDefault {
    Value(Value),
    Computed(Arc<DefaultFn>),
}

impl ParamDefault {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        ParamDefault::Computed(Arc::new(f))
    }

    fn value(&self) -> Value {
        match self {
            ParamDefault::Value(value) => value.clone(),
            ParamDefault::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for ParamDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamDefault::Value(value) => f.debug_tuple("Value").field(value).finish(),
            ParamDefault::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Value> for ParamDefault {
    fn from(value: Value) -> Self {
        ParamDefault::Value(value)
    }
}

/// Per-route configuration
#[derive(Debug, Clone)]
pub struct RouteDefaults {
    pub strip_trailing_slashes: bool,
    params: HashMap<String, ParamDefault>,
}

impl RouteDefaults {
    pub fn new() -> Self {
        Self {
            strip_trailing_slashes: true,
            params: HashMap::new(),
        }
    }

    pub fn with_strip_trailing_slashes(mut self, strip: bool) -> Self {
        self.strip_trailing_slashes = strip;
        self
    }

    pub fn with_param(mut self, name: &str, default: impl Into<ParamDefault>) -> Self {
        self.params.insert(name.to_string(), default.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.params.get(name).map(ParamDefault::value)
    }
}

impl Default for RouteDefaults {
    fn default() -> Self {
        Self::new()
    }
}

/// A compiled template plus its defaults. Binding never mutates the route,
/// so one route can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Route {
    template: UrlTemplate,
    defaults: RouteDefaults,
}

impl Route {
    pub fn new(template: &str, defaults: RouteDefaults) -> Result<Self> {
        Ok(Self {
            template: TemplateParser::parse(template)?,
            defaults,
        })
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    pub fn defaults(&self) -> &RouteDefaults {
        &self.defaults
    }

    /// Bind `params` into the route template
    pub fn bind(&self, params: &BoundParams) -> String {
        self.expand(&self.template, params)
    }

    /// Bind `params` into `url` instead of the route template. The override
    /// is parsed on every call.
    pub fn bind_url(&self, url: &str, params: &BoundParams) -> Result<String> {
        let template = TemplateParser::parse(url)?;
        Ok(self.expand(&template, params))
    }

    // Call-site value wins, even when it is null
    fn lookup(&self, name: &str, params: &BoundParams) -> Option<String> {
        match params.get(name) {
            Some(value) => to_param_string(value),
            None => self.defaults.get(name).as_ref().and_then(to_param_string),
        }
    }

    fn expand(&self, template: &UrlTemplate, params: &BoundParams) -> String {
        let raw = template.unescaped();
        let prefix_len = protocol_and_domain_len(&raw);

        let mut path = String::with_capacity(raw.len());
        let mut offset = 0;

        for part in template.parts() {
            match part {
                TemplatePart::Literal(text) => {
                    let end = offset + text.len();
                    if end > prefix_len {
                        path.push_str(&text[prefix_len.saturating_sub(offset)..]);
                    }
                    offset = end;
                }
                TemplatePart::Slot(index) => {
                    let slot = &template.slots()[*index];
                    let token_end = offset + slot.name.len() + 1;

                    // Slots inside the protocol and domain stay literal
                    if offset >= prefix_len {
                        match self.lookup(&slot.name, params) {
                            Some(value) => path.push_str(&slot.encoding().encode(&value)),
                            None => {
                                if raw[token_end..].starts_with('/') && path.ends_with('/') {
                                    path.pop();
                                }
                            }
                        }
                    }
                    offset = token_end;
                }
            }
        }

        let path = canonicalize(path, self.defaults.strip_trailing_slashes);
        let url = format!("{}{}", &raw[..prefix_len], path);
        tracing::debug!(template = template.source(), url = %url, "bound url");
        url
    }
}

/// Length of a leading `http://host` or `https://host`, 0 when absent
fn protocol_and_domain_len(url: &str) -> usize {
    let rest = match url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
    {
        Some(rest) => rest,
        None => return 0,
    };
    let host_len = rest.find('/').unwrap_or(rest.len());
    url.len() - rest.len() + host_len
}

// Order matters: strip slashes, then collapse the extension, then restore
// escaped dots.
fn canonicalize(mut path: String, strip_trailing_slashes: bool) -> String {
    if strip_trailing_slashes {
        let trimmed = path.trim_end_matches('/').len();
        path.truncate(trimmed);
        if path.is_empty() {
            path.push('/');
        }
    }

    if let Some(at) = dot_extension_index(&path) {
        path.remove(at);
    }

    path.replace("/\\.", "/.")
}

/// Position of the first `/.ext` where `ext` is a word run ending the
/// string or followed by `?`
fn dot_extension_index(path: &str) -> Option<usize> {
    let mut search = 0;
    while let Some(found) = path[search..].find("/.") {
        let at = search + found;
        let ext = &path[at + 2..];
        let len = ext.find(|ch: char| !is_word_char(ch)).unwrap_or(ext.len());
        if len > 0 && matches!(ext[len..].chars().next(), None | Some('?')) {
            return Some(at);
        }
        search = at + 1;
    }
    None
}
