// Resources: a route plus named actions, planned into concrete requests

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

use crate::domain::params::{resolve_params, BoundParams, ParamSpec, ParamSpecs};
use crate::domain::template::{Route, RouteDefaults};
use crate::error::{Result, RouteError};

/// Parameter that replaces the whole template when bound to a string
const URL_OVERRIDE_PARAM: &str = "url";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named operation on a resource
#[derive(Debug, Clone, Deserialize)]
pub struct Action {
    pub method: HttpMethod,
    /// Layered over the resource's parameter defaults
    #[serde(default)]
    pub params: ParamSpecs,
    /// Any other keys (headers, timeouts, ...) are passed through to the plan
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl Action {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            params: ParamSpecs::new(),
            options: Map::new(),
        }
    }

    pub fn with_param(mut self, name: &str, spec: impl Into<ParamSpec>) -> Self {
        self.params.insert(name.to_string(), spec.into());
        self
    }

    pub fn with_option(mut self, name: &str, value: Value) -> Self {
        self.options.insert(name.to_string(), value);
        self
    }
}

/// The built-in action table
pub fn default_actions() -> HashMap<String, Action> {
    [
        ("get", HttpMethod::Get),
        ("query", HttpMethod::Get),
        ("create", HttpMethod::Post),
        ("save", HttpMethod::Post),
        ("update", HttpMethod::Put),
        ("remove", HttpMethod::Delete),
        ("delete", HttpMethod::Delete),
    ]
    .into_iter()
    .map(|(name, method)| (name.to_string(), Action::new(method)))
    .collect()
}

/// Options snapshot taken when a resource is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceOptions {
    pub strip_trailing_slashes: bool,
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self {
            strip_trailing_slashes: true,
        }
    }
}

/// Everything a transport needs to issue the request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestPlan {
    pub method: HttpMethod,
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct Resource {
    route: Route,
    param_defaults: ParamSpecs,
    actions: HashMap<String, Action>,
    options: ResourceOptions,
}

impl Resource {
    /// `actions` are merged over [`default_actions`]; a same-named action
    /// replaces the built-in one.
    pub fn new(
        url: &str,
        param_defaults: ParamSpecs,
        actions: HashMap<String, Action>,
        options: ResourceOptions,
    ) -> Result<Self> {
        let route = Route::new(
            url,
            RouteDefaults::new().with_strip_trailing_slashes(options.strip_trailing_slashes),
        )?;

        let mut all_actions = default_actions();
        all_actions.extend(actions);

        Ok(Self {
            route,
            param_defaults,
            actions: all_actions,
            options,
        })
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn options(&self) -> ResourceOptions {
        self.options
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn action_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// A copy of this resource with extra parameter defaults; `extra` wins
    /// over the existing ones.
    pub fn with_defaults(&self, extra: ParamSpecs) -> Self {
        let mut resource = self.clone();
        resource.param_defaults.extend(extra);
        resource
    }

    /// Turn an action call into a request.
    ///
    /// Parameter defaults and the action's own specs are resolved against
    /// `data`, then `params` from the call site are laid on top. A string
    /// `url` parameter replaces the template for this call.
    pub fn plan(&self, action: &str, params: &BoundParams, data: Option<&Value>) -> Result<RequestPlan> {
        let action_def = self
            .actions
            .get(action)
            .ok_or_else(|| RouteError::UnknownAction(action.to_string()))?;

        let payload = data.unwrap_or(&Value::Null);
        let specs = self
            .param_defaults
            .iter()
            .filter(|(name, _)| !action_def.params.contains_key(*name))
            .chain(action_def.params.iter());

        let mut bound = resolve_params(payload, specs);
        bound.extend(params.iter().map(|(name, value)| (name.clone(), value.clone())));

        let uri = match bound.get(URL_OVERRIDE_PARAM) {
            Some(Value::String(url)) if !url.is_empty() => self.route.bind_url(url, &bound)?,
            _ => self.route.bind(&bound),
        };

        let body = if action_def.method.has_body() {
            data.cloned()
        } else {
            None
        };

        tracing::debug!(action, method = %action_def.method, uri = %uri, "planned request");

        Ok(RequestPlan {
            method: action_def.method,
            uri,
            body,
            options: action_def.options.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users() -> Resource {
        let mut defaults = ParamSpecs::new();
        defaults.insert("id".to_string(), "@id".into());
        Resource::new("/users/:id", defaults, HashMap::new(), ResourceOptions::default()).unwrap()
    }

    #[test]
    fn test_default_action_table() {
        let actions = default_actions();
        assert_eq!(actions["get"].method, HttpMethod::Get);
        assert_eq!(actions["query"].method, HttpMethod::Get);
        assert_eq!(actions["create"].method, HttpMethod::Post);
        assert_eq!(actions["save"].method, HttpMethod::Post);
        assert_eq!(actions["update"].method, HttpMethod::Put);
        assert_eq!(actions["remove"].method, HttpMethod::Delete);
        assert_eq!(actions["delete"].method, HttpMethod::Delete);
    }

    #[test]
    fn test_has_body() {
        assert!(HttpMethod::Post.has_body());
        assert!(HttpMethod::Put.has_body());
        assert!(HttpMethod::Patch.has_body());
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Delete.has_body());
    }

    #[test]
    fn test_plan_get_with_call_site_id() {
        let mut params = BoundParams::new();
        params.insert("id".to_string(), json!(12));
        let plan = users().plan("get", &params, None).unwrap();
        assert_eq!(plan.method, HttpMethod::Get);
        assert_eq!(plan.uri, "/users/12");
        assert!(plan.body.is_none());
    }

    #[test]
    fn test_plan_save_extracts_id_from_body() {
        let data = json!({"id": 3, "name": "ann"});
        let plan = users().plan("save", &BoundParams::new(), Some(&data)).unwrap();
        assert_eq!(plan.method, HttpMethod::Post);
        assert_eq!(plan.uri, "/users/3");
        assert_eq!(plan.body, Some(data));
    }

    #[test]
    fn test_plan_query_without_id() {
        let plan = users().plan("query", &BoundParams::new(), None).unwrap();
        assert_eq!(plan.uri, "/users");
    }

    #[test]
    fn test_unknown_action() {
        let err = users().plan("frobnicate", &BoundParams::new(), None).unwrap_err();
        assert_eq!(err, RouteError::UnknownAction("frobnicate".to_string()));
    }

    #[test]
    fn test_route_and_action_accessors() {
        let resource = users();
        assert_eq!(resource.route().template().source(), "/users/:id");
        assert!(resource.route().defaults().strip_trailing_slashes);
        assert_eq!(resource.action("remove").map(|a| a.method), Some(HttpMethod::Delete));
        assert!(resource.action("archive").is_none());
    }

    #[test]
    fn test_action_options_reach_the_plan() {
        let mut actions = HashMap::new();
        actions.insert(
            "get".to_string(),
            Action::new(HttpMethod::Get).with_option("headers", json!({"Accept": "text/plain"})),
        );
        let resource =
            Resource::new("/notes/:id", ParamSpecs::new(), actions, ResourceOptions::default()).unwrap();

        let plan = resource.plan("get", &BoundParams::new(), None).unwrap();
        assert_eq!(plan.options["headers"], json!({"Accept": "text/plain"}));
        let json = serde_json::to_string(&plan).unwrap();
        assert_eq!(json, r#"{"method":"GET","uri":"/notes","options":{"headers":{"Accept":"text/plain"}}}"#);
    }

    #[test]
    fn test_plan_serializes_without_empty_body() {
        let plan = users().plan("get", &BoundParams::new(), None).unwrap();
        let json = serde_json::to_string(&plan).unwrap();
        assert_eq!(json, r#"{"method":"GET","uri":"/users"}"#);
    }
}
