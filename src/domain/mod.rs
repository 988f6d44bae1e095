// Domain model: templates, parameter values and resources built on them

pub mod params;
pub mod resource;
pub mod template;

pub use params::{resolve_params, BoundParams, ParamSpec, ParamSpecs};
pub use resource::{Action, HttpMethod, RequestPlan, Resource, ResourceOptions};
pub use template::{ParameterSlot, Route, RouteDefaults, TemplateParser, UrlTemplate};
