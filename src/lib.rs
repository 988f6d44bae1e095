//! Compile `:name` URL templates and bind parameter values into
//! percent-encoded request URLs.
//!
//! ```
//! use serde_json::json;
//! use urlbind::{BoundParams, Route, RouteDefaults};
//!
//! let route = Route::new("/users/:id/posts/:postId", RouteDefaults::new()).unwrap();
//! let mut params = BoundParams::new();
//! params.insert("id".to_string(), json!(7));
//! assert_eq!(route.bind(&params), "/users/7/posts");
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use domain::params::{parse_assignment, resolve_params, BoundParams, ParamSpec, ParamSpecs};
pub use domain::resource::{default_actions, Action, HttpMethod, RequestPlan, Resource, ResourceOptions};
pub use domain::template::{
    encode_path_segment, encode_query_value, encode_uri_component, ParamDefault, ParameterSlot,
    Route, RouteDefaults, SlotEncoding, TemplateParser, UrlTemplate,
};
pub use error::{Result, RouteError};
