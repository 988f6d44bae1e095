// Common test utilities shared across test files

use serde_json::Value;
use urlbind::{BoundParams, Route, RouteDefaults};

/// Build call-site params from name/value pairs
#[allow(dead_code)]
pub fn params(entries: &[(&str, Value)]) -> BoundParams {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// Compile `template` with default options and bind `entries` into it
#[allow(dead_code)]
pub fn bind(template: &str, entries: &[(&str, Value)]) -> String {
    Route::new(template, RouteDefaults::new())
        .expect("template should parse")
        .bind(&params(entries))
}
