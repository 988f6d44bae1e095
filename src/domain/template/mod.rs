// Template module for `:name` URL templates
//
// Parsing discovers parameter slots, binding substitutes encoded values and
// canonicalizes the resulting URL.

mod ast;
mod binder;
pub mod encoding;
mod parser;

pub use ast::{ParameterSlot, TemplatePart, UrlTemplate};
pub use binder::{ParamDefault, Route, RouteDefaults};
pub use encoding::{encode_path_segment, encode_query_value, encode_uri_component, SlotEncoding};
pub use parser::TemplateParser;
