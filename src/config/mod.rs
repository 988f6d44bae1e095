// Resource configuration loaded from YAML

pub mod resources;
pub mod yml_settings;

pub use resources::{load_resources, resources_from_str};
pub use yml_settings::ResourceSettings;
