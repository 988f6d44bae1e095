use serde::Deserialize;
use std::collections::HashMap;

use crate::domain::params::ParamSpecs;
use crate::domain::resource::{Action, Resource, ResourceOptions};
use crate::error::RouteError;

/// One resource entry of a YAML resource file
#[derive(Deserialize, Debug)]
pub struct ResourceSettings {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub params: ParamSpecs,
    #[serde(default)]
    pub strip_trailing_slashes: Option<bool>,
    #[serde(default)]
    pub actions: HashMap<String, Action>,
}

impl TryFrom<ResourceSettings> for Resource {
    type Error = RouteError;

    fn try_from(value: ResourceSettings) -> Result<Self, Self::Error> {
        let options = ResourceOptions {
            strip_trailing_slashes: value
                .strip_trailing_slashes
                .unwrap_or(ResourceOptions::default().strip_trailing_slashes),
        };
        Resource::new(&value.url, value.params, value.actions, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::BoundParams;
    use crate::domain::resource::HttpMethod;

    #[test]
    fn test_minimal_settings() {
        let settings: ResourceSettings =
            serde_yaml::from_str("name: users\nurl: /users/:id\n").unwrap();
        assert_eq!(settings.name, "users");
        assert!(settings.params.is_empty());
        assert!(settings.strip_trailing_slashes.is_none());
        assert!(settings.actions.is_empty());
    }

    #[test]
    fn test_settings_with_actions() {
        let yml = r#"
name: posts
url: /posts/:id/:verb
params:
  id: "@id"
actions:
  publish:
    method: POST
    params:
      verb: publish
"#;
        let settings: ResourceSettings = serde_yaml::from_str(yml).unwrap();
        let publish = &settings.actions["publish"];
        assert_eq!(publish.method, HttpMethod::Post);
        assert!(publish.params.contains_key("verb"));

        let resource = Resource::try_from(settings).unwrap();
        let data = serde_json::json!({"id": 9});
        let plan = resource.plan("publish", &BoundParams::new(), Some(&data)).unwrap();
        assert_eq!(plan.uri, "/posts/9/publish");
    }

    #[test]
    fn test_keep_trailing_slashes() {
        let settings: ResourceSettings = serde_yaml::from_str(
            "name: files\nurl: /files/:path/\nstrip_trailing_slashes: false\n",
        )
        .unwrap();
        let resource = Resource::try_from(settings).unwrap();
        assert!(!resource.options().strip_trailing_slashes);
        let plan = resource.plan("get", &BoundParams::new(), None).unwrap();
        assert_eq!(plan.uri, "/files/");
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let settings: ResourceSettings =
            serde_yaml::from_str("name: bad\nurl: /x/:hasOwnProperty\n").unwrap();
        assert!(Resource::try_from(settings).is_err());
    }

    #[test]
    fn test_unknown_method_fails_to_parse() {
        let result: Result<ResourceSettings, _> = serde_yaml::from_str(
            "name: x\nurl: /x\nactions:\n  poke:\n    method: POKE\n",
        );
        assert!(result.is_err());
    }
}
