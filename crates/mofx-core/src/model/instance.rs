use crate::model::properties::PropertyMap;
use serde::Serialize;

/// One `instance of <Class> [as $<Name>] { ... };` block
///
/// Built by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instance {
    pub class_name: String,
    /// Alias from `as $Name`, without the `$`
    pub instance_name: Option<String>,
    pub properties: PropertyMap,
}

impl Instance {
    pub fn new(class_name: impl Into<String>, instance_name: Option<String>) -> Self {
        Self {
            class_name: class_name.into(),
            instance_name,
            properties: PropertyMap::new(),
        }
    }

    /// The `ResourceID` value, matched case-sensitively as stored
    pub fn resource_id(&self) -> Option<&str> {
        self.properties.get(RESOURCE_ID_KEY)
    }
}

/// Property that links an instance to its rules
pub const RESOURCE_ID_KEY: &str = "ResourceID";
