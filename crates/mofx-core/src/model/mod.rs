pub mod document;
pub mod instance;
pub mod properties;
pub mod rule;

pub use document::Document;
pub use instance::{Instance, RESOURCE_ID_KEY};
pub use properties::PropertyMap;
pub use rule::{Rule, UNKNOWN_CATEGORY};
