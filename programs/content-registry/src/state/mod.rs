pub mod content;
pub mod registry_config;

pub use content::{Content, ContentInfo, CONTENT_SEED, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
pub use registry_config::{RegistryConfig, REGISTRY_SEED};
