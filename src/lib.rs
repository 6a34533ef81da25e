// ATCF configuration bridge
//
// Library crate: legacy fixed-column text parsing, XML conversion and the
// configuration manager. The binary crate (main.rs) is a command line front end.

pub mod config;
pub mod error;
pub mod legacy;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod state;
pub mod store;
pub mod xml;

// Re-export commonly used types for convenience
pub use config::{AtcfConfigurationManager, ConfigKind, ToolSettings};
pub use error::{PreferenceError, StoreError, XmlError};
pub use legacy::LegacyConfig;
pub use state::{ColorConfigurationListener, ConfigChange, SaveFormat};
pub use store::{ConfigStore, DirectoryStore};
pub use xml::XmlDocument;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
