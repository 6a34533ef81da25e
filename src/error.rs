use thiserror::Error;

/// Errors raised by a [`ConfigStore`](crate::store::ConfigStore) implementation
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid store path: {0}")]
    InvalidPath(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete {path}: {source}")]
    Delete {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list {dir}: {source}")]
    List {
        dir: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from marshalling configuration objects to and from XML
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Failed to serialize <{root}>: {message}")]
    Serialize { root: String, message: String },

    #[error("Failed to parse XML: {0}")]
    Deserialize(String),
}

/// Errors from typed access to site preferences
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("Preference {name} has non-numeric value {value:?}")]
    NotANumber { name: String, value: String },

    #[error("Unknown preference: {0}")]
    Unknown(String),
}
