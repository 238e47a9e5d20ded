//! Catalog error types.

use std::path::PathBuf;

use crate::domain::MapId;

/// A station or line lookup that did not produce exactly one answer.
///
/// Callers that can degrade (destination names from the live feed) match on
/// this; callers resolving reference data wrap it in [`ConfigError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Nothing matched the query
    #[error("{kind} '{query}' not found")]
    NotFound { kind: &'static str, query: String },

    /// More than one station has this primary name
    #[error("station name '{0}' is ambiguous; use its lookup name")]
    Ambiguous(String),
}

impl LookupError {
    pub(crate) fn not_found(kind: &'static str, query: impl ToString) -> Self {
        LookupError::NotFound {
            kind,
            query: query.to_string(),
        }
    }
}

/// Reference data is missing, unreadable or inconsistent.
///
/// Always fatal: the sign cannot start with a bad configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A resource file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON resource file is malformed
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The stop table is malformed
    #[error("failed to parse stop table {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A reference inside the configuration does not resolve
    #[error("{context}: {source}")]
    Lookup {
        context: String,
        #[source]
        source: LookupError,
    },

    /// Two real stations claim the same map id
    #[error("map id {0} is used by more than one station")]
    DuplicateMapId(MapId),

    /// A station definition is internally inconsistent
    #[error("station '{name}': {message}")]
    InvalidStation { name: String, message: String },

    /// A layout page is internally inconsistent
    #[error("layout {layout}, page {page}: {message}")]
    InvalidPage {
        layout: usize,
        page: u32,
        message: String,
    },

    /// No layout serves the station's set of lines
    #[error("no layout serves the lines of station '{0}'")]
    NoLayout(String),

    /// A placeholder the resolver depends on is not defined
    #[error("required placeholder '{0}' is missing from the station list")]
    MissingPlaceholder(&'static str),

    /// An environment setting could not be parsed
    #[error("invalid value '{value}' for {name}")]
    InvalidSetting { name: &'static str, value: String },
}

impl ConfigError {
    pub(crate) fn lookup(context: impl Into<String>) -> impl FnOnce(LookupError) -> Self {
        let context = context.into();
        move |source| ConfigError::Lookup { context, source }
    }
}
