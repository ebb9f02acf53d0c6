//! Error handling types and utilities.

use thiserror::Error;

/// A specialized Result type for doxy-search operations.
///
/// This is an alias for `anyhow::Result`, used by the CLI layer where shard
/// I/O and parse errors are chained with `.context()` / `.with_context()`.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when shard data cannot be loaded into an index.
///
/// Every variant aborts the whole load: a partially merged index is never
/// exposed, so the caller can retry with corrected input instead of serving
/// silently incomplete results.
#[derive(Debug, Error)]
pub enum ShardError {
    /// The raw text is not syntactically valid shard data.
    #[error("shard '{shard}': {detail}")]
    Syntax { shard: String, detail: String },

    /// The data parsed, but not into the expected (name, occurrences) shape.
    #[error("shard '{shard}': unexpected shape: {detail}")]
    Shape { shard: String, detail: String },

    /// A JSON shard failed to deserialize.
    #[error("shard '{shard}': invalid JSON shard")]
    Json {
        shard: String,
        #[source]
        source: serde_json::Error,
    },

    /// The data matches neither supported shard syntax.
    #[error("shard '{shard}': unrecognized shard format")]
    UnknownFormat { shard: String },

    /// An entry's display name normalizes to the empty key, so it could
    /// never be matched by any query.
    #[error("shard '{shard}': entry '{name}' normalizes to an empty key")]
    EmptyKey { shard: String, name: String },
}

/// Error returned for query text that is not a searchable token.
///
/// A query with no matches is an ordinary empty result, never an error;
/// this type only covers text that cannot be matched against any key.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Empty, whitespace-only, or punctuation-only query text.
    #[error("query '{raw}' contains no searchable characters")]
    NotSearchable { raw: String },
}
