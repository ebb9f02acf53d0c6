pub mod cli;
pub mod error;
pub mod search;
pub mod shard;
pub mod tracing;

pub use search::{Hit, MatchKind, QueryOptions, SymbolIndex};
pub use shard::{Occurrence, Shard, ShardEntry};
