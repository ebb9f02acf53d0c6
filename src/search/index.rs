//! The merged, immutable symbol index.

use ahash::AHashMap;
use std::time::Instant;

use super::normalize::normalize;
use crate::error::ShardError;
use crate::shard::{Occurrence, Shard};

/// One index entry: a normalized key and every occurrence documented under
/// it, in load order.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    key: String,
    occurrences: Vec<Occurrence>,
}

impl IndexEntry {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }
}

/// The union of all loaded shards: one logical mapping from normalized key
/// to its occurrence sequence.
///
/// Built once by [`SymbolIndex::load`] and read-only thereafter, so any
/// number of threads may query it in parallel with no coordination;
/// publishing a finished index behind an `Arc` is all the synchronization
/// ever needed. A rebuild produces a new instance that the holder swaps in
/// whole; entries are never edited in place.
///
/// Entry order is insertion order: shard input order, then shard-internal
/// order. Query ranking depends on that order being stable, which is what
/// makes identical inputs yield identical output ordering.
#[derive(Debug, Clone)]
pub struct SymbolIndex {
    entries: Vec<IndexEntry>,
    by_key: AHashMap<String, usize>,
    shard_count: usize,
}

impl SymbolIndex {
    /// Merges parsed shards into one index.
    ///
    /// Entries whose display names normalize to the same key are merged by
    /// concatenating their occurrence sequences in encounter order; the
    /// source data has the same method name recurring across many unrelated
    /// classes, and all of those land under one key. Fails on the first
    /// entry whose name normalizes to nothing; no partially merged index is
    /// ever returned.
    pub fn load<I>(shards: I) -> Result<Self, ShardError>
    where
        I: IntoIterator<Item = Shard>,
    {
        let start = Instant::now();
        let mut entries: Vec<IndexEntry> = Vec::new();
        let mut by_key: AHashMap<String, usize> = AHashMap::new();
        let mut shard_count = 0usize;

        for shard in shards {
            shard_count += 1;
            let shard_name = shard.name().to_string();
            for entry in shard.into_entries() {
                let key = normalize(&entry.name);
                if key.is_empty() {
                    return Err(ShardError::EmptyKey {
                        shard: shard_name,
                        name: entry.name,
                    });
                }
                if let Some(&slot) = by_key.get(&key) {
                    entries[slot].occurrences.extend(entry.occurrences);
                } else {
                    by_key.insert(key.clone(), entries.len());
                    entries.push(IndexEntry {
                        key,
                        occurrences: entry.occurrences,
                    });
                }
            }
        }

        let index = Self {
            entries,
            by_key,
            shard_count,
        };
        tracing::info!(
            "Merged {} shards into {} entries ({} occurrences) in {:?}",
            index.shard_count(),
            index.entry_count(),
            index.occurrence_count(),
            start.elapsed()
        );
        Ok(index)
    }

    /// Parses raw shard sources and merges them, in the given order.
    ///
    /// Each source is a `(name, data)` pair; the name shows up in error
    /// messages and diagnostics. Aborts on the first malformed source.
    pub fn load_sources<'a, I>(sources: I) -> Result<Self, ShardError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let shards = sources
            .into_iter()
            .map(|(name, data)| Shard::parse(name, data))
            .collect::<Result<Vec<_>, _>>()?;
        Self::load(shards)
    }

    /// Direct map access by exact normalized key. Empty slice on a miss;
    /// no partial matching, no error.
    pub fn lookup(&self, key: &str) -> &[Occurrence] {
        self.by_key
            .get(key)
            .map_or(&[][..], |&slot| self.entries[slot].occurrences.as_slice())
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Number of distinct normalized keys.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of occurrences across all entries.
    pub fn occurrence_count(&self) -> usize {
        self.entries.iter().map(|e| e.occurrences.len()).sum()
    }

    /// Number of shards this index was merged from.
    pub fn shard_count(&self) -> usize {
        self.shard_count
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
