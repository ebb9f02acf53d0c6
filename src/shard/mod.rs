//! Shard data model and parsers.
//!
//! A shard is one named partition of the symbol index, produced by an
//! external documentation generator and loaded as a unit. Two source
//! syntaxes are supported: the `searchData` JavaScript arrays Doxygen
//! writes next to its HTML output, and a plain JSON array for generators
//! that can emit JSON directly. Partition names (`all_0`, `functions_f`,
//! ...) are a distribution convenience and carry no semantic weight.

pub(crate) mod js;

use crate::error::ShardError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One documented location for a symbol.
///
/// A symbol name may map to many occurrences: overloads, same-named
/// members of unrelated scopes, or a type that also has a constructor of
/// its own name. Disambiguation is carried in the record itself
/// (`owner_label`, `signature_hint`), not in the index structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// Human-readable symbol text, preserved verbatim for display.
    pub display_name: String,
    /// Relative path plus in-page anchor of the documentation fragment.
    /// Unique per occurrence.
    pub anchor_path: String,
    /// Label of the enclosing scope; empty for namespace-level symbols.
    pub owner_label: String,
    /// Parameter-list fragment distinguishing overloads, when the source
    /// carries one.
    pub signature_hint: Option<String>,
}

/// One shard entry: a display name and its occurrences in source order.
#[derive(Debug, Clone)]
pub struct ShardEntry {
    pub name: String,
    pub occurrences: Vec<Occurrence>,
}

/// A named, immutable partition of index entries, parsed as a unit.
#[derive(Debug, Clone)]
pub struct Shard {
    name: String,
    entries: Vec<ShardEntry>,
}

/// Wire shape of a JSON shard entry.
#[derive(Debug, Deserialize)]
struct JsonEntry {
    name: String,
    #[serde(default)]
    occurrences: Vec<JsonOccurrence>,
}

/// Wire shape of a JSON shard occurrence.
#[derive(Debug, Deserialize)]
struct JsonOccurrence {
    anchor: String,
    #[serde(default)]
    owner: String,
    #[serde(default)]
    signature: Option<String>,
}

impl Shard {
    /// Builds a shard from already-structured entries.
    pub fn new(name: impl Into<String>, entries: Vec<ShardEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Parses raw shard data, sniffing the syntax from its leading token:
    /// a `var` header marks Doxygen `searchData` JavaScript, a bare `[`
    /// marks a JSON array. Anything else is `ShardError::UnknownFormat`.
    pub fn parse(name: &str, data: &str) -> Result<Self, ShardError> {
        let trimmed = data.trim_start();
        if trimmed.starts_with("var") {
            js::parse(name, data)
        } else if trimmed.starts_with('[') {
            Self::parse_json(name, trimmed)
        } else {
            Err(ShardError::UnknownFormat {
                shard: name.to_string(),
            })
        }
    }

    fn parse_json(name: &str, data: &str) -> Result<Self, ShardError> {
        let raw: Vec<JsonEntry> =
            serde_json::from_str(data).map_err(|source| ShardError::Json {
                shard: name.to_string(),
                source,
            })?;

        let entries = raw
            .into_iter()
            .map(|entry| ShardEntry {
                occurrences: entry
                    .occurrences
                    .into_iter()
                    .map(|occ| Occurrence {
                        display_name: entry.name.clone(),
                        anchor_path: occ.anchor,
                        owner_label: occ.owner,
                        signature_hint: occ.signature.filter(|s| !s.is_empty()),
                    })
                    .collect(),
                name: entry.name,
            })
            .collect();

        Ok(Self::new(name, entries))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[ShardEntry] {
        &self.entries
    }

    /// Consumes the shard, yielding its entries for merging.
    pub fn into_entries(self) -> Vec<ShardEntry> {
        self.entries
    }
}

/// Discovers and parses every shard file (`*.js`, `*.json`) directly in
/// `dir`, sorted by file name so the shard order, and with it the merged
/// occurrence order, is reproducible across runs.
pub fn load_dir(dir: &Path) -> crate::error::Result<Vec<Shard>> {
    let mut paths = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("reading shard directory {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("reading shard directory {}", dir.display()))?
            .path();
        if matches!(path.extension().and_then(|e| e.to_str()), Some("js" | "json")) {
            paths.push(path);
        }
    }
    paths.sort();
    anyhow::ensure!(
        !paths.is_empty(),
        "no shard files (*.js, *.json) in {}",
        dir.display()
    );

    let mut shards = Vec::with_capacity(paths.len());
    for path in &paths {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading shard {}", path.display()))?;
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("shard");
        shards.push(Shard::parse(name, &data)?);
    }
    tracing::debug!("Parsed {} shard files from {}", shards.len(), dir.display());
    Ok(shards)
}
