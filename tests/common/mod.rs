//! Shared test fixtures and utilities for integration tests.
//!
//! The shard excerpts below are lifted from a real generator run (a C++
//! statistics package documented with Doxygen), trimmed to a handful of
//! entries. They cover the shapes the parser has to survive: one method
//! name recurring across unrelated owning classes, overload lists,
//! type-level anchors, and empty scope labels.
//!
//! [`ShardDir`] provides a tempfile-backed shard directory for tests that
//! exercise file discovery; it is cleaned up on drop.

use doxy_search::{Shard, SymbolIndex};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// An `all_*` bucket: the `add` entry with occurrences in two unrelated
/// classes, plus neighbors sharing the `ad`/`a` prefixes.
#[allow(dead_code)]
pub const ALL_A: &str = "var searchData=\n[\n  ['activateparameter',['activateParameter',['../classLikelihood.html#affd08ceac587ec03dd04298d8dbbfaa1',1,'Likelihood']]],\n  ['add',['add',['../classXeTable.html#a97aebba33e3a5f03b5bb10f8a1e81ba1',1,'XeTable::add()'],['../classXeMultiGraph.html#a9a2cd365840f3a8a7bef54339bcdf1f9',1,'XeMultiGraph::add(XeGraph *g, double z=UNDEFINED)']]],\n  ['adddelta',['addDelta',['../classTabulatedDist.html#a9868a4d0bb7aa813620460ff3b426718',1,'TabulatedDist']]]\n];\n";

/// A `functions_*` bucket with overloads and a bare scope label.
#[allow(dead_code)]
pub const FUNCTIONS_S: &str = "var searchData=\n[\n  ['simulate',['simulate',['../classXeRun.html#a0b1c5ac8b864537f2f66d95c6e115507',1,'XeRun::simulate(double sigma)'],['../classS1S2Bands.html#a7de5afa9df2b34f3e3bd5d7eb1f0f1aa',1,'S1S2Bands::simulate()']]],\n  ['suppresswarnings',['suppressWarnings',['../classXeCore.html#a456ce1aff648ac148c7da612d98a1d71',1,'XeCore']]]\n];\n";

/// A JSON shard contributing one more `add` occurrence, for merge tests.
#[allow(dead_code)]
pub const JSON_EXTRA: &str = r#"[
  {"name": "add", "occurrences": [
    {"anchor": "../classXeValues.html#afc97ec14922173675703887841e9fc42",
     "owner": "XeValues", "signature": "double value"}
  ]}
]"#;

/// Index over the two Doxygen fixtures, in bucket-file order.
#[allow(dead_code)]
pub fn fixture_index() -> SymbolIndex {
    SymbolIndex::load_sources([("all_a", ALL_A), ("functions_s", FUNCTIONS_S)])
        .expect("fixture shards parse")
}

/// Parsed fixture shards, for tests that merge pre-built shards.
#[allow(dead_code)]
pub fn fixture_shards() -> Vec<Shard> {
    vec![
        Shard::parse("all_a", ALL_A).expect("fixture shard parses"),
        Shard::parse("functions_s", FUNCTIONS_S).expect("fixture shard parses"),
    ]
}

/// A temporary shard directory, cleaned up when dropped.
#[allow(dead_code)]
pub struct ShardDir {
    temp: TempDir,
}

#[allow(dead_code)]
impl ShardDir {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("create temp shard dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn write(&self, name: &str, data: &str) -> &Self {
        fs::write(self.temp.path().join(name), data).expect("write shard file");
        self
    }
}
