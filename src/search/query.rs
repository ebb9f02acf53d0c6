//! Query classification and ranking over a built [`SymbolIndex`].

use serde::Serialize;
use std::fmt;

use super::index::SymbolIndex;
use super::normalize::normalize;
use crate::error::QueryError;
use crate::shard::Occurrence;

/// How a hit's key relates to the query needle.
///
/// Declaration order is ranking order: exact hits sort before prefix hits,
/// prefix hits before substring hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Prefix,
    Substring,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Prefix => "prefix",
            Self::Substring => "substring",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Knobs for [`SymbolIndex::query`].
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Maximum number of hits returned; `None` returns everything.
    pub limit: Option<usize>,
    /// Include substring matches. Exact and prefix matches are always on.
    pub substring: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            limit: None,
            substring: true,
        }
    }
}

/// One query result: an occurrence plus how its key matched.
#[derive(Debug, Clone, Serialize)]
pub struct Hit<'a> {
    pub occurrence: &'a Occurrence,
    pub kind: MatchKind,
}

impl SymbolIndex {
    /// Answers "what symbols match this partial name".
    ///
    /// The query text is normalized exactly like keys were at load time, so
    /// matching is case-insensitive and punctuation-blind. Every occurrence
    /// of a matched entry becomes one hit. Hits come back ordered by match
    /// class (exact, then prefix, then substring) and, within a class, by
    /// index insertion order: stable, not alphabetic, so the same index
    /// and query always produce the same sequence.
    ///
    /// Text that normalizes to nothing is rejected with
    /// [`QueryError::NotSearchable`] rather than coerced into
    /// match-everything. No matches is an ordinary `Ok(empty)`.
    pub fn query<'a>(
        &'a self,
        text: &str,
        options: &QueryOptions,
    ) -> Result<Vec<Hit<'a>>, QueryError> {
        let needle = normalize(text);
        if needle.is_empty() {
            return Err(QueryError::NotSearchable {
                raw: text.to_string(),
            });
        }

        let mut exact = Vec::new();
        let mut prefix = Vec::new();
        let mut substring = Vec::new();

        for entry in self.entries() {
            let kind = if entry.key() == needle {
                MatchKind::Exact
            } else if entry.key().starts_with(&needle) {
                MatchKind::Prefix
            } else if options.substring && entry.key().contains(needle.as_str()) {
                MatchKind::Substring
            } else {
                continue;
            };

            let bucket = match kind {
                MatchKind::Exact => &mut exact,
                MatchKind::Prefix => &mut prefix,
                MatchKind::Substring => &mut substring,
            };
            bucket.extend(
                entry
                    .occurrences()
                    .iter()
                    .map(|occurrence| Hit { occurrence, kind }),
            );
        }

        tracing::debug!(
            "query '{}' -> {} exact, {} prefix, {} substring",
            needle,
            exact.len(),
            prefix.len(),
            substring.len()
        );

        let mut hits = exact;
        hits.append(&mut prefix);
        hits.append(&mut substring);
        if let Some(limit) = options.limit {
            hits.truncate(limit);
        }
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shard::{Shard, ShardEntry};
    use assert2::{check, let_assert};
    use rstest::rstest;

    fn shard_of(names: &[(&str, &str)]) -> Shard {
        let entries = names
            .iter()
            .map(|(name, anchor)| ShardEntry {
                name: (*name).to_string(),
                occurrences: vec![Occurrence {
                    display_name: (*name).to_string(),
                    anchor_path: (*anchor).to_string(),
                    owner_label: String::new(),
                    signature_hint: None,
                }],
            })
            .collect();
        Shard::new("all_0", entries)
    }

    fn index() -> SymbolIndex {
        SymbolIndex::load([shard_of(&[
            ("read", "a.html#1"),
            ("readDataFile", "a.html#2"),
            ("spread", "a.html#3"),
            ("simulate", "a.html#4"),
        ])])
        .unwrap()
    }

    #[test]
    fn exact_before_prefix_before_substring() {
        let index = index();
        let hits = index.query("read", &QueryOptions::default()).unwrap();

        let kinds: Vec<_> = hits.iter().map(|h| h.kind).collect();
        check!(kinds == vec![MatchKind::Exact, MatchKind::Prefix, MatchKind::Substring]);

        let anchors: Vec<_> = hits.iter().map(|h| h.occurrence.anchor_path.as_str()).collect();
        check!(anchors == vec!["a.html#1", "a.html#2", "a.html#3"]);
    }

    #[rstest]
    #[case("Read")]
    #[case("READ")]
    #[case("rEaD")]
    fn case_variants_match_identically(#[case] variant: &str) {
        let index = index();
        let lower = index.query("read", &QueryOptions::default()).unwrap();
        let other = index.query(variant, &QueryOptions::default()).unwrap();

        let anchors = |hits: &[Hit<'_>]| {
            hits.iter()
                .map(|h| (h.occurrence.anchor_path.clone(), h.kind))
                .collect::<Vec<_>>()
        };
        check!(anchors(&lower) == anchors(&other));
    }

    #[test]
    fn substring_matches_can_be_suppressed() {
        let index = index();
        let options = QueryOptions {
            substring: false,
            ..QueryOptions::default()
        };
        let hits = index.query("read", &options).unwrap();
        check!(hits.iter().all(|h| h.kind != MatchKind::Substring));
        check!(hits.len() == 2);
    }

    #[test]
    fn limit_truncates_after_ordering() {
        let index = index();
        let options = QueryOptions {
            limit: Some(1),
            ..QueryOptions::default()
        };
        let hits = index.query("read", &options).unwrap();
        check!(hits.len() == 1);
        check!(hits[0].kind == MatchKind::Exact);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("++")]
    fn unsearchable_text_is_rejected(#[case] text: &str) {
        let index = index();
        let_assert!(Err(QueryError::NotSearchable { raw }) =
            index.query(text, &QueryOptions::default()));
        check!(raw == text);
    }

    #[test]
    fn no_match_is_an_empty_ok() {
        let index = index();
        let hits = index.query("zzzznotfound", &QueryOptions::default()).unwrap();
        check!(hits.is_empty());
    }

    #[test]
    fn match_kind_orders_by_priority() {
        check!(MatchKind::Exact < MatchKind::Prefix);
        check!(MatchKind::Prefix < MatchKind::Substring);
    }
}
