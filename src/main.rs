use clap::Parser;
use doxy_search::cli::{Cli, Commands};
use doxy_search::error::Result;
use doxy_search::shard;
use doxy_search::{Occurrence, QueryOptions, SymbolIndex};
use std::path::Path;

fn main() -> Result<()> {
    doxy_search::tracing::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Query {
            text,
            dir,
            limit,
            no_substring,
            json,
        } => {
            let index = load_index(&dir)?;
            let options = QueryOptions {
                limit: Some(limit),
                substring: !no_substring,
            };
            let hits = index.query(&text, &options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                println!("No matches for '{text}'");
            } else {
                for hit in &hits {
                    println!("{:9} {}", hit.kind.as_str(), render(hit.occurrence));
                }
            }
        }
        Commands::Lookup { key, dir, json } => {
            let index = load_index(&dir)?;
            let occurrences = index.lookup(&key);
            if json {
                println!("{}", serde_json::to_string_pretty(occurrences)?);
            } else if occurrences.is_empty() {
                println!("No entry for key '{key}'");
            } else {
                for occurrence in occurrences {
                    println!("{}", render(occurrence));
                }
            }
        }
        Commands::Stats { dir } => {
            let index = load_index(&dir)?;
            println!("shards:      {}", index.shard_count());
            println!("entries:     {}", index.entry_count());
            println!("occurrences: {}", index.occurrence_count());
        }
    }

    Ok(())
}

fn load_index(dir: &Path) -> Result<SymbolIndex> {
    let shards = shard::load_dir(dir)?;
    Ok(SymbolIndex::load(shards)?)
}

/// One line per occurrence: qualified name, overload hint, anchor.
fn render(occurrence: &Occurrence) -> String {
    let mut line = String::new();
    if !occurrence.owner_label.is_empty() {
        line.push_str(&occurrence.owner_label);
        line.push_str("::");
    }
    line.push_str(&occurrence.display_name);
    if let Some(hint) = &occurrence.signature_hint {
        line.push('(');
        line.push_str(hint);
        line.push(')');
    }
    line.push_str("  ->  ");
    line.push_str(&occurrence.anchor_path);
    line
}
