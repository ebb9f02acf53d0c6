//! Parser for Doxygen `searchData` JavaScript shard files.
//!
//! Doxygen writes each partition as a small script:
//!
//! ```text
//! var searchData=
//! [
//!   ['add',['add',['../classXeTable.html#a97ae...',1,'XeTable::add()'],
//!                 ['../classXeMultiGraph.html#a9a2c...',1,'XeMultiGraph::add(XeGraph *g, double z=UNDEFINED)']]],
//! ];
//! ```
//!
//! Entry shape: `[key, [displayName, occurrence...]]`; occurrence shape:
//! `[anchorPath, flag, scopeLabel]`. The numeric flag is a generator
//! artifact and is discarded. Strings are single-quoted with `\'` and
//! `\\` escapes and may carry HTML entities from default arguments or
//! template brackets.

use super::{Occurrence, Shard, ShardEntry};
use crate::error::ShardError;

/// Intermediate JavaScript value; shape-checked into entries afterwards.
#[derive(Debug)]
enum Value {
    Str(String),
    Num(u64),
    List(Vec<Value>),
}

struct Cursor<'a> {
    shard: &'a str,
    data: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.data[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), ShardError> {
        match self.bump() {
            Some(c) if c == wanted => Ok(()),
            found => Err(self.syntax(format!(
                "expected '{wanted}', found {}",
                describe(found)
            ))),
        }
    }

    fn syntax(&self, detail: impl Into<String>) -> ShardError {
        ShardError::Syntax {
            shard: self.shard.to_string(),
            detail: detail.into(),
        }
    }

    /// Consumes the `var searchData =` prefix before the array.
    fn skip_header(&mut self) -> Result<(), ShardError> {
        self.skip_ws();
        if !self.data[self.pos..].starts_with("var") {
            return Err(self.syntax("expected 'var searchData=' header"));
        }
        self.pos += 3;
        self.skip_ws();
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        self.skip_ws();
        self.expect('=')
    }

    fn parse_value(&mut self) -> Result<Value, ShardError> {
        self.skip_ws();
        match self.peek() {
            Some('[') => self.parse_list().map(Value::List),
            Some('\'') => self.parse_string().map(Value::Str),
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            found => Err(self.syntax(format!(
                "expected a list, string or number, found {}",
                describe(found)
            ))),
        }
    }

    fn parse_list(&mut self) -> Result<Vec<Value>, ShardError> {
        self.skip_ws();
        self.expect('[')?;
        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() == Some(']') {
            self.bump();
            return Ok(items);
        }
        loop {
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.bump() {
                Some(',') => {}
                Some(']') => return Ok(items),
                found => {
                    return Err(self.syntax(format!(
                        "expected ',' or ']', found {}",
                        describe(found)
                    )));
                }
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, ShardError> {
        let start = self.pos;
        self.expect('\'')?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\'') => return Ok(decode_entities(out)),
                Some('\\') => match self.bump() {
                    Some(escaped) => out.push(escaped),
                    None => {
                        return Err(
                            self.syntax(format!("unterminated string starting at byte {start}"))
                        );
                    }
                },
                Some(c) => out.push(c),
                None => {
                    return Err(
                        self.syntax(format!("unterminated string starting at byte {start}"))
                    );
                }
            }
        }
    }

    fn parse_number(&mut self) -> Result<Value, ShardError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        self.data[start..self.pos]
            .parse::<u64>()
            .map(Value::Num)
            .map_err(|_| self.syntax(format!("invalid number at byte {start}")))
    }
}

fn describe(found: Option<char>) -> String {
    found.map_or_else(|| "end of data".to_string(), |c| format!("'{c}'"))
}

/// Decodes the HTML entities Doxygen leaves in scope labels, e.g.
/// `string legend=&quot;&quot;` or `map&lt;int,double&gt;`.
fn decode_entities(text: String) -> String {
    if !text.contains('&') {
        return text;
    }
    text.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Splits a scope label like `XeMultiGraph::add(XeGraph *g)` into the
/// owning scope and the overload-distinguishing parameter fragment.
///
/// Labels come in three shapes: empty (a type-level anchor), a bare scope
/// name (`S2Band`), and `Owner::member(params)`. Empty parentheses carry
/// no overload information and yield no hint.
fn decompose_label(label: &str) -> (String, Option<String>) {
    let (head, hint) = match label.find('(') {
        Some(open) => {
            let close = label.rfind(')').filter(|&c| c > open).unwrap_or(label.len());
            let inner = &label[open + 1..close];
            (&label[..open], (!inner.is_empty()).then(|| inner.to_string()))
        }
        None => (label, None),
    };
    let owner = head.split_once("::").map_or(head, |(owner, _)| owner);
    (owner.to_string(), hint)
}

fn shape(shard: &str, detail: impl Into<String>) -> ShardError {
    ShardError::Shape {
        shard: shard.to_string(),
        detail: detail.into(),
    }
}

fn occurrence_from(shard: &str, display: &str, value: Value) -> Result<Occurrence, ShardError> {
    let Value::List(parts) = value else {
        return Err(shape(
            shard,
            format!("occurrence of '{display}' is not a list"),
        ));
    };
    let mut parts = parts.into_iter();
    let (Some(Value::Str(anchor)), Some(Value::Num(_)), Some(Value::Str(label)), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(shape(
            shard,
            format!("occurrence of '{display}' is not an [anchor, flag, scope] triple"),
        ));
    };

    let (owner_label, signature_hint) = decompose_label(&label);
    Ok(Occurrence {
        display_name: display.to_string(),
        anchor_path: anchor,
        owner_label,
        signature_hint,
    })
}

fn entry_from(shard: &str, value: Value) -> Result<ShardEntry, ShardError> {
    let Value::List(parts) = value else {
        return Err(shape(shard, "entry is not a list"));
    };
    let mut parts = parts.into_iter();
    let (Some(Value::Str(_key)), Some(Value::List(matches)), None) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(shape(shard, "entry is not a [key, matches] pair"));
    };

    let mut matches = matches.into_iter();
    let Some(Value::Str(display)) = matches.next() else {
        return Err(shape(shard, "entry matches must start with a display name"));
    };

    let occurrences = matches
        .map(|raw| occurrence_from(shard, &display, raw))
        .collect::<Result<Vec<_>, _>>()?;
    if occurrences.is_empty() {
        return Err(shape(shard, format!("entry '{display}' has no occurrences")));
    }

    Ok(ShardEntry {
        name: display,
        occurrences,
    })
}

pub(crate) fn parse(shard: &str, data: &str) -> Result<Shard, ShardError> {
    let mut cursor = Cursor {
        shard,
        data,
        pos: 0,
    };
    cursor.skip_header()?;
    let raw = cursor.parse_list()?;
    cursor.skip_ws();
    if cursor.peek() == Some(';') {
        cursor.bump();
        cursor.skip_ws();
    }
    if let Some(c) = cursor.peek() {
        return Err(cursor.syntax(format!("trailing data starting with '{c}'")));
    }

    let entries = raw
        .into_iter()
        .map(|value| entry_from(shard, value))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Shard::new(shard, entries))
}
