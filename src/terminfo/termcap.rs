//! Termcap text reader.
//!
//! A termcap source holds any number of entries, one per logical line:
//!
//! ```text
//! # comment
//! vt100|dec vt100:\
//!     :am:co#80:li#24:cm=\E[%i%d;%dH:\
//!     :tc=ansi-base:
//! ```
//!
//! Fields are booleans (`am`), numbers (`co#80`), strings (`cm=...`) or
//! cancellations (`am@`). The first occurrence of a capability wins, and
//! `tc=name` splices in another entry's fields at that point. String values
//! are translated from the termcap `%` dialect before decoding.

use std::collections::HashSet;
use std::path::Path;

use super::captoinfo::translate;
use super::names::{BooleanCap, NumberCap, StringCap};
use super::table::TermEntry;
use super::template::unescape;
use crate::error::{Error, Result};
use crate::event::{Warning, emit_warning};

/// Deepest `tc=` chain followed.
const MAX_TC_DEPTH: usize = 32;

/// One field of a termcap entry, before name translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Bool(String),
    Num(String, i32),
    Str(String, String),
    Cancel(String),
}

impl Field {
    fn code(&self) -> &str {
        match self {
            Self::Bool(c) | Self::Num(c, _) | Self::Str(c, _) | Self::Cancel(c) => c,
        }
    }
}

/// An unresolved termcap entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawEntry {
    pub names: Vec<String>,
    pub fields: Vec<Field>,
    /// Line the entry starts on (1-based).
    pub line: usize,
}

impl RawEntry {
    fn matches(&self, name: &str) -> bool {
        let aliases = match self.names.len() {
            0 | 1 => &self.names[..],
            n => &self.names[..n - 1],
        };
        aliases.iter().any(|alias| alias == name)
    }
}

/// Split on `:` that is not escaped by a backslash.
fn split_fields(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut fields = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b':' => {
                fields.push(&line[start..i]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < line.len() {
        fields.push(&line[start..]);
    }
    fields
}

fn parse_number(text: &str) -> Option<i32> {
    if text.len() > 1 && text.starts_with('0') {
        i32::from_str_radix(&text[1..], 8).ok()
    } else {
        text.parse().ok()
    }
}

fn parse_field(raw: &str, line: usize) -> Result<Option<Field>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Some(eq) = raw.find('=') {
        let hash = raw.find('#');
        if hash.is_none_or(|h| eq < h) {
            return Ok(Some(Field::Str(raw[..eq].to_string(), raw[eq + 1..].to_string())));
        }
    }
    if let Some((code, value)) = raw.split_once('#') {
        let n = parse_number(value.trim()).ok_or_else(|| Error::InvalidTermcap {
            line,
            reason: format!("bad number in {raw:?}"),
        })?;
        return Ok(Some(Field::Num(code.to_string(), n)));
    }
    if let Some(code) = raw.strip_suffix('@') {
        return Ok(Some(Field::Cancel(code.to_string())));
    }
    Ok(Some(Field::Bool(raw.to_string())))
}

/// Parse every entry in a termcap source.
///
/// Malformed entries are logged and skipped; the rest of the source stays
/// usable.
#[must_use]
pub fn parse(text: &str) -> Vec<RawEntry> {
    let mut entries = Vec::new();
    let mut logical = String::new();
    let mut start_line = 0;

    let lines: Vec<&str> = text.lines().collect();
    let mut idx = 0;
    while idx < lines.len() {
        let line_no = idx + 1;
        let line = lines[idx];
        idx += 1;
        if logical.is_empty() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            start_line = line_no;
        }
        let piece = if logical.is_empty() { line } else { line.trim_start() };
        if let Some(body) = piece.strip_suffix('\\') {
            logical.push_str(body);
            if idx < lines.len() {
                continue;
            }
        } else {
            logical.push_str(piece);
        }
        match parse_entry(&logical, start_line) {
            Ok(entry) => entries.push(entry),
            Err(err) => tracing::warn!(line = start_line, error = %err, "skipping termcap entry"),
        }
        logical.clear();
    }
    tracing::trace!(entries = entries.len(), "parsed termcap source");
    entries
}

fn parse_entry(line: &str, line_no: usize) -> Result<RawEntry> {
    let mut fields = split_fields(line).into_iter();
    let names = fields.next().unwrap_or_default();
    let names = super::table::split_names(names);
    if names.is_empty() {
        return Err(Error::InvalidTermcap {
            line: line_no,
            reason: "entry has no name".to_string(),
        });
    }
    let mut parsed = Vec::new();
    for raw in fields {
        if let Some(field) = parse_field(raw, line_no)? {
            parsed.push(field);
        }
    }
    Ok(RawEntry {
        names,
        fields: parsed,
        line: line_no,
    })
}

/// Append `entry`'s fields with `tc=` references expanded in place.
fn flatten(
    entries: &[RawEntry],
    entry: &RawEntry,
    visited: &mut HashSet<String>,
    depth: usize,
    out: &mut Vec<Field>,
) {
    for field in &entry.fields {
        match field {
            Field::Str(code, parent) if code == "tc" => {
                let term = entry.names[0].clone();
                if depth >= MAX_TC_DEPTH || !visited.insert(parent.clone()) {
                    emit_warning(&Warning::TermcapCycle {
                        term,
                        parent: parent.clone(),
                    });
                    continue;
                }
                match entries.iter().find(|e| e.matches(parent)) {
                    Some(parent_entry) => flatten(entries, parent_entry, visited, depth + 1, out),
                    None => tracing::warn!(%term, %parent, "tc= refers to unknown entry"),
                }
            }
            other => out.push(other.clone()),
        }
    }
}

/// Resolve `name` against parsed entries into a capability table.
pub fn resolve(entries: &[RawEntry], name: &str) -> Result<TermEntry> {
    let entry = entries
        .iter()
        .find(|e| e.matches(name))
        .ok_or_else(|| Error::NotFound {
            term: name.to_string(),
        })?;

    let mut visited = HashSet::from([entry.names[0].clone()]);
    let mut fields = Vec::new();
    flatten(entries, entry, &mut visited, 0, &mut fields);

    let mut result = TermEntry {
        names: entry.names.clone(),
        ..TermEntry::default()
    };
    let mut seen: HashSet<(u8, String)> = HashSet::new();
    let mut cancelled: HashSet<String> = HashSet::new();

    for field in &fields {
        let code = field.code();
        if cancelled.contains(code) {
            continue;
        }
        let kind = match field {
            Field::Bool(_) => 0,
            Field::Num(..) => 1,
            Field::Str(..) => 2,
            Field::Cancel(_) => {
                cancelled.insert(code.to_string());
                continue;
            }
        };
        if !seen.insert((kind, code.to_string())) {
            continue;
        }
        apply(&mut result, field);
    }

    apply_obsolete(&mut result);
    tracing::debug!(term = name, fields = fields.len(), "resolved termcap entry");
    Ok(result)
}

fn apply(entry: &mut TermEntry, field: &Field) {
    match field {
        Field::Bool(code) => match BooleanCap::from_termcap(code) {
            Some(cap) => entry.set_flag(cap, true),
            None => {
                entry.ext_booleans.insert(code.clone(), true);
            }
        },
        Field::Num(code, n) => match NumberCap::from_termcap(code) {
            Some(cap) => entry.set_number(cap, *n),
            None => {
                entry.ext_numbers.insert(code.clone(), *n);
            }
        },
        Field::Str(code, value) => match StringCap::from_termcap(code) {
            Some(StringCap::AcsChars) => entry.set_string(StringCap::AcsChars, unescape(value.as_bytes())),
            Some(cap) => {
                let info = translate(cap.name(), value.as_bytes());
                entry.set_string(cap, unescape(&info));
            }
            None => {
                entry.ext_strings.insert(code.clone(), unescape(value.as_bytes()));
            }
        },
        Field::Cancel(_) => {}
    }
}

/// Fill modern capabilities implied by obsolete termcap ones.
fn apply_obsolete(entry: &mut TermEntry) {
    if entry.string(StringCap::CursorLeft).is_none() {
        if let Some(bc) = entry.string(StringCap::BackspaceIfNotBs).map(<[u8]>::to_vec) {
            entry.set_string(StringCap::CursorLeft, bc);
        } else if entry.flag(BooleanCap::BackspacesWithBs) {
            entry.set_string(StringCap::CursorLeft, b"\x08".to_vec());
        }
    }
    if entry.string(StringCap::Tab).is_none() && entry.flag(BooleanCap::HasHardwareTabs) {
        entry.set_string(StringCap::Tab, b"\t".to_vec());
    }
    if entry.string(StringCap::CarriageReturn).is_none() && !entry.flag(BooleanCap::NoCorrectlyWorkingCr) {
        entry.set_string(StringCap::CarriageReturn, b"\r".to_vec());
    }
    if entry.string(StringCap::CursorDown).is_none() {
        let nl = entry
            .string(StringCap::LinefeedIfNotLf)
            .map_or_else(|| b"\n".to_vec(), <[u8]>::to_vec);
        entry.set_string(StringCap::CursorDown, nl);
    }
}

/// Parse `text` and resolve `name`.
pub fn find(text: &str, name: &str) -> Result<TermEntry> {
    resolve(&parse(text), name)
}

/// Read a termcap file and resolve `name`.
pub fn read_file(path: &Path, name: &str) -> Result<TermEntry> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    find(&text, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r"# sample
ansi-base|base ansi:\
    :am:co#80:li#24:\
    :cl=\E[H\E[J:cm=\E[%i%d;%dH:
vt-test|vt|test terminal:\
    :co#132:bs:\
    :am@:cl@:tc=ansi-base:
";

    #[test]
    fn test_parse_entries() {
        let entries = parse(SOURCE);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].names, ["ansi-base", "base ansi"]);
        assert_eq!(entries[0].line, 2);
        assert_eq!(entries[1].line, 5);
        assert!(entries[0].fields.contains(&Field::Num("co".to_string(), 80)));
        assert!(entries[1].fields.contains(&Field::Cancel("am".to_string())));
    }

    #[test]
    fn test_resolve_with_inheritance() {
        let entry = find(SOURCE, "vt").unwrap();
        assert_eq!(entry.name(), "vt-test");
        assert_eq!(entry.number(NumberCap::Columns), Some(132));
        assert_eq!(entry.number(NumberCap::Lines), Some(24));
        assert!(!entry.flag(BooleanCap::AutoRightMargin));
        assert_eq!(entry.string(StringCap::ClearScreen), None);
        assert_eq!(
            entry.string(StringCap::CursorAddress),
            Some(&b"\x1b[%i%p1%d;%p2%dH"[..])
        );
        assert_eq!(entry.string(StringCap::CursorLeft), Some(&b"\x08"[..]));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let entry = find("t|t:co#80:co#100:", "t").unwrap();
        assert_eq!(entry.number(NumberCap::Columns), Some(80));
    }

    #[test]
    fn test_escaped_colon_in_value() {
        let entry = find(r"t|t:xx=a\:b:", "t").unwrap();
        assert_eq!(entry.ext_strings.get("xx"), Some(&b"a:b".to_vec()));
    }

    #[test]
    fn test_unknown_codes_are_extended() {
        let entry = find("t|t:Zz:Q1#5:Q2=x:", "t").unwrap();
        assert_eq!(entry.ext_booleans.get("Zz"), Some(&true));
        assert_eq!(entry.ext_numbers.get("Q1"), Some(&5));
        assert_eq!(entry.ext_strings.get("Q2"), Some(&b"x".to_vec()));
    }

    #[test]
    fn test_octal_numbers() {
        let entry = find("t|t:co#010:", "t").unwrap();
        assert_eq!(entry.number(NumberCap::Columns), Some(8));
    }

    #[test]
    fn test_bad_number_is_error() {
        let err = parse_entry("t|t:co#abc:", 1).unwrap_err();
        assert!(matches!(err, Error::InvalidTermcap { line: 1, .. }));
    }

    #[test]
    fn test_broken_entry_does_not_hide_siblings() {
        let src = "broken|broken entry:co#8x:\ngood|good entry:co#80:li#24:\n";
        let entries = parse(src);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].line, 2);

        let entry = find(src, "good").unwrap();
        assert_eq!(entry.number(NumberCap::Columns), Some(80));
        assert_eq!(entry.number(NumberCap::Lines), Some(24));
        assert!(matches!(find(src, "broken"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_not_found() {
        assert!(matches!(find(SOURCE, "nope"), Err(Error::NotFound { .. })));
        // the description is not an alias
        assert!(matches!(find(SOURCE, "test terminal"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_tc_cycle_terminates() {
        let src = "a|a:co#1:tc=b:\nb|b:li#2:tc=a:\n";
        let entry = find(src, "a").unwrap();
        assert_eq!(entry.number(NumberCap::Columns), Some(1));
        assert_eq!(entry.number(NumberCap::Lines), Some(2));
    }

    #[test]
    fn test_acs_chars_not_translated() {
        let entry = find("t|t:ac=``aaffqqxx:", "t").unwrap();
        assert_eq!(entry.string(StringCap::AcsChars), Some(&b"``aaffqqxx"[..]));
    }

    #[test]
    fn test_obsolete_defaults() {
        let entry = find("t|t:pt:nc:", "t").unwrap();
        assert_eq!(entry.string(StringCap::Tab), Some(&b"\t"[..]));
        assert_eq!(entry.string(StringCap::CarriageReturn), None);
        assert_eq!(entry.string(StringCap::CursorDown), Some(&b"\n"[..]));
    }
}
