//! Raw capability tables as read from a terminfo or termcap source.
//!
//! A [`TermEntry`] holds the three standard tables indexed by the canonical
//! capability enums, plus extended capabilities that have no canonical slot.
//! Extended names are kept verbatim. String values are stored decoded (escape
//! sequences already turned into bytes) but not yet compiled.

use std::collections::BTreeMap;

use super::names::{BooleanCap, CapName, NumberCap, StringCap, lookup};

/// Value stored for a numeric capability that is not present.
pub const ABSENT: i32 = -1;

/// One terminal description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermEntry {
    /// Names from the header: aliases first, description last.
    pub names: Vec<String>,
    pub booleans: Vec<bool>,
    pub numbers: Vec<i32>,
    pub strings: Vec<Option<Vec<u8>>>,
    pub ext_booleans: BTreeMap<String, bool>,
    pub ext_numbers: BTreeMap<String, i32>,
    pub ext_strings: BTreeMap<String, Vec<u8>>,
}

impl Default for TermEntry {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            booleans: vec![false; BooleanCap::COUNT],
            numbers: vec![ABSENT; NumberCap::COUNT],
            strings: vec![None; StringCap::COUNT],
            ext_booleans: BTreeMap::new(),
            ext_numbers: BTreeMap::new(),
            ext_strings: BTreeMap::new(),
        }
    }
}

impl TermEntry {
    /// Empty entry with the given `|`-separated name line.
    #[must_use]
    pub fn new(names: &str) -> Self {
        Self {
            names: split_names(names),
            ..Self::default()
        }
    }

    /// Primary terminal name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }

    /// Every name except the trailing description.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        match self.names.len() {
            0 | 1 => &self.names,
            n => &self.names[..n - 1],
        }
    }

    /// Free-text description, if the entry has more than one name.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        if self.names.len() > 1 {
            self.names.last().map(String::as_str)
        } else {
            None
        }
    }

    /// Whether `name` is one of this entry's aliases.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.aliases().iter().any(|alias| alias == name)
    }

    #[must_use]
    pub fn flag(&self, cap: BooleanCap) -> bool {
        self.booleans.get(cap.index()).copied().unwrap_or(false)
    }

    /// Numeric value, `None` when absent.
    #[must_use]
    pub fn number(&self, cap: NumberCap) -> Option<i32> {
        self.numbers
            .get(cap.index())
            .copied()
            .filter(|&n| n >= 0)
    }

    #[must_use]
    pub fn string(&self, cap: StringCap) -> Option<&[u8]> {
        self.strings.get(cap.index()).and_then(|s| s.as_deref())
    }

    pub fn set_flag(&mut self, cap: BooleanCap, value: bool) {
        self.booleans[cap.index()] = value;
    }

    pub fn set_number(&mut self, cap: NumberCap, value: i32) {
        self.numbers[cap.index()] = value;
    }

    pub fn set_string(&mut self, cap: StringCap, value: impl Into<Vec<u8>>) {
        self.strings[cap.index()] = Some(value.into());
    }

    /// Set a boolean by any spelling; unknown names become extended.
    pub fn set_flag_by_name(&mut self, name: &str, value: bool) {
        match lookup(name) {
            Some(CapName::Boolean(cap)) => self.set_flag(cap, value),
            _ => {
                self.ext_booleans.insert(name.to_string(), value);
            }
        }
    }

    /// Set a number by any spelling; unknown names become extended.
    pub fn set_number_by_name(&mut self, name: &str, value: i32) {
        match lookup(name) {
            Some(CapName::Number(cap)) => self.set_number(cap, value),
            _ => {
                self.ext_numbers.insert(name.to_string(), value);
            }
        }
    }

    /// Set a string by any spelling; unknown names become extended.
    pub fn set_string_by_name(&mut self, name: &str, value: impl Into<Vec<u8>>) {
        match lookup(name) {
            Some(CapName::String(cap)) => self.set_string(cap, value),
            _ => {
                self.ext_strings.insert(name.to_string(), value.into());
            }
        }
    }

    /// Fill every slot this entry leaves unset from `parent`.
    ///
    /// Used for termcap `tc=` inheritance: the child wins on conflict. A
    /// boolean set in the child stays set; an unset child boolean takes the
    /// parent's value.
    pub fn inherit(&mut self, parent: &Self) {
        for (slot, &value) in self.booleans.iter_mut().zip(&parent.booleans) {
            *slot |= value;
        }
        for (slot, &value) in self.numbers.iter_mut().zip(&parent.numbers) {
            if *slot < 0 {
                *slot = value;
            }
        }
        for (slot, value) in self.strings.iter_mut().zip(&parent.strings) {
            if slot.is_none() {
                slot.clone_from(value);
            }
        }
        for (name, &value) in &parent.ext_booleans {
            self.ext_booleans.entry(name.clone()).or_insert(value);
        }
        for (name, &value) in &parent.ext_numbers {
            self.ext_numbers.entry(name.clone()).or_insert(value);
        }
        for (name, value) in &parent.ext_strings {
            self.ext_strings
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
    }

    /// Whether any extended capability is present.
    #[must_use]
    pub fn has_extended(&self) -> bool {
        !(self.ext_booleans.is_empty() && self.ext_numbers.is_empty() && self.ext_strings.is_empty())
    }
}

pub(crate) fn split_names(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_absent() {
        let entry = TermEntry::default();
        assert!(!entry.flag(BooleanCap::AutoRightMargin));
        assert_eq!(entry.number(NumberCap::Columns), None);
        assert_eq!(entry.string(StringCap::CursorAddress), None);
        assert_eq!(entry.numbers.len(), NumberCap::COUNT);
    }

    #[test]
    fn test_names() {
        let entry = TermEntry::new("xterm|xterm-debian|X11 terminal emulator");
        assert_eq!(entry.name(), "xterm");
        assert_eq!(entry.aliases(), ["xterm", "xterm-debian"]);
        assert_eq!(entry.description(), Some("X11 terminal emulator"));
        assert!(entry.matches("xterm-debian"));
        assert!(!entry.matches("X11 terminal emulator"));

        let single = TermEntry::new("dumb");
        assert_eq!(single.aliases(), ["dumb"]);
        assert_eq!(single.description(), None);
    }

    #[test]
    fn test_set_by_name_routes_unknown_to_extended() {
        let mut entry = TermEntry::default();
        entry.set_flag_by_name("am", true);
        entry.set_number_by_name("colors", 256);
        entry.set_string_by_name("cm", b"\x1b[%i%p1%d;%p2%dH".to_vec());
        entry.set_flag_by_name("AX", true);
        entry.set_number_by_name("U8", 1);
        entry.set_string_by_name("Ms", b"x".to_vec());

        assert!(entry.flag(BooleanCap::AutoRightMargin));
        assert_eq!(entry.number(NumberCap::MaxColors), Some(256));
        assert!(entry.string(StringCap::CursorAddress).is_some());
        assert_eq!(entry.ext_booleans.get("AX"), Some(&true));
        assert_eq!(entry.ext_numbers.get("U8"), Some(&1));
        assert_eq!(entry.ext_strings.get("Ms"), Some(&b"x".to_vec()));
        assert!(entry.has_extended());
    }

    #[test]
    fn test_inherit_child_wins() {
        let mut parent = TermEntry::new("parent");
        parent.set_number(NumberCap::Columns, 80);
        parent.set_number(NumberCap::Lines, 24);
        parent.set_string(StringCap::Bell, b"\x07".to_vec());
        parent.set_flag(BooleanCap::AutoRightMargin, true);
        parent.ext_numbers.insert("U8".to_string(), 1);

        let mut child = TermEntry::new("child");
        child.set_number(NumberCap::Columns, 132);
        child.ext_numbers.insert("U8".to_string(), 0);
        child.inherit(&parent);

        assert_eq!(child.number(NumberCap::Columns), Some(132));
        assert_eq!(child.number(NumberCap::Lines), Some(24));
        assert_eq!(child.string(StringCap::Bell), Some(&b"\x07"[..]));
        assert!(child.flag(BooleanCap::AutoRightMargin));
        assert_eq!(child.ext_numbers.get("U8"), Some(&0));
        assert_eq!(child.name(), "child");
    }
}
