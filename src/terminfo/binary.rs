//! Compiled terminfo reader and writer.
//!
//! # Layout
//!
//! ```text
//! header      6 x u16 LE: magic, names size, #bools, #numbers, #strings, table size
//! names       `|`-separated, nul-terminated
//! booleans    1 byte each
//! (pad)       1 byte if the next section would start on an odd offset
//! numbers     i16 LE (legacy magic) or i32 LE (0o1036 magic); negative = absent
//! offsets     u16 LE into the string table; 0xffff / 0xfffe = absent
//! table       nul-terminated strings
//! extended    optional, same shape, capability names stored after the values
//! ```

use std::path::Path;

use super::names::{BooleanCap, NumberCap, StringCap};
use super::table::{ABSENT, TermEntry, split_names};
use crate::error::{Error, Result};

/// Magic number of the original format (16-bit numbers).
pub const MAGIC_LEGACY: u16 = 0o432;
/// Magic number of the ncurses 6.1 format (32-bit numbers).
pub const MAGIC_32BIT: u16 = 0o1036;

const ABSENT_OFFSET: u16 = 0xffff;
const CANCELLED_OFFSET: u16 = 0xfffe;

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, len: usize, section: &'static str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::Truncated {
                section,
                needed: len,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn u16(&mut self, section: &'static str) -> Result<u16> {
        let b = self.take(2, section)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn count(&mut self, field: &'static str) -> Result<usize> {
        let raw = self.u16("header")? as i16;
        usize::try_from(raw).map_err(|_| Error::InvalidHeader {
            field,
            value: i32::from(raw),
        })
    }

    fn align(&mut self, section: &'static str) -> Result<()> {
        if self.pos % 2 == 1 {
            self.take(1, section)?;
        }
        Ok(())
    }

    fn numbers(&mut self, count: usize, wide: bool) -> Result<Vec<i32>> {
        let size = if wide { 4 } else { 2 };
        let bytes = self.take(count * size, "numbers")?;
        Ok(bytes
            .chunks_exact(size)
            .map(|b| {
                let n = if wide {
                    i32::from_le_bytes([b[0], b[1], b[2], b[3]])
                } else {
                    i32::from(i16::from_le_bytes([b[0], b[1]]))
                };
                if n < 0 { ABSENT } else { n }
            })
            .collect())
    }

    fn offsets(&mut self, count: usize, section: &'static str) -> Result<Vec<u16>> {
        let bytes = self.take(count * 2, section)?;
        Ok(bytes
            .chunks_exact(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .collect())
    }
}

/// Nul-terminated string at `offset`, or `None` for the absent markers.
fn table_string(table: &[u8], offset: u16, section: &'static str) -> Result<Option<Vec<u8>>> {
    if offset == ABSENT_OFFSET || offset == CANCELLED_OFFSET {
        return Ok(None);
    }
    let start = usize::from(offset);
    if start >= table.len() {
        return Err(Error::Truncated {
            section,
            needed: start + 1,
            available: table.len(),
        });
    }
    let rest = &table[start..];
    let end = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
    Ok(Some(rest[..end].to_vec()))
}

/// Read and parse a compiled terminfo file.
pub fn read_file(path: &Path) -> Result<TermEntry> {
    let data = std::fs::read(path).map_err(|source| Error::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), len = data.len(), "reading terminfo");
    parse(&data)
}

/// Parse a compiled terminfo description.
pub fn parse(data: &[u8]) -> Result<TermEntry> {
    let mut r = Reader::new(data);

    let magic = r.u16("header")?;
    let wide = match magic {
        MAGIC_LEGACY => false,
        MAGIC_32BIT => true,
        other => return Err(Error::BadMagic(other)),
    };
    let names_size = r.count("names size")?;
    let bool_count = r.count("boolean count")?;
    let num_count = r.count("number count")?;
    let str_count = r.count("string count")?;
    let table_size = r.count("string table size")?;

    let mut entry = TermEntry::default();

    let names = r.take(names_size, "names")?;
    let names = names.split(|&b| b == 0).next().unwrap_or_default();
    entry.names = split_names(&String::from_utf8_lossy(names));

    let bools = r.take(bool_count, "booleans")?;
    for (slot, &b) in entry.booleans.iter_mut().zip(bools) {
        *slot = b == 1;
    }

    r.align("numbers")?;
    let numbers = r.numbers(num_count, wide)?;
    for (slot, n) in entry.numbers.iter_mut().zip(numbers) {
        *slot = n;
    }

    let offsets = r.offsets(str_count, "string offsets")?;
    let table = r.take(table_size, "string table")?;
    for (slot, &offset) in entry.strings.iter_mut().zip(&offsets) {
        *slot = table_string(table, offset, "string table")?;
    }

    tracing::trace!(
        name = entry.name(),
        bool_count,
        num_count,
        str_count,
        extended = r.remaining() > 0,
        "parsed terminfo header"
    );

    if r.remaining() > 0 {
        r.align("extended header")?;
        if r.remaining() > 0 {
            parse_extended(&mut r, &mut entry, wide)?;
        }
    }

    Ok(entry)
}

fn parse_extended(r: &mut Reader<'_>, entry: &mut TermEntry, wide: bool) -> Result<()> {
    let bool_count = r.count("extended boolean count")?;
    let num_count = r.count("extended number count")?;
    let str_count = r.count("extended string count")?;
    let _string_usage = r.count("extended string usage")?;
    let table_size = r.count("extended table size")?;

    let bools = r.take(bool_count, "extended booleans")?.to_vec();
    r.align("extended numbers")?;
    let numbers = r.numbers(num_count, wide)?;
    let value_offsets = r.offsets(str_count, "extended string offsets")?;
    let name_offsets = r.offsets(bool_count + num_count + str_count, "extended name offsets")?;
    let table = r.take(table_size, "extended string table")?;

    // Names follow the last value string.
    let mut names_base = 0;
    let mut values = Vec::with_capacity(str_count);
    for &offset in &value_offsets {
        let value = table_string(table, offset, "extended string table")?;
        if let Some(v) = &value {
            names_base = names_base.max(usize::from(offset) + v.len() + 1);
        }
        values.push(value);
    }
    let names_table = table.get(names_base..).unwrap_or_default();

    let mut names = Vec::with_capacity(name_offsets.len());
    for &offset in &name_offsets {
        let name = table_string(names_table, offset, "extended names")?.unwrap_or_default();
        names.push(String::from_utf8_lossy(&name).into_owned());
    }

    let (bool_names, rest) = names.split_at(bool_count);
    let (num_names, str_names) = rest.split_at(num_count);

    for (name, &b) in bool_names.iter().zip(&bools) {
        entry.ext_booleans.insert(name.clone(), b == 1);
    }
    for (name, &n) in num_names.iter().zip(&numbers) {
        if n >= 0 {
            entry.ext_numbers.insert(name.clone(), n);
        }
    }
    for (name, value) in str_names.iter().zip(values) {
        if let Some(v) = value {
            entry.ext_strings.insert(name.clone(), v);
        }
    }
    Ok(())
}

fn push_u16(out: &mut Vec<u8>, value: usize) {
    let value = u16::try_from(value).unwrap_or(u16::MAX);
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_number(out: &mut Vec<u8>, value: i32, wide: bool) {
    if wide {
        out.extend_from_slice(&value.to_le_bytes());
    } else {
        let value = i16::try_from(value).unwrap_or(-1);
        out.extend_from_slice(&value.to_le_bytes());
    }
}

fn pad_even(out: &mut Vec<u8>) {
    if out.len() % 2 == 1 {
        out.push(0);
    }
}

/// Length of `slots` after dropping trailing entries matching `unset`.
fn used_len<T>(slots: &[T], unset: impl Fn(&T) -> bool) -> usize {
    slots.iter().rposition(|s| !unset(s)).map_or(0, |i| i + 1)
}

impl TermEntry {
    /// Serialize to the compiled format.
    ///
    /// Uses the legacy magic unless some number needs more than 15 bits.
    /// Extended capabilities are written in an extended section.
    #[must_use]
    pub fn to_terminfo_bytes(&self) -> Vec<u8> {
        let wide = self
            .numbers
            .iter()
            .chain(self.ext_numbers.values())
            .any(|&n| n > i32::from(i16::MAX));

        let bool_count = used_len(&self.booleans[..BooleanCap::COUNT.min(self.booleans.len())], |b| !*b);
        let num_count = used_len(&self.numbers[..NumberCap::COUNT.min(self.numbers.len())], |n| *n < 0);
        let str_count = used_len(&self.strings[..StringCap::COUNT.min(self.strings.len())], Option::is_none);

        let mut names = self.names.join("|").into_bytes();
        names.push(0);

        let mut table = Vec::new();
        let mut offsets = Vec::with_capacity(str_count);
        for value in &self.strings[..str_count] {
            match value {
                Some(v) => {
                    offsets.push(table.len());
                    table.extend_from_slice(v);
                    table.push(0);
                }
                None => offsets.push(usize::from(ABSENT_OFFSET)),
            }
        }

        let mut out = Vec::new();
        push_u16(&mut out, usize::from(if wide { MAGIC_32BIT } else { MAGIC_LEGACY }));
        push_u16(&mut out, names.len());
        push_u16(&mut out, bool_count);
        push_u16(&mut out, num_count);
        push_u16(&mut out, str_count);
        push_u16(&mut out, table.len());
        out.extend_from_slice(&names);
        out.extend(self.booleans[..bool_count].iter().map(|&b| u8::from(b)));
        pad_even(&mut out);
        for &n in &self.numbers[..num_count] {
            push_number(&mut out, n, wide);
        }
        for &offset in &offsets {
            push_u16(&mut out, offset);
        }
        out.extend_from_slice(&table);

        if self.has_extended() {
            pad_even(&mut out);
            self.write_extended(&mut out, wide);
        }
        out
    }

    fn write_extended(&self, out: &mut Vec<u8>, wide: bool) {
        let mut table = Vec::new();
        let mut value_offsets = Vec::with_capacity(self.ext_strings.len());
        for value in self.ext_strings.values() {
            value_offsets.push(table.len());
            table.extend_from_slice(value);
            table.push(0);
        }

        let names_base = table.len();
        let mut name_offsets = Vec::new();
        let all_names = self
            .ext_booleans
            .keys()
            .chain(self.ext_numbers.keys())
            .chain(self.ext_strings.keys());
        for name in all_names {
            name_offsets.push(table.len() - names_base);
            table.extend_from_slice(name.as_bytes());
            table.push(0);
        }

        push_u16(out, self.ext_booleans.len());
        push_u16(out, self.ext_numbers.len());
        push_u16(out, self.ext_strings.len());
        push_u16(out, value_offsets.len() + name_offsets.len());
        push_u16(out, table.len());
        out.extend(self.ext_booleans.values().map(|&b| u8::from(b)));
        pad_even(out);
        for &n in self.ext_numbers.values() {
            push_number(out, n, wide);
        }
        for &offset in value_offsets.iter().chain(&name_offsets) {
            push_u16(out, offset);
        }
        out.extend_from_slice(&table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TermEntry {
        let mut entry = TermEntry::new("test|test-alias|Test terminal");
        entry.set_flag(BooleanCap::AutoRightMargin, true);
        entry.set_flag(BooleanCap::BackColorErase, true);
        entry.set_number(NumberCap::Columns, 80);
        entry.set_number(NumberCap::MaxColors, 8);
        entry.set_string(StringCap::CursorAddress, b"\x1b[%i%p1%d;%p2%dH".to_vec());
        entry.set_string(StringCap::Bell, b"\x07".to_vec());
        entry.set_string(StringCap::ClrEol, Vec::new());
        entry
    }

    #[test]
    fn test_round_trip_standard() {
        let entry = sample();
        let bytes = entry.to_terminfo_bytes();
        assert_eq!(u16::from_le_bytes([bytes[0], bytes[1]]), MAGIC_LEGACY);
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed, entry);
        assert_eq!(parsed.number(NumberCap::Lines), None);
        assert_eq!(parsed.string(StringCap::ClrEol), Some(&b""[..]));
    }

    #[test]
    fn test_round_trip_extended() {
        let mut entry = sample();
        entry.ext_booleans.insert("AX".to_string(), true);
        entry.ext_numbers.insert("U8".to_string(), 1);
        entry.ext_strings.insert("Ms".to_string(), b"\x1b]52;%p1%s;%p2%s\x07".to_vec());
        entry.ext_strings.insert("Se".to_string(), b"\x1b[2 q".to_vec());
        let parsed = parse(&entry.to_terminfo_bytes()).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_wide_numbers_use_32bit_magic() {
        let mut entry = sample();
        entry.set_number(NumberCap::MaxPairs, 65536);
        let bytes = entry.to_terminfo_bytes();
        assert_eq!(u16::from_le_bytes([bytes[0], bytes[1]]), MAGIC_32BIT);
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed.number(NumberCap::MaxPairs), Some(65536));
        assert_eq!(parsed.number(NumberCap::Columns), Some(80));
    }

    #[test]
    fn test_bad_magic() {
        let err = parse(&[0x34, 0x12, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, Error::BadMagic(0x1234)));
    }

    #[test]
    fn test_truncated_sections() {
        let bytes = sample().to_terminfo_bytes();
        for cut in [0, 5, 12, 20, bytes.len() - 1] {
            assert!(parse(&bytes[..cut]).is_err(), "cut at {cut} should fail");
        }
    }

    #[test]
    fn test_negative_count_rejected() {
        let mut bytes = sample().to_terminfo_bytes();
        bytes[4] = 0xfe;
        bytes[5] = 0xff;
        assert!(matches!(parse(&bytes), Err(Error::InvalidHeader { .. })));
    }

    #[test]
    fn test_cancelled_offset_is_absent() {
        let mut entry = TermEntry::new("x");
        entry.set_string(StringCap::Bell, b"\x07".to_vec());
        entry.set_string(StringCap::CarriageReturn, b"\r".to_vec());
        let mut bytes = entry.to_terminfo_bytes();
        // names "x\0" (2 bytes), no booleans or numbers; offsets start at 14
        let bell = 12 + 2 + 2;
        bytes[bell] = 0xfe;
        bytes[bell + 1] = 0xff;
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed.string(StringCap::Bell), None);
        assert_eq!(parsed.string(StringCap::CarriageReturn), Some(&b"\r"[..]));
    }

    #[test]
    fn test_odd_names_padding() {
        // 12 header + 4 name bytes + 1 boolean = 17, so one pad byte
        let mut entry = TermEntry::new("abc");
        entry.set_flag(BooleanCap::AutoLeftMargin, true);
        entry.set_number(NumberCap::Columns, 132);
        let bytes = entry.to_terminfo_bytes();
        assert_eq!(bytes[17], 0);
        assert_eq!(bytes[18], 132);
        assert_eq!(parse(&bytes).unwrap(), entry);
    }
}
