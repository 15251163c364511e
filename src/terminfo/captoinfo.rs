//! Termcap `%` dialect to terminfo translation.
//!
//! Termcap strings consume their parameters implicitly: every output code
//! (`%d`, `%.`, `%+c`, ...) prints "the next" parameter. Terminfo pushes
//! parameters explicitly (`%p1`). The translator walks the termcap string,
//! tracking which parameter comes next (`param`) and which one is already on
//! the terminfo stack (`onstack`), and writes the explicit form.
//!
//! Input and output are both escaped text; `\E`, `^X` and friends are copied
//! through untouched so the result can be decoded with
//! [`unescape`](super::template::unescape) like any terminfo source.

use crate::event::{Warning, emit_warning};

/// Result of translating one termcap string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    pub text: Vec<u8>,
    /// First problem noticed, if the translation is probably wrong.
    pub suspicious: Option<&'static str>,
}

struct Translator<'a> {
    src: &'a [u8],
    pos: usize,
    out: Vec<u8>,
    param: usize,
    onstack: Option<usize>,
    reversed: bool,
    xor_n: bool,
    xor_m: bool,
    suspicious: Option<&'static str>,
}

impl<'a> Translator<'a> {
    const fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: 0,
            out: Vec::new(),
            param: 1,
            onstack: None,
            reversed: false,
            xor_n: false,
            xor_m: false,
            suspicious: None,
        }
    }

    fn flag(&mut self, reason: &'static str) {
        self.suspicious.get_or_insert(reason);
    }

    fn push_str(&mut self, s: &str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    fn push_param(&mut self, p: usize) {
        let digit = if (1..=9).contains(&p) {
            p
        } else {
            self.flag("parameter index out of range");
            p.clamp(1, 9)
        };
        self.push_str(&format!("%p{digit}"));
        if self.xor_n && digit < 3 {
            self.push_str("%{96}%^");
        }
        if self.xor_m && digit < 3 {
            self.push_str("%{127}%^");
        }
    }

    /// Make sure `n` copies of parameter `p` are on the stack.
    fn getparm(&mut self, p: usize, n: usize) {
        let p = match (self.reversed, p) {
            (true, 1) => 2,
            (true, 2) => 1,
            (_, other) => other,
        };
        if self.onstack == Some(p) {
            if n > 1 {
                self.push_str("%Pa");
                for _ in 0..n {
                    self.push_str("%ga");
                }
            }
            return;
        }
        for _ in 0..n {
            self.push_param(p);
        }
        self.onstack = Some(p);
    }

    /// The value on the stack was consumed by an output code.
    fn pop(&mut self) {
        if self.onstack.take().is_none() {
            self.flag("output with nothing on the stack");
        }
        self.param += 1;
    }

    /// Read a termcap character constant and push it as a terminfo literal.
    fn constant(&mut self) {
        let Some(&first) = self.src.get(self.pos) else {
            self.flag("missing character constant");
            self.push_str("%{0}");
            return;
        };
        self.pos += 1;
        let value: u32 = match first {
            b'\\' => {
                let Some(&c) = self.src.get(self.pos) else {
                    self.flag("dangling backslash");
                    self.push_str("%{92}");
                    return;
                };
                self.pos += 1;
                match c {
                    b'0'..=b'7' => {
                        let mut v = u32::from(c - b'0');
                        let mut digits = 1;
                        while digits < 3 {
                            match self.src.get(self.pos) {
                                Some(&d @ b'0'..=b'7') => {
                                    v = v * 8 + u32::from(d - b'0');
                                    self.pos += 1;
                                    digits += 1;
                                }
                                _ => break,
                            }
                        }
                        v
                    }
                    b'E' | b'e' => 0x1b,
                    b'n' => u32::from(b'\n'),
                    b'r' => u32::from(b'\r'),
                    b't' => u32::from(b'\t'),
                    b'b' => 0x08,
                    b'f' => 0x0c,
                    other => u32::from(other),
                }
            }
            b'^' => match self.src.get(self.pos) {
                Some(&c) => {
                    self.pos += 1;
                    if c == b'?' { 0x7f } else { u32::from(c & 0x1f) }
                }
                None => u32::from(b'^'),
            },
            other => u32::from(other),
        };
        match u8::try_from(value) {
            Ok(c) if (c.is_ascii_graphic() && !matches!(c, b'\\' | b'^' | b'\'' | b'%')) || c == b' ' => {
                self.out.extend_from_slice(b"%'");
                self.out.push(c);
                self.out.push(b'\'');
            }
            _ => self.push_str(&format!("%{{{value}}}")),
        }
    }

    fn translate(mut self) -> Translation {
        // Leading digits are a padding delay; terminfo writes them as $<..>.
        let pad_len = self
            .src
            .iter()
            .position(|b| !(b.is_ascii_digit() || *b == b'.' || *b == b'*'))
            .unwrap_or(self.src.len());
        let padding = if pad_len > 0 && self.src[0].is_ascii_digit() {
            let p = self.src[..pad_len].to_vec();
            self.pos = pad_len;
            Some(p)
        } else {
            None
        };

        while let Some(&b) = self.src.get(self.pos) {
            self.pos += 1;
            match b {
                b'\\' | b'^' => {
                    self.out.push(b);
                    if let Some(&next) = self.src.get(self.pos) {
                        self.out.push(next);
                        self.pos += 1;
                    }
                }
                b'%' => self.percent(),
                other => self.out.push(other),
            }
        }

        if let Some(padding) = padding {
            self.out.extend_from_slice(b"$<");
            self.out.extend_from_slice(&padding);
            self.out.push(b'>');
        }
        Translation {
            text: self.out,
            suspicious: self.suspicious,
        }
    }

    fn percent(&mut self) {
        let Some(&code) = self.src.get(self.pos) else {
            self.flag("trailing %");
            self.out.push(b'%');
            return;
        };
        self.pos += 1;
        match code {
            b'%' => self.push_str("%%"),
            b'r' => {
                if self.reversed {
                    self.flag("%r seen twice");
                }
                self.reversed = true;
            }
            b'n' => self.xor_n = true,
            b'm' => self.xor_m = true,
            b'i' => self.push_str("%i"),
            b'd' => self.output("%d"),
            b'2' => self.output("%2d"),
            b'3' => self.output("%3d"),
            b'0' => match self.src.get(self.pos) {
                Some(b'2') => {
                    self.pos += 1;
                    self.output("%02d");
                }
                Some(b'3') => {
                    self.pos += 1;
                    self.output("%03d");
                }
                _ => self.unknown(code),
            },
            b'.' => self.output("%c"),
            b's' => self.output("%s"),
            b'+' => {
                self.getparm(self.param, 1);
                self.constant();
                self.push_str("%+%c");
                self.pop();
            }
            b'-' => {
                self.getparm(self.param, 1);
                self.constant();
                self.push_str("%-%c");
                self.pop();
            }
            b'>' => {
                // %>xy: if value > x then value += y
                self.getparm(self.param, 2);
                self.push_str("%?");
                self.constant();
                self.push_str("%>%t");
                self.constant();
                self.push_str("%+%;");
            }
            b'B' => {
                // BCD: (p / 10) * 16 + p % 10
                let p = self.param;
                self.getparm(p, 1);
                self.push_str("%{10}%/%{16}%*");
                self.onstack = None;
                self.getparm(p, 1);
                self.push_str("%{10}%m%+");
            }
            b'D' => {
                // Delta Data: p - 2 * (p % 16)
                self.getparm(self.param, 2);
                self.push_str("%{16}%m%{2}%*%-");
            }
            b'f' => self.param += 1,
            b'b' => self.param = self.param.saturating_sub(1).max(1),
            b'a' => self.arithmetic(),
            other => self.unknown(other),
        }
    }

    fn output(&mut self, code: &str) {
        self.getparm(self.param, 1);
        self.push_str(code);
        self.pop();
    }

    fn unknown(&mut self, code: u8) {
        self.flag("unknown % code");
        self.out.push(b'%');
        self.out.push(code);
    }

    /// `%a` + op (`=+-*/`) + `p`arameter or `c`onstant + operand.
    fn arithmetic(&mut self) {
        let op = self.src.get(self.pos).copied();
        let kind = self.src.get(self.pos + 1).copied();
        let (Some(op @ (b'=' | b'+' | b'-' | b'*' | b'/')), Some(kind @ (b'p' | b'c'))) = (op, kind) else {
            // Plain %a behaves like %+ without output.
            self.getparm(self.param, 1);
            self.constant();
            self.push_str("%+");
            return;
        };
        self.pos += 2;
        let current = self.param;
        if op != b'=' {
            self.getparm(current, 1);
        }
        if kind == b'p' {
            let index = self
                .src
                .get(self.pos)
                .map_or(0, |&c| usize::from(c.saturating_sub(b'@')));
            self.pos += 1;
            self.push_param(index);
        } else {
            self.constant();
        }
        match op {
            b'+' => self.push_str("%+"),
            b'-' => self.push_str("%-"),
            b'*' => self.push_str("%*"),
            b'/' => self.push_str("%/"),
            _ => {}
        }
        self.onstack = Some(match (self.reversed, current) {
            (true, 1) => 2,
            (true, 2) => 1,
            (_, p) => p,
        });
    }
}

/// Translate a termcap string (escaped text) into terminfo syntax.
#[must_use]
pub fn captoinfo(src: &[u8]) -> Translation {
    Translator::new(src).translate()
}

/// Translate and report a suspicious result as a warning event.
#[must_use]
pub fn translate(cap: &str, src: &[u8]) -> Vec<u8> {
    let translation = captoinfo(src);
    if let Some(reason) = translation.suspicious {
        tracing::debug!(cap, reason, "suspicious termcap translation");
        emit_warning(&Warning::CapToInfoMismatch {
            cap: cap.to_string(),
            termcap: String::from_utf8_lossy(src).into_owned(),
            terminfo: String::from_utf8_lossy(&translation.text).into_owned(),
        });
    }
    translation.text
}
