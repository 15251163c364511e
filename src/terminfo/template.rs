//! Terminfo parameterized-string compiler.
//!
//! A capability string such as `\E[%i%p1%d;%p2%dH` is compiled once into a
//! flat list of [`Op`]s and then executed by a small stack interpreter each
//! time the capability is used. Conditionals become forward jumps. A string
//! without any `%` operator or padding directive compiles to a constant.
//!
//! # Registers
//!
//! `%P[a-z]` / `%g[a-z]` use dynamic registers that start at zero on every
//! call. `%P[A-Z]` / `%g[A-Z]` use static registers that survive across calls;
//! they are not stored in the [`Template`] but passed in by the caller
//! ([`StaticRegisters`]), so a template itself is immutable and shareable.
//!
//! # Padding
//!
//! `$<N>` delays are compiled to [`Op::Pad`] and reported to the output
//! [`Sink`]. Whether a delay is honored is decided by the [`PadPolicy`] at
//! expansion time.

use std::time::Duration;

/// Number of letter registers in each bank.
const REGISTERS: usize = 26;

/// A capability parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Param {
    Int(i32),
    Str(Vec<u8>),
}

impl Param {
    fn as_int(&self) -> i32 {
        match self {
            Self::Int(n) => *n,
            Self::Str(_) => 0,
        }
    }

    const fn truthy(&self) -> bool {
        match self {
            Self::Int(n) => *n != 0,
            Self::Str(_) => true,
        }
    }
}

impl Default for Param {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl From<i32> for Param {
    fn from(n: i32) -> Self {
        Self::Int(n)
    }
}

impl From<u16> for Param {
    fn from(n: u16) -> Self {
        Self::Int(i32::from(n))
    }
}

impl From<usize> for Param {
    fn from(n: usize) -> Self {
        Self::Int(i32::try_from(n).unwrap_or(i32::MAX))
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Self::Str(s.as_bytes().to_vec())
    }
}

impl From<&[u8]> for Param {
    fn from(s: &[u8]) -> Self {
        Self::Str(s.to_vec())
    }
}

/// Static (`%P[A-Z]`) registers for one template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticRegisters([Option<Param>; REGISTERS]);

impl StaticRegisters {
    /// Current value of register `name` (`'A'..='Z'`).
    #[must_use]
    pub fn get(&self, name: char) -> Option<&Param> {
        let idx = (name as usize).checked_sub('A' as usize)?;
        self.0.get(idx)?.as_ref()
    }
}

/// A padding directive `$<N[*][/]>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Padding {
    /// Delay in tenths of a millisecond.
    pub tenths: u32,
    /// `*`: multiply by the number of affected lines.
    pub proportional: bool,
    /// `/`: applies even when flow control is on.
    pub mandatory: bool,
}

impl Padding {
    /// Delay for `lines` affected lines.
    #[must_use]
    pub fn delay(self, lines: u32) -> Duration {
        let tenths = if self.proportional {
            self.tenths.saturating_mul(lines.max(1))
        } else {
            self.tenths
        };
        Duration::from_micros(u64::from(tenths) * 100)
    }
}

/// When padding directives turn into delays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PadPolicy {
    /// Padding feature flag.
    pub enabled: bool,
    /// The terminal uses XON/XOFF; optional padding is skipped.
    pub xon_xoff: bool,
    /// Multiplier for proportional padding.
    pub affected_lines: u32,
}

impl PadPolicy {
    /// Never delay.
    pub const OFF: Self = Self {
        enabled: false,
        xon_xoff: false,
        affected_lines: 1,
    };

    fn delay_for(self, pad: Padding) -> Option<Duration> {
        if !self.enabled || (self.xon_xoff && !pad.mandatory) {
            return None;
        }
        let delay = pad.delay(self.affected_lines);
        (!delay.is_zero()).then_some(delay)
    }
}

impl Default for PadPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            xon_xoff: false,
            affected_lines: 1,
        }
    }
}

/// Receiver of expanded capability output.
pub trait Sink {
    fn bytes(&mut self, bytes: &[u8]);

    /// A delay that must elapse before any later bytes are written.
    fn delay(&mut self, _delay: Duration) {}
}

impl Sink for Vec<u8> {
    fn bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Printf conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    Decimal,
    Octal,
    Hex,
    UpperHex,
    Char,
    String,
}

/// Printf-style output specification (`%[[:]flags][width[.precision]]conv`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Format {
    pub conversion: Conversion,
    pub left: bool,
    pub plus: bool,
    pub space: bool,
    pub alternate: bool,
    pub zero: bool,
    pub width: usize,
    pub precision: Option<usize>,
}

impl Format {
    const fn plain(conversion: Conversion) -> Self {
        Self {
            conversion,
            left: false,
            plus: false,
            space: false,
            alternate: false,
            zero: false,
            width: 0,
            precision: None,
        }
    }

    fn write(&self, value: &Param, out: &mut Vec<u8>) {
        match self.conversion {
            Conversion::Char => {
                // %c emits the low byte
                let byte = value.as_int().to_le_bytes()[0];
                self.pad(&[byte], out, false);
            }
            Conversion::String => {
                let text = match value {
                    Param::Str(s) => s.clone(),
                    Param::Int(n) => n.to_string().into_bytes(),
                };
                let len = self.precision.map_or(text.len(), |p| p.min(text.len()));
                self.pad(&text[..len], out, false);
            }
            _ => self.write_int(value.as_int(), out),
        }
    }

    fn write_int(&self, n: i32, out: &mut Vec<u8>) {
        let (mut digits, sign, prefix): (String, &str, &str) = match self.conversion {
            Conversion::Octal => {
                let d = format!("{:o}", n as u32);
                let prefix = if self.alternate && !d.starts_with('0') { "0" } else { "" };
                (d, "", prefix)
            }
            Conversion::Hex => {
                let prefix = if self.alternate && n != 0 { "0x" } else { "" };
                (format!("{:x}", n as u32), "", prefix)
            }
            Conversion::UpperHex => {
                let prefix = if self.alternate && n != 0 { "0X" } else { "" };
                (format!("{:X}", n as u32), "", prefix)
            }
            _ => {
                let sign = if n < 0 {
                    "-"
                } else if self.plus {
                    "+"
                } else if self.space {
                    " "
                } else {
                    ""
                };
                (n.unsigned_abs().to_string(), sign, "")
            }
        };
        if let Some(precision) = self.precision {
            if precision == 0 && n == 0 {
                digits.clear();
            } else if digits.len() < precision {
                digits.insert_str(0, &"0".repeat(precision - digits.len()));
            }
        }
        let mut body = Vec::with_capacity(self.width.max(digits.len() + 3));
        body.extend_from_slice(sign.as_bytes());
        body.extend_from_slice(prefix.as_bytes());
        let zero_fill = self.zero && !self.left && self.precision.is_none();
        if zero_fill {
            let used = sign.len() + prefix.len() + digits.len();
            body.resize(body.len() + self.width.saturating_sub(used), b'0');
        }
        body.extend_from_slice(digits.as_bytes());
        self.pad(&body, out, zero_fill);
    }

    fn pad(&self, body: &[u8], out: &mut Vec<u8>, already_filled: bool) {
        let fill = if already_filled {
            0
        } else {
            self.width.saturating_sub(body.len())
        };
        if !self.left {
            out.resize(out.len() + fill, b' ');
        }
        out.extend_from_slice(body);
        if self.left {
            out.resize(out.len() + fill, b' ');
        }
    }
}

/// Binary operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,
    Eq,
    Gt,
    Lt,
    LogicalAnd,
    LogicalOr,
}

impl BinOp {
    fn apply(self, x: &Param, y: &Param) -> Param {
        if self == Self::Eq {
            if let (Param::Str(a), Param::Str(b)) = (x, y) {
                return Param::Int(i32::from(a == b));
            }
        }
        let (a, b) = (x.as_int(), y.as_int());
        Param::Int(match self {
            Self::Add => a.wrapping_add(b),
            Self::Sub => a.wrapping_sub(b),
            Self::Mul => a.wrapping_mul(b),
            Self::Div => a.checked_div(b).unwrap_or(0),
            Self::Mod => a.checked_rem(b).unwrap_or(0),
            Self::And => a & b,
            Self::Or => a | b,
            Self::Xor => a ^ b,
            Self::Eq => i32::from(a == b),
            Self::Gt => i32::from(a > b),
            Self::Lt => i32::from(a < b),
            Self::LogicalAnd => i32::from(a != 0 && b != 0),
            Self::LogicalOr => i32::from(a != 0 || b != 0),
        })
    }
}

/// One compiled instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    /// Emit bytes verbatim.
    Literal(Vec<u8>),
    /// Padding directive.
    Pad(Padding),
    /// Pop and print.
    Print(Format),
    /// `%pN`, zero-based.
    PushParam(usize),
    PushInt(i32),
    SetDynamic(usize),
    GetDynamic(usize),
    SetStatic(usize),
    GetStatic(usize),
    /// `%l`: replace a string with its length.
    StrLen,
    Binary(BinOp),
    /// `%!`
    Not,
    /// `%~`
    Complement,
    /// `%i`
    IncrementParams,
    /// Pop; jump to the target when false.
    JumpIfFalse(usize),
    Jump(usize),
}

/// Structural problem that disables a capability.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{reason} at byte {offset}")]
pub struct CompileError {
    pub offset: usize,
    pub reason: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Code {
    Constant(Vec<u8>),
    Program(Vec<Op>),
}

/// A compiled capability string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    code: Code,
}

impl Default for Template {
    fn default() -> Self {
        Self::noop()
    }
}

impl Template {
    /// Template producing nothing.
    #[must_use]
    pub const fn noop() -> Self {
        Self {
            code: Code::Constant(Vec::new()),
        }
    }

    /// Whether expansion ignores its parameters.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(self.code, Code::Constant(_))
    }

    /// Whether expansion always produces nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(&self.code, Code::Constant(bytes) if bytes.is_empty())
    }

    /// Compiled instructions; a constant template is one literal.
    #[must_use]
    pub fn ops(&self) -> Vec<Op> {
        match &self.code {
            Code::Constant(bytes) if bytes.is_empty() => Vec::new(),
            Code::Constant(bytes) => vec![Op::Literal(bytes.clone())],
            Code::Program(ops) => ops.clone(),
        }
    }

    /// Expand with padding dropped.
    #[must_use]
    pub fn expand(&self, params: &[Param], statics: &mut StaticRegisters) -> Vec<u8> {
        let mut out = Vec::new();
        self.expand_into(params, statics, PadPolicy::OFF, &mut out);
        out
    }

    /// Expand into `sink`, reporting padding delays allowed by `policy`.
    pub fn expand_into<S: Sink + ?Sized>(
        &self,
        params: &[Param],
        statics: &mut StaticRegisters,
        policy: PadPolicy,
        sink: &mut S,
    ) {
        match &self.code {
            Code::Constant(bytes) => {
                if !bytes.is_empty() {
                    sink.bytes(bytes);
                }
            }
            Code::Program(ops) => run(ops, params, statics, policy, sink),
        }
    }
}

fn run<S: Sink + ?Sized>(
    ops: &[Op],
    params: &[Param],
    statics: &mut StaticRegisters,
    policy: PadPolicy,
    sink: &mut S,
) {
    let mut params: [Param; 9] = std::array::from_fn(|i| params.get(i).cloned().unwrap_or_default());
    let mut dynamic: [Param; REGISTERS] = std::array::from_fn(|_| Param::Int(0));
    let mut stack: Vec<Param> = Vec::with_capacity(8);
    let mut buf: Vec<u8> = Vec::with_capacity(16);
    let mut pc = 0;

    // Missing operands read as zero rather than failing.
    let pop = |stack: &mut Vec<Param>| stack.pop().unwrap_or_default();

    while let Some(op) = ops.get(pc) {
        pc += 1;
        match op {
            Op::Literal(bytes) => buf.extend_from_slice(bytes),
            Op::Pad(pad) => {
                if let Some(delay) = policy.delay_for(*pad) {
                    sink.bytes(&buf);
                    buf.clear();
                    sink.delay(delay);
                }
            }
            Op::Print(format) => {
                let value = pop(&mut stack);
                format.write(&value, &mut buf);
            }
            Op::PushParam(i) => stack.push(params[*i].clone()),
            Op::PushInt(n) => stack.push(Param::Int(*n)),
            Op::SetDynamic(r) => dynamic[*r] = pop(&mut stack),
            Op::GetDynamic(r) => stack.push(dynamic[*r].clone()),
            Op::SetStatic(r) => statics.0[*r] = Some(pop(&mut stack)),
            Op::GetStatic(r) => stack.push(statics.0[*r].clone().unwrap_or_default()),
            Op::StrLen => {
                let len = match pop(&mut stack) {
                    Param::Str(s) => s.len(),
                    Param::Int(_) => 0,
                };
                stack.push(Param::from(len));
            }
            Op::Binary(bin) => {
                let y = pop(&mut stack);
                let x = pop(&mut stack);
                stack.push(bin.apply(&x, &y));
            }
            Op::Not => {
                let v = pop(&mut stack);
                stack.push(Param::Int(i32::from(!v.truthy())));
            }
            Op::Complement => {
                let v = pop(&mut stack).as_int();
                stack.push(Param::Int(!v));
            }
            Op::IncrementParams => {
                for p in params.iter_mut().take(2) {
                    if let Param::Int(n) = p {
                        *n = n.wrapping_add(1);
                    }
                }
            }
            Op::JumpIfFalse(target) => {
                if !pop(&mut stack).truthy() {
                    pc = *target;
                }
            }
            Op::Jump(target) => pc = *target,
        }
    }
    if !buf.is_empty() {
        sink.bytes(&buf);
    }
}

/// Decode terminfo/termcap escapes (`\E`, `^X`, `\NNN`, ...) into bytes.
///
/// Octal zero and `\0` become `0x80`, since a description cannot contain NUL.
#[must_use]
pub fn unescape(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        let b = text[i];
        i += 1;
        match b {
            b'\\' if i < text.len() => {
                let c = text[i];
                i += 1;
                let byte = match c {
                    b'E' | b'e' => 0x1b,
                    b'n' | b'l' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'b' => 0x08,
                    b'f' => 0x0c,
                    b's' => b' ',
                    b'a' => 0x07,
                    b'0'..=b'7' => {
                        let mut value = u32::from(c - b'0');
                        let mut digits = 1;
                        while digits < 3 && i < text.len() && (b'0'..=b'7').contains(&text[i]) {
                            value = value * 8 + u32::from(text[i] - b'0');
                            i += 1;
                            digits += 1;
                        }
                        match u8::try_from(value & 0xff) {
                            Ok(0) | Err(_) => 0x80,
                            Ok(v) => v,
                        }
                    }
                    other => other,
                };
                out.push(byte);
            }
            b'^' if i < text.len() => {
                let c = text[i];
                i += 1;
                out.push(if c == b'?' { 0x7f } else { c & 0x1f });
            }
            other => out.push(other),
        }
    }
    out
}

struct Frame {
    false_jump: Option<usize>,
    end_jumps: Vec<usize>,
}

struct Compiler<'a> {
    src: &'a [u8],
    pos: usize,
    ops: Vec<Op>,
    literal: Vec<u8>,
    frames: Vec<Frame>,
}

impl<'a> Compiler<'a> {
    const fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: 0,
            ops: Vec::new(),
            literal: Vec::new(),
            frames: Vec::new(),
        }
    }

    fn err(&self, reason: &'static str) -> CompileError {
        CompileError {
            offset: self.pos,
            reason,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn flush(&mut self) {
        if !self.literal.is_empty() {
            self.ops.push(Op::Literal(std::mem::take(&mut self.literal)));
        }
    }

    fn emit(&mut self, op: Op) {
        self.flush();
        self.ops.push(op);
    }

    fn compile(mut self) -> Result<Template, CompileError> {
        while let Some(b) = self.next() {
            match b {
                b'%' => self.operator()?,
                b'$' if self.peek() == Some(b'<') => self.padding(),
                other => self.literal.push(other),
            }
        }
        self.flush();
        while !self.frames.is_empty() {
            tracing::trace!("closing unterminated conditional");
            self.end_conditional();
        }

        let has_ops = self.ops.iter().any(|op| !matches!(op, Op::Literal(_)));
        let code = if has_ops {
            Code::Program(self.ops)
        } else {
            Code::Constant(
                self.ops
                    .into_iter()
                    .flat_map(|op| match op {
                        Op::Literal(bytes) => bytes,
                        _ => Vec::new(),
                    })
                    .collect(),
            )
        };
        Ok(Template { code })
    }

    /// `$<N[.M][*][/]>`; anything else is literal text.
    fn padding(&mut self) {
        let start = self.pos;
        let rest = &self.src[start + 1..];
        let Some(close) = rest.iter().position(|&b| b == b'>') else {
            self.literal.push(b'$');
            return;
        };
        let body = &rest[..close];
        let digits_end = body
            .iter()
            .position(|b| !(b.is_ascii_digit() || *b == b'.'))
            .unwrap_or(body.len());
        let (number, flags) = body.split_at(digits_end);
        let valid = !number.is_empty()
            && number.iter().filter(|&&b| b == b'.').count() <= 1
            && flags.iter().all(|b| matches!(b, b'*' | b'/'));
        if !valid {
            self.literal.push(b'$');
            return;
        }
        let text = String::from_utf8_lossy(number);
        let (whole, frac) = text.split_once('.').unwrap_or((&text, ""));
        let whole: u32 = whole.parse().unwrap_or(0);
        let tenth: u32 = frac
            .bytes()
            .next()
            .map_or(0, |d| u32::from(d.saturating_sub(b'0')));
        self.emit(Op::Pad(Padding {
            tenths: whole.saturating_mul(10).saturating_add(tenth),
            proportional: flags.contains(&b'*'),
            mandatory: flags.contains(&b'/'),
        }));
        self.pos = start + 1 + close + 1;
    }

    fn register(&mut self) -> Result<(bool, usize), CompileError> {
        match self.next() {
            Some(c @ b'a'..=b'z') => Ok((false, usize::from(c - b'a'))),
            Some(c @ b'A'..=b'Z') => Ok((true, usize::from(c - b'A'))),
            _ => Err(self.err("invalid register name")),
        }
    }

    fn operator(&mut self) -> Result<(), CompileError> {
        let op_start = self.pos - 1;
        let Some(c) = self.next() else {
            // trailing '%' is kept as text
            self.literal.push(b'%');
            return Ok(());
        };
        match c {
            b'%' => self.literal.push(b'%'),
            b'c' => self.emit(Op::Print(Format::plain(Conversion::Char))),
            b's' => self.emit(Op::Print(Format::plain(Conversion::String))),
            b'd' => self.emit(Op::Print(Format::plain(Conversion::Decimal))),
            b'o' => self.emit(Op::Print(Format::plain(Conversion::Octal))),
            b'x' => self.emit(Op::Print(Format::plain(Conversion::Hex))),
            b'X' => self.emit(Op::Print(Format::plain(Conversion::UpperHex))),
            b':' | b'#' | b' ' | b'.' | b'0'..=b'9' => {
                self.pos -= 1;
                let format = self.format()?;
                self.emit(Op::Print(format));
            }
            b'p' => match self.next() {
                Some(d @ b'1'..=b'9') => self.emit(Op::PushParam(usize::from(d - b'1'))),
                _ => return Err(self.err("%p needs a digit 1-9")),
            },
            b'P' => {
                let op = match self.register()? {
                    (true, r) => Op::SetStatic(r),
                    (false, r) => Op::SetDynamic(r),
                };
                self.emit(op);
            }
            b'g' => {
                let op = match self.register()? {
                    (true, r) => Op::GetStatic(r),
                    (false, r) => Op::GetDynamic(r),
                };
                self.emit(op);
            }
            b'\'' => {
                let ch = self.next().ok_or_else(|| self.err("unterminated character constant"))?;
                if self.next() != Some(b'\'') {
                    return Err(self.err("unterminated character constant"));
                }
                self.emit(Op::PushInt(i32::from(ch)));
            }
            b'{' => {
                let start = self.pos;
                let len = self.src[start..]
                    .iter()
                    .position(|&b| b == b'}')
                    .ok_or_else(|| self.err("unterminated integer constant"))?;
                let text = std::str::from_utf8(&self.src[start..start + len]).unwrap_or("");
                let value = text
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| self.err("invalid integer constant"))?;
                self.pos = start + len + 1;
                self.emit(Op::PushInt(value));
            }
            b'l' => self.emit(Op::StrLen),
            b'+' => self.emit(Op::Binary(BinOp::Add)),
            b'-' => self.emit(Op::Binary(BinOp::Sub)),
            b'*' => self.emit(Op::Binary(BinOp::Mul)),
            b'/' => self.emit(Op::Binary(BinOp::Div)),
            b'm' => self.emit(Op::Binary(BinOp::Mod)),
            b'&' => self.emit(Op::Binary(BinOp::And)),
            b'|' => self.emit(Op::Binary(BinOp::Or)),
            b'^' => self.emit(Op::Binary(BinOp::Xor)),
            b'=' => self.emit(Op::Binary(BinOp::Eq)),
            b'>' => self.emit(Op::Binary(BinOp::Gt)),
            b'<' => self.emit(Op::Binary(BinOp::Lt)),
            b'A' => self.emit(Op::Binary(BinOp::LogicalAnd)),
            b'O' => self.emit(Op::Binary(BinOp::LogicalOr)),
            b'!' => self.emit(Op::Not),
            b'~' => self.emit(Op::Complement),
            b'i' => self.emit(Op::IncrementParams),
            b'?' => {
                self.flush();
                self.frames.push(Frame {
                    false_jump: None,
                    end_jumps: Vec::new(),
                });
            }
            b't' => {
                if self.frames.is_empty() {
                    return Err(self.err("%t outside conditional"));
                }
                self.emit(Op::JumpIfFalse(usize::MAX));
                let at = self.ops.len() - 1;
                if let Some(frame) = self.frames.last_mut() {
                    frame.false_jump = Some(at);
                }
            }
            b'e' => {
                if self.frames.is_empty() {
                    return Err(self.err("%e outside conditional"));
                }
                self.emit(Op::Jump(usize::MAX));
                let at = self.ops.len() - 1;
                let target = self.ops.len();
                let pending = self.frames.last_mut().and_then(|frame| {
                    frame.end_jumps.push(at);
                    frame.false_jump.take()
                });
                if let Some(jump) = pending {
                    self.ops[jump] = Op::JumpIfFalse(target);
                }
            }
            b';' => {
                if self.frames.is_empty() {
                    return Err(self.err("%; outside conditional"));
                }
                self.flush();
                self.end_conditional();
            }
            other => {
                tracing::debug!(op = %char::from(other), offset = op_start, "unknown % operator kept literally");
                self.literal.push(b'%');
                self.literal.push(other);
            }
        }
        Ok(())
    }

    fn end_conditional(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        let target = self.ops.len();
        if let Some(jump) = frame.false_jump {
            self.ops[jump] = Op::JumpIfFalse(target);
        }
        for jump in frame.end_jumps {
            self.ops[jump] = Op::Jump(target);
        }
    }

    /// `%[[:]flags][width[.precision]][doxXsc]`, positioned after the `%`.
    fn format(&mut self) -> Result<Format, CompileError> {
        let mut format = Format::plain(Conversion::Decimal);
        let colon = self.peek() == Some(b':');
        if colon {
            self.pos += 1;
        }
        loop {
            match self.peek() {
                Some(b'-') if colon => format.left = true,
                Some(b'+') if colon => format.plus = true,
                Some(b'#') => format.alternate = true,
                Some(b' ') => format.space = true,
                _ => break,
            }
            self.pos += 1;
        }
        if self.peek() == Some(b'0') {
            format.zero = true;
            self.pos += 1;
        }
        format.width = self.digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            format.precision = Some(self.digits());
        }
        format.conversion = match self.next() {
            Some(b'd') => Conversion::Decimal,
            Some(b'o') => Conversion::Octal,
            Some(b'x') => Conversion::Hex,
            Some(b'X') => Conversion::UpperHex,
            Some(b's') => Conversion::String,
            Some(b'c') => Conversion::Char,
            _ => return Err(self.err("invalid format conversion")),
        };
        Ok(format)
    }

    fn digits(&mut self) -> usize {
        let mut n: usize = 0;
        while let Some(d @ b'0'..=b'9') = self.peek() {
            n = n.saturating_mul(10).saturating_add(usize::from(d - b'0'));
            self.pos += 1;
        }
        n
    }
}

/// Compile decoded capability bytes.
pub fn try_compile(src: &[u8]) -> Result<Template, CompileError> {
    Compiler::new(src).compile()
}

/// Compile, reporting failures as a warning and returning a no-op template.
#[must_use]
pub fn compile(cap: &str, src: &[u8]) -> Template {
    match try_compile(src) {
        Ok(template) => template,
        Err(err) => {
            crate::event::emit_warning(&crate::event::Warning::Compile {
                cap: cap.to_string(),
                reason: err.to_string(),
            });
            Template::noop()
        }
    }
}
