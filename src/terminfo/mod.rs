//! Terminal capability compiler.
//!
//! A description is read from a compiled terminfo file ([`binary`]) or a
//! termcap entry ([`termcap`], translated by [`captoinfo`]), every string
//! capability is compiled once ([`template`]) and quirks are detected
//! ([`features`]). [`CapabilitySet`] ties these together.
//!
//! ```
//! use cellterm::terminfo::{CapabilitySet, StringCap};
//! use cellterm::{LoadOptions, Param};
//!
//! let mut caps = CapabilitySet::from_entry(
//!     cellterm::terminfo::fallback::xterm(),
//!     &LoadOptions::default(),
//! );
//! let cup = caps.expand(StringCap::CursorAddress, &[Param::Int(3), Param::Int(5)]);
//! assert_eq!(cup, b"\x1b[4;6H");
//! assert!(caps.has("cup"));
//! assert!(!caps.has("nonexistent"));
//! ```

pub mod binary;
pub mod captoinfo;
pub mod fallback;
pub mod features;
pub mod locate;
pub mod names;
pub mod table;
pub mod template;
pub mod termcap;

use std::collections::BTreeMap;
use std::path::PathBuf;

pub use features::{AcsMap, FeatureFlags};
pub use names::{BooleanCap, CapName, NumberCap, StringCap};
pub use table::TermEntry;
pub use template::{PadPolicy, Param, Sink, StaticRegisters, Template};

use crate::config::LoadOptions;
use crate::error::{Error, Result};
use crate::event::{Warning, emit_warning};
use locate::TermcapSource;

/// Where a [`CapabilitySet`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Terminfo(PathBuf),
    /// Termcap file, or `None` for inline `$TERMCAP` text.
    Termcap(Option<PathBuf>),
    /// The bundled `xterm` entry.
    Fallback,
    /// Built by the caller.
    Entry,
}

/// A capability value resolved by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability<'a> {
    Flag(bool),
    Number(i32),
    String(&'a Template),
}

/// A compiled string capability and its static registers.
#[derive(Clone, Debug)]
struct Compiled {
    template: Template,
    statics: StaticRegisters,
}

impl Compiled {
    fn new(cap: &str, src: &[u8]) -> Self {
        Self {
            template: template::compile(cap, src),
            statics: StaticRegisters::default(),
        }
    }
}

/// Compiled capabilities and quirk flags for one terminal type.
///
/// Built once per terminal type and read by every render cycle. Switching
/// terminal types means building a new set.
#[derive(Clone, Debug)]
pub struct CapabilitySet {
    entry: TermEntry,
    source: Source,
    strings: Vec<Option<Compiled>>,
    extended: BTreeMap<String, Compiled>,
    features: FeatureFlags,
    acs: AcsMap,
}

impl CapabilitySet {
    /// Locate, read and compile the description for the configured terminal.
    ///
    /// Terminfo is tried before termcap unless `prefer_termcap` is set. When
    /// neither yields an entry the bundled `xterm` description is used and a
    /// [`Warning::SourceFallback`] is emitted; with fallback disabled this
    /// returns [`Error::NoSource`].
    pub fn load(options: &LoadOptions) -> Result<Self> {
        let term = options.terminal_name();
        let mut reasons = Vec::new();

        let attempts: [fn(&str, &LoadOptions) -> Result<(TermEntry, Source)>; 2] =
            if options.prefer_termcap {
                [load_termcap, load_terminfo]
            } else {
                [load_terminfo, load_termcap]
            };
        for attempt in attempts {
            match attempt(&term, options) {
                Ok((entry, source)) => {
                    tracing::debug!(term = %term, ?source, "loaded terminal description");
                    return Ok(Self::build(entry, source, options));
                }
                Err(err) => {
                    tracing::debug!(term = %term, error = %err, "description source failed");
                    reasons.push(err.to_string());
                }
            }
        }

        if !options.allow_fallback {
            return Err(Error::NoSource { term });
        }
        emit_warning(&Warning::SourceFallback {
            term: term.clone(),
            reason: reasons.join("; "),
        });
        Ok(Self::build(fallback::xterm(), Source::Fallback, options))
    }

    /// Compile an entry the caller already has.
    #[must_use]
    pub fn from_entry(entry: TermEntry, options: &LoadOptions) -> Self {
        Self::build(entry, Source::Entry, options)
    }

    fn build(entry: TermEntry, source: Source, options: &LoadOptions) -> Self {
        let strings = StringCap::ALL
            .iter()
            .map(|&cap| {
                entry
                    .string(cap)
                    .map(|src| Compiled::new(cap.info_name(), src))
            })
            .collect();
        let extended = entry
            .ext_strings
            .iter()
            .map(|(name, src)| (name.clone(), Compiled::new(name, src)))
            .collect();
        let features = features::detect(&entry, &options.env, options.force_unicode);
        let acs = entry
            .string(StringCap::AcsChars)
            .map(AcsMap::parse)
            .unwrap_or_default();
        Self {
            entry,
            source,
            strings,
            extended,
            features,
            acs,
        }
    }

    /// Primary terminal name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.entry.name()
    }

    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }

    /// The uncompiled description.
    #[must_use]
    pub const fn entry(&self) -> &TermEntry {
        &self.entry
    }

    #[must_use]
    pub const fn features(&self) -> FeatureFlags {
        self.features
    }

    /// Override detected flags.
    pub fn set_features(&mut self, features: FeatureFlags) {
        self.features = features;
    }

    #[must_use]
    pub const fn acs(&self) -> &AcsMap {
        &self.acs
    }

    #[must_use]
    pub fn flag(&self, cap: BooleanCap) -> bool {
        self.entry.flag(cap)
    }

    #[must_use]
    pub fn number(&self, cap: NumberCap) -> Option<i32> {
        self.entry.number(cap)
    }

    /// Decoded source text of a string capability.
    #[must_use]
    pub fn raw_string(&self, cap: StringCap) -> Option<&[u8]> {
        self.entry.string(cap)
    }

    /// Compiled template, `None` when absent.
    #[must_use]
    pub fn template(&self, cap: StringCap) -> Option<&Template> {
        self.compiled(cap).map(|c| &c.template)
    }

    /// Whether a string capability is present and produces output.
    #[must_use]
    pub fn has_string(&self, cap: StringCap) -> bool {
        self.template(cap).is_some_and(|t| !t.is_noop())
    }

    /// Resolve a capability by long name, terminfo name, termcap code or
    /// extended name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Capability<'_>> {
        match names::lookup(name) {
            Some(CapName::Boolean(cap)) => Some(Capability::Flag(self.flag(cap))),
            Some(CapName::Number(cap)) => self.number(cap).map(Capability::Number),
            Some(CapName::String(cap)) => self.template(cap).map(Capability::String),
            None => self.get_extended(name),
        }
    }

    fn get_extended(&self, name: &str) -> Option<Capability<'_>> {
        if let Some(compiled) = self.extended.get(name) {
            return Some(Capability::String(&compiled.template));
        }
        if let Some(&n) = self.entry.ext_numbers.get(name) {
            return (n >= 0).then_some(Capability::Number(n));
        }
        self.entry.ext_booleans.get(name).map(|&b| Capability::Flag(b))
    }

    /// Whether a capability is usable: a set flag, a present number or a
    /// non-empty string.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        match self.get(name) {
            Some(Capability::Flag(b)) => b,
            Some(Capability::Number(_)) => true,
            Some(Capability::String(t)) => !t.is_noop(),
            None => false,
        }
    }

    /// Padding policy for a capability affecting `lines` lines.
    #[must_use]
    pub fn pad_policy(&self, lines: u32) -> PadPolicy {
        PadPolicy {
            enabled: self.features.padding,
            xon_xoff: self.flag(BooleanCap::XonXoff),
            affected_lines: lines.max(1),
        }
    }

    /// Expand a string capability, dropping padding.
    ///
    /// An absent capability expands to nothing.
    pub fn expand(&mut self, cap: StringCap, params: &[Param]) -> Vec<u8> {
        let mut out = Vec::new();
        if let Some(compiled) = self.compiled_mut(cap) {
            compiled
                .template
                .expand_into(params, &mut compiled.statics, PadPolicy::OFF, &mut out);
        }
        out
    }

    /// Expand a string capability into `sink`, reporting padding delays.
    pub fn expand_into<S: Sink + ?Sized>(
        &mut self,
        cap: StringCap,
        params: &[Param],
        lines: u32,
        sink: &mut S,
    ) {
        let policy = self.pad_policy(lines);
        if let Some(compiled) = self.compiled_mut(cap) {
            compiled
                .template
                .expand_into(params, &mut compiled.statics, policy, sink);
        }
    }

    /// Expand a string capability named by any spelling, including
    /// extended names. Unknown or non-string names expand to nothing.
    pub fn expand_named(&mut self, name: &str, params: &[Param]) -> Vec<u8> {
        match names::lookup(name) {
            Some(CapName::String(cap)) => self.expand(cap, params),
            Some(_) => Vec::new(),
            None => {
                let mut out = Vec::new();
                if let Some(compiled) = self.extended.get_mut(name) {
                    compiled
                        .template
                        .expand_into(params, &mut compiled.statics, PadPolicy::OFF, &mut out);
                }
                out
            }
        }
    }

    /// Static registers of a string capability.
    #[must_use]
    pub fn statics(&self, cap: StringCap) -> Option<&StaticRegisters> {
        self.compiled(cap).map(|c| &c.statics)
    }

    fn compiled(&self, cap: StringCap) -> Option<&Compiled> {
        self.strings.get(cap.index()).and_then(Option::as_ref)
    }

    fn compiled_mut(&mut self, cap: StringCap) -> Option<&mut Compiled> {
        self.strings.get_mut(cap.index()).and_then(Option::as_mut)
    }
}

fn load_terminfo(term: &str, options: &LoadOptions) -> Result<(TermEntry, Source)> {
    let dirs = locate::terminfo_dirs(&options.env, options.terminfo_dir.as_deref());
    let path = locate::find_terminfo(term, &dirs).ok_or_else(|| Error::NotFound {
        term: term.to_string(),
    })?;
    let entry = binary::read_file(&path)?;
    Ok((entry, Source::Terminfo(path)))
}

fn load_termcap(term: &str, options: &LoadOptions) -> Result<(TermEntry, Source)> {
    let mut last_error = None;
    for source in locate::termcap_sources(&options.env, options.termcap.as_deref()) {
        let result = match &source {
            TermcapSource::Inline(text) => {
                termcap::find(text, term).map(|entry| (entry, Source::Termcap(None)))
            }
            TermcapSource::File(path) if path.is_file() => termcap::read_file(path, term)
                .map(|entry| (entry, Source::Termcap(Some(path.clone())))),
            TermcapSource::File(_) => continue,
        };
        match result {
            Ok(found) => return Ok(found),
            Err(Error::NotFound { .. }) => {}
            Err(err) => {
                tracing::debug!(term, ?source, error = %err, "termcap source unusable");
                last_error = Some(err);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| Error::NotFound {
        term: term.to_string(),
    }))
}
