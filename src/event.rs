//! Warning event callback system.
//!
//! Degraded-but-recovered conditions (fallback terminal descriptions, bad
//! capability templates, termcap translation mismatches) are reported here in
//! addition to being logged through `tracing`.

use std::fmt;
use std::sync::{Mutex, OnceLock};

/// A non-fatal condition the engine recovered from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// The requested description could not be used; the bundled one was loaded.
    SourceFallback { term: String, reason: String },
    /// A single capability template failed to compile and became a no-op.
    Compile { cap: String, reason: String },
    /// A termcap string translated to terminfo syntax looked suspicious.
    CapToInfoMismatch {
        cap: String,
        termcap: String,
        terminfo: String,
    },
    /// A `tc=` chain referenced an entry already visited.
    TermcapCycle { term: String, parent: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceFallback { term, reason } => {
                write!(f, "using bundled description for {term:?}: {reason}")
            }
            Self::Compile { cap, reason } => write!(f, "capability {cap} disabled: {reason}"),
            Self::CapToInfoMismatch {
                cap,
                termcap,
                terminfo,
            } => write!(f, "termcap {cap}: {termcap:?} -> {terminfo:?}"),
            Self::TermcapCycle { term, parent } => {
                write!(f, "termcap entry {term:?} inherits {parent:?} twice")
            }
        }
    }
}

type WarningCallback = Box<dyn Fn(&Warning) + Send + Sync + 'static>;

fn warning_callback() -> &'static Mutex<Option<WarningCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<WarningCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global warning callback.
pub fn set_warning_callback<F>(callback: F)
where
    F: Fn(&Warning) + Send + Sync + 'static,
{
    if let Ok(mut guard) = warning_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global warning callback.
pub fn clear_warning_callback() {
    if let Ok(mut guard) = warning_callback().lock() {
        *guard = None;
    }
}

/// Log a warning and deliver it to the registered callback.
pub fn emit_warning(warning: &Warning) {
    tracing::warn!(%warning, "recovered from terminal description problem");
    if let Ok(guard) = warning_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(warning);
        }
    }
}
