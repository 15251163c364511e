//! `cellterm` - terminal capability compiler and cell renderer
//!
//! Reads terminal descriptions from compiled terminfo files or termcap
//! entries, compiles every string capability into bytecode once, and drives a
//! double-buffered cell grid that emits only what changed since the last
//! frame, using the capabilities the terminal actually has.

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (ioctl/isatty FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_possible_wrap)] // Template integers wrap like C ints
#![allow(clippy::module_name_repetitions)] // Allow terminfo::TermEntry etc
#![allow(clippy::struct_excessive_bools)] // Feature flags are plain bools
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow capability names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod acs;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod renderer;
pub mod terminal;
pub mod terminfo;

// Re-export core types at crate root
pub use cell::{Attr, AttrFlags, Cell, Glyph};
pub use config::{Environment, LoadOptions, RendererOptions};
pub use error::{Error, Result};
pub use event::{Warning, clear_warning_callback, set_warning_callback};

// Re-export capability types
pub use terminfo::{
    BooleanCap, CapName, Capability, CapabilitySet, FeatureFlags, NumberCap, Param, Source,
    StringCap, TermEntry,
};

// Re-export rendering types
pub use buffer::{BoxStyle, CellBuffer, Rect};
pub use renderer::{RenderState, RenderStats, Renderer};
pub use terminal::{is_tty, terminal_size};
