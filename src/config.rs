//! Configuration: environment snapshot, loader options and renderer options.
//!
//! Nothing in the engine reads process variables directly. Callers capture an
//! [`Environment`] once (or build one by hand in tests) and pass it along with
//! the options below, so detection is deterministic.

use std::env;
use std::path::PathBuf;

/// The process variables the engine consumes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    pub term: Option<String>,
    pub terminfo: Option<String>,
    pub terminfo_dirs: Option<String>,
    pub home: Option<String>,
    pub termcap: Option<String>,
    pub termpath: Option<String>,
    pub lang: Option<String>,
    pub language: Option<String>,
    pub lc_all: Option<String>,
    pub lc_ctype: Option<String>,
    pub ncurses_no_utf8_acs: Option<String>,
    pub ncurses_no_magic_cookie: Option<String>,
    pub ncurses_no_padding: Option<String>,
    pub ncurses_no_setbuf: Option<String>,
}

impl Environment {
    /// Read the current process environment.
    #[must_use]
    pub fn capture() -> Self {
        let var = |name: &str| env::var(name).ok();
        Self {
            term: var("TERM"),
            terminfo: var("TERMINFO"),
            terminfo_dirs: var("TERMINFO_DIRS"),
            home: var("HOME"),
            termcap: var("TERMCAP"),
            termpath: var("TERMPATH"),
            lang: var("LANG"),
            language: var("LANGUAGE"),
            lc_all: var("LC_ALL"),
            lc_ctype: var("LC_CTYPE"),
            ncurses_no_utf8_acs: var("NCURSES_NO_UTF8_ACS"),
            ncurses_no_magic_cookie: var("NCURSES_NO_MAGIC_COOKIE"),
            ncurses_no_padding: var("NCURSES_NO_PADDING"),
            ncurses_no_setbuf: var("NCURSES_NO_SETBUF"),
        }
    }

    /// Locale variables in the order they are consulted.
    pub(crate) fn locale_vars(&self) -> impl Iterator<Item = &str> {
        [&self.lang, &self.language, &self.lc_all, &self.lc_ctype]
            .into_iter()
            .filter_map(|v| v.as_deref())
    }
}

/// How [`CapabilitySet::load`](crate::CapabilitySet::load) finds a description.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Terminal name. Falls back to `$TERM`, then `xterm`.
    pub terminal: Option<String>,
    /// Directory searched before every other terminfo location.
    pub terminfo_dir: Option<PathBuf>,
    /// Termcap source: a file path or an inline entry.
    pub termcap: Option<String>,
    /// Try termcap before terminfo.
    pub prefer_termcap: bool,
    /// Override locale-based Unicode detection.
    pub force_unicode: Option<bool>,
    /// Use the bundled entry when no source is usable.
    pub allow_fallback: bool,
    pub env: Environment,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            terminal: None,
            terminfo_dir: None,
            termcap: None,
            prefer_termcap: false,
            force_unicode: None,
            allow_fallback: true,
            env: Environment::default(),
        }
    }
}

impl LoadOptions {
    /// Options reading the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            env: Environment::capture(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_terminal(mut self, name: impl Into<String>) -> Self {
        self.terminal = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_terminfo_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.terminfo_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_termcap(mut self, source: impl Into<String>) -> Self {
        self.termcap = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_prefer_termcap(mut self, prefer: bool) -> Self {
        self.prefer_termcap = prefer;
        self
    }

    #[must_use]
    pub fn with_force_unicode(mut self, unicode: bool) -> Self {
        self.force_unicode = Some(unicode);
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, allow: bool) -> Self {
        self.allow_fallback = allow;
        self
    }

    #[must_use]
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Resolved terminal name, lower-cased.
    #[must_use]
    pub fn terminal_name(&self) -> String {
        self.terminal
            .as_deref()
            .or(self.env.term.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or("xterm")
            .to_ascii_lowercase()
    }
}

/// Renderer configuration.
#[derive(Clone, Debug)]
pub struct RendererOptions {
    /// Collapse trailing blank runs into `clr_eol` where it is safe.
    pub use_bce: bool,
    /// Bracket each batch with `cursor_invisible` / `cursor_normal`.
    pub hide_cursor_during_render: bool,
    /// Bracket each batch with `save_cursor` / `restore_cursor`.
    pub save_cursor: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            use_bce: false,
            hide_cursor_during_render: true,
            save_cursor: true,
        }
    }
}
