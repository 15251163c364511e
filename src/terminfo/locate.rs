//! Search-path resolution for terminfo directories and termcap sources.

use std::path::{Path, PathBuf};

use crate::config::Environment;

/// System terminfo directories, searched after the environment-provided ones.
pub const SYSTEM_TERMINFO_DIRS: &[&str] = &[
    "/usr/share/terminfo",
    "/usr/share/lib/terminfo",
    "/usr/lib/terminfo",
    "/usr/local/share/terminfo",
    "/usr/local/share/lib/terminfo",
    "/usr/local/lib/terminfo",
    "/usr/local/ncurses/lib/terminfo",
    "/lib/terminfo",
    "/etc/terminfo",
];

/// System termcap files, searched after the environment-provided ones.
pub const SYSTEM_TERMCAP_FILES: &[&str] = &["/usr/share/misc/termcap", "/etc/termcap"];

/// Where termcap text comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermcapSource {
    /// The text of an entry, e.g. from `$TERMCAP`.
    Inline(String),
    File(PathBuf),
}

impl TermcapSource {
    /// Classify a `$TERMCAP`-style value: absolute paths are files.
    #[must_use]
    pub fn classify(value: &str) -> Self {
        if value.starts_with('/') {
            Self::File(PathBuf::from(value))
        } else {
            Self::Inline(value.to_string())
        }
    }
}

/// Terminfo directories in search order.
///
/// `explicit` (from [`LoadOptions`](crate::LoadOptions)) comes first, then
/// `$TERMINFO`, each element of `$TERMINFO_DIRS`, `~/.terminfo` and the
/// system directories.
#[must_use]
pub fn terminfo_dirs(env: &Environment, explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    let mut add = |dir: PathBuf| {
        if !dir.as_os_str().is_empty() && !dirs.contains(&dir) {
            dirs.push(dir);
        }
    };
    if let Some(dir) = explicit {
        add(dir.to_path_buf());
    }
    if let Some(dir) = &env.terminfo {
        add(PathBuf::from(dir));
    }
    if let Some(list) = &env.terminfo_dirs {
        for dir in list.split(':') {
            add(PathBuf::from(dir));
        }
    }
    if let Some(home) = &env.home {
        add(Path::new(home).join(".terminfo"));
    }
    for dir in SYSTEM_TERMINFO_DIRS {
        add(PathBuf::from(dir));
    }
    dirs
}

/// Candidate file paths for `name` inside one terminfo directory.
///
/// Both the letter layout (`x/xterm`) and the hashed layout (`78/xterm`)
/// are tried.
#[must_use]
pub fn entry_paths(dir: &Path, name: &str) -> Vec<PathBuf> {
    let Some(first) = name.bytes().next() else {
        return Vec::new();
    };
    vec![
        dir.join(char::from(first).to_string()).join(name),
        dir.join(format!("{first:02x}")).join(name),
    ]
}

/// First existing terminfo file for `name`.
///
/// A name containing `/` is treated as a path to the file itself.
#[must_use]
pub fn find_terminfo(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    if name.contains('/') {
        let path = PathBuf::from(name);
        return path.is_file().then_some(path);
    }
    dirs.iter()
        .flat_map(|dir| entry_paths(dir, name))
        .find(|path| {
            let found = path.is_file();
            tracing::trace!(path = %path.display(), found, "terminfo candidate");
            found
        })
}

/// Termcap sources in search order.
///
/// `explicit` comes first, then `$TERMCAP`, each element of `$TERMPATH`
/// (colon or space separated), `~/.termcap` and the system files.
#[must_use]
pub fn termcap_sources(env: &Environment, explicit: Option<&str>) -> Vec<TermcapSource> {
    let mut sources = Vec::new();
    if let Some(value) = explicit.filter(|v| !v.is_empty()) {
        sources.push(TermcapSource::classify(value));
    }
    if let Some(value) = env.termcap.as_deref().filter(|v| !v.is_empty()) {
        sources.push(TermcapSource::classify(value));
    }
    if let Some(list) = &env.termpath {
        sources.extend(
            list.split([':', ' '])
                .filter(|p| !p.is_empty())
                .map(|p| TermcapSource::File(PathBuf::from(p))),
        );
    }
    if let Some(home) = &env.home {
        sources.push(TermcapSource::File(Path::new(home).join(".termcap")));
    }
    sources.extend(
        SYSTEM_TERMCAP_FILES
            .iter()
            .map(|p| TermcapSource::File(PathBuf::from(p))),
    );
    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminfo_dir_order() {
        let env = Environment {
            terminfo: Some("/opt/ti".to_string()),
            terminfo_dirs: Some("/a::/b".to_string()),
            home: Some("/home/u".to_string()),
            ..Environment::default()
        };
        let dirs = terminfo_dirs(&env, Some(Path::new("/explicit")));
        assert_eq!(dirs[0], PathBuf::from("/explicit"));
        assert_eq!(dirs[1], PathBuf::from("/opt/ti"));
        assert_eq!(dirs[2], PathBuf::from("/a"));
        assert_eq!(dirs[3], PathBuf::from("/b"));
        assert_eq!(dirs[4], PathBuf::from("/home/u/.terminfo"));
        assert_eq!(dirs[5], PathBuf::from("/usr/share/terminfo"));
        assert_eq!(dirs.len(), 5 + SYSTEM_TERMINFO_DIRS.len());
    }

    #[test]
    fn test_duplicate_dirs_collapsed() {
        let env = Environment {
            terminfo: Some("/usr/share/terminfo".to_string()),
            ..Environment::default()
        };
        assert_eq!(terminfo_dirs(&env, None).len(), SYSTEM_TERMINFO_DIRS.len());
    }

    #[test]
    fn test_entry_paths_layouts() {
        let paths = entry_paths(Path::new("/ti"), "xterm");
        assert_eq!(paths[0], PathBuf::from("/ti/x/xterm"));
        assert_eq!(paths[1], PathBuf::from("/ti/78/xterm"));
        assert!(entry_paths(Path::new("/ti"), "").is_empty());
    }

    #[test]
    fn test_find_terminfo_in_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let hashed = tmp.path().join("76");
        std::fs::create_dir_all(&hashed).unwrap();
        std::fs::write(hashed.join("vt100"), b"x").unwrap();

        let dirs = vec![tmp.path().join("missing"), tmp.path().to_path_buf()];
        assert_eq!(find_terminfo("vt100", &dirs), Some(hashed.join("vt100")));
        assert_eq!(find_terminfo("vt220", &dirs), None);

        let direct = hashed.join("vt100");
        let direct = direct.to_str().unwrap();
        assert_eq!(find_terminfo(direct, &[]), Some(PathBuf::from(direct)));
    }

    #[test]
    fn test_termcap_source_order() {
        let env = Environment {
            termcap: Some("xx|inline:co#80:".to_string()),
            termpath: Some("/one:/two /three".to_string()),
            home: Some("/h".to_string()),
            ..Environment::default()
        };
        let sources = termcap_sources(&env, Some("/explicit/termcap"));
        assert_eq!(sources[0], TermcapSource::File(PathBuf::from("/explicit/termcap")));
        assert_eq!(sources[1], TermcapSource::Inline("xx|inline:co#80:".to_string()));
        assert_eq!(sources[2], TermcapSource::File(PathBuf::from("/one")));
        assert_eq!(sources[4], TermcapSource::File(PathBuf::from("/three")));
        assert_eq!(sources[5], TermcapSource::File(PathBuf::from("/h/.termcap")));
        assert_eq!(sources.len(), 6 + SYSTEM_TERMCAP_FILES.len());
    }
}
