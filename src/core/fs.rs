//! File system access for builders
//!
//! Builders never touch `std::fs` directly; they go through [`FileSystem`]
//! so scans, manifest reads and forced cleans can run against an in-memory
//! tree in tests.

use glob::{MatchOptions, Pattern};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::events::EventLog;
use crate::error::{BuildError, Result};

/// Glob options shared by every implementation: `*` never crosses a path
/// separator, `**` does.
pub fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Recursively remove a directory and everything below it
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Expand a glob pattern into the matching file paths, in sorted order
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

/// [`FileSystem`] backed by the real disk
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in glob::glob_with(pattern, match_options())? {
            paths.push(entry?);
        }
        Ok(paths)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
    fail_removal: bool,
    fail_glob: bool,
}

impl MemoryState {
    fn has_entries_under(&self, path: &Path) -> bool {
        self.files.keys().any(|file| file != path && file.starts_with(path))
            || self.dirs.iter().any(|dir| dir.starts_with(path))
    }
}

/// In-memory [`FileSystem`] for tests
///
/// Directories are implied by the files added beneath them; empty
/// directories can be added explicitly.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<MemoryState>,
    events: Option<EventLog>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record globs, reads and removals into `events`
    pub fn with_events(mut self, events: EventLog) -> Self {
        self.events = Some(events);
        self
    }

    /// Make every `remove_dir_all` call fail with `PermissionDenied`
    pub fn failing_removal(self) -> Self {
        self.state().fail_removal = true;
        self
    }

    /// Make every `glob` call fail the way an unlistable directory does
    pub fn failing_glob(self) -> Self {
        self.state().fail_glob = true;
        self
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.state().files.insert(path.into(), content.into());
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.state().dirs.insert(path.into());
    }

    /// Add a file that is listed by globs but fails to read
    pub fn add_unreadable_file(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut state = self.state();
        state.files.insert(path.clone(), String::new());
        state.unreadable.insert(path);
    }

    fn record(&self, event: String) {
        if let Some(events) = &self.events {
            events.record(event);
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let state = self.state();
        state.files.contains_key(path) || state.has_entries_under(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let state = self.state();
        !state.files.contains_key(path) && state.has_entries_under(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.record(format!("read {}", path.display()));
        let state = self.state();
        if state.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is not readable", path.display()),
            ));
        }
        state.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        self.record(format!("remove {}", path.display()));

        let mut state = self.state();
        if state.fail_removal {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot remove {}", path.display()),
            ));
        }
        if !state.has_entries_under(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ));
        }

        state.files.retain(|file, _| !file.starts_with(path));
        state.dirs.retain(|dir| !dir.starts_with(path));
        state.unreadable.retain(|file| !file.starts_with(path));
        Ok(())
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        self.record(format!("glob {}", pattern));
        let pattern = Pattern::new(pattern)?;
        let state = self.state();
        if state.fail_glob {
            return Err(BuildError::io_error(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot list entries matching {}", pattern),
            )));
        }
        let options = match_options();
        Ok(state
            .files
            .keys()
            .filter(|path| pattern.matches_path_with(path, options))
            .cloned()
            .collect())
    }
}
