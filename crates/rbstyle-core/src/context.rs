//! Context types for rule execution.

use std::path::{Component, Path, PathBuf};

use crate::syntax::Node;
use crate::types::Location;

/// Context provided to rules for the file being checked.
///
/// Contains metadata about the file that rules can use to make
/// context-aware decisions (e.g., relax checks in spec files).
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path as it will appear in reports.
    pub path: &'a Path,
    /// File contents.
    pub content: &'a str,
    /// Whether this file is detected as a test or spec file.
    pub is_test: bool,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str) -> Self {
        Self {
            path,
            content,
            is_test: Self::detect_test_file(path),
        }
    }

    /// Detects if a file is a test file based on Ruby path conventions.
    fn detect_test_file(path: &Path) -> bool {
        for component in path.components() {
            if let Component::Normal(s) = component {
                let s = s.to_string_lossy();
                if s == "spec" || s == "test" || s == "tests" {
                    return true;
                }
            }
        }

        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.ends_with("_spec.rb")
                || file_name.ends_with("_test.rb")
                || file_name.starts_with("test_")
            {
                return true;
            }
        }

        false
    }

    /// Location of a node in this file.
    #[must_use]
    pub fn location_of(&self, node: Node<'_>) -> Location {
        Location::from_span(self.path.to_path_buf(), node.span())
    }
}

/// Returns `path` relative to `base` when it lives under it, without a
/// leading `./`.
#[must_use]
pub fn display_path(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .or_else(|_| path.strip_prefix("."))
        .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}
