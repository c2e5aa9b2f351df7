//! A source file discovered under the scan root.

use serde::Serialize;

/// A discovered source file.
///
/// `path` is relative to the scan root, `/`-separated, with no leading `./`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourceFile {
    pub path: String,
    pub filename: String,
}

impl SourceFile {
    /// Build from a root-relative path, stripping any leading `./`.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let path = path.trim_start_matches("./").to_string();
        let filename = path.rsplit('/').next().unwrap_or(&path).to_string();
        SourceFile { path, filename }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_path() {
        let file = SourceFile::new("Views/Auth/LoginView.swift");
        assert_eq!(file.path, "Views/Auth/LoginView.swift");
        assert_eq!(file.filename, "LoginView.swift");
    }

    #[test]
    fn test_top_level_path() {
        let file = SourceFile::new("ContentView.swift");
        assert_eq!(file.filename, "ContentView.swift");
    }

    #[test]
    fn test_strips_leading_dot_slash() {
        let file = SourceFile::new("./Sub/B.swift");
        assert_eq!(file.path, "Sub/B.swift");
        assert_eq!(file.filename, "B.swift");
    }
}
