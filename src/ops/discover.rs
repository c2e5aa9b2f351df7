//! Source file discovery.

use std::path::Path;

use anyhow::{bail, Context, Result};
use walkdir::{DirEntry, WalkDir};

use crate::core::SourceFile;
use crate::util::fs::relative_slash_path;

/// Options for scanning a directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverOptions {
    /// File extension to collect, without the leading dot.
    pub extension: String,

    /// Directories whose root-relative path contains this text are skipped.
    pub exclude: String,

    /// Sort the result by path instead of keeping traversal order.
    pub sort: bool,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        DiscoverOptions {
            extension: "swift".to_string(),
            exclude: ".xcodeproj".to_string(),
            sort: false,
        }
    }
}

impl DiscoverOptions {
    fn suffix(&self) -> String {
        format!(".{}", self.extension.trim_start_matches('.'))
    }

    fn is_excluded(&self, root: &Path, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() || self.exclude.is_empty() {
            return false;
        }
        relative_slash_path(root, entry.path())
            .map(|rel| rel.contains(&self.exclude))
            .unwrap_or(false)
    }
}

/// Find every file under `root` whose name ends with the configured extension.
///
/// Paths are returned relative to `root`. Unless `opts.sort` is set the order
/// is whatever the filesystem yields, which can differ between machines.
pub fn discover(root: &Path, opts: &DiscoverOptions) -> Result<Vec<SourceFile>> {
    if !root.is_dir() {
        bail!("root directory `{}` does not exist", root.display());
    }

    let suffix = opts.suffix();
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            let skip = opts.is_excluded(root, entry);
            if skip {
                tracing::debug!("skipping {}", entry.path().display());
            }
            !skip
        });

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to scan {}", root.display()))?;

        if !is_file(&entry) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(&suffix) {
            continue;
        }

        let Some(rel) = relative_slash_path(root, entry.path()) else {
            continue;
        };
        tracing::debug!("found {}", rel);
        files.push(SourceFile::new(rel));
    }

    if opts.sort {
        files.sort();
    }

    Ok(files)
}

/// Regular files, and symlinks that point at one.
fn is_file(entry: &DirEntry) -> bool {
    let ty = entry.file_type();
    ty.is_file() || (ty.is_symlink() && entry.path().is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "import SwiftUI\n").unwrap();
    }

    fn paths(files: &[SourceFile]) -> Vec<&str> {
        files.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn test_discover_skips_marker_subtree() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "A.swift");
        touch(tmp.path(), "Sub/B.swift");
        touch(tmp.path(), "Sub/.xcodeproj/Ignored.swift");

        let mut found = discover(tmp.path(), &DiscoverOptions::default()).unwrap();
        found.sort();

        assert_eq!(paths(&found), vec!["A.swift", "Sub/B.swift"]);
        assert_eq!(found[1].filename, "B.swift");
    }

    #[test]
    fn test_discover_marker_is_substring_match() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "App.xcodeproj/Generated.swift");
        touch(tmp.path(), "Lib.xcodeprojects/AlsoSkipped.swift");
        touch(tmp.path(), "Views/Main.swift");

        let found = discover(tmp.path(), &DiscoverOptions::default()).unwrap();

        assert_eq!(paths(&found), vec!["Views/Main.swift"]);
    }

    #[test]
    fn test_discover_file_name_never_excluded() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Odd.xcodeproj.swift");

        let found = discover(tmp.path(), &DiscoverOptions::default()).unwrap();

        assert_eq!(paths(&found), vec!["Odd.xcodeproj.swift"]);
    }

    #[test]
    fn test_discover_filters_extension() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "A.swift");
        touch(tmp.path(), "README.md");
        touch(tmp.path(), "B.swiftinterface");
        touch(tmp.path(), "Info.plist");

        let found = discover(tmp.path(), &DiscoverOptions::default()).unwrap();

        assert_eq!(paths(&found), vec!["A.swift"]);
    }

    #[test]
    fn test_discover_custom_extension() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "main.m");
        touch(tmp.path(), "A.swift");

        let opts = DiscoverOptions {
            extension: ".m".to_string(),
            ..DiscoverOptions::default()
        };
        let found = discover(tmp.path(), &opts).unwrap();

        assert_eq!(paths(&found), vec!["main.m"]);
    }

    #[test]
    fn test_discover_sorted() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Zeta.swift");
        touch(tmp.path(), "Alpha.swift");
        touch(tmp.path(), "Models/User.swift");

        let opts = DiscoverOptions {
            sort: true,
            ..DiscoverOptions::default()
        };
        let found = discover(tmp.path(), &opts).unwrap();

        assert_eq!(
            paths(&found),
            vec!["Alpha.swift", "Models/User.swift", "Zeta.swift"]
        );
    }

    #[test]
    fn test_discover_empty_tree() {
        let tmp = TempDir::new().unwrap();
        let found = discover(tmp.path(), &DiscoverOptions::default()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_discover_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = discover(&tmp.path().join("nope"), &DiscoverOptions::default()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_discover_root_inside_marker_is_scanned() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Demo.xcodeproj");
        touch(&root, "Inside.swift");

        let found = discover(&root, &DiscoverOptions::default()).unwrap();

        assert_eq!(paths(&found), vec!["Inside.swift"]);
    }
}
