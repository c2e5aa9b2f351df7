//! Command implementations

pub mod completions;
pub mod generate;
pub mod list;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use pbxgen::util::config::{self, global_config_path, project_config_path, Config};

/// The scan root: `--root` if given, otherwise the current directory.
pub fn resolve_root(root: Option<&PathBuf>) -> Result<PathBuf> {
    match root {
        Some(path) => Ok(path.clone()),
        None => std::env::current_dir().context("failed to determine current directory"),
    }
}

/// Load global and project config for `root`, then apply `overrides` on top.
pub fn load_config(root: &Path, overrides: Config) -> Result<Config> {
    let global = global_config_path();
    let mut config = config::load_config(global.as_deref(), &project_config_path(root))?;
    config.merge(overrides);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_root_explicit() {
        let path = PathBuf::from("some/app");
        assert_eq!(resolve_root(Some(&path)).unwrap(), path);
    }

    #[test]
    fn test_resolve_root_defaults_to_cwd() {
        assert_eq!(resolve_root(None).unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_overrides_beat_project_config() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("pbxgen.toml"),
            "[project]\nname = \"FromFile\"\nbundle-identifier = \"org.example.file\"\n",
        )
        .unwrap();

        let mut overrides = Config::default();
        overrides.project.name = Some("FromFlag".to_string());

        let config = load_config(tmp.path(), overrides).unwrap();
        let spec = config.project_spec();

        assert_eq!(spec.name, "FromFlag");
        assert_eq!(spec.bundle_identifier, "org.example.file");
    }
}
