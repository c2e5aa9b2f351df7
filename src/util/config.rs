//! Configuration file support for pbxgen.
//!
//! Two optional configuration files are read:
//! - Global: `~/.pbxgen/config.toml` - User-wide defaults
//! - Project: `<root>/pbxgen.toml` - Project-specific overrides
//!
//! Command-line flags override both. Anything left unset falls back to the
//! built-in defaults of [`ProjectSpec`] and [`DiscoverOptions`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{IdScheme, ProjectSpec};
use crate::ops::discover::DiscoverOptions;

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "pbxgen.toml";

/// Default `xcodebuild -destination` shown after generation.
pub const DEFAULT_DESTINATION: &str = "platform=iOS,name=WiPhone";

/// pbxgen configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Project description
    pub project: ProjectConfig,

    /// Source discovery settings
    pub scan: ScanConfig,

    /// Settings for the suggested build command
    pub build: BuildConfig,
}

/// The `[project]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProjectConfig {
    pub name: Option<String>,
    pub bundle_identifier: Option<String>,
    pub development_team: Option<String>,
    pub development_region: Option<String>,
    pub deployment_target: Option<String>,
    pub marketing_version: Option<String>,
    pub build_number: Option<String>,
    pub swift_version: Option<String>,
    pub device_family: Option<String>,
}

/// The `[scan]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScanConfig {
    /// Source file extension (e.g., "swift")
    pub extension: Option<String>,

    /// Directory marker to skip (e.g., ".xcodeproj")
    pub exclude: Option<String>,

    /// Sort discovered files by path
    pub sort: Option<bool>,

    /// Identifier scheme
    pub ids: Option<IdScheme>,
}

/// The `[build]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    /// `xcodebuild -destination` value
    pub destination: Option<String>,
}

fn merge_opt<T>(dst: &mut Option<T>, src: Option<T>) {
    if src.is_some() {
        *dst = src;
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let p = other.project;
        merge_opt(&mut self.project.name, p.name);
        merge_opt(&mut self.project.bundle_identifier, p.bundle_identifier);
        merge_opt(&mut self.project.development_team, p.development_team);
        merge_opt(&mut self.project.development_region, p.development_region);
        merge_opt(&mut self.project.deployment_target, p.deployment_target);
        merge_opt(&mut self.project.marketing_version, p.marketing_version);
        merge_opt(&mut self.project.build_number, p.build_number);
        merge_opt(&mut self.project.swift_version, p.swift_version);
        merge_opt(&mut self.project.device_family, p.device_family);

        let s = other.scan;
        merge_opt(&mut self.scan.extension, s.extension);
        merge_opt(&mut self.scan.exclude, s.exclude);
        merge_opt(&mut self.scan.sort, s.sort);
        merge_opt(&mut self.scan.ids, s.ids);

        merge_opt(&mut self.build.destination, other.build.destination);
    }

    /// The project description with defaults filled in.
    pub fn project_spec(&self) -> ProjectSpec {
        let defaults = ProjectSpec::default();
        let p = &self.project;
        let pick = |value: &Option<String>, default: String| value.clone().unwrap_or(default);

        ProjectSpec {
            name: pick(&p.name, defaults.name),
            bundle_identifier: pick(&p.bundle_identifier, defaults.bundle_identifier),
            development_team: pick(&p.development_team, defaults.development_team),
            development_region: pick(&p.development_region, defaults.development_region),
            deployment_target: pick(&p.deployment_target, defaults.deployment_target),
            marketing_version: pick(&p.marketing_version, defaults.marketing_version),
            build_number: pick(&p.build_number, defaults.build_number),
            swift_version: pick(&p.swift_version, defaults.swift_version),
            device_family: pick(&p.device_family, defaults.device_family),
            ids: defaults.ids,
        }
    }

    /// Discovery options with defaults filled in.
    pub fn discover_options(&self) -> DiscoverOptions {
        let defaults = DiscoverOptions::default();
        DiscoverOptions {
            extension: self.scan.extension.clone().unwrap_or(defaults.extension),
            exclude: self.scan.exclude.clone().unwrap_or(defaults.exclude),
            sort: self.scan.sort.unwrap_or(defaults.sort),
        }
    }

    pub fn id_scheme(&self) -> IdScheme {
        self.scan.ids.unwrap_or_default()
    }

    pub fn destination(&self) -> String {
        self.build
            .destination
            .clone()
            .unwrap_or_else(|| DEFAULT_DESTINATION.to_string())
    }
}

/// Get the global pbxgen config directory (~/.pbxgen).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".pbxgen"))
}

/// Get the global config path (~/.pbxgen/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (<root>/pbxgen.toml).
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(PROJECT_CONFIG_FILE)
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (<root>/pbxgen.toml)
/// 2. Global config (~/.pbxgen/config.toml)
/// 3. Defaults
///
/// A broken global config is logged and ignored; a broken project config is
/// an error, since it describes the project being generated.
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load(project_path)?);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.project_spec(), ProjectSpec::default());
        assert_eq!(config.discover_options(), DiscoverOptions::default());
        assert_eq!(config.id_scheme(), IdScheme::Random);
        assert_eq!(config.destination(), DEFAULT_DESTINATION);
        assert_eq!(
            config.project_spec().build_command(&config.destination()),
            "xcodebuild -project MemoryGym.xcodeproj -scheme MemoryGym -destination 'platform=iOS,name=WiPhone' build"
        );
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("pbxgen.toml");

        std::fs::write(
            &config_path,
            r#"
[project]
name = "Demo"
bundle-identifier = "org.example.demo"
deployment-target = "17.0"

[scan]
extension = "m"
sort = true
ids = "stable"

[build]
destination = "platform=iOS Simulator,name=iPhone 15"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        let spec = config.project_spec();
        assert_eq!(spec.name, "Demo");
        assert_eq!(spec.bundle_identifier, "org.example.demo");
        assert_eq!(spec.deployment_target, "17.0");
        assert_eq!(spec.development_region, "ko");

        let scan = config.discover_options();
        assert_eq!(scan.extension, "m");
        assert_eq!(scan.exclude, ".xcodeproj");
        assert!(scan.sort);
        assert_eq!(config.id_scheme(), IdScheme::Stable);
        assert_eq!(config.destination(), "platform=iOS Simulator,name=iPhone 15");
    }

    #[test]
    fn test_config_rejects_bad_scheme() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("pbxgen.toml");
        std::fs::write(&config_path, "[scan]\nids = \"sequential\"\n").unwrap();

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.project.name = Some("Base".to_string());
        base.project.development_team = Some("TEAM000001".to_string());

        let mut override_cfg = Config::default();
        override_cfg.project.name = Some("Override".to_string());

        base.merge(override_cfg);

        assert_eq!(base.project.name.as_deref(), Some("Override"));
        assert_eq!(base.project.development_team.as_deref(), Some("TEAM000001")); // Not overridden
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = tmp.path().join("pbxgen.toml");

        std::fs::write(&global, "[project]\nname = \"Global\"\nswift-version = \"6.0\"\n").unwrap();
        std::fs::write(&project, "[project]\nname = \"Local\"\n").unwrap();

        let config = load_config(Some(&global), &project).unwrap();
        let spec = config.project_spec();

        assert_eq!(spec.name, "Local");
        assert_eq!(spec.swift_version, "6.0");
    }

    #[test]
    fn test_load_config_broken_global_is_ignored() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        std::fs::write(&global, "this is not toml [").unwrap();

        let config = load_config(Some(&global), &tmp.path().join("pbxgen.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_broken_project_is_error() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("pbxgen.toml");
        std::fs::write(&project, "[project\nname = ").unwrap();

        let err = load_config(None, &project).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }
}
