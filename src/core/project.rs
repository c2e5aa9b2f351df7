//! The immutable description of the project being generated.

use std::path::{Path, PathBuf};

use crate::core::object_id::ObjectId;

/// Extension of the project bundle directory.
pub const BUNDLE_EXTENSION: &str = "xcodeproj";

/// File name of the manifest inside the project bundle.
pub const MANIFEST_FILE_NAME: &str = "project.pbxproj";

/// Asset catalog bundled with the app.
pub const ASSET_CATALOG: &str = "Assets.xcassets";

/// Asset catalog used only by previews.
pub const PREVIEW_ASSET_CATALOG: &str = "Preview Assets.xcassets";

/// Group (and directory) holding preview-only content.
pub const PREVIEW_CONTENT: &str = "Preview Content";

/// Info manifest of the application target.
pub const INFO_PLIST: &str = "Info.plist";

/// Identifiers of the objects every generated project contains.
///
/// These never change between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedIds {
    pub main_group: ObjectId,
    pub project: ObjectId,
    pub project_config_list: ObjectId,
    pub sources_phase: ObjectId,
    pub frameworks_phase: ObjectId,
    pub resources_phase: ObjectId,
    pub target: ObjectId,
    pub app_product: ObjectId,
    pub products_group: ObjectId,
    pub source_group: ObjectId,
    pub assets: ObjectId,
    pub assets_build: ObjectId,
    pub preview_group: ObjectId,
    pub preview_assets: ObjectId,
    pub preview_assets_build: ObjectId,
    pub info_plist: ObjectId,
    pub project_debug: ObjectId,
    pub project_release: ObjectId,
    pub target_config_list: ObjectId,
    pub target_debug: ObjectId,
    pub target_release: ObjectId,
}

impl Default for FixedIds {
    fn default() -> Self {
        FixedIds {
            main_group: "A0FFFFF6".into(),
            project: "A0FFFFF7".into(),
            project_config_list: "A0FFFFFA".into(),
            sources_phase: "A0FFFFFB".into(),
            frameworks_phase: "A0FFFFFC".into(),
            resources_phase: "A0FFFFFD".into(),
            target: "A0FFFFFE".into(),
            app_product: "A0FFFFFF".into(),
            products_group: "A1000000".into(),
            source_group: "A1000001".into(),
            assets: "A1000004".into(),
            assets_build: "A1000005".into(),
            preview_group: "A1000006".into(),
            preview_assets: "A1000007".into(),
            preview_assets_build: "A1000008".into(),
            info_plist: "A1000009".into(),
            project_debug: "A100000B".into(),
            project_release: "A100000C".into(),
            target_config_list: "A100000D".into(),
            target_debug: "A100000E".into(),
            target_release: "A100000F".into(),
        }
    }
}

/// Everything the generator needs to know besides the discovered files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    /// Project, target, scheme and source group name.
    pub name: String,
    pub bundle_identifier: String,
    pub development_team: String,
    pub development_region: String,
    /// `IPHONEOS_DEPLOYMENT_TARGET`
    pub deployment_target: String,
    pub marketing_version: String,
    /// `CURRENT_PROJECT_VERSION`
    pub build_number: String,
    pub swift_version: String,
    /// `TARGETED_DEVICE_FAMILY`, e.g. `1,2` for iPhone and iPad.
    pub device_family: String,
    pub ids: FixedIds,
}

impl Default for ProjectSpec {
    fn default() -> Self {
        ProjectSpec {
            name: "MemoryGym".to_string(),
            bundle_identifier: "com.memorygym.app".to_string(),
            development_team: "9Q26686S8R".to_string(),
            development_region: "ko".to_string(),
            deployment_target: "15.0".to_string(),
            marketing_version: "1.0".to_string(),
            build_number: "1".to_string(),
            swift_version: "5.0".to_string(),
            device_family: "1,2".to_string(),
            ids: FixedIds::default(),
        }
    }
}

impl ProjectSpec {
    /// `<Name>.xcodeproj`
    pub fn bundle_dir_name(&self) -> String {
        format!("{}.{}", self.name, BUNDLE_EXTENSION)
    }

    /// `<Name>.app`
    pub fn product_name(&self) -> String {
        format!("{}.app", self.name)
    }

    /// Location of the manifest for a project rooted at `root`.
    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(self.bundle_dir_name()).join(MANIFEST_FILE_NAME)
    }

    /// The `xcodebuild` invocation that builds the generated project.
    pub fn build_command(&self, destination: &str) -> String {
        format!(
            "xcodebuild -project {} -scheme {} -destination '{}' build",
            self.bundle_dir_name(),
            self.name,
            destination
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let spec = ProjectSpec::default();
        assert_eq!(spec.bundle_dir_name(), "MemoryGym.xcodeproj");
        assert_eq!(spec.product_name(), "MemoryGym.app");
        assert_eq!(
            spec.manifest_path(Path::new("/work")),
            PathBuf::from("/work/MemoryGym.xcodeproj/project.pbxproj")
        );
    }

    #[test]
    fn test_build_command() {
        let spec = ProjectSpec {
            name: "Demo".to_string(),
            ..ProjectSpec::default()
        };
        assert_eq!(
            spec.build_command("generic/platform=iOS"),
            "xcodebuild -project Demo.xcodeproj -scheme Demo -destination 'generic/platform=iOS' build"
        );
    }
}
