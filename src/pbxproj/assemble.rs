//! Builds the project document for a set of discovered source files.

use crate::core::project::{ASSET_CATALOG, INFO_PLIST, PREVIEW_ASSET_CATALOG, PREVIEW_CONTENT};
use crate::core::{IdAllocator, IdNamespace, ObjectId, ProjectSpec, SourceFile};
use crate::pbxproj::document::{Document, Isa, Object, Value};
use crate::pbxproj::settings::{project_settings, target_settings, Configuration};

const GROUP_TREE: &str = "<group>";
const ALL_ACTIONS: &str = "2147483647";

/// A source file together with the identifiers assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub file: SourceFile,
    /// Id of the file's `PBXFileReference`.
    pub reference: ObjectId,
    /// Id of the file's `PBXBuildFile` in the sources phase.
    pub build: ObjectId,
}

/// Assign a reference and a build-membership identifier to every file.
pub fn assign_ids(files: &[SourceFile], alloc: &mut IdAllocator) -> Vec<SourceEntry> {
    files
        .iter()
        .map(|file| SourceEntry {
            reference: alloc.allocate(IdNamespace::Reference, &file.path),
            build: alloc.allocate(IdNamespace::BuildFile, &file.path),
            file: file.clone(),
        })
        .collect()
}

/// Build the complete document for `spec` and `entries`.
pub fn build_document(spec: &ProjectSpec, entries: &[SourceEntry]) -> Document {
    let ids = &spec.ids;
    let mut doc = Document::new(ids.project.clone());

    // Build files
    for entry in entries {
        doc.push(
            Object::new(entry.build.clone(), Isa::BuildFile)
                .comment(format!("{} in Sources", entry.file.filename))
                .field("fileRef", &entry.reference),
        );
    }
    doc.push(
        Object::new(ids.assets_build.clone(), Isa::BuildFile)
            .comment(format!("{} in Resources", ASSET_CATALOG))
            .field("fileRef", &ids.assets),
    );
    doc.push(
        Object::new(ids.preview_assets_build.clone(), Isa::BuildFile)
            .comment(format!("{} in Resources", PREVIEW_ASSET_CATALOG))
            .field("fileRef", &ids.preview_assets),
    );

    // File references
    let product = spec.product_name();
    doc.push(
        Object::new(ids.app_product.clone(), Isa::FileReference)
            .comment(product.clone())
            .field("explicitFileType", "wrapper.application")
            .field("includeInIndex", "0")
            .field("path", product.clone())
            .field("sourceTree", "BUILT_PRODUCTS_DIR"),
    );
    for entry in entries {
        doc.push(
            Object::new(entry.reference.clone(), Isa::FileReference)
                .comment(entry.file.filename.clone())
                .field("lastKnownFileType", "sourcecode.swift")
                .field("path", &entry.file.path)
                .field("sourceTree", GROUP_TREE),
        );
    }
    doc.push(file_reference(&ids.assets, ASSET_CATALOG, "folder.assetcatalog"));
    doc.push(file_reference(
        &ids.preview_assets,
        PREVIEW_ASSET_CATALOG,
        "folder.assetcatalog",
    ));
    doc.push(file_reference(&ids.info_plist, INFO_PLIST, "text.plist.xml"));

    doc.push(build_phase(
        &ids.frameworks_phase,
        Isa::FrameworksBuildPhase,
        "Frameworks",
        Vec::new(),
    ));

    // Groups
    doc.push(
        Object::new(ids.main_group.clone(), Isa::Group)
            .field("children", Value::refs([&ids.source_group, &ids.products_group]))
            .field("sourceTree", GROUP_TREE),
    );
    doc.push(
        Object::new(ids.products_group.clone(), Isa::Group)
            .comment("Products")
            .field("children", Value::refs([&ids.app_product]))
            .field("name", "Products")
            .field("sourceTree", GROUP_TREE),
    );
    let mut children: Vec<&ObjectId> = entries.iter().map(|e| &e.reference).collect();
    children.extend([&ids.assets, &ids.info_plist, &ids.preview_group]);
    doc.push(
        Object::new(ids.source_group.clone(), Isa::Group)
            .comment(spec.name.clone())
            .field("children", Value::refs(children))
            .field("path", &spec.name)
            .field("sourceTree", GROUP_TREE),
    );
    doc.push(
        Object::new(ids.preview_group.clone(), Isa::Group)
            .comment(PREVIEW_CONTENT)
            .field("children", Value::refs([&ids.preview_assets]))
            .field("path", PREVIEW_CONTENT)
            .field("sourceTree", GROUP_TREE),
    );

    // Target
    doc.push(
        Object::new(ids.target.clone(), Isa::NativeTarget)
            .comment(spec.name.clone())
            .field("buildConfigurationList", &ids.target_config_list)
            .field(
                "buildPhases",
                Value::refs([
                    &ids.sources_phase,
                    &ids.frameworks_phase,
                    &ids.resources_phase,
                ]),
            )
            .field("buildRules", Value::empty_array())
            .field("dependencies", Value::empty_array())
            .field("name", &spec.name)
            .field("productName", &spec.name)
            .field("productReference", &ids.app_product)
            .field("productType", "com.apple.product-type.application"),
    );

    // Project
    let target_attributes = Value::dict([(
        ids.target.to_string(),
        Value::dict([("CreatedOnToolsVersion", Value::from("15.0"))]),
    )]);
    doc.push(
        Object::new(ids.project.clone(), Isa::Project)
            .comment("Project object")
            .field(
                "attributes",
                Value::dict([
                    ("BuildIndependentTargetsInParallel", Value::from("1")),
                    ("LastSwiftUpdateCheck", Value::from("1500")),
                    ("LastUpgradeCheck", Value::from("1500")),
                    ("TargetAttributes", target_attributes),
                ]),
            )
            .field("buildConfigurationList", &ids.project_config_list)
            .field("compatibilityVersion", "Xcode 14.0")
            .field("developmentRegion", &spec.development_region)
            .field("hasScannedForEncodings", "0")
            .field(
                "knownRegions",
                Value::array([
                    Value::from(&spec.development_region),
                    Value::from("Base"),
                ]),
            )
            .field("mainGroup", &ids.main_group)
            .field("productRefGroup", &ids.products_group)
            .field("projectDirPath", "")
            .field("projectRoot", "")
            .field("targets", Value::refs([&ids.target])),
    );

    doc.push(build_phase(
        &ids.resources_phase,
        Isa::ResourcesBuildPhase,
        "Resources",
        vec![&ids.preview_assets_build, &ids.assets_build],
    ));
    doc.push(build_phase(
        &ids.sources_phase,
        Isa::SourcesBuildPhase,
        "Sources",
        entries.iter().map(|e| &e.build).collect(),
    ));

    // Configurations
    let configs = [
        (&ids.project_debug, project_settings(spec, Configuration::Debug), Configuration::Debug),
        (&ids.project_release, project_settings(spec, Configuration::Release), Configuration::Release),
        (&ids.target_debug, target_settings(spec), Configuration::Debug),
        (&ids.target_release, target_settings(spec), Configuration::Release),
    ];
    for (id, settings, config) in configs {
        doc.push(
            Object::new(id.clone(), Isa::BuildConfiguration)
                .comment(config.as_str())
                .field("buildSettings", Value::Dict(settings))
                .field("name", config.as_str()),
        );
    }

    doc.push(configuration_list(
        &ids.project_config_list,
        format!("Build configuration list for PBXProject \"{}\"", spec.name),
        [&ids.project_debug, &ids.project_release],
    ));
    doc.push(configuration_list(
        &ids.target_config_list,
        format!("Build configuration list for PBXNativeTarget \"{}\"", spec.name),
        [&ids.target_debug, &ids.target_release],
    ));

    doc
}

fn file_reference(id: &ObjectId, path: &str, file_type: &str) -> Object {
    Object::new(id.clone(), Isa::FileReference)
        .comment(path)
        .field("lastKnownFileType", file_type)
        .field("path", path)
        .field("sourceTree", GROUP_TREE)
}

fn build_phase(id: &ObjectId, isa: Isa, name: &str, files: Vec<&ObjectId>) -> Object {
    Object::new(id.clone(), isa)
        .comment(name)
        .field("buildActionMask", ALL_ACTIONS)
        .field("files", Value::refs(files))
        .field("runOnlyForDeploymentPostprocessing", "0")
}

fn configuration_list(id: &ObjectId, comment: String, configs: [&ObjectId; 2]) -> Object {
    Object::new(id.clone(), Isa::ConfigurationList)
        .comment(comment)
        .field("buildConfigurations", Value::refs(configs))
        .field("defaultConfigurationIsVisible", "0")
        .field("defaultConfigurationName", Configuration::Release.as_str())
}
