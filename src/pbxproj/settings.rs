//! Build settings for the project and target configurations.

use crate::core::ProjectSpec;
use crate::pbxproj::document::{Dict, Value};

/// A build configuration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Configuration {
    Debug,
    Release,
}

impl Configuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Configuration::Debug => "Debug",
            Configuration::Release => "Release",
        }
    }
}

/// Compiler warnings and language settings shared by both project configurations.
const PROJECT_COMMON: &[(&str, &str)] = &[
    ("ALWAYS_SEARCH_USER_PATHS", "NO"),
    ("ASSETCATALOG_COMPILER_GENERATE_SWIFT_ASSET_SYMBOL_EXTENSIONS", "YES"),
    ("CLANG_ANALYZER_NONNULL", "YES"),
    ("CLANG_ANALYZER_NUMBER_OBJECT_CONVERSION", "YES_AGGRESSIVE"),
    ("CLANG_CXX_LANGUAGE_STANDARD", "gnu++20"),
    ("CLANG_ENABLE_MODULES", "YES"),
    ("CLANG_ENABLE_OBJC_ARC", "YES"),
    ("CLANG_ENABLE_OBJC_WEAK", "YES"),
    ("CLANG_WARN_BLOCK_CAPTURE_AUTORELEASING", "YES"),
    ("CLANG_WARN_BOOL_CONVERSION", "YES"),
    ("CLANG_WARN_COMMA", "YES"),
    ("CLANG_WARN_CONSTANT_CONVERSION", "YES"),
    ("CLANG_WARN_DEPRECATED_OBJC_IMPLEMENTATIONS", "YES"),
    ("CLANG_WARN_DIRECT_OBJC_ISA_USAGE", "YES_ERROR"),
    ("CLANG_WARN_DOCUMENTATION_COMMENTS", "YES"),
    ("CLANG_WARN_EMPTY_BODY", "YES"),
    ("CLANG_WARN_ENUM_CONVERSION", "YES"),
    ("CLANG_WARN_INFINITE_RECURSION", "YES"),
    ("CLANG_WARN_INT_CONVERSION", "YES"),
    ("CLANG_WARN_NON_LITERAL_NULL_CONVERSION", "YES"),
    ("CLANG_WARN_OBJC_IMPLICIT_RETAIN_SELF", "YES"),
    ("CLANG_WARN_OBJC_LITERAL_CONVERSION", "YES"),
    ("CLANG_WARN_OBJC_ROOT_CLASS", "YES_ERROR"),
    ("CLANG_WARN_QUOTED_INCLUDE_IN_FRAMEWORK_HEADER", "YES"),
    ("CLANG_WARN_RANGE_LOOP_ANALYSIS", "YES"),
    ("CLANG_WARN_STRICT_PROTOTYPES", "YES"),
    ("CLANG_WARN_SUSPICIOUS_MOVE", "YES"),
    ("CLANG_WARN_UNGUARDED_AVAILABILITY", "YES_AGGRESSIVE"),
    ("CLANG_WARN_UNREACHABLE_CODE", "YES"),
    ("CLANG_WARN__DUPLICATE_METHOD_MATCH", "YES"),
    ("COPY_PHASE_STRIP", "NO"),
    ("ENABLE_STRICT_OBJC_MSGSEND", "YES"),
    ("ENABLE_USER_SCRIPT_SANDBOXING", "YES"),
    ("GCC_C_LANGUAGE_STANDARD", "gnu17"),
    ("GCC_NO_COMMON_BLOCKS", "YES"),
    ("GCC_WARN_64_TO_32_BIT_CONVERSION", "YES"),
    ("GCC_WARN_ABOUT_RETURN_TYPE", "YES_ERROR"),
    ("GCC_WARN_UNDECLARED_SELECTOR", "YES"),
    ("GCC_WARN_UNINITIALIZED_AUTOS", "YES_AGGRESSIVE"),
    ("GCC_WARN_UNUSED_FUNCTION", "YES"),
    ("GCC_WARN_UNUSED_VARIABLE", "YES"),
    ("LOCALIZATION_PREFERS_STRING_CATALOGS", "YES"),
    ("MTL_FAST_MATH", "YES"),
    ("SDKROOT", "iphoneos"),
];

const PROJECT_DEBUG: &[(&str, &str)] = &[
    ("DEBUG_INFORMATION_FORMAT", "dwarf"),
    ("ENABLE_TESTABILITY", "YES"),
    ("GCC_DYNAMIC_NO_PIC", "NO"),
    ("GCC_OPTIMIZATION_LEVEL", "0"),
    ("MTL_ENABLE_DEBUG_INFO", "INCLUDE_SOURCE"),
    ("ONLY_ACTIVE_ARCH", "YES"),
    ("SWIFT_ACTIVE_COMPILATION_CONDITIONS", "DEBUG $(inherited)"),
    ("SWIFT_OPTIMIZATION_LEVEL", "-Onone"),
];

const PROJECT_RELEASE: &[(&str, &str)] = &[
    ("DEBUG_INFORMATION_FORMAT", "dwarf-with-dsym"),
    ("ENABLE_NS_ASSERTIONS", "NO"),
    ("MTL_ENABLE_DEBUG_INFO", "NO"),
    ("SWIFT_COMPILATION_MODE", "wholemodule"),
    ("VALIDATE_PRODUCT", "YES"),
];

/// Target settings that do not depend on the project description.
const TARGET_COMMON: &[(&str, &str)] = &[
    ("ASSETCATALOG_COMPILER_APPICON_NAME", "AppIcon"),
    ("ASSETCATALOG_COMPILER_GLOBAL_ACCENT_COLOR_NAME", "AccentColor"),
    ("CODE_SIGN_STYLE", "Automatic"),
    ("DEVELOPMENT_ASSET_PATHS", "\"Preview Content\""),
    ("ENABLE_PREVIEWS", "YES"),
    ("GENERATE_INFOPLIST_FILE", "NO"),
    ("INFOPLIST_FILE", "Info.plist"),
    ("INFOPLIST_KEY_UIApplicationSceneManifest_Generation", "YES"),
    ("INFOPLIST_KEY_UIApplicationSupportsIndirectInputEvents", "YES"),
    ("INFOPLIST_KEY_UILaunchScreen_Generation", "YES"),
    (
        "INFOPLIST_KEY_UISupportedInterfaceOrientations",
        "UIInterfaceOrientationPortrait UIInterfaceOrientationLandscapeLeft UIInterfaceOrientationLandscapeRight",
    ),
    (
        "INFOPLIST_KEY_UISupportedInterfaceOrientations_iPad",
        "UIInterfaceOrientationPortrait UIInterfaceOrientationPortraitUpsideDown UIInterfaceOrientationLandscapeLeft UIInterfaceOrientationLandscapeRight",
    ),
    ("PRODUCT_NAME", "$(TARGET_NAME)"),
    ("SWIFT_EMIT_LOC_STRINGS", "YES"),
];

fn insert_all(dict: &mut Dict, entries: &[(&str, &str)]) {
    for (key, value) in entries {
        dict.insert((*key).to_string(), Value::from(*value));
    }
}

/// Settings of the project-level configuration.
pub fn project_settings(spec: &ProjectSpec, config: Configuration) -> Dict {
    let mut dict = Dict::new();
    insert_all(&mut dict, PROJECT_COMMON);

    match config {
        Configuration::Debug => {
            insert_all(&mut dict, PROJECT_DEBUG);
            dict.insert(
                "GCC_PREPROCESSOR_DEFINITIONS".to_string(),
                Value::array([Value::from("DEBUG=1"), Value::from("$(inherited)")]),
            );
        }
        Configuration::Release => insert_all(&mut dict, PROJECT_RELEASE),
    }

    dict.insert(
        "IPHONEOS_DEPLOYMENT_TARGET".to_string(),
        Value::from(&spec.deployment_target),
    );
    dict
}

/// Settings of the application target, shared by its Debug and Release
/// configurations.
pub fn target_settings(spec: &ProjectSpec) -> Dict {
    let mut dict = Dict::new();
    insert_all(&mut dict, TARGET_COMMON);

    let derived = [
        ("CURRENT_PROJECT_VERSION", &spec.build_number),
        ("DEVELOPMENT_TEAM", &spec.development_team),
        ("MARKETING_VERSION", &spec.marketing_version),
        ("PRODUCT_BUNDLE_IDENTIFIER", &spec.bundle_identifier),
        ("SWIFT_VERSION", &spec.swift_version),
        ("TARGETED_DEVICE_FAMILY", &spec.device_family),
    ];
    for (key, value) in derived {
        dict.insert(key.to_string(), Value::from(value));
    }

    dict.insert(
        "LD_RUNPATH_SEARCH_PATHS".to_string(),
        Value::array([
            Value::from("$(inherited)"),
            Value::from("@executable_path/Frameworks"),
        ]),
    );
    dict
}
