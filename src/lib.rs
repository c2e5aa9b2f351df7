//! pbxgen - generate an Xcode project file from the sources in a directory tree
//!
//! The crate scans a root directory for source files, assigns each one a
//! pair of object identifiers, and renders a complete `project.pbxproj`
//! for a single iOS application target.

pub mod core;
pub mod ops;
pub mod pbxproj;
pub mod util;

pub use core::{IdScheme, ObjectId, ProjectSpec, SourceFile};
pub use ops::{DiscoverOptions, GenerateOptions};
pub use pbxproj::{Document, DocumentError};
