//! Core data types.

pub mod object_id;
pub mod project;
pub mod source_file;

pub use object_id::{IdAllocator, IdNamespace, IdScheme, ObjectId};
pub use project::{FixedIds, ProjectSpec};
pub use source_file::SourceFile;
