//! Xcode project file model, assembly, validation and serialization.

pub mod assemble;
pub mod document;
pub mod settings;
pub mod validate;
pub mod writer;

pub use assemble::{assign_ids, build_document, SourceEntry};
pub use document::{Dict, Document, Isa, Object, Value};
pub use validate::{validate, DocumentError};
