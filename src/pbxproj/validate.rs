//! Structural checks run on a document before it is written.
//!
//! A document is valid when object ids are unique, the root object exists,
//! and every reference resolves to exactly one object of a class that makes
//! sense for the key it appears under.

use std::collections::HashMap;

use thiserror::Error;

use crate::core::ObjectId;
use crate::pbxproj::document::{Document, Isa, Value};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// A structural defect in a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("duplicate object identifier `{id}`")]
    DuplicateObject { id: ObjectId, first: Isa, second: Isa },

    #[error("`{from}` references missing object `{to}` in `{key}`")]
    DanglingReference {
        from: ObjectId,
        key: String,
        to: ObjectId,
    },

    #[error("`{from}` references {found} `{to}` in `{key}`")]
    MismatchedReference {
        from: ObjectId,
        key: String,
        to: ObjectId,
        found: Isa,
    },

    #[error("root object `{id}` is not defined")]
    MissingRootObject { id: ObjectId },
}

impl DocumentError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DocumentError::DuplicateObject { id, first, second } => {
                Diagnostic::error(format!("identifier `{}` is used by two objects", id))
                    .with_context(format!("first defined as {}", first))
                    .with_context(format!("then defined again as {}", second))
                    .with_suggestion(suggestions::STABLE_COLLISION)
            }
            DocumentError::DanglingReference { from, key, to } => Diagnostic::error(format!(
                "object `{}` points at `{}`, which is not defined",
                from, to
            ))
            .with_context(format!("in field `{}`", key)),
            DocumentError::MismatchedReference {
                from,
                key,
                to,
                found,
            } => Diagnostic::error(format!(
                "object `{}` points at `{}` of the wrong kind",
                from, to
            ))
            .with_context(format!("`{}` cannot refer to a {}", key, found)),
            DocumentError::MissingRootObject { id } => {
                Diagnostic::error(format!("root object `{}` is not defined", id))
            }
        }
    }
}

/// Object classes a reference under `key` may point at.
fn expected_targets(key: &str) -> Option<&'static [Isa]> {
    const PHASES: &[Isa] = &[
        Isa::SourcesBuildPhase,
        Isa::FrameworksBuildPhase,
        Isa::ResourcesBuildPhase,
    ];

    match key {
        "fileRef" | "productReference" => Some(&[Isa::FileReference]),
        "files" => Some(&[Isa::BuildFile]),
        "children" => Some(&[Isa::FileReference, Isa::Group]),
        "mainGroup" | "productRefGroup" => Some(&[Isa::Group]),
        "buildPhases" => Some(PHASES),
        "buildConfigurationList" => Some(&[Isa::ConfigurationList]),
        "buildConfigurations" => Some(&[Isa::BuildConfiguration]),
        "targets" => Some(&[Isa::NativeTarget]),
        _ => None,
    }
}

/// Every defect in `doc`, in document order.
pub fn check(doc: &Document) -> Vec<DocumentError> {
    let mut errors = Vec::new();
    let mut table: HashMap<&ObjectId, Isa> = HashMap::new();

    for object in doc.objects() {
        if let Some(first) = table.get(&object.id) {
            errors.push(DocumentError::DuplicateObject {
                id: object.id.clone(),
                first: *first,
                second: object.isa,
            });
        } else {
            table.insert(&object.id, object.isa);
        }
    }

    if !table.contains_key(&doc.root_object) {
        errors.push(DocumentError::MissingRootObject {
            id: doc.root_object.clone(),
        });
    }

    for object in doc.objects() {
        for (key, value) in &object.fields {
            let mut refs = Vec::new();
            collect_refs(key, value, &mut refs);
            for (key, to) in refs {
                match table.get(to) {
                    None => errors.push(DocumentError::DanglingReference {
                        from: object.id.clone(),
                        key: key.to_string(),
                        to: to.clone(),
                    }),
                    Some(found) => {
                        if let Some(allowed) = expected_targets(key) {
                            if !allowed.contains(found) {
                                errors.push(DocumentError::MismatchedReference {
                                    from: object.id.clone(),
                                    key: key.to_string(),
                                    to: to.clone(),
                                    found: *found,
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    errors
}

/// Fail with the first defect in `doc`.
pub fn validate(doc: &Document) -> Result<(), DocumentError> {
    match check(doc).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Collect `(innermost key, id)` for every reference under `value`.
fn collect_refs<'a>(key: &'a str, value: &'a Value, out: &mut Vec<(&'a str, &'a ObjectId)>) {
    match value {
        Value::String(_) => {}
        Value::Ref(id) => out.push((key, id)),
        Value::Array(items) => {
            for item in items {
                collect_refs(key, item, out);
            }
        }
        Value::Dict(dict) => {
            for (inner, item) in dict {
                collect_refs(inner, item, out);
            }
        }
    }
}
