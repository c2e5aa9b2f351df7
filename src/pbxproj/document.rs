//! In-memory model of a project file.
//!
//! A [`Document`] is a flat table of [`Object`]s keyed by [`ObjectId`], each
//! tagged with an [`Isa`] that decides which section it is written in.

use std::collections::BTreeMap;
use std::fmt;

use crate::core::ObjectId;

/// Ordered key/value table. Keys are written in sorted order.
pub type Dict = BTreeMap<String, Value>;

/// A property-list value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    /// A reference to another object in the same document.
    Ref(ObjectId),
    Array(Vec<Value>),
    Dict(Dict),
}

impl Value {
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(items.into_iter().collect())
    }

    pub fn refs<'a>(ids: impl IntoIterator<Item = &'a ObjectId>) -> Self {
        Value::Array(ids.into_iter().cloned().map(Value::Ref).collect())
    }

    pub fn empty_array() -> Self {
        Value::Array(Vec::new())
    }

    pub fn dict<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Dict(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ref_id(&self) -> Option<&ObjectId> {
        match self {
            Value::Ref(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Ref(id)
    }
}

impl From<&ObjectId> for Value {
    fn from(id: &ObjectId) -> Self {
        Value::Ref(id.clone())
    }
}

/// Object class. Declaration order is section order in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Isa {
    BuildFile,
    FileReference,
    FrameworksBuildPhase,
    Group,
    NativeTarget,
    Project,
    ResourcesBuildPhase,
    SourcesBuildPhase,
    BuildConfiguration,
    ConfigurationList,
}

impl Isa {
    pub const ALL: [Isa; 10] = [
        Isa::BuildFile,
        Isa::FileReference,
        Isa::FrameworksBuildPhase,
        Isa::Group,
        Isa::NativeTarget,
        Isa::Project,
        Isa::ResourcesBuildPhase,
        Isa::SourcesBuildPhase,
        Isa::BuildConfiguration,
        Isa::ConfigurationList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Isa::BuildFile => "PBXBuildFile",
            Isa::FileReference => "PBXFileReference",
            Isa::FrameworksBuildPhase => "PBXFrameworksBuildPhase",
            Isa::Group => "PBXGroup",
            Isa::NativeTarget => "PBXNativeTarget",
            Isa::Project => "PBXProject",
            Isa::ResourcesBuildPhase => "PBXResourcesBuildPhase",
            Isa::SourcesBuildPhase => "PBXSourcesBuildPhase",
            Isa::BuildConfiguration => "XCBuildConfiguration",
            Isa::ConfigurationList => "XCConfigurationList",
        }
    }

    /// Objects of this class are written on a single line.
    pub fn is_inline(&self) -> bool {
        matches!(self, Isa::BuildFile | Isa::FileReference)
    }
}

impl fmt::Display for Isa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the `objects` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub id: ObjectId,
    pub isa: Isa,
    /// Shown as `/* comment */` after the id and after every reference to it.
    pub comment: Option<String>,
    /// Fields other than `isa`.
    pub fields: Dict,
}

impl Object {
    pub fn new(id: ObjectId, isa: Isa) -> Self {
        Object {
            id,
            isa,
            comment: None,
            fields: Dict::new(),
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// A complete project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub archive_version: u32,
    pub object_version: u32,
    pub root_object: ObjectId,
    objects: Vec<Object>,
}

impl Document {
    pub fn new(root_object: ObjectId) -> Self {
        Document {
            archive_version: 1,
            object_version: 56,
            root_object,
            objects: Vec::new(),
        }
    }

    /// Append an object. Insertion order is kept within each section.
    pub fn push(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// First object with the given id.
    pub fn get(&self, id: &ObjectId) -> Option<&Object> {
        self.objects.iter().find(|o| &o.id == id)
    }

    pub fn comment_for(&self, id: &ObjectId) -> Option<&str> {
        self.get(id).and_then(|o| o.comment.as_deref())
    }

    pub fn objects_of(&self, isa: Isa) -> impl Iterator<Item = &Object> {
        self.objects.iter().filter(move |o| o.isa == isa)
    }

    /// Non-empty sections in file order.
    pub fn sections(&self) -> Vec<(Isa, Vec<&Object>)> {
        Isa::ALL
            .iter()
            .map(|isa| (*isa, self.objects_of(*isa).collect::<Vec<_>>()))
            .filter(|(_, objects)| !objects.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_follow_isa_order() {
        let mut doc = Document::new("P".into());
        doc.push(Object::new("C".into(), Isa::ConfigurationList));
        doc.push(Object::new("B".into(), Isa::BuildFile));
        doc.push(Object::new("F2".into(), Isa::FileReference));
        doc.push(Object::new("F1".into(), Isa::FileReference));

        let sections = doc.sections();
        let order: Vec<Isa> = sections.iter().map(|(isa, _)| *isa).collect();
        assert_eq!(
            order,
            vec![Isa::BuildFile, Isa::FileReference, Isa::ConfigurationList]
        );

        let refs: Vec<&str> = sections[1].1.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(refs, vec!["F2", "F1"]);
    }

    #[test]
    fn test_comment_lookup() {
        let mut doc = Document::new("P".into());
        doc.push(Object::new("A".into(), Isa::Group).comment("Products"));
        doc.push(Object::new("B".into(), Isa::Group));

        assert_eq!(doc.comment_for(&"A".into()), Some("Products"));
        assert_eq!(doc.comment_for(&"B".into()), None);
        assert_eq!(doc.comment_for(&"Z".into()), None);
    }

    #[test]
    fn test_object_builder() {
        let obj = Object::new("X".into(), Isa::BuildFile)
            .comment("A.swift in Sources")
            .field("fileRef", ObjectId::new("Y"));

        assert_eq!(obj.get("fileRef").and_then(Value::as_ref_id), Some(&"Y".into()));
        assert_eq!(obj.comment.as_deref(), Some("A.swift in Sources"));
    }
}
