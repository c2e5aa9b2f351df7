//! Object identifiers.
//!
//! Every node in a project file is keyed by an uppercase hexadecimal token.
//! Generated identifiers are 24 characters wide; the fixed resources baked
//! into [`FixedIds`](crate::core::project::FixedIds) use 8.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::hash::Fingerprint;

/// Width of a generated identifier in hex characters.
pub const GENERATED_ID_LEN: usize = 24;

/// Identifier of a single object in the project file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wrap an existing token.
    pub fn new(id: impl Into<String>) -> Self {
        ObjectId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        ObjectId::new(s)
    }
}

/// How identifiers for discovered files are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// Fresh random identifiers on every run.
    #[default]
    Random,
    /// Identifiers derived from the file's relative path.
    Stable,
}

impl FromStr for IdScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(IdScheme::Random),
            "stable" => Ok(IdScheme::Stable),
            _ => Err(format!(
                "invalid id scheme '{}'; expected 'random' or 'stable'",
                s
            )),
        }
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdScheme::Random => f.write_str("random"),
            IdScheme::Stable => f.write_str("stable"),
        }
    }
}

/// The two identifier namespaces a source file lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdNamespace {
    /// `PBXFileReference` node.
    Reference,
    /// `PBXBuildFile` node (membership in the sources phase).
    BuildFile,
}

impl IdNamespace {
    fn tag(&self) -> &'static str {
        match self {
            IdNamespace::Reference => "ref",
            IdNamespace::BuildFile => "build",
        }
    }
}

/// Hands out identifiers for one generation run.
///
/// Tracks every identifier issued so the random scheme can redraw on a
/// collision between generated ids. Generated ids are 24 characters and the
/// fixed ids 8, so the two sets never meet. The stable scheme never redraws;
/// a clash there is reported by document validation instead.
#[derive(Debug)]
pub struct IdAllocator {
    scheme: IdScheme,
    issued: HashSet<ObjectId>,
}

impl IdAllocator {
    pub fn new(scheme: IdScheme) -> Self {
        IdAllocator {
            scheme,
            issued: HashSet::new(),
        }
    }

    /// Allocate the identifier for `path` in `namespace`.
    pub fn allocate(&mut self, namespace: IdNamespace, path: &str) -> ObjectId {
        match self.scheme {
            IdScheme::Random => loop {
                let id = random_id();
                if self.issued.insert(id.clone()) {
                    return id;
                }
                tracing::debug!("identifier collision on {}, drawing again", id);
            },
            IdScheme::Stable => {
                let id = stable_id(namespace, path);
                if !self.issued.insert(id.clone()) {
                    tracing::warn!("stable identifier {} for `{}` is already in use", id, path);
                }
                id
            }
        }
    }
}

/// A fresh 24-character identifier from a v4 UUID.
pub fn random_id() -> ObjectId {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(GENERATED_ID_LEN);
    hex.make_ascii_uppercase();
    ObjectId(hex)
}

/// A 24-character identifier derived from `path`.
pub fn stable_id(namespace: IdNamespace, path: &str) -> ObjectId {
    let mut fp = Fingerprint::new();
    fp.update_strs([namespace.tag(), path]);
    ObjectId(fp.finish_upper(GENERATED_ID_LEN))
}
