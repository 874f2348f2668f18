//! Typed metadata attached to a grid.

use std::collections::BTreeMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Coord;

/// Key holding the minimum corner of the stored index-space bounds.
pub const FILE_BBOX_MIN: &str = "file_bbox_min";

/// Key holding the maximum corner of the stored index-space bounds.
pub const FILE_BBOX_MAX: &str = "file_bbox_max";

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Vec3i(Coord),
    Vec3d(Vector3<f64>),
}

impl MetaValue {
    /// Name of the stored type, used in lookup errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Vec3i(_) => "vec3i",
            Self::Vec3d(_) => "vec3d",
        }
    }
}

/// Why a typed metadata lookup failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("metadata key '{0}' not found")]
    NotFound(String),

    #[error("metadata key '{key}' holds {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Ordered map of named metadata values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    entries: BTreeMap<String, MetaValue>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one under that key.
    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) -> Option<MetaValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<MetaValue> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up an integer triple.
    pub fn vec3i(&self, key: &str) -> Result<Coord, MetadataError> {
        match self.entries.get(key) {
            Some(MetaValue::Vec3i(v)) => Ok(*v),
            Some(other) => Err(MetadataError::TypeMismatch {
                key: key.to_string(),
                expected: "vec3i",
                found: other.type_name(),
            }),
            None => Err(MetadataError::NotFound(key.to_string())),
        }
    }

    /// Look up a string value.
    pub fn string(&self, key: &str) -> Result<&str, MetadataError> {
        match self.entries.get(key) {
            Some(MetaValue::String(s)) => Ok(s),
            Some(other) => Err(MetadataError::TypeMismatch {
                key: key.to_string(),
                expected: "string",
                found: other.type_name(),
            }),
            None => Err(MetadataError::NotFound(key.to_string())),
        }
    }
}
