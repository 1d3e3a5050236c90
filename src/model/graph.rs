//! Source objects and the graph that owns them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::handle::ObjectHandle;
use crate::schema::ObjectType;

/// One typed field value on a source object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceValue {
    /// A floating point value.
    Real(f64),
    /// An integer value.
    Integer(i64),
    /// Free text (including choice values and node names).
    Text(String),
    /// A native boolean; projected to `"Yes"`/`"No"` in the flat format.
    Flag(bool),
    /// The autosize marker for an autosizable numeric field.
    Autosize,
    /// A reference to another object in the same graph.
    Reference(ObjectHandle),
    /// An ordered list of references to other objects.
    ReferenceList(Vec<ObjectHandle>),
}

/// The tri-state of an autosizable numeric field.
///
/// Collapsing this to an optional double loses the distinction between "the
/// user chose autosizing" and "the user said nothing", which changes what the
/// engine receives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumericInput {
    /// An explicit numeric value.
    Explicit(f64),
    /// The field is autosized.
    Autosized,
    /// No value was provided.
    Unset,
}

impl NumericInput {
    /// Returns true if the field is autosized.
    pub fn is_autosized(&self) -> bool {
        matches!(self, NumericInput::Autosized)
    }

    /// Returns true if no value was provided.
    pub fn is_unset(&self) -> bool {
        matches!(self, NumericInput::Unset)
    }

    /// Returns the explicit value, if there is one.
    pub fn explicit(&self) -> Option<f64> {
        match self {
            NumericInput::Explicit(value) => Some(*value),
            _ => None,
        }
    }
}

/// One node in the source graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceObject {
    /// Stable identity of this object.
    pub handle: ObjectHandle,

    /// The object's type tag.
    pub object_type: ObjectType,

    /// Optional user-visible name; unnamed objects get a generated record
    /// name during translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Field values, keyed by schema field name (member lists and other
    /// source-only fields included).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, SourceValue>,
}

impl SourceObject {
    /// Creates an unnamed object of the given type with a fresh handle.
    pub fn new(object_type: impl Into<ObjectType>) -> Self {
        Self {
            handle: ObjectHandle::new(),
            object_type: object_type.into(),
            name: None,
            fields: BTreeMap::new(),
        }
    }

    /// Creates a named object of the given type with a fresh handle.
    pub fn named(object_type: impl Into<ObjectType>, name: impl Into<String>) -> Self {
        Self {
            handle: ObjectHandle::new(),
            object_type: object_type.into(),
            name: Some(name.into()),
            fields: BTreeMap::new(),
        }
    }

    /// Sets a field value, builder-style.
    pub fn with_field(mut self, name: impl Into<String>, value: SourceValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Sets a field value.
    pub fn set_field(&mut self, name: impl Into<String>, value: SourceValue) {
        self.fields.insert(name.into(), value);
    }

    /// Removes a field value.
    pub fn clear_field(&mut self, name: &str) -> Option<SourceValue> {
        self.fields.remove(name)
    }

    /// Raw field lookup.
    pub fn field(&self, name: &str) -> Option<&SourceValue> {
        self.fields.get(name)
    }

    /// Text accessor; `None` if unset or not text.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(SourceValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Real accessor; `None` if unset, autosized, or not numeric.
    pub fn real(&self, name: &str) -> Option<f64> {
        match self.fields.get(name) {
            Some(SourceValue::Real(v)) => Some(*v),
            _ => None,
        }
    }

    /// Integer accessor; `None` if unset or not an integer.
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.fields.get(name) {
            Some(SourceValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    /// Flag accessor; `None` if unset or not a flag.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.fields.get(name) {
            Some(SourceValue::Flag(v)) => Some(*v),
            _ => None,
        }
    }

    /// Reference accessor; `None` if unset or not a reference.
    pub fn reference(&self, name: &str) -> Option<ObjectHandle> {
        match self.fields.get(name) {
            Some(SourceValue::Reference(h)) => Some(*h),
            _ => None,
        }
    }

    /// Reference-list accessor; `None` if unset or not a list.
    pub fn reference_list(&self, name: &str) -> Option<&[ObjectHandle]> {
        match self.fields.get(name) {
            Some(SourceValue::ReferenceList(list)) => Some(list.as_slice()),
            _ => None,
        }
    }

    /// The tri-state of a numeric field.
    pub fn numeric_input(&self, name: &str) -> NumericInput {
        match self.fields.get(name) {
            Some(SourceValue::Real(v)) => NumericInput::Explicit(*v),
            Some(SourceValue::Integer(v)) => NumericInput::Explicit(*v as f64),
            Some(SourceValue::Autosize) => NumericInput::Autosized,
            _ => NumericInput::Unset,
        }
    }
}

/// The source graph: an insertion-ordered arena of objects with a handle
/// index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ModelGraphData", into = "ModelGraphData")]
pub struct ModelGraph {
    objects: Vec<SourceObject>,
    index: HashMap<ObjectHandle, usize>,
}

/// Serialized shape of a [`ModelGraph`]; the handle index is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct ModelGraphData {
    objects: Vec<SourceObject>,
}

impl From<ModelGraphData> for ModelGraph {
    fn from(data: ModelGraphData) -> Self {
        let mut graph = ModelGraph::new();
        for object in data.objects {
            graph.add(object);
        }
        graph
    }
}

impl From<ModelGraph> for ModelGraphData {
    fn from(graph: ModelGraph) -> Self {
        ModelGraphData {
            objects: graph.objects,
        }
    }
}

impl ModelGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object and returns its handle.
    ///
    /// An object whose handle is already present replaces the existing
    /// object in place, keeping its original position.
    pub fn add(&mut self, object: SourceObject) -> ObjectHandle {
        let handle = object.handle;
        match self.index.get(&handle) {
            Some(&pos) => self.objects[pos] = object,
            None => {
                self.index.insert(handle, self.objects.len());
                self.objects.push(object);
            }
        }
        handle
    }

    /// Looks up an object by handle.
    pub fn get(&self, handle: ObjectHandle) -> Option<&SourceObject> {
        self.index.get(&handle).map(|&pos| &self.objects[pos])
    }

    /// Mutable lookup by handle.
    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut SourceObject> {
        match self.index.get(&handle) {
            Some(&pos) => Some(&mut self.objects[pos]),
            None => None,
        }
    }

    /// Whether the graph contains the handle.
    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.index.contains_key(&handle)
    }

    /// Iterates objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &SourceObject> {
        self.objects.iter()
    }

    /// Number of objects in the graph.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the graph holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
