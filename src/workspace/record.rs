//! Target records and the workspace that collects them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::schema::ObjectType;

/// One field value in a target record.
///
/// Absence is represented by the field missing from the record, never by an
/// empty string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetValue {
    /// Free text, including the `"Autosize"` sentinel and `"Yes"`/`"No"`.
    Text(String),
    /// A floating point value.
    Number(f64),
    /// An integer value.
    Integer(i64),
    /// The name of another record.
    Reference(String),
}

impl TargetValue {
    /// Text accessor; `None` for non-text values.
    pub fn text(&self) -> Option<&str> {
        match self {
            TargetValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric accessor; integers widen to `f64`.
    pub fn number(&self) -> Option<f64> {
        match self {
            TargetValue::Number(v) => Some(*v),
            TargetValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// The referenced record name, for reference values.
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            TargetValue::Reference(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// The referenced record name, accepting plain text as well.
    ///
    /// Hand-written workspace files often carry references as plain strings;
    /// the reverse translator treats both spellings the same.
    pub fn name_like(&self) -> Option<&str> {
        match self {
            TargetValue::Reference(name) => Some(name.as_str()),
            TargetValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for TargetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetValue::Text(s) => write!(f, "{}", s),
            TargetValue::Number(v) => write!(f, "{}", v),
            TargetValue::Integer(v) => write!(f, "{}", v),
            TargetValue::Reference(name) => write!(f, "{}", name),
        }
    }
}

/// One appended row of a record's extensible group.
///
/// Rows are created empty, filled once, and never partially rolled back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensibleGroup {
    /// Values of this row, keyed by extensible field name.
    #[serde(default)]
    pub values: BTreeMap<String, TargetValue>,
}

impl ExtensibleGroup {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one value, builder-style.
    pub fn with_value(mut self, field: impl Into<String>, value: TargetValue) -> Self {
        self.values.insert(field.into(), value);
        self
    }

    /// Looks up a value by extensible field name.
    pub fn get(&self, field: &str) -> Option<&TargetValue> {
        self.values.get(field)
    }
}

/// One flat, named, schema-typed record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetRecord {
    /// The record's type tag.
    pub object_type: ObjectType,

    /// The record's unique name; references address it by this name.
    pub name: String,

    /// Scalar field values, keyed by schema field name. Absent fields are
    /// simply missing.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, TargetValue>,

    /// Extensible group rows, in append order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<ExtensibleGroup>,
}

impl TargetRecord {
    /// Creates an empty record of the given type and name.
    pub fn new(object_type: impl Into<ObjectType>, name: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            name: name.into(),
            fields: BTreeMap::new(),
            extensions: Vec::new(),
        }
    }

    /// Sets a field value.
    pub fn set(&mut self, field: impl Into<String>, value: TargetValue) {
        self.fields.insert(field.into(), value);
    }

    /// Looks up a field value.
    pub fn get(&self, field: &str) -> Option<&TargetValue> {
        self.fields.get(field)
    }

    /// Whether a field is set.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Appends one extensible group row.
    pub fn push_extensible(&mut self, group: ExtensibleGroup) {
        self.extensions.push(group);
    }
}

/// The emission sequence: records in first-visit order with a name index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WorkspaceData", into = "WorkspaceData")]
pub struct Workspace {
    records: Vec<TargetRecord>,
    by_name: HashMap<String, usize>,
}

/// Serialized shape of a [`Workspace`]; the name index is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct WorkspaceData {
    records: Vec<TargetRecord>,
}

impl From<WorkspaceData> for Workspace {
    fn from(data: WorkspaceData) -> Self {
        let mut workspace = Workspace::new();
        for record in data.records {
            workspace.push(record);
        }
        workspace
    }
}

impl From<Workspace> for WorkspaceData {
    fn from(workspace: Workspace) -> Self {
        WorkspaceData {
            records: workspace.records,
        }
    }
}

impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its position.
    ///
    /// When two records share a name, lookups resolve to the earlier one.
    pub fn push(&mut self, record: TargetRecord) -> usize {
        let position = self.records.len();
        self.by_name
            .entry(record.name.clone())
            .or_insert(position);
        self.records.push(record);
        position
    }

    /// All records, in emission order.
    pub fn records(&self) -> &[TargetRecord] {
        &self.records
    }

    /// Record at a given position.
    pub fn get(&self, position: usize) -> Option<&TargetRecord> {
        self.records.get(position)
    }

    /// Position of the record with the given name.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Record with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&TargetRecord> {
        self.position_of(name).map(|pos| &self.records[pos])
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the workspace holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
