//! Core registry types: object types, field descriptors, and the lookup table
//! the translators consult.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The type tag of a model object or workspace record.
///
/// Object types use the engine's colon-separated naming convention, e.g.
/// `"AirConditioner:VariableRefrigerantFlow"`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectType(String);

impl ObjectType {
    /// Creates a new object type tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the type name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectType({})", self.0)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObjectType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ObjectType {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// What kind of value a field holds in the flat format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free-form text, passed through verbatim.
    Alpha,
    /// A floating point number.
    Real,
    /// An integer.
    Integer,
    /// Text restricted to an enumerated set of values.
    Choice {
        /// The allowed values.
        values: Vec<String>,
    },
    /// A two-valued textual boolean, written as `"Yes"` or `"No"`.
    YesNo,
    /// The name of another record, drawn from a named reference group.
    Reference {
        /// The reference group the named record must belong to.
        object_list: String,
    },
}

/// One field of an object type, in declaration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// The field name, e.g. `"Gross Rated Total Cooling Capacity"`.
    pub name: String,

    /// What kind of value this field holds.
    pub kind: FieldKind,

    /// Whether a source value must be present for the object to translate.
    #[serde(default)]
    pub required: bool,

    /// Whether the source may mark this numeric field as autosized, in which
    /// case the literal `"Autosize"` is written instead of a number.
    #[serde(default)]
    pub autosizable: bool,
}

impl FieldDescriptor {
    /// Creates a descriptor with the given name and kind.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            autosizable: false,
        }
    }

    /// Creates an alpha (free text) field.
    pub fn alpha(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Alpha)
    }

    /// Creates a real-valued field.
    pub fn real(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Real)
    }

    /// Creates an integer field.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    /// Creates a choice field with the given allowed values.
    pub fn choice<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            FieldKind::Choice {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Creates a Yes/No field.
    pub fn yes_no(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::YesNo)
    }

    /// Creates a reference field into the given reference group.
    pub fn reference(name: impl Into<String>, object_list: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Reference {
                object_list: object_list.into(),
            },
        )
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the field as autosizable.
    pub fn autosizable(mut self) -> Self {
        self.autosizable = true;
        self
    }
}

/// The repeated reference group a record may carry after its scalar fields.
///
/// Each appended group row holds one value under `name`, naming a record from
/// `object_list`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtensibleField {
    /// The field name of each group row, e.g. `"Zone Terminal Unit Name"`.
    pub name: String,

    /// The reference group the named records must belong to.
    pub object_list: String,
}

/// A structural prerequisite checked before an object is registered.
///
/// An object failing a precondition is skipped entirely: no record is
/// produced and nothing is entered into the identity map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precondition {
    /// The named source reference-list field must have at least one member.
    NonEmptyList {
        /// The source field holding the member list.
        field: String,
    },
}

/// A synthesized aggregate list record.
///
/// Some object types emit a companion list record naming their members (the
/// engine's terminal-unit-list pattern): the parent's `parent_field` is set to
/// the generated list name, and the list record gets one extensible group row
/// per successfully translated member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberList {
    /// The object type of the generated list record.
    pub list_type: ObjectType,

    /// The parent field that receives the generated list name.
    pub parent_field: String,

    /// The source reference-list field holding the members.
    pub member_source_field: String,

    /// Appended to the parent name to form the list name.
    pub name_suffix: String,
}

/// Everything the translators know about one object type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// The object type this schema describes.
    pub object_type: ObjectType,

    /// Scalar fields, in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,

    /// The extensible member group, if the record carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensible: Option<ExtensibleField>,

    /// Structural prerequisites checked before registration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preconditions: Vec<Precondition>,

    /// The synthesized member list, if this type emits one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_list: Option<MemberList>,
}

impl ObjectSchema {
    /// Creates an empty schema for the given object type.
    pub fn new(object_type: impl Into<ObjectType>) -> Self {
        Self {
            object_type: object_type.into(),
            fields: Vec::new(),
            extensible: None,
            preconditions: Vec::new(),
            member_list: None,
        }
    }

    /// Appends a field descriptor.
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Sets the extensible member group.
    pub fn extensible(mut self, name: impl Into<String>, object_list: impl Into<String>) -> Self {
        self.extensible = Some(ExtensibleField {
            name: name.into(),
            object_list: object_list.into(),
        });
        self
    }

    /// Appends a structural precondition.
    pub fn precondition(mut self, precondition: Precondition) -> Self {
        self.preconditions.push(precondition);
        self
    }

    /// Sets the synthesized member list.
    pub fn member_list(mut self, member_list: MemberList) -> Self {
        self.member_list = Some(member_list);
        self
    }

    /// Looks up a field descriptor by name.
    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// The schema registry: object type -> schema, plus the reference groups.
///
/// Reference groups map a group name (e.g. `"Schedules"`) to the set of
/// object types a reference field drawing from that group may resolve to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaRegistry {
    /// All object schemas, keyed by type.
    #[serde(default)]
    objects: BTreeMap<ObjectType, ObjectSchema>,

    /// Reference group name -> member object types.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    reference_groups: BTreeMap<String, BTreeSet<ObjectType>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) an object schema.
    pub fn insert(&mut self, schema: ObjectSchema) {
        self.objects.insert(schema.object_type.clone(), schema);
    }

    /// Adds the given object types to a reference group, creating it if
    /// needed.
    pub fn add_reference_group<I, T>(&mut self, object_list: impl Into<String>, members: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<ObjectType>,
    {
        self.reference_groups
            .entry(object_list.into())
            .or_default()
            .extend(members.into_iter().map(Into::into));
    }

    /// Looks up the schema for an object type.
    pub fn schema_for(&self, object_type: &ObjectType) -> Option<&ObjectSchema> {
        self.objects.get(object_type)
    }

    /// Returns the ordered field descriptors for an object type.
    pub fn fields_for(&self, object_type: &ObjectType) -> Option<&[FieldDescriptor]> {
        self.objects.get(object_type).map(|s| s.fields.as_slice())
    }

    /// Returns the allowed values of a choice field, if the field exists and
    /// is a choice.
    pub fn valid_enum_values(&self, object_type: &ObjectType, field: &str) -> Option<&[String]> {
        match &self.schema_for(object_type)?.field_named(field)?.kind {
            FieldKind::Choice { values } => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Returns the member types of a reference group.
    pub fn group_members(&self, object_list: &str) -> Option<&BTreeSet<ObjectType>> {
        self.reference_groups.get(object_list)
    }

    /// Whether a reference group admits the given object type.
    ///
    /// An unknown group admits nothing.
    pub fn group_allows(&self, object_list: &str, object_type: &ObjectType) -> bool {
        self.reference_groups
            .get(object_list)
            .is_some_and(|members| members.contains(object_type))
    }

    /// Whether the given type is the list type of some schema's synthesized
    /// member list.
    ///
    /// The reverse translator folds such records back into their parent
    /// instead of materializing them as model objects.
    pub fn is_member_list_type(&self, object_type: &ObjectType) -> bool {
        self.objects
            .values()
            .any(|s| s.member_list.as_ref().map(|m| &m.list_type) == Some(object_type))
    }

    /// Iterates over all schemas.
    pub fn schemas(&self) -> impl Iterator<Item = &ObjectSchema> {
        self.objects.values()
    }

    /// Number of registered object types.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if no object types are registered.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
