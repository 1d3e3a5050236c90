//! Reverse translation: workspace -> model graph.
//!
//! Same walker design as the forward direction with the roles swapped: the
//! identity map keys on record position, the placeholder is an empty source
//! object registered before any field is absorbed, and name references are
//! resolved by translating the named record on demand.

use log::{debug, warn};

use super::idmap::IdentityMap;
use super::report::{
    TranslationContext, TranslationIssue, TranslationIssueCode, TranslationReport,
};
use super::{TranslateOptions, AUTOSIZE_SENTINEL};
use crate::error::TransomError;
use crate::model::{ModelGraph, ObjectHandle, SourceObject, SourceValue};
use crate::schema::{FieldDescriptor, FieldKind, ObjectSchema, SchemaRegistry};
use crate::workspace::{TargetRecord, TargetValue, Workspace};

/// The result of a reverse pass: the rebuilt model graph plus every
/// non-fatal diagnostic.
#[derive(Clone, Debug)]
pub struct ReverseTranslation {
    /// The rebuilt source graph, in first-visit order.
    pub model: ModelGraph,

    /// Record position -> object identity, for post-processing passes that
    /// need to find the object built for a given record.
    pub identity_map: IdentityMap<usize, ObjectHandle>,

    /// Diagnostics for skipped records and degraded fields.
    pub report: TranslationReport,
}

/// Translates a workspace back into a model graph.
#[derive(Clone, Debug)]
pub struct ReverseTranslator<'a> {
    schema: &'a SchemaRegistry,
    options: TranslateOptions,
}

impl<'a> ReverseTranslator<'a> {
    /// Creates a translator over the given schema registry.
    pub fn new(schema: &'a SchemaRegistry) -> Self {
        Self {
            schema,
            options: TranslateOptions::default(),
        }
    }

    /// Replaces the default options.
    pub fn with_options(mut self, options: TranslateOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs one reverse pass over the whole workspace.
    ///
    /// Records are visited in workspace order. Synthesized member-list
    /// records are folded back into their parent's reference list rather
    /// than materialized as model objects.
    ///
    /// # Errors
    /// Fails only on walker invariant violations; see
    /// [`ForwardTranslator::translate`](super::ForwardTranslator::translate).
    pub fn translate(&self, workspace: &Workspace) -> Result<ReverseTranslation, TransomError> {
        ReversePass {
            schema: self.schema,
            options: &self.options,
            workspace,
            model: ModelGraph::new(),
            map: IdentityMap::new(),
            report: TranslationReport::new(),
            depth: 0,
        }
        .run()
    }
}

/// All mutable state of one reverse pass.
struct ReversePass<'a> {
    schema: &'a SchemaRegistry,
    options: &'a TranslateOptions,
    workspace: &'a Workspace,
    model: ModelGraph,
    map: IdentityMap<usize, ObjectHandle>,
    report: TranslationReport,
    depth: usize,
}

impl<'a> ReversePass<'a> {
    fn run(mut self) -> Result<ReverseTranslation, TransomError> {
        let workspace = self.workspace;
        for position in 0..workspace.len() {
            if self.map.contains(&position) {
                continue;
            }
            let record = &workspace.records()[position];
            if self.schema.is_member_list_type(&record.object_type) {
                // Folded into the parent when the parent is translated.
                debug!("skipping member-list record '{}'", record.name);
                continue;
            }
            self.translate_record(position)?;
        }

        debug!(
            "reverse pass built {} object(s), {} issue(s)",
            self.model.len(),
            self.report.issues.len()
        );
        Ok(ReverseTranslation {
            model: self.model,
            identity_map: self.map,
            report: self.report,
        })
    }

    /// Translates one record, memoized by position.
    ///
    /// Returns the handle of the object built for it, or `None` when the
    /// record was skipped (unknown type).
    fn translate_record(&mut self, position: usize) -> Result<Option<ObjectHandle>, TransomError> {
        if let Some(&handle) = self.map.lookup(&position) {
            return Ok(Some(handle));
        }

        if self.depth >= self.options.max_depth {
            return Err(TransomError::RecursionLimitExceeded {
                limit: self.options.max_depth,
                report: std::mem::take(&mut self.report),
            });
        }
        self.depth += 1;
        let result = self.translate_record_inner(position);
        self.depth -= 1;
        result
    }

    fn translate_record_inner(
        &mut self,
        position: usize,
    ) -> Result<Option<ObjectHandle>, TransomError> {
        let workspace = self.workspace;
        let Some(record) = workspace.get(position) else {
            return Ok(None);
        };

        let registry = self.schema;
        let Some(schema) = registry.schema_for(&record.object_type) else {
            warn!(
                "{} '{}' has no schema and will not be translated",
                record.object_type, record.name
            );
            self.report.add(TranslationIssue::warning(
                TranslationIssueCode::UnknownObjectType,
                "no schema registered for this record type",
                TranslationContext::object(&record.object_type, record.name.clone()),
            ));
            return Ok(None);
        };

        // Placeholder first: the empty object is registered before any
        // reference is chased, so mutually-referencing records resolve to
        // this handle instead of recursing forever.
        let object = SourceObject::named(record.object_type.clone(), record.name.clone());
        let handle = self.model.add(object);
        if self.map.register(position, handle).is_err() {
            return Err(TransomError::DuplicateRegistration {
                object_type: record.object_type.clone(),
                name: record.name.clone(),
                report: std::mem::take(&mut self.report),
            });
        }

        for descriptor in &schema.fields {
            if is_member_list_parent_field(schema, descriptor) {
                continue;
            }
            self.absorb_field(record, descriptor, handle)?;
        }

        if let Some(extensible) = &schema.extensible {
            let mut members = Vec::new();
            for (row, group) in record.extensions.iter().enumerate() {
                let Some(name) = group.get(&extensible.name).and_then(|v| v.name_like()) else {
                    self.field_warning(
                        record,
                        &extensible.name,
                        TranslationIssueCode::FieldKindMismatch,
                        format!("extensible row {} has no member name", row),
                    );
                    continue;
                };
                if let Some(member) =
                    self.resolve_name(record, &extensible.name, name, &extensible.object_list)?
                {
                    members.push(member);
                }
            }
            self.set_field(
                handle,
                extensible.name.clone(),
                SourceValue::ReferenceList(members),
            );
        }

        if let Some(member_list) = &schema.member_list {
            // Fold the synthesized list record's rows back into the parent's
            // member field; the list itself never becomes a model object.
            let list_name = record
                .get(&member_list.parent_field)
                .and_then(|v| v.name_like())
                .map(str::to_owned);
            if let Some(list_name) = list_name {
                let members =
                    self.fold_member_list(record, &member_list.parent_field, &list_name)?;
                self.set_field(
                    handle,
                    member_list.member_source_field.clone(),
                    SourceValue::ReferenceList(members),
                );
            }
        }

        Ok(Some(handle))
    }

    /// Reads one scalar field off the record and writes the typed value onto
    /// the placeholder object.
    fn absorb_field(
        &mut self,
        record: &TargetRecord,
        descriptor: &FieldDescriptor,
        handle: ObjectHandle,
    ) -> Result<(), TransomError> {
        let field = descriptor.name.as_str();
        let value = match &descriptor.kind {
            FieldKind::Real => match record.get(field) {
                Some(TargetValue::Number(value)) => Some(SourceValue::Real(*value)),
                Some(TargetValue::Integer(value)) => Some(SourceValue::Real(*value as f64)),
                Some(TargetValue::Text(text))
                    if text.eq_ignore_ascii_case(AUTOSIZE_SENTINEL) =>
                {
                    if descriptor.autosizable {
                        Some(SourceValue::Autosize)
                    } else {
                        self.field_warning(
                            record,
                            field,
                            TranslationIssueCode::AutosizeNotAllowed,
                            "field is not autosizable",
                        );
                        None
                    }
                }
                Some(_) => {
                    self.field_warning(
                        record,
                        field,
                        TranslationIssueCode::FieldKindMismatch,
                        "expected a numeric value",
                    );
                    None
                }
                None => None,
            },
            FieldKind::Integer => match record.get(field) {
                Some(TargetValue::Integer(value)) => Some(SourceValue::Integer(*value)),
                Some(_) => {
                    self.field_warning(
                        record,
                        field,
                        TranslationIssueCode::FieldKindMismatch,
                        "expected an integer value",
                    );
                    None
                }
                None => None,
            },
            FieldKind::Alpha => match record.get(field) {
                Some(TargetValue::Text(text)) => Some(SourceValue::Text(text.clone())),
                Some(_) => {
                    self.field_warning(
                        record,
                        field,
                        TranslationIssueCode::FieldKindMismatch,
                        "expected a text value",
                    );
                    None
                }
                None => None,
            },
            FieldKind::YesNo => match record.get(field).and_then(|v| v.text()) {
                Some(text) if text.eq_ignore_ascii_case("Yes") => Some(SourceValue::Flag(true)),
                Some(text) if text.eq_ignore_ascii_case("No") => Some(SourceValue::Flag(false)),
                Some(text) => {
                    self.field_warning(
                        record,
                        field,
                        TranslationIssueCode::FieldKindMismatch,
                        format!("'{}' is neither Yes nor No", text),
                    );
                    None
                }
                None => {
                    if record.has_field(field) {
                        self.field_warning(
                            record,
                            field,
                            TranslationIssueCode::FieldKindMismatch,
                            "expected Yes or No",
                        );
                    }
                    None
                }
            },
            FieldKind::Choice { values } => match record.get(field).and_then(|v| v.text()) {
                Some(text) => {
                    if self.options.validate_choices && !values.iter().any(|v| v == text) {
                        self.field_warning(
                            record,
                            field,
                            TranslationIssueCode::InvalidChoiceValue,
                            format!("'{}' is not an allowed value", text),
                        );
                        None
                    } else {
                        Some(SourceValue::Text(text.to_owned()))
                    }
                }
                None => {
                    if record.has_field(field) {
                        self.field_warning(
                            record,
                            field,
                            TranslationIssueCode::FieldKindMismatch,
                            "expected a text value",
                        );
                    }
                    None
                }
            },
            FieldKind::Reference { object_list } => {
                match record.get(field).and_then(|v| v.name_like()) {
                    None => None,
                    Some(name) => {
                        let name = name.to_owned();
                        self.resolve_name(record, field, &name, object_list)?
                            .map(SourceValue::Reference)
                    }
                }
            }
        };

        if let Some(value) = value {
            self.set_field(handle, field.to_owned(), value);
        }
        Ok(())
    }

    /// Ensures the record named `name` is translated and returns the handle
    /// of the object built for it.
    fn resolve_name(
        &mut self,
        record: &TargetRecord,
        field: &str,
        name: &str,
        object_list: &str,
    ) -> Result<Option<ObjectHandle>, TransomError> {
        let workspace = self.workspace;
        let Some(target_position) = workspace.position_of(name) else {
            self.field_warning(
                record,
                field,
                TranslationIssueCode::UnresolvableReference,
                format!("no record named '{}'", name),
            );
            return Ok(None);
        };

        let target_type = &workspace.records()[target_position].object_type;
        if !self.schema.group_allows(object_list, target_type) {
            self.field_warning(
                record,
                field,
                TranslationIssueCode::UnresolvableReference,
                format!(
                    "'{}' is {} which is not in reference group '{}'",
                    name, target_type, object_list
                ),
            );
            return Ok(None);
        }

        match self.translate_record(target_position)? {
            Some(handle) => Ok(Some(handle)),
            None => {
                self.field_warning(
                    record,
                    field,
                    TranslationIssueCode::UnresolvableReference,
                    format!("record '{}' was not translated", name),
                );
                Ok(None)
            }
        }
    }

    /// Resolves the members of a synthesized list record back into handles.
    fn fold_member_list(
        &mut self,
        parent: &TargetRecord,
        parent_field: &str,
        list_name: &str,
    ) -> Result<Vec<ObjectHandle>, TransomError> {
        let workspace = self.workspace;
        let registry = self.schema;

        let Some(list_record) = workspace.find_by_name(list_name) else {
            self.field_warning(
                parent,
                parent_field,
                TranslationIssueCode::UnresolvableReference,
                format!("no member-list record named '{}'", list_name),
            );
            return Ok(Vec::new());
        };
        let Some(extensible) = registry
            .schema_for(&list_record.object_type)
            .and_then(|s| s.extensible.as_ref())
            .cloned()
        else {
            return Ok(Vec::new());
        };

        let mut members = Vec::new();
        for group in &list_record.extensions {
            let Some(name) = group.get(&extensible.name).and_then(|v| v.name_like()) else {
                continue;
            };
            let name = name.to_owned();
            if let Some(handle) =
                self.resolve_name(parent, &extensible.name, &name, &extensible.object_list)?
            {
                members.push(handle);
            }
        }
        Ok(members)
    }

    fn set_field(&mut self, handle: ObjectHandle, field: String, value: SourceValue) {
        if let Some(object) = self.model.get_mut(handle) {
            object.set_field(field, value);
        }
    }

    fn field_warning(
        &mut self,
        record: &TargetRecord,
        field: &str,
        code: TranslationIssueCode,
        message: impl Into<String>,
    ) {
        let message = message.into();
        warn!(
            "{} '{}' field '{}': {}",
            record.object_type, record.name, field, message
        );
        self.report.add(TranslationIssue::warning(
            code,
            message,
            TranslationContext::field(&record.object_type, record.name.clone(), field),
        ));
    }
}

fn is_member_list_parent_field(schema: &ObjectSchema, descriptor: &FieldDescriptor) -> bool {
    schema
        .member_list
        .as_ref()
        .is_some_and(|ml| ml.parent_field == descriptor.name)
}
