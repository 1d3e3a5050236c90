//! Forward translation: model graph -> workspace.

use std::collections::HashSet;

use log::{debug, info, warn};

use super::idmap::IdentityMap;
use super::report::{
    TranslationContext, TranslationIssue, TranslationIssueCode, TranslationReport,
};
use super::{TranslateOptions, AUTOSIZE_SENTINEL};
use crate::error::TransomError;
use crate::model::{ModelGraph, NumericInput, ObjectHandle, SourceObject, SourceValue};
use crate::schema::{FieldDescriptor, FieldKind, MemberList, ObjectSchema, Precondition, SchemaRegistry};
use crate::workspace::{ExtensibleGroup, TargetRecord, TargetValue, Workspace};

/// The result of a forward pass: the complete workspace plus every non-fatal
/// diagnostic collected along the way.
#[derive(Clone, Debug)]
pub struct Translation {
    /// The emitted records, in first-visit order.
    pub workspace: Workspace,

    /// Source identity -> record position, for post-processing passes that
    /// need to find the record produced for a given object.
    pub identity_map: IdentityMap<ObjectHandle, usize>,

    /// Diagnostics for skipped objects and degraded fields.
    pub report: TranslationReport,
}

/// Translates a model graph into a workspace.
///
/// The translator itself is reusable; all mutable state lives in a per-pass
/// context created inside [`translate`](ForwardTranslator::translate), so one
/// translator can run any number of independent passes.
#[derive(Clone, Debug)]
pub struct ForwardTranslator<'a> {
    schema: &'a SchemaRegistry,
    options: TranslateOptions,
}

impl<'a> ForwardTranslator<'a> {
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

    /// Runs one forward pass over the whole graph.
    ///
    /// Roots are visited in the graph's insertion order; objects reached
    /// through references are translated on demand, before the record that
    /// references them is completed.
    ///
    /// # Errors
    /// Fails only on walker invariant violations
    /// ([`TransomError::DuplicateRegistration`],
    /// [`TransomError::RecursionLimitExceeded`]); no partial workspace is
    /// returned in that case.
    pub fn translate(&self, model: &ModelGraph) -> Result<Translation, TransomError> {
        ForwardPass {
            schema: self.schema,
            options: &self.options,
            model,
            records: Vec::new(),
            map: IdentityMap::new(),
            used_names: HashSet::new(),
            report: TranslationReport::new(),
            depth: 0,
        }
        .run()
    }
}

/// All mutable state of one forward pass.
struct ForwardPass<'a> {
    schema: &'a SchemaRegistry,
    options: &'a TranslateOptions,
    model: &'a ModelGraph,
    /// The emission arena; records are addressed by position until the pass
    /// completes.
    records: Vec<TargetRecord>,
    map: IdentityMap<ObjectHandle, usize>,
    used_names: HashSet<String>,
    report: TranslationReport,
    depth: usize,
}

impl<'a> ForwardPass<'a> {
    fn run(mut self) -> Result<Translation, TransomError> {
        let roots: Vec<ObjectHandle> = self.model.objects().map(|o| o.handle).collect();
        for handle in roots {
            if self.map.contains(&handle) {
                continue;
            }
            self.translate_object(handle)?;
        }

        let mut workspace = Workspace::new();
        for record in self.records {
            workspace.push(record);
        }
        debug!(
            "forward pass emitted {} record(s), {} issue(s)",
            workspace.len(),
            self.report.issues.len()
        );
        Ok(Translation {
            workspace,
            identity_map: self.map,
            report: self.report,
        })
    }

    /// Translates one object, memoized by handle.
    ///
    /// Returns the arena position of the object's record, or `None` when the
    /// object was skipped or abandoned (in which case it is also absent from
    /// the identity map).
    fn translate_object(&mut self, handle: ObjectHandle) -> Result<Option<usize>, TransomError> {
        if let Some(&position) = self.map.lookup(&handle) {
            return Ok(Some(position));
        }

        if self.depth >= self.options.max_depth {
            return Err(TransomError::RecursionLimitExceeded {
                limit: self.options.max_depth,
                report: std::mem::take(&mut self.report),
            });
        }
        self.depth += 1;
        let result = self.translate_object_inner(handle);
        self.depth -= 1;
        result
    }

    fn translate_object_inner(
        &mut self,
        handle: ObjectHandle,
    ) -> Result<Option<usize>, TransomError> {
        let model = self.model;
        let Some(object) = model.get(handle) else {
            // Resolvers check for dangling handles before recursing; a root
            // handle always resolves. Nothing to translate either way.
            return Ok(None);
        };

        let registry = self.schema;
        let Some(schema) = registry.schema_for(&object.object_type) else {
            warn!(
                "{} '{}' has no schema and will not be translated",
                object.object_type,
                source_display_name(object)
            );
            self.report.add(TranslationIssue::warning(
                TranslationIssueCode::UnknownObjectType,
                "no schema registered for this object type",
                TranslationContext::object(&object.object_type, source_display_name(object)),
            ));
            return Ok(None);
        };

        // Structural preconditions come before any registration: a skipped
        // object must be absent from both the output and the identity map.
        for precondition in &schema.preconditions {
            if !precondition_holds(object, precondition) {
                let Precondition::NonEmptyList { field } = precondition;
                info!(
                    "{} '{}' will not be translated as it has no members in '{}'",
                    object.object_type,
                    source_display_name(object),
                    field
                );
                self.report.add(TranslationIssue::info(
                    TranslationIssueCode::SkippedNoOp,
                    format!("not translated: no members in '{}'", field),
                    TranslationContext::object(&object.object_type, source_display_name(object)),
                ));
                return Ok(None);
            }
        }

        // Required fields are pre-scanned so an incomplete object is
        // abandoned before it is registered; siblings keep translating.
        if let Some(descriptor) = missing_required_field(object, schema) {
            warn!(
                "{} '{}' is missing required field '{}' and will not be translated",
                object.object_type,
                source_display_name(object),
                descriptor.name
            );
            self.report.add(TranslationIssue::warning(
                TranslationIssueCode::MissingRequiredField,
                format!("required field '{}' has no value", descriptor.name),
                TranslationContext::object(&object.object_type, source_display_name(object)),
            ));
            return Ok(None);
        }

        // Placeholder first, population second: the record's name exists in
        // the identity map before any reference is chased, so a cycle back to
        // this object resolves immediately instead of recursing.
        let name = self.record_name(object);
        let position = self.records.len();
        self.records
            .push(TargetRecord::new(object.object_type.clone(), name));
        if self.map.register(handle, position).is_err() {
            let record = &self.records[position];
            return Err(TransomError::DuplicateRegistration {
                object_type: record.object_type.clone(),
                name: record.name.clone(),
                report: std::mem::take(&mut self.report),
            });
        }

        for descriptor in &schema.fields {
            // The member-list parent field is synthesized below, never read
            // from the source.
            if is_member_list_parent_field(schema, descriptor) {
                continue;
            }
            self.project_field(object, descriptor, position)?;
        }

        if let Some(extensible) = &schema.extensible {
            let members: Vec<ObjectHandle> = object
                .reference_list(&extensible.name)
                .unwrap_or(&[])
                .to_vec();
            for member in members {
                if let Some(member_name) = self.resolve_handle(
                    object,
                    &extensible.name,
                    member,
                    &extensible.object_list,
                )? {
                    self.records[position].push_extensible(
                        ExtensibleGroup::new()
                            .with_value(extensible.name.clone(), TargetValue::Reference(member_name)),
                    );
                }
            }
        }

        if let Some(member_list) = &schema.member_list {
            self.emit_member_list(object, member_list, position)?;
        }

        Ok(Some(position))
    }

    /// Projects one scalar field into the record at `position`.
    fn project_field(
        &mut self,
        object: &SourceObject,
        descriptor: &FieldDescriptor,
        position: usize,
    ) -> Result<(), TransomError> {
        let field = descriptor.name.as_str();
        let value = match &descriptor.kind {
            FieldKind::Real => match object.numeric_input(field) {
                NumericInput::Explicit(value) => Some(TargetValue::Number(value)),
                NumericInput::Autosized => {
                    if descriptor.autosizable {
                        Some(TargetValue::Text(AUTOSIZE_SENTINEL.into()))
                    } else {
                        self.field_warning(
                            object,
                            field,
                            TranslationIssueCode::AutosizeNotAllowed,
                            "field is not autosizable",
                        );
                        None
                    }
                }
                NumericInput::Unset => {
                    if object.field(field).is_some() {
                        self.field_warning(
                            object,
                            field,
                            TranslationIssueCode::FieldKindMismatch,
                            "expected a numeric value",
                        );
                    }
                    None
                }
            },
            FieldKind::Integer => match object.field(field) {
                Some(SourceValue::Integer(value)) => Some(TargetValue::Integer(*value)),
                Some(_) => {
                    self.field_warning(
                        object,
                        field,
                        TranslationIssueCode::FieldKindMismatch,
                        "expected an integer value",
                    );
                    None
                }
                None => None,
            },
            FieldKind::Alpha => match object.field(field) {
                Some(SourceValue::Text(text)) => Some(TargetValue::Text(text.clone())),
                Some(_) => {
                    self.field_warning(
                        object,
                        field,
                        TranslationIssueCode::FieldKindMismatch,
                        "expected a text value",
                    );
                    None
                }
                None => None,
            },
            FieldKind::YesNo => match object.field(field) {
                Some(SourceValue::Flag(flag)) => Some(TargetValue::Text(
                    if *flag { "Yes" } else { "No" }.into(),
                )),
                Some(_) => {
                    self.field_warning(
                        object,
                        field,
                        TranslationIssueCode::FieldKindMismatch,
                        "expected a boolean value",
                    );
                    None
                }
                None => None,
            },
            FieldKind::Choice { values } => match object.field(field) {
                Some(SourceValue::Text(text)) => {
                    if self.options.validate_choices && !values.iter().any(|v| v == text) {
                        self.field_warning(
                            object,
                            field,
                            TranslationIssueCode::InvalidChoiceValue,
                            format!("'{}' is not an allowed value", text),
                        );
                        None
                    } else {
                        Some(TargetValue::Text(text.clone()))
                    }
                }
                Some(_) => {
                    self.field_warning(
                        object,
                        field,
                        TranslationIssueCode::FieldKindMismatch,
                        "expected a text value",
                    );
                    None
                }
                None => None,
            },
            FieldKind::Reference { object_list } => {
                match object.reference(field) {
                    // Optional references are commonly unset; nothing to do.
                    None => None,
                    Some(target) => self
                        .resolve_handle(object, field, target, object_list)?
                        .map(TargetValue::Reference),
                }
            }
        };

        if let Some(value) = value {
            self.records[position].set(field, value);
        }
        Ok(())
    }

    /// Ensures `target` is translated and returns its record name.
    ///
    /// This is the translate-on-demand step that gives
    /// referenced-before-referencer ordering: a target not yet in the
    /// identity map is translated (and emitted) here, before the caller's
    /// field is written.
    fn resolve_handle(
        &mut self,
        object: &SourceObject,
        field: &str,
        target: ObjectHandle,
        object_list: &str,
    ) -> Result<Option<String>, TransomError> {
        let model = self.model;
        let Some(target_object) = model.get(target) else {
            self.field_warning(
                object,
                field,
                TranslationIssueCode::UnresolvableReference,
                "reference points at an object not in the graph",
            );
            return Ok(None);
        };

        if !self.schema.group_allows(object_list, &target_object.object_type) {
            self.field_warning(
                object,
                field,
                TranslationIssueCode::UnresolvableReference,
                format!(
                    "resolves to {} which is not in reference group '{}'",
                    target_object.object_type, object_list
                ),
            );
            return Ok(None);
        }

        match self.translate_object(target)? {
            Some(position) => Ok(Some(self.records[position].name.clone())),
            None => {
                self.field_warning(
                    object,
                    field,
                    TranslationIssueCode::UnresolvableReference,
                    format!(
                        "referenced {} '{}' was not translated",
                        target_object.object_type,
                        source_display_name(target_object)
                    ),
                );
                Ok(None)
            }
        }
    }

    /// Emits the synthesized aggregate list record for `object`.
    ///
    /// Members are translated first so the list's group rows only ever name
    /// records that already exist; the list itself lands after them in the
    /// emission sequence.
    fn emit_member_list(
        &mut self,
        object: &SourceObject,
        member_list: &MemberList,
        parent_position: usize,
    ) -> Result<(), TransomError> {
        let registry = self.schema;
        let Some(extensible) = registry
            .schema_for(&member_list.list_type)
            .and_then(|s| s.extensible.as_ref())
        else {
            self.report.add(TranslationIssue::warning(
                TranslationIssueCode::UnknownObjectType,
                format!(
                    "list type '{}' declares no extensible group",
                    member_list.list_type
                ),
                TranslationContext::object(&object.object_type, source_display_name(object)),
            ));
            return Ok(());
        };

        let members: Vec<ObjectHandle> = object
            .reference_list(&member_list.member_source_field)
            .unwrap_or(&[])
            .to_vec();

        let mut member_names = Vec::new();
        for member in members {
            match self.resolve_handle(
                object,
                &member_list.member_source_field,
                member,
                &extensible.object_list,
            )? {
                Some(name) => member_names.push(name),
                None => debug!(
                    "member list '{}' drops an untranslated member",
                    member_list.member_source_field
                ),
            }
        }

        let parent_name = self.records[parent_position].name.clone();
        let list_name = self.uniquify(format!("{}{}", parent_name, member_list.name_suffix));

        let mut list_record = TargetRecord::new(member_list.list_type.clone(), list_name.clone());
        for name in member_names {
            list_record.push_extensible(
                ExtensibleGroup::new()
                    .with_value(extensible.name.clone(), TargetValue::Reference(name)),
            );
        }
        self.records.push(list_record);

        // The list lands after its parent in the emission sequence, so the
        // parent carries the list's name as plain text rather than a
        // reference; this is the one tolerated forward reference.
        self.records[parent_position].set(
            member_list.parent_field.clone(),
            TargetValue::Text(list_name),
        );
        Ok(())
    }

    /// Picks the record name for an object: its source name when present,
    /// otherwise a generated one; either way uniquified across the pass.
    fn record_name(&mut self, object: &SourceObject) -> String {
        let base = match object.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{} {}", object.object_type, self.records.len() + 1),
        };
        self.uniquify(base)
    }

    fn uniquify(&mut self, base: String) -> String {
        let mut name = base.clone();
        let mut counter = 1;
        while !self.used_names.insert(name.clone()) {
            name = format!("{} {}", base, counter);
            counter += 1;
        }
        name
    }

    fn field_warning(
        &mut self,
        object: &SourceObject,
        field: &str,
        code: TranslationIssueCode,
        message: impl Into<String>,
    ) {
        let message = message.into();
        warn!(
            "{} '{}' field '{}': {}",
            object.object_type,
            source_display_name(object),
            field,
            message
        );
        self.report.add(TranslationIssue::warning(
            code,
            message,
            TranslationContext::field(&object.object_type, source_display_name(object), field),
        ));
    }
}

fn precondition_holds(object: &SourceObject, precondition: &Precondition) -> bool {
    match precondition {
        Precondition::NonEmptyList { field } => object
            .reference_list(field)
            .is_some_and(|list| !list.is_empty()),
    }
}

fn missing_required_field<'s>(
    object: &SourceObject,
    schema: &'s ObjectSchema,
) -> Option<&'s FieldDescriptor> {
    schema.fields.iter().find(|descriptor| {
        descriptor.required
            && !is_member_list_parent_field(schema, descriptor)
            && object.field(&descriptor.name).is_none()
    })
}

fn is_member_list_parent_field(schema: &ObjectSchema, descriptor: &FieldDescriptor) -> bool {
    schema
        .member_list
        .as_ref()
        .is_some_and(|ml| ml.parent_field == descriptor.name)
}

fn source_display_name(object: &SourceObject) -> String {
    object
        .name
        .clone()
        .unwrap_or_else(|| object.handle.to_string())
}
