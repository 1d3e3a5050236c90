//! Model validation for transom.
//!
//! This module provides pre-flight validation of a model graph against a
//! schema registry, checking for:
//! - Structural integrity (known types, valid references)
//! - Data quality (required fields present, values of the declared kind)
//! - Translation hazards (empty member lists, duplicate names)
//!
//! Validation never mutates the graph and finds everything the translator
//! would later degrade, so hosts can fail fast before a pass.

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::HashMap;

use crate::model::{ModelGraph, NumericInput, ObjectHandle, SourceObject, SourceValue};
use crate::schema::{FieldKind, ObjectSchema, Precondition, SchemaRegistry};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates a model graph against a schema registry and returns a report of
/// all issues found.
pub fn validate_model(
    graph: &ModelGraph,
    registry: &SchemaRegistry,
    _opts: &ValidateOptions,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_names(graph, &mut report);

    for object in graph.objects() {
        let Some(schema) = registry.schema_for(&object.object_type) else {
            report.add(ValidationIssue::error(
                IssueCode::UnknownObjectType,
                format!("no schema registered for type '{}'", object.object_type),
                object_context(object),
            ));
            continue;
        };

        validate_fields(graph, registry, object, schema, &mut report);
        validate_structure(object, schema, &mut report);
    }

    report
}

/// Flags names shared by more than one object.
fn validate_names(graph: &ModelGraph, report: &mut ValidationReport) {
    let mut seen: HashMap<&str, ObjectHandle> = HashMap::new();

    for object in graph.objects() {
        let Some(name) = object.name.as_deref() else {
            continue;
        };
        if let Some(first) = seen.get(name) {
            report.add(ValidationIssue::warning(
                IssueCode::DuplicateObjectName,
                format!(
                    "name '{}' is also used by object {}; translation will uniquify",
                    name, first
                ),
                object_context(object),
            ));
        } else {
            seen.insert(name, object.handle);
        }
    }
}

/// Validates every field an object carries and every field the schema
/// requires.
fn validate_fields(
    graph: &ModelGraph,
    registry: &SchemaRegistry,
    object: &SourceObject,
    schema: &ObjectSchema,
    report: &mut ValidationReport,
) {
    for descriptor in &schema.fields {
        let field = descriptor.name.as_str();
        let synthesized = schema
            .member_list
            .as_ref()
            .is_some_and(|ml| ml.parent_field == field);

        if descriptor.required && !synthesized && object.field(field).is_none() {
            report.add(ValidationIssue::error(
                IssueCode::MissingRequiredField,
                "required field has no value",
                field_context(object, field),
            ));
            continue;
        }
        let Some(value) = object.field(field) else {
            continue;
        };

        match &descriptor.kind {
            FieldKind::Real => match object.numeric_input(field) {
                NumericInput::Autosized if !descriptor.autosizable => {
                    report.add(ValidationIssue::error(
                        IssueCode::AutosizeNotAllowed,
                        "field is not autosizable",
                        field_context(object, field),
                    ));
                }
                NumericInput::Unset => {
                    report.add(ValidationIssue::error(
                        IssueCode::FieldKindMismatch,
                        "expected a numeric value",
                        field_context(object, field),
                    ));
                }
                _ => {}
            },
            FieldKind::Integer => {
                if object.integer(field).is_none() {
                    report.add(ValidationIssue::error(
                        IssueCode::FieldKindMismatch,
                        "expected an integer value",
                        field_context(object, field),
                    ));
                }
            }
            FieldKind::Alpha => {
                if object.text(field).is_none() {
                    report.add(ValidationIssue::error(
                        IssueCode::FieldKindMismatch,
                        "expected a text value",
                        field_context(object, field),
                    ));
                }
            }
            FieldKind::YesNo => {
                if object.flag(field).is_none() {
                    report.add(ValidationIssue::error(
                        IssueCode::FieldKindMismatch,
                        "expected a boolean value",
                        field_context(object, field),
                    ));
                }
            }
            FieldKind::Choice { values } => match object.text(field) {
                Some(text) => {
                    if !values.iter().any(|v| v == text) {
                        report.add(ValidationIssue::error(
                            IssueCode::InvalidChoiceValue,
                            format!("'{}' is not an allowed value", text),
                            field_context(object, field),
                        ));
                    }
                }
                None => {
                    report.add(ValidationIssue::error(
                        IssueCode::FieldKindMismatch,
                        "expected a text value",
                        field_context(object, field),
                    ));
                }
            },
            FieldKind::Reference { object_list } => match value {
                SourceValue::Reference(target) => {
                    validate_reference(graph, registry, object, field, *target, object_list, report);
                }
                _ => {
                    report.add(ValidationIssue::error(
                        IssueCode::FieldKindMismatch,
                        "expected a reference value",
                        field_context(object, field),
                    ));
                }
            },
        }
    }

    // Fields the schema knows nothing about never reach the output; flag
    // them so typos are caught early. Source-only list fields are exempt.
    for field in object.fields.keys() {
        let declared = schema.field_named(field).is_some()
            || schema.extensible.as_ref().is_some_and(|e| &e.name == field)
            || schema
                .member_list
                .as_ref()
                .is_some_and(|ml| &ml.member_source_field == field)
            || schema.preconditions.iter().any(|p| {
                let Precondition::NonEmptyList { field: list } = p;
                list == field
            });
        if !declared {
            report.add(ValidationIssue::warning(
                IssueCode::UnknownField,
                "field is not declared by the schema and will not be translated",
                field_context(object, field),
            ));
        }
    }

    // Member and extensible lists are reference lists; validate each entry.
    let list_fields = schema
        .extensible
        .as_ref()
        .map(|e| (e.name.clone(), e.object_list.clone()))
        .into_iter()
        .chain(schema.member_list.as_ref().and_then(|ml| {
            let ext = registry
                .schema_for(&ml.list_type)
                .and_then(|s| s.extensible.as_ref())?;
            Some((ml.member_source_field.clone(), ext.object_list.clone()))
        }));
    for (field, object_list) in list_fields {
        let Some(members) = object.reference_list(&field) else {
            continue;
        };
        for member in members {
            validate_reference(graph, registry, object, &field, *member, &object_list, report);
        }
    }
}

fn validate_reference(
    graph: &ModelGraph,
    registry: &SchemaRegistry,
    object: &SourceObject,
    field: &str,
    target: ObjectHandle,
    object_list: &str,
    report: &mut ValidationReport,
) {
    let Some(target_object) = graph.get(target) else {
        report.add(ValidationIssue::error(
            IssueCode::DanglingReference,
            format!("reference {} is not in the graph", target),
            field_context(object, field),
        ));
        return;
    };
    if !registry.group_allows(object_list, &target_object.object_type) {
        report.add(ValidationIssue::error(
            IssueCode::ReferenceWrongType,
            format!(
                "resolves to {} which is not in reference group '{}'",
                target_object.object_type, object_list
            ),
            field_context(object, field),
        ));
    }
}

/// Flags structural preconditions that would make translation skip the
/// object.
fn validate_structure(
    object: &SourceObject,
    schema: &ObjectSchema,
    report: &mut ValidationReport,
) {
    for precondition in &schema.preconditions {
        let Precondition::NonEmptyList { field } = precondition;
        let empty = object
            .reference_list(field)
            .map(|list| list.is_empty())
            .unwrap_or(true);
        if empty {
            report.add(ValidationIssue::warning(
                IssueCode::EmptyMemberList,
                format!("'{}' has no members; translation will skip this object", field),
                object_context(object),
            ));
        }
    }
}

fn object_context(object: &SourceObject) -> IssueContext {
    IssueContext::Object {
        handle: object.handle,
        name: display_name(object),
    }
}

fn field_context(object: &SourceObject, field: &str) -> IssueContext {
    IssueContext::Field {
        handle: object.handle,
        name: display_name(object),
        field: field.to_string(),
    }
}

fn display_name(object: &SourceObject) -> String {
    object
        .name
        .clone()
        .unwrap_or_else(|| object.handle.to_string())
}
