//! Translation report types for structured diagnostics.
//!
//! Non-fatal translation problems degrade a single object or field; the pass
//! continues and the caller receives every diagnostic alongside the output.
//! Fatal problems carry the report collected up to the abort.

use serde::Serialize;
use std::fmt;

use crate::schema::ObjectType;

/// All diagnostics collected during one translation pass.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TranslationReport {
    /// All issues, in the order they were found.
    pub issues: Vec<TranslationIssue>,
}

impl TranslationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: TranslationIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == TranslationSeverity::Warning)
            .count()
    }

    /// Returns the number of informational notes in the report.
    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == TranslationSeverity::Info)
            .count()
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Iterates issues with the given code.
    pub fn issues_with_code(
        &self,
        code: TranslationIssueCode,
    ) -> impl Iterator<Item = &TranslationIssue> {
        self.issues.iter().filter(move |i| i.code == code)
    }
}

impl fmt::Display for TranslationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Translation completed: no issues found");
        }

        writeln!(
            f,
            "Translation completed with {} warning(s) and {} note(s):",
            self.warning_count(),
            self.info_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single translation issue.
#[derive(Clone, Debug, Serialize)]
pub struct TranslationIssue {
    /// The severity of the issue.
    pub severity: TranslationSeverity,

    /// A stable code for the issue type.
    pub code: TranslationIssueCode,

    /// A human-readable description of the issue.
    pub message: String,

    /// Where the issue occurred.
    pub context: TranslationContext,
}

impl TranslationIssue {
    /// Creates a new issue.
    pub fn new(
        severity: TranslationSeverity,
        code: TranslationIssueCode,
        message: impl Into<String>,
        context: TranslationContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    /// Creates a new warning.
    pub fn warning(
        code: TranslationIssueCode,
        message: impl Into<String>,
        context: TranslationContext,
    ) -> Self {
        Self::new(TranslationSeverity::Warning, code, message, context)
    }

    /// Creates a new informational note.
    pub fn info(
        code: TranslationIssueCode,
        message: impl Into<String>,
        context: TranslationContext,
    ) -> Self {
        Self::new(TranslationSeverity::Info, code, message, context)
    }
}

impl fmt::Display for TranslationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            TranslationSeverity::Warning => "WARN ",
            TranslationSeverity::Info => "INFO ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of a translation issue.
///
/// There is no error severity: anything worse than a warning aborts the pass
/// through [`crate::TransomError`] instead of landing in the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TranslationSeverity {
    /// An expected, by-policy outcome worth surfacing (e.g. a skipped
    /// object).
    Info,
    /// Data was degraded: a field left unset or an object left out.
    Warning,
}

/// A stable code identifying the type of translation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TranslationIssueCode {
    /// A structural precondition failed; the object was left out of the
    /// output and out of the identity map.
    SkippedNoOp,
    /// A required field had no source value; the object was abandoned.
    MissingRequiredField,
    /// A reference was dangling, of the wrong type, or its target was
    /// skipped; the field was left unset.
    UnresolvableReference,
    /// A choice value failed re-validation; the field was left unset.
    InvalidChoiceValue,
    /// The source marked a non-autosizable field autosized; the field was
    /// left unset.
    AutosizeNotAllowed,
    /// A source value did not match the field's declared kind; the field was
    /// left unset.
    FieldKindMismatch,
    /// No schema is registered for the object's type; the object was left
    /// out.
    UnknownObjectType,
}

/// Where a translation issue occurred.
#[derive(Clone, Debug, Serialize)]
pub enum TranslationContext {
    /// The pass as a whole.
    Pass,
    /// A specific object or record.
    Object {
        object_type: ObjectType,
        name: String,
    },
    /// A specific field of an object or record.
    Field {
        object_type: ObjectType,
        name: String,
        field: String,
    },
}

impl TranslationContext {
    /// Context for an object.
    pub fn object(object_type: &ObjectType, name: impl Into<String>) -> Self {
        Self::Object {
            object_type: object_type.clone(),
            name: name.into(),
        }
    }

    /// Context for a field of an object.
    pub fn field(
        object_type: &ObjectType,
        name: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::Field {
            object_type: object_type.clone(),
            name: name.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for TranslationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationContext::Pass => write!(f, "pass"),
            TranslationContext::Object { object_type, name } => {
                write!(f, "{} '{}'", object_type, name)
            }
            TranslationContext::Field {
                object_type,
                name,
                field,
            } => write!(f, "{} '{}' field '{}'", object_type, name, field),
        }
    }
}
