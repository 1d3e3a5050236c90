//! The graph translator core.
//!
//! Both directions share one design: a per-pass context owning an identity
//! map and an emission arena, a recursive walker that registers a placeholder
//! for every object *before* populating its fields (so reference cycles
//! resolve to the placeholder's name instead of recursing forever), a field
//! projector applying per-kind policy, and a reference resolver that
//! translates referenced objects on demand. Memoization makes every object
//! translate at most once; translate-on-demand makes every record appear
//! before the records that reference it.
//!
//! Forward: [`ForwardTranslator`] walks a [`crate::model::ModelGraph`] and
//! produces a [`crate::workspace::Workspace`]. Reverse:
//! [`ReverseTranslator`] walks a workspace and rebuilds a model graph.
//!
//! Non-fatal problems (a skipped object, an unresolvable reference, a missing
//! required field) degrade only the offending object or field and are
//! collected in a [`TranslationReport`]; walker invariant violations abort
//! the pass with no partial output.

mod forward;
mod idmap;
pub mod report;
mod reverse;

pub use forward::{ForwardTranslator, Translation};
pub use idmap::{DuplicateRegistration, IdentityMap};
pub use report::{
    TranslationContext, TranslationIssue, TranslationIssueCode, TranslationReport,
    TranslationSeverity,
};
pub use reverse::{ReverseTranslation, ReverseTranslator};

/// The literal written in place of a number when a source field is autosized,
/// and recognized (case-insensitively) when reading the flat format back.
pub const AUTOSIZE_SENTINEL: &str = "Autosize";

/// Options shared by both translation directions.
#[derive(Clone, Debug)]
pub struct TranslateOptions {
    /// Bound on the reference-chain recursion depth. Exceeding it aborts the
    /// pass with [`crate::TransomError::RecursionLimitExceeded`] instead of
    /// overflowing the call stack.
    pub max_depth: usize,

    /// Re-validate choice fields against the schema's enumerated values.
    ///
    /// Off by default: the source is assumed to have validated its own
    /// enumerations.
    pub validate_choices: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            max_depth: 128,
            validate_choices: false,
        }
    }
}
