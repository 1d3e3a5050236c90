//! Schema registry for transom.
//!
//! The registry is the static dictionary the translators consult: for each
//! object type it holds the ordered field descriptors, the reference groups a
//! field may point into, the extensible member group a record may carry, and
//! the structural preconditions and synthesized member lists that govern
//! translation.
//!
//! # Design Principles
//!
//! 1. **Knowledge as data**: the graph walker is type-agnostic; everything it
//!    needs to know about an object type lives in an [`ObjectSchema`], so new
//!    types are added by inserting data, not by writing code.
//!
//! 2. **Consumed read-only**: the translators never mutate a registry. One
//!    registry can serve any number of translation passes.
//!
//! 3. **Permissive lookup**: a missing type or field is an answerable question
//!    (`None`), not a panic; the translators turn it into a diagnostic.

mod builtin;
pub mod io_json;
mod registry;

pub use builtin::builtin;
pub use registry::{
    ExtensibleField, FieldDescriptor, FieldKind, MemberList, ObjectSchema, ObjectType,
    Precondition, SchemaRegistry,
};
