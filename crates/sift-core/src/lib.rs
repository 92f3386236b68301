//! Core compiler for sift: typed filter conditions in, a backend-agnostic
//! query predicate out.
//!
//! Callers hand over a list of [`condition::FilterCondition`]s (typically
//! deserialized from a request body) together with a [`types::FieldTypeMap`]
//! declaring the semantic type of each searchable field. [`compile::compile`]
//! validates every condition against the operator catalog and folds the
//! results into a single [`predicate::Predicate`] conjunction, or stops at
//! the first invalid condition with a structured [`error::FilterError`].
//!
//! The predicate AST is store-agnostic; backend crates (such as
//! `sift-mongo`) render it into the query language of a concrete store.

// public exports are one module level down
pub mod catalog;
pub mod compile;
pub mod condition;
pub mod error;
pub mod predicate;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        compile::compile,
        condition::FilterCondition,
        error::{FilterError, FilterErrorCause},
        predicate::Predicate,
        types::{FieldType, FieldTypeMap},
        value::Value,
    };
}
