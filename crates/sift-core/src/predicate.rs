use crate::value::Value;
use std::ops::{BitAnd, BitOr};

///
/// Predicate AST
///
/// Pure, store-agnostic representation of compiled filters. This layer
/// carries no type validation and no execution semantics; the operator
/// catalog decides what gets built, and backend crates decide how each
/// node renders in a concrete query language.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, PartialEq)]
pub struct ComparePredicate {
    pub field: String,
    pub op: CompareOp,
    pub value: Value,
}

impl ComparePredicate {
    #[must_use]
    pub fn new(field: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }
}

///
/// RegexMatch
///
/// Case-insensitive pattern fragment. Constructors escape the needle
/// before embedding, so user-controlled filter text can never inject
/// pattern syntax.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegexMatch {
    pub field: String,
    pub pattern: String,
    pub case_insensitive: bool,
}

impl RegexMatch {
    fn new(field: impl Into<String>, pattern: String) -> Self {
        Self {
            field: field.into(),
            pattern,
            case_insensitive: true,
        }
    }

    /// Unanchored substring match.
    #[must_use]
    pub fn substring(field: impl Into<String>, needle: &str) -> Self {
        Self::new(field, regex::escape(needle))
    }

    /// Match anchored at the start of the field.
    #[must_use]
    pub fn prefix(field: impl Into<String>, needle: &str) -> Self {
        Self::new(field, format!("^{}", regex::escape(needle)))
    }

    /// Match anchored at the end of the field.
    #[must_use]
    pub fn suffix(field: impl Into<String>, needle: &str) -> Self {
        Self::new(field, format!("{}$", regex::escape(needle)))
    }
}

///
/// Predicate
///
/// `True` is the neutral element: the empty conjunction compiles to it.
/// `Range` is inclusive on both bounds. `IsMissing` matches null/absent
/// fields, plus the empty string when the field is typed as text.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    True,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
    Range {
        field: String,
        min: Value,
        max: Value,
    },
    In {
        field: String,
        values: Vec<Value>,
    },
    NotIn {
        field: String,
        values: Vec<Value>,
    },
    ContainsAll {
        field: String,
        values: Vec<Value>,
    },
    Regex(RegexMatch),
    IsMissing {
        field: String,
        include_empty_text: bool,
    },
}

impl Predicate {
    #[must_use]
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Eq, value))
    }

    #[must_use]
    pub fn ne(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Ne, value))
    }

    #[must_use]
    pub fn lt(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Lt, value))
    }

    #[must_use]
    pub fn lte(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Lte, value))
    }

    #[must_use]
    pub fn gt(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Gt, value))
    }

    #[must_use]
    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Gte, value))
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}
