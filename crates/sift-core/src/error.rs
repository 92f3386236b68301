use thiserror::Error as ThisError;

///
/// FilterError
///
/// Structured rejection of a single filter condition. Compilation aborts
/// at the first one; callers surface it as a client input error (400),
/// never as a server fault.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("invalid filter for field '{field}' (operator '{operator}'): {cause}")]
pub struct FilterError {
    pub field: String,
    pub operator: String,
    pub cause: FilterErrorCause,
}

impl FilterError {
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        cause: FilterErrorCause,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            cause,
        }
    }
}

///
/// FilterErrorCause
///
/// Why a condition was rejected. All causes share the [`FilterError`]
/// surface; messages carry the distinction.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum FilterErrorCause {
    #[error("missing 'values' array")]
    MissingValues,

    #[error("a valid value is required")]
    MissingValue,

    #[error("requires two valid values")]
    RequiresTwoValues,

    #[error("invalid date format provided")]
    InvalidDate,

    #[error("requires at least one valid value")]
    EmptyValueSet,

    #[error("only valid for array fields")]
    NotAnArrayField,

    #[error("unknown filter operator")]
    UnknownOperator,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_field_operator_and_cause() {
        let err = FilterError::new("createdAt", "between", FilterErrorCause::InvalidDate);

        assert_eq!(
            err.to_string(),
            "invalid filter for field 'createdAt' (operator 'between'): \
             invalid date format provided"
        );
    }
}
