use crate::{
    catalog::{self, Operator},
    condition::FilterCondition,
    error::{FilterError, FilterErrorCause},
    predicate::Predicate,
    types::FieldTypeMap,
};

///
/// Filter Compilation
///
/// Folds a list of conditions into one conjunction. Validation is
/// fail-fast: the first invalid condition aborts the whole compilation,
/// so a rejected filter can never degrade into an unfiltered query.
///

/// Compile client-supplied filter conditions against a field type map.
///
/// The empty list compiles to [`Predicate::True`]. The values-array gate
/// runs before the operator name is resolved; an unknown operator with no
/// values is reported as missing values, not as unknown.
///
/// # Errors
///
/// Returns the first [`FilterError`] encountered, tagged with the
/// offending field and operator name.
pub fn compile(
    conditions: &[FilterCondition],
    types: &FieldTypeMap,
) -> Result<Predicate, FilterError> {
    if conditions.is_empty() {
        return Ok(Predicate::True);
    }

    let mut parts = Vec::with_capacity(conditions.len());
    for condition in conditions {
        parts.push(compile_one(condition, types)?);
    }

    Ok(Predicate::And(parts))
}

fn compile_one(
    condition: &FilterCondition,
    types: &FieldTypeMap,
) -> Result<Predicate, FilterError> {
    let reject = |cause| FilterError::new(&condition.field, &condition.operator, cause);

    if !catalog::is_nullary_name(&condition.operator) && condition.values.is_empty() {
        return Err(reject(FilterErrorCause::MissingValues));
    }

    let op = Operator::parse(&condition.operator)
        .ok_or_else(|| reject(FilterErrorCause::UnknownOperator))?;

    catalog::apply(
        op,
        &condition.field,
        types.field_type(&condition.field),
        &condition.values,
    )
    .map_err(reject)
}
