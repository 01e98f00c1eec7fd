//! Shared input checks

use crate::problem::MAX_VALUE_MAGNITUDE;
use stepwise_trace::ValidationError;

pub(crate) fn length_within(
    what: &'static str,
    len: usize,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    if len == 0 && min > 0 {
        return Err(ValidationError::Empty { what });
    }
    if len < min || len > max {
        return Err(ValidationError::OutOfRange {
            what,
            min,
            max,
            actual: len,
        });
    }
    Ok(())
}

pub(crate) fn ascending(what: &'static str, values: &[i64]) -> Result<(), ValidationError> {
    if values.windows(2).all(|w| w[0] <= w[1]) {
        Ok(())
    } else {
        Err(ValidationError::NotSorted { what })
    }
}

pub(crate) fn magnitudes_within(
    what: &'static str,
    values: impl IntoIterator<Item = i64>,
) -> Result<(), ValidationError> {
    bounded_by(what, values, MAX_VALUE_MAGNITUDE)
}

/// Sum targets may be the sum of two bounded values.
pub(crate) fn target_within(target: i64) -> Result<(), ValidationError> {
    bounded_by("target", [target], 2 * MAX_VALUE_MAGNITUDE)
}

fn bounded_by(
    what: &'static str,
    values: impl IntoIterator<Item = i64>,
    limit: i64,
) -> Result<(), ValidationError> {
    match values.into_iter().find(|v| v.unsigned_abs() > limit.unsigned_abs()) {
        Some(v) => Err(ValidationError::Invalid(format!(
            "{what} must be within -{limit}..={limit}, got {v}"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_reports_empty() {
        assert_eq!(
            length_within("array", 0, 1, 5),
            Err(ValidationError::Empty { what: "array" })
        );
    }

    #[test]
    fn oversize_input_reports_range() {
        assert!(matches!(
            length_within("array", 9, 1, 5),
            Err(ValidationError::OutOfRange { actual: 9, .. })
        ));
        assert!(length_within("array", 5, 1, 5).is_ok());
    }

    #[test]
    fn extreme_values_are_rejected() {
        assert!(magnitudes_within("array", [-MAX_VALUE_MAGNITUDE, MAX_VALUE_MAGNITUDE]).is_ok());
        assert!(magnitudes_within("array", [1, i64::MIN]).is_err());
        assert!(magnitudes_within("array", [i64::MAX]).is_err());
        assert!(target_within(2 * MAX_VALUE_MAGNITUDE).is_ok());
        assert!(target_within(i64::MIN).is_err());
    }

    #[test]
    fn ascending_accepts_duplicates() {
        assert!(ascending("array", &[1, 1, 2]).is_ok());
        assert!(ascending("array", &[2, 1]).is_err());
    }
}
