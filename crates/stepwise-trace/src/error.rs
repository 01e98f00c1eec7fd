//! Error types for recording
//!
//! Two failure classes exist:
//! - Validation errors: the input is unusable, nothing was recorded
//! - Algorithm errors: the run itself broke an internal assumption and is
//!   abandoned as a whole

/// Malformed problem input, raised before the first step is emitted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Input has no elements where at least one is required
    #[error("{what} must not be empty")]
    Empty {
        /// Name of the empty input
        what: &'static str,
    },

    /// A size or value falls outside the supported bounds
    #[error("{what} must be between {min} and {max}, got {actual}")]
    OutOfRange {
        /// Name of the bounded quantity
        what: &'static str,
        /// Inclusive lower bound
        min: usize,
        /// Inclusive upper bound
        max: usize,
        /// Value that was supplied
        actual: usize,
    },

    /// Input must be sorted ascending
    #[error("{what} must be sorted in ascending order")]
    NotSorted {
        /// Name of the unsorted input
        what: &'static str,
    },

    /// Two parallel inputs differ in length
    #[error("{left} has {left_len} entries but {right} has {right_len}")]
    LengthMismatch {
        /// First input name
        left: &'static str,
        /// First input length
        left_len: usize,
        /// Second input name
        right: &'static str,
        /// Second input length
        right_len: usize,
    },

    /// Problem shape does not fit the selected algorithm
    #[error("{algorithm} expects {expected} input, got {actual}")]
    ProblemMismatch {
        /// Algorithm name
        algorithm: &'static str,
        /// Expected problem kind
        expected: &'static str,
        /// Supplied problem kind
        actual: &'static str,
    },

    /// Any other malformed input
    #[error("invalid input: {0}")]
    Invalid(String),
}

/// Internal failure while an algorithm was executing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlgorithmError {
    /// An assumption the algorithm relies on did not hold
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// The algorithm panicked
    #[error("algorithm panicked: {0}")]
    Panicked(String),

    /// The run finished without a single step
    #[error("algorithm emitted no steps")]
    NoSteps,

    /// The last step disagrees with the reported result
    #[error("final step does not match the reported result")]
    InconsistentResult,
}

/// Error returned by [`record`](crate::record)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    /// Input rejected before recording began
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Recording was abandoned
    #[error("algorithm failed: {0}")]
    Algorithm(#[from] AlgorithmError),
}

impl TraceError {
    /// The user can fix this by correcting the input and retrying
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_recoverable() {
        let err: TraceError = ValidationError::Empty { what: "array" }.into();
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "validation failed: array must not be empty");
    }

    #[test]
    fn algorithm_errors_are_fatal() {
        let err: TraceError = AlgorithmError::Invariant("index 7 out of bounds".into()).into();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn out_of_range_message() {
        let err = ValidationError::OutOfRange {
            what: "array length",
            min: 1,
            max: 50,
            actual: 80,
        };
        assert_eq!(err.to_string(), "array length must be between 1 and 50, got 80");
    }
}
