//! Instrumented algorithm contract

use crate::error::{AlgorithmError, TraceError, ValidationError};
use crate::recorder::Recorder;
use crate::step::History;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// An algorithm that narrates its own execution into a [`Recorder`].
///
/// Implementations run synchronously to completion. They must:
/// - emit before every comparison or branch whose outcome matters to a viewer
/// - emit after every mutation of the working data
/// - emit on entry and exit of each recursive or divide step
/// - emit a starting step and a final step announcing the result
/// - produce the same steps for the same input
///
/// Input checks belong in [`validate`](Self::validate), which [`record`] runs
/// before any recorder exists.
pub trait InstrumentedAlgorithm {
    /// Problem instance consumed by the algorithm
    type Input: ?Sized;
    /// State captured at each step
    type Snapshot: Clone;
    /// Final result
    type Output;

    /// Stable identifier, e.g. `merge-sort`
    fn name(&self) -> &'static str;

    /// Source listing that step highlights refer to (line 1 is index 0)
    fn source(&self) -> &'static [&'static str];

    /// Reject malformed input
    ///
    /// # Errors
    /// Returns [`ValidationError`] describing the first problem found.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Run to completion, emitting steps along the way
    ///
    /// # Errors
    /// Returns [`AlgorithmError`] when an internal assumption fails.
    fn execute(
        &self,
        input: &Self::Input,
        recorder: &mut Recorder<Self::Snapshot>,
    ) -> Result<Self::Output, AlgorithmError>;

    /// Whether the final snapshot agrees with the reported result
    fn is_consistent(&self, _last: &Self::Snapshot, _output: &Self::Output) -> bool {
        true
    }
}

/// Validate, execute and freeze one run of `algorithm`.
///
/// A panic inside the algorithm is caught and reported as
/// [`AlgorithmError::Panicked`]; no partial history is ever returned.
///
/// # Errors
/// - [`TraceError::Validation`] if the input is rejected (nothing recorded)
/// - [`TraceError::Algorithm`] if the run fails, panics, records nothing, or
///   ends on a step that contradicts its result
pub fn record<A>(
    algorithm: &A,
    input: &A::Input,
) -> Result<(History<A::Snapshot>, A::Output), TraceError>
where
    A: InstrumentedAlgorithm + ?Sized,
{
    if let Err(e) = algorithm.validate(input) {
        tracing::debug!(algorithm = algorithm.name(), error = %e, "input rejected");
        return Err(e.into());
    }

    let mut recorder = Recorder::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| algorithm.execute(input, &mut recorder)));

    let output = match outcome {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            tracing::error!(algorithm = algorithm.name(), error = %e, "recording abandoned");
            return Err(e.into());
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(algorithm = algorithm.name(), %message, "algorithm panicked");
            return Err(AlgorithmError::Panicked(message).into());
        }
    };

    match recorder.last_snapshot() {
        None => return Err(AlgorithmError::NoSteps.into()),
        Some(last) if !algorithm.is_consistent(last, &output) => {
            return Err(AlgorithmError::InconsistentResult.into());
        }
        Some(_) => {}
    }

    let (history, output) = recorder.finish(output);
    tracing::info!(
        algorithm = algorithm.name(),
        history = %history.id(),
        steps = history.len(),
        "recorded history"
    );
    Ok((history, output))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
