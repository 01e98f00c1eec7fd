use proptest::prelude::*;
use stepwise_trace::*;

/// Finds the maximum of a slice, one comparison per step.
struct RunningMax;

#[derive(Debug, Clone, PartialEq)]
struct MaxState {
    best: Option<i64>,
    index: Option<usize>,
}

const MAX_SOURCE: &[&str] = &[
    "best = a[0]",
    "for x in a[1..]:",
    "  if x > best: best = x",
    "return best",
];

impl InstrumentedAlgorithm for RunningMax {
    type Input = [i64];
    type Snapshot = MaxState;
    type Output = i64;

    fn name(&self) -> &'static str {
        "running-max"
    }

    fn source(&self) -> &'static [&'static str] {
        MAX_SOURCE
    }

    fn validate(&self, input: &[i64]) -> Result<(), ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::Empty { what: "array" });
        }
        Ok(())
    }

    fn execute(&self, input: &[i64], recorder: &mut Recorder<MaxState>) -> Result<i64, AlgorithmError> {
        let mut state = MaxState {
            best: Some(input[0]),
            index: Some(0),
        };
        recorder.emit(&state, format!("Start with {}", input[0]), &[1]);
        for (i, &x) in input.iter().enumerate().skip(1) {
            state.index = Some(i);
            let best = state.best.unwrap_or(x);
            if x > best {
                state.best = Some(x);
                recorder.emit(&state, format!("{x} beats {best}"), &[3]);
            } else {
                recorder.emit(&state, format!("{x} does not beat {best}"), &[3]);
            }
        }
        let best = state.best.ok_or_else(|| AlgorithmError::Invariant("no maximum".into()))?;
        state.index = None;
        recorder.emit(&state, format!("Maximum is {best}"), &[4]);
        Ok(best)
    }

    fn is_consistent(&self, last: &MaxState, output: &i64) -> bool {
        last.best == Some(*output)
    }
}

struct Panicking;

impl InstrumentedAlgorithm for Panicking {
    type Input = ();
    type Snapshot = u8;
    type Output = ();

    fn name(&self) -> &'static str {
        "panicking"
    }

    fn source(&self) -> &'static [&'static str] {
        &[]
    }

    fn validate(&self, _input: &()) -> Result<(), ValidationError> {
        Ok(())
    }

    fn execute(&self, _input: &(), recorder: &mut Recorder<u8>) -> Result<(), AlgorithmError> {
        recorder.emit(&1, "about to fail", &[]);
        let v: Vec<u8> = Vec::new();
        let value = v[3];
        recorder.emit(&value, "unreachable", &[]);
        Ok(())
    }
}

struct Silent;

impl InstrumentedAlgorithm for Silent {
    type Input = ();
    type Snapshot = u8;
    type Output = u8;

    fn name(&self) -> &'static str {
        "silent"
    }

    fn source(&self) -> &'static [&'static str] {
        &[]
    }

    fn validate(&self, _input: &()) -> Result<(), ValidationError> {
        Ok(())
    }

    fn execute(&self, _input: &(), _recorder: &mut Recorder<u8>) -> Result<u8, AlgorithmError> {
        Ok(0)
    }
}

struct Liar;

impl InstrumentedAlgorithm for Liar {
    type Input = ();
    type Snapshot = u8;
    type Output = u8;

    fn name(&self) -> &'static str {
        "liar"
    }

    fn source(&self) -> &'static [&'static str] {
        &[]
    }

    fn validate(&self, _input: &()) -> Result<(), ValidationError> {
        Ok(())
    }

    fn execute(&self, _input: &(), recorder: &mut Recorder<u8>) -> Result<u8, AlgorithmError> {
        recorder.emit(&1, "claims one", &[]);
        Ok(2)
    }

    fn is_consistent(&self, last: &u8, output: &u8) -> bool {
        last == output
    }
}

#[test]
fn records_start_and_final_steps() {
    let (history, best) = record(&RunningMax, &[4, 9, 2][..]).unwrap();
    assert_eq!(best, 9);
    assert_eq!(history.len(), 4);
    assert_eq!(history.first().unwrap().explanation(), "Start with 4");
    assert_eq!(history.last().unwrap().explanation(), "Maximum is 9");
    assert_eq!(history.last().unwrap().highlighted_lines(), &[4]);
}

#[test]
fn validation_failure_records_nothing() {
    let err = record(&RunningMax, &[][..]).unwrap_err();
    assert!(matches!(err, TraceError::Validation(ValidationError::Empty { .. })));
    assert!(err.is_recoverable());
}

#[test]
fn panics_become_algorithm_errors() {
    let err = record(&Panicking, &()).unwrap_err();
    match err {
        TraceError::Algorithm(AlgorithmError::Panicked(message)) => {
            assert!(message.contains("index out of bounds"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn empty_recording_is_rejected() {
    let err = record(&Silent, &()).unwrap_err();
    assert_eq!(err, TraceError::Algorithm(AlgorithmError::NoSteps));
    assert!(!err.is_recoverable());
}

#[test]
fn contradicting_final_step_is_rejected() {
    let err = record(&Liar, &()).unwrap_err();
    assert_eq!(err, TraceError::Algorithm(AlgorithmError::InconsistentResult));
}

proptest! {
    #[test]
    fn prop_recording_is_deterministic(values in prop::collection::vec(-100i64..100, 1..40)) {
        let (a, ra) = record(&RunningMax, &values[..]).unwrap();
        let (b, rb) = record(&RunningMax, &values[..]).unwrap();
        prop_assert_eq!(ra, rb);
        prop_assert_eq!(a.steps(), b.steps());
        prop_assert_ne!(a.id(), b.id());
    }

    #[test]
    fn prop_sequence_numbers_are_contiguous(values in prop::collection::vec(-100i64..100, 1..40)) {
        let (history, _) = record(&RunningMax, &values[..]).unwrap();
        prop_assert_eq!(history.len(), values.len() + 1);
        for (i, step) in history.iter().enumerate() {
            prop_assert_eq!(step.sequence(), i);
        }
    }
}
