use pretty_assertions::assert_eq;
use proptest::prelude::*;
use stepwise_algorithms::*;
use stepwise_trace::{TraceError, ValidationError};

fn target(values: &[i64], target: i64) -> Problem {
    Problem::Target(TargetProblem {
        values: values.to_vec(),
        target,
    })
}

#[test]
fn binary_search_finds_seven() {
    let run = run_algorithm(AlgorithmKind::BinarySearch, &target(&[1, 3, 5, 7, 9, 11], 7)).unwrap();
    assert_eq!(run.outcome, Outcome::Search(searching::SearchResult::found(3)));
    assert_eq!(run.history.len(), 4);

    let last = run.history.last().unwrap();
    let Snapshot::Search(search) = last.snapshot() else {
        panic!("expected a search snapshot");
    };
    assert_eq!(search.mid, Some(3));
    assert_eq!(search.found, Some(3));
    assert!(last.explanation().contains("found"));
}

#[test]
fn two_sum_reports_pair_only_at_the_end() {
    let run = run_algorithm(AlgorithmKind::TwoSum, &target(&[2, 7, 11, 15], 9)).unwrap();
    assert_eq!(run.outcome, Outcome::Pair(Some((0, 1))));

    let found_at: Vec<usize> = run
        .history
        .iter()
        .filter(|step| matches!(step.snapshot(), Snapshot::TwoPointer(s) if s.found_pair.is_some()))
        .map(|step| step.sequence())
        .collect();
    assert_eq!(found_at, vec![run.history.len() - 1]);

    // the second iteration starts after "remember 2"
    let second_iteration = run
        .history
        .iter()
        .position(|step| matches!(step.snapshot(), Snapshot::TwoPointer(s) if s.left == Some(1)))
        .unwrap();
    assert!(second_iteration >= 3);
}

#[test]
fn merge_sort_final_snapshot_is_sorted() {
    let run = run_algorithm(AlgorithmKind::MergeSort, &Problem::Array(vec![5, 3, 4, 1])).unwrap();
    let Snapshot::Sort(last) = run.history.last().unwrap().snapshot() else {
        panic!("expected a sort snapshot");
    };
    assert_eq!(last.array, vec![1, 3, 4, 5]);
    assert_eq!(last.sorted, vec![0, 1, 2, 3]);
    assert_eq!(run.outcome, Outcome::Sorted(vec![1, 3, 4, 5]));
}

#[test]
fn invalid_input_fails_before_recording() {
    let err = run_algorithm(AlgorithmKind::BubbleSort, &Problem::Array(Vec::new())).unwrap_err();
    assert!(matches!(err, TraceError::Validation(ValidationError::Empty { .. })));
    assert!(err.is_recoverable());

    let err = run_algorithm(AlgorithmKind::BinarySearch, &target(&[9, 1], 1)).unwrap_err();
    assert!(matches!(err, TraceError::Validation(ValidationError::NotSorted { .. })));
}

#[test]
fn outcome_serializes_with_kind_tag() {
    let run = run_algorithm(AlgorithmKind::Fibonacci, &Problem::Fibonacci(7)).unwrap();
    let json = serde_json::to_value(&run.outcome).unwrap();
    assert_eq!(json["kind"], "fibonacci");
    assert_eq!(json["value"], 13);
}

#[test]
fn snapshot_serializes_with_family_tag() {
    let run = run_algorithm(AlgorithmKind::InsertionSort, &Problem::Array(vec![2, 1])).unwrap();
    let json = serde_json::to_value(run.history.first().unwrap().snapshot()).unwrap();
    assert_eq!(json["family"], "sort");
    assert_eq!(json["array"], serde_json::json!([2, 1]));
}

fn any_kind() -> impl Strategy<Value = AlgorithmKind> {
    (0..AlgorithmKind::ALL.len()).prop_map(|i| AlgorithmKind::ALL[i])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_same_seed_same_history(kind in any_kind(), seed in any::<u64>(), size in 0usize..60) {
        let problem_a = kind.generate(&mut ProblemGenerator::new(seed), size);
        let problem_b = kind.generate(&mut ProblemGenerator::new(seed), size);
        prop_assert_eq!(&problem_a, &problem_b);

        let a = run_algorithm(kind, &problem_a).unwrap();
        let b = run_algorithm(kind, &problem_b).unwrap();
        prop_assert_eq!(a.outcome, b.outcome);
        prop_assert_eq!(a.history.len(), b.history.len());
        for (x, y) in a.history.iter().zip(&b.history) {
            prop_assert_eq!(x.explanation(), y.explanation());
            prop_assert_eq!(x.highlighted_lines(), y.highlighted_lines());
            prop_assert_eq!(x.snapshot(), y.snapshot());
        }
    }

    #[test]
    fn prop_sequences_are_contiguous(kind in any_kind(), seed in any::<u64>()) {
        let problem = kind.generate(&mut ProblemGenerator::new(seed), kind.size_limits().default);
        let run = run_algorithm(kind, &problem).unwrap();
        prop_assert!(run.history.len() >= 2);
        for (i, step) in run.history.iter().enumerate() {
            prop_assert_eq!(step.sequence(), i);
        }
    }

    #[test]
    fn prop_sorts_agree_with_std(values in prop::collection::vec(-500i64..500, 1..50)) {
        let mut expected = values.clone();
        expected.sort_unstable();
        for kind in [
            AlgorithmKind::BubbleSort,
            AlgorithmKind::SelectionSort,
            AlgorithmKind::InsertionSort,
            AlgorithmKind::MergeSort,
            AlgorithmKind::QuickSort,
        ] {
            let run = run_algorithm(kind, &Problem::Array(values.clone())).unwrap();
            prop_assert_eq!(&run.outcome, &Outcome::Sorted(expected.clone()));
        }
    }

    #[test]
    fn prop_binary_search_matches_contains(
        mut values in prop::collection::vec(0i64..40, 1..30),
        needle in 0i64..40,
    ) {
        values.sort_unstable();
        let run = run_algorithm(AlgorithmKind::BinarySearch, &target(&values, needle)).unwrap();
        let Outcome::Search(result) = run.outcome else {
            panic!("expected a search outcome");
        };
        prop_assert_eq!(result.found, values.contains(&needle));
        if let Some(index) = result.index {
            prop_assert_eq!(values[index], needle);
        }
    }
}
