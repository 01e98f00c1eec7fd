//! Problems typed in by the user

use stepwise_algorithms::{AlgorithmKind, CoinProblem, Problem, ProblemShape, TargetProblem};

/// User input that cannot be turned into a problem
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The algorithm needs a target and none was given
    #[error("{0} needs a target")]
    MissingTarget(AlgorithmKind),

    /// Fibonacci takes exactly one non-negative index
    #[error("fibonacci takes a single non-negative index")]
    BadIndex,

    /// A coin value or amount is negative
    #[error("coin values and amount must be non-negative")]
    NegativeCoin,

    /// The shape cannot be typed as a flat list
    #[error("{0} input cannot be given as a list; generate it instead")]
    Unsupported(AlgorithmKind),
}

/// Build a problem for `kind` from a flat list of values and an optional target.
///
/// Coin change reads the values as denominations and the target as the amount.
/// The result still goes through the algorithm's own validation when run.
///
/// # Errors
/// [`InputError`] when the list cannot describe the shape `kind` needs
pub fn problem_from_values(
    kind: AlgorithmKind,
    values: Vec<i64>,
    target: Option<i64>,
) -> Result<Problem, InputError> {
    match kind.shape() {
        ProblemShape::Array | ProblemShape::SignedArray => Ok(Problem::Array(values)),
        ProblemShape::SearchTarget
        | ProblemShape::SortedSearchTarget
        | ProblemShape::PairTarget
        | ProblemShape::SortedPairTarget => {
            let target = target.ok_or(InputError::MissingTarget(kind))?;
            Ok(Problem::Target(TargetProblem { values, target }))
        }
        ProblemShape::Fibonacci => match values.as_slice() {
            [n] => usize::try_from(*n).map(Problem::Fibonacci).map_err(|_| InputError::BadIndex),
            _ => Err(InputError::BadIndex),
        },
        ProblemShape::Coins => {
            let amount = target.ok_or(InputError::MissingTarget(kind))?;
            let amount = u64::try_from(amount).map_err(|_| InputError::NegativeCoin)?;
            let coins = values
                .into_iter()
                .map(u64::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| InputError::NegativeCoin)?;
            Ok(Problem::Coins(CoinProblem { coins, amount }))
        }
        ProblemShape::Graph
        | ProblemShape::Knapsack
        | ProblemShape::Strings
        | ProblemShape::Intervals
        | ProblemShape::Points => Err(InputError::Unsupported(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_needs_target() {
        assert_eq!(
            problem_from_values(AlgorithmKind::BinarySearch, vec![1, 2], None),
            Err(InputError::MissingTarget(AlgorithmKind::BinarySearch))
        );
        assert!(matches!(
            problem_from_values(AlgorithmKind::BinarySearch, vec![1, 2], Some(2)),
            Ok(Problem::Target(_))
        ));
    }

    #[test]
    fn coin_values_become_denominations() {
        let problem = problem_from_values(AlgorithmKind::CoinChange, vec![25, 10, 1], Some(63)).unwrap();
        assert_eq!(
            problem,
            Problem::Coins(CoinProblem {
                coins: vec![25, 10, 1],
                amount: 63
            })
        );
        assert_eq!(
            problem_from_values(AlgorithmKind::CoinChange, vec![-1], Some(3)),
            Err(InputError::NegativeCoin)
        );
    }

    #[test]
    fn fibonacci_takes_one_index() {
        assert_eq!(
            problem_from_values(AlgorithmKind::Fibonacci, vec![10], None),
            Ok(Problem::Fibonacci(10))
        );
        assert_eq!(
            problem_from_values(AlgorithmKind::Fibonacci, vec![1, 2], None),
            Err(InputError::BadIndex)
        );
    }

    #[test]
    fn graphs_cannot_be_typed() {
        assert!(matches!(
            problem_from_values(AlgorithmKind::Dijkstra, vec![1], None),
            Err(InputError::Unsupported(_))
        ));
    }
}
