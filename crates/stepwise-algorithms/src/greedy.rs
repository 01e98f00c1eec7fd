//! Greedy family: activity selection and change making

use crate::checks;
use crate::problem::{CoinProblem, Interval};
use crate::snapshot::{ActivitySnapshot, CoinCount, CoinSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;
use stepwise_trace::{AlgorithmError, InstrumentedAlgorithm, Recorder, ValidationError};

/// Most activities accepted
pub const MAX_ACTIVITIES: usize = 20;
/// Most coin denominations accepted
pub const MAX_COIN_KINDS: usize = 10;
/// Largest amount to change
pub const MAX_COIN_AMOUNT: usize = 500;

const ACTIVITY_SOURCE: &[&str] = &[
    "sort activities by finish time",
    "select the first; last_end = its finish",
    "for each remaining activity a:",
    "  if a.start >= last_end:",
    "    select a; last_end = a.finish",
    "return selected",
];

const COIN_SOURCE: &[&str] = &[
    "sort coins from largest to smallest",
    "remaining = amount",
    "for coin in coins:",
    "  count = remaining / coin",
    "  remaining -= count * coin",
    "return counts",
];

/// Interval scheduling by earliest finish time
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivitySelection;

impl InstrumentedAlgorithm for ActivitySelection {
    type Input = [Interval];
    type Snapshot = ActivitySnapshot;
    type Output = Vec<Interval>;

    fn name(&self) -> &'static str {
        "activity-selection"
    }

    fn source(&self) -> &'static [&'static str] {
        ACTIVITY_SOURCE
    }

    fn validate(&self, input: &[Interval]) -> Result<(), ValidationError> {
        checks::length_within("activity count", input.len(), 1, MAX_ACTIVITIES)?;
        if let Some(bad) = input.iter().find(|i| i.start >= i.end) {
            return Err(ValidationError::Invalid(format!(
                "activity {bad} must finish after it starts"
            )));
        }
        Ok(())
    }

    fn execute(
        &self,
        input: &[Interval],
        recorder: &mut Recorder<ActivitySnapshot>,
    ) -> Result<Vec<Interval>, AlgorithmError> {
        let mut intervals = input.to_vec();
        intervals.sort_by_key(|i| (i.end, i.start));
        let mut s = ActivitySnapshot {
            intervals,
            ..ActivitySnapshot::default()
        };
        recorder.emit(&s, format!("Sort {} activities by finish time", s.intervals.len()), &[1]);

        let first = s.intervals[0];
        s.current = Some(0);
        s.selected.push(0);
        s.last_end = Some(first.end);
        recorder.emit(&s, format!("Select {first}, the earliest to finish"), &[2]);

        let mut last_end = first.end;
        for i in 1..s.intervals.len() {
            let activity = s.intervals[i];
            s.current = Some(i);
            if activity.start >= last_end {
                let previous_end = last_end;
                s.selected.push(i);
                last_end = activity.end;
                s.last_end = Some(last_end);
                recorder.emit(
                    &s,
                    format!("{activity} starts at or after {previous_end}: select it"),
                    &[3, 4, 5],
                );
            } else {
                recorder.emit(
                    &s,
                    format!("{activity} starts before {last_end}: overlaps, skip it"),
                    &[3, 4],
                );
            }
        }

        s.current = None;
        let selected: Vec<Interval> = s.selected.iter().map(|&i| s.intervals[i]).collect();
        recorder.emit(&s, format!("Selected {} compatible activities", selected.len()), &[6]);
        Ok(selected)
    }

    fn is_consistent(&self, last: &ActivitySnapshot, output: &Vec<Interval>) -> bool {
        last.selected.len() == output.len()
            && last
                .selected
                .iter()
                .zip(output)
                .all(|(&i, interval)| last.intervals.get(i) == Some(interval))
    }
}

/// Result of greedy change making
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeResult {
    /// Coins used, largest denomination first
    pub coins: Vec<CoinCount>,
    /// Number of coins handed out
    pub total_coins: u64,
    /// Amount that could not be paid (0 when change is exact)
    pub remaining: u64,
}

impl fmt::Display for ChangeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} coins:", self.total_coins)?;
        for used in &self.coins {
            write!(f, " {}x{}", used.count, used.coin)?;
        }
        if self.remaining > 0 {
            write!(f, " ({} unpaid)", self.remaining)?;
        }
        Ok(())
    }
}

/// Greedy change making, largest coin first.
///
/// Not optimal for every coin system (`[1, 3, 4]` for 6 gives three coins);
/// the visualization shows exactly where greedy goes wrong.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoinChange;

impl InstrumentedAlgorithm for CoinChange {
    type Input = CoinProblem;
    type Snapshot = CoinSnapshot;
    type Output = ChangeResult;

    fn name(&self) -> &'static str {
        "coin-change"
    }

    fn source(&self) -> &'static [&'static str] {
        COIN_SOURCE
    }

    fn validate(&self, input: &CoinProblem) -> Result<(), ValidationError> {
        checks::length_within("coin kinds", input.coins.len(), 1, MAX_COIN_KINDS)?;
        if input.coins.contains(&0) {
            return Err(ValidationError::Invalid("coin denominations must be positive".into()));
        }
        let amount = usize::try_from(input.amount).unwrap_or(usize::MAX);
        checks::length_within("amount", amount, 1, MAX_COIN_AMOUNT)
    }

    fn execute(
        &self,
        input: &CoinProblem,
        recorder: &mut Recorder<CoinSnapshot>,
    ) -> Result<ChangeResult, AlgorithmError> {
        let mut coins = input.coins.clone();
        coins.sort_unstable_by(|a, b| b.cmp(a));
        coins.dedup();
        let mut s = CoinSnapshot {
            coins,
            amount: input.amount,
            remaining: input.amount,
            ..CoinSnapshot::default()
        };
        recorder.emit(&s, format!("Make {} from coins {:?}", s.amount, s.coins), &[1, 2]);

        for i in 0..s.coins.len() {
            let coin = s.coins[i];
            s.current = Some(i);
            let count = s.remaining / coin;
            if count == 0 {
                recorder.emit(&s, format!("{coin} is larger than the remaining {}, skip", s.remaining), &[3, 4]);
                continue;
            }
            s.remaining -= count * coin;
            s.used.push(CoinCount { coin, count });
            recorder.emit(
                &s,
                format!("Take {count} x {coin}, {} left", s.remaining),
                &[3, 4, 5],
            );
            if s.remaining == 0 {
                break;
            }
        }

        s.current = None;
        let result = ChangeResult {
            coins: s.used.clone(),
            total_coins: s.used.iter().map(|c| c.count).sum(),
            remaining: s.remaining,
        };
        let summary = if result.remaining == 0 {
            format!("Exact change with {result}")
        } else {
            format!("Cannot make exact change: {} left over", result.remaining)
        };
        recorder.emit(&s, summary, &[6]);
        Ok(result)
    }

    fn is_consistent(&self, last: &CoinSnapshot, output: &ChangeResult) -> bool {
        last.used == output.coins && last.remaining == output.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_trace::record;

    fn interval(start: i64, end: i64) -> Interval {
        Interval { start, end }
    }

    #[test]
    fn activity_selection_textbook_instance() {
        let activities = [
            interval(1, 4),
            interval(3, 5),
            interval(0, 6),
            interval(5, 7),
            interval(3, 9),
            interval(5, 9),
            interval(6, 10),
            interval(8, 11),
            interval(8, 12),
            interval(2, 14),
            interval(12, 16),
        ];
        let (history, selected) = record(&ActivitySelection, &activities[..]).unwrap();
        assert_eq!(
            selected,
            vec![interval(1, 4), interval(5, 7), interval(8, 11), interval(12, 16)]
        );
        // sort, first pick, ten decisions, summary
        assert_eq!(history.len(), 13);
    }

    #[test]
    fn activity_must_have_positive_length() {
        assert!(record(&ActivitySelection, &[interval(3, 3)][..]).is_err());
    }

    #[test]
    fn coin_change_us_coins() {
        let problem = CoinProblem {
            coins: vec![1, 5, 10, 25],
            amount: 63,
        };
        let (_, result) = record(&CoinChange, &problem).unwrap();
        assert_eq!(result.total_coins, 6);
        assert_eq!(result.remaining, 0);
        assert_eq!(result.coins[0], CoinCount { coin: 25, count: 2 });
        assert_eq!(result.to_string(), "6 coins: 2x25 1x10 3x1");
    }

    #[test]
    fn coin_change_greedy_is_not_always_optimal() {
        let problem = CoinProblem {
            coins: vec![1, 3, 4],
            amount: 6,
        };
        let (_, result) = record(&CoinChange, &problem).unwrap();
        assert_eq!(result.total_coins, 3);
    }

    #[test]
    fn coin_change_reports_unpaid_amount() {
        let problem = CoinProblem {
            coins: vec![5, 10],
            amount: 3,
        };
        let (history, result) = record(&CoinChange, &problem).unwrap();
        assert_eq!(result.remaining, 3);
        assert!(history.last().unwrap().explanation().contains("Cannot make exact change"));
    }

    #[test]
    fn zero_coin_is_rejected() {
        let problem = CoinProblem {
            coins: vec![0, 1],
            amount: 3,
        };
        assert!(record(&CoinChange, &problem).is_err());
    }
}
