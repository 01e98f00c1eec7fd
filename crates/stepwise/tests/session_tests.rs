//! Session controls end to end, on tokio's paused clock

use pretty_assertions::assert_eq;
use std::io::Write;
use std::time::Duration;
use stepwise::{ConfigError, Session, SessionError, StepwiseConfig};
use stepwise_algorithms::searching::SearchResult;
use stepwise_algorithms::{AlgorithmKind, Outcome, Problem, TargetProblem};
use stepwise_playback::{Command, PlaybackConfig, PlaybackMode};
use stepwise_test_utils::{CapturingRenderer, RenderEvent, RenderLog};
use stepwise_trace::TraceError;
use tokio::time::sleep;

fn config(kind: AlgorithmKind) -> StepwiseConfig {
    StepwiseConfig::new()
        .with_playback(
            PlaybackConfig::new()
                .with_base_delay(Duration::from_millis(100))
                .with_default_speed(1),
        )
        .with_algorithm(kind)
        .with_seed(11)
}

fn session(kind: AlgorithmKind) -> (Session, RenderLog) {
    let (renderer, log) = CapturingRenderer::new();
    (Session::new(config(kind), renderer).unwrap(), log)
}

#[tokio::test(start_paused = true)]
async fn new_session_draws_problem_and_waits() {
    let (session, log) = session(AlgorithmKind::MergeSort);
    assert_eq!(log.events(), vec![RenderEvent::Problem]);
    assert_eq!(session.status().mode, PlaybackMode::Idle);
    assert_eq!(session.problem_size(), AlgorithmKind::MergeSort.size_limits().default);
}

#[tokio::test(start_paused = true)]
async fn run_plays_binary_search_to_the_end() {
    let (mut session, log) = session(AlgorithmKind::BinarySearch);
    session
        .set_problem(Problem::Target(TargetProblem {
            values: vec![1, 3, 5, 7, 9, 11],
            target: 7,
        }))
        .unwrap();

    let steps = session.run().unwrap().history.len();
    assert_eq!(steps, 4);

    let status = session.wait_until_settled().await;
    assert_eq!(status.mode, PlaybackMode::Finished);
    assert_eq!(status.cursor, 4);
    assert_eq!(log.steps(), vec![0, 1, 2, 3]);
    assert_eq!(
        session.last_run().map(|run| run.outcome.clone()),
        Some(Outcome::Search(SearchResult::found(3)))
    );
}

#[tokio::test(start_paused = true)]
async fn invalid_problem_leaves_empty_idle_history() {
    let (mut session, _log) = session(AlgorithmKind::BinarySearch);
    session
        .set_problem(Problem::Target(TargetProblem {
            values: vec![9, 1, 5],
            target: 5,
        }))
        .unwrap();

    let err = session.run().unwrap_err();
    assert!(matches!(err, SessionError::Trace(TraceError::Validation(_))));
    assert!(err.is_recoverable());

    let status = session.status();
    assert_eq!(status.mode, PlaybackMode::Idle);
    assert_eq!(status.len, 0);
    assert!(session.last_run().is_none());
}

#[tokio::test(start_paused = true)]
async fn pause_or_resume_round_trip() {
    let (mut session, _log) = session(AlgorithmKind::BubbleSort);
    let len = session.run().unwrap().history.len();
    assert!(len > 4);

    sleep(Duration::from_millis(250)).await;
    assert_eq!(session.pause_or_resume().unwrap(), Command::Pause);
    let frozen = session.status().cursor;
    assert_eq!(frozen, 3);

    sleep(Duration::from_secs(3)).await;
    assert_eq!(session.status().cursor, frozen);

    assert_eq!(session.pause_or_resume().unwrap(), Command::Resume);
    let status = session.wait_until_settled().await;
    assert_eq!(status.cursor, len);
}

#[tokio::test(start_paused = true)]
async fn changing_algorithm_discards_the_run() {
    let (mut session, log) = session(AlgorithmKind::BubbleSort);
    session.run().unwrap();
    sleep(Duration::from_millis(150)).await;

    session.set_algorithm("fibonacci").unwrap();
    assert_eq!(session.algorithm(), AlgorithmKind::Fibonacci);
    assert!(matches!(session.problem(), Problem::Fibonacci(_)));
    assert!(session.last_run().is_none());

    let drawn = log.steps().len();
    sleep(Duration::from_secs(2)).await;
    let status = session.status();
    assert_eq!(status.mode, PlaybackMode::Idle);
    assert_eq!(status.len, 0);
    assert_eq!(log.steps().len(), drawn);
}

#[tokio::test(start_paused = true)]
async fn unknown_algorithm_is_rejected() {
    let (mut session, _log) = session(AlgorithmKind::BubbleSort);
    let err = session.set_algorithm("bogo-sort").unwrap_err();
    assert!(matches!(err, SessionError::UnknownAlgorithm(_)));
    assert_eq!(session.algorithm(), AlgorithmKind::BubbleSort);
}

#[tokio::test(start_paused = true)]
async fn problem_size_is_checked_against_the_algorithm() {
    let (mut session, _log) = session(AlgorithmKind::Fibonacci);
    let err = session.set_problem_size(31).unwrap_err();
    assert!(matches!(err, SessionError::SizeOutOfRange { size: 31, .. }));

    session.set_problem_size(12).unwrap();
    assert_eq!(session.problem(), &Problem::Fibonacci(12));
}

#[tokio::test(start_paused = true)]
async fn same_seed_same_problem() {
    let (mut first, _) = session(AlgorithmKind::QuickSort);
    let (second, _) = session(AlgorithmKind::QuickSort);
    assert_eq!(first.problem(), second.problem());

    first.generate_problem().unwrap();
    assert_eq!(first.seed(), 12);
    first.set_seed(11).unwrap();
    assert_eq!(first.problem(), second.problem());
}

#[tokio::test(start_paused = true)]
async fn render_failure_surfaces_in_status() {
    let (renderer, log) = CapturingRenderer::new();
    let mut session = Session::new(config(AlgorithmKind::InsertionSort), renderer.failing_at(1)).unwrap();
    session.run().unwrap();

    let status = session.wait_until_settled().await;
    assert_eq!(status.mode, PlaybackMode::Paused);
    assert_eq!(status.cursor, 1);
    assert!(status.last_error.is_some());
    assert_eq!(log.steps(), vec![0]);

    session.reset().unwrap();
    assert_eq!(session.status().mode, PlaybackMode::Idle);
    assert_eq!(session.status().cursor, 0);
}

#[tokio::test(start_paused = true)]
async fn invalid_config_is_not_recoverable() {
    let (renderer, _log) = CapturingRenderer::new();
    let config = StepwiseConfig::new().with_speed(42);
    let err = Session::new(config, renderer).err().unwrap();
    assert!(matches!(err, SessionError::Config(ConfigError::Playback(_))));
    assert!(!err.is_recoverable());
}

#[test]
fn config_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
log_filter = "stepwise=debug"

[playback]
base_delay_ms = 250
max_speed = 4
default_speed = 2

[problem]
algorithm = "coin-change"
seed = 5
"#
    )
    .unwrap();

    let config = StepwiseConfig::from_file(file.path()).unwrap();
    assert_eq!(config.log_filter, "stepwise=debug");
    assert_eq!(config.playback.base_delay(), Duration::from_millis(250));
    assert_eq!(config.problem.algorithm, AlgorithmKind::CoinChange);
    assert!(config.validate().is_ok());
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = StepwiseConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
