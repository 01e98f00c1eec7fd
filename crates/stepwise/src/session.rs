//! User-facing session: algorithm and problem selection plus playback
//!
//! A [`Session`] ties the pieces together. It keeps the selected algorithm,
//! problem size and seed, the current [`Problem`], the last [`Run`], and a
//! [`PlaybackController`] rendering through whatever [`Renderer`] it was given.
//!
//! Changing the algorithm, size, seed or problem discards the previous run:
//! the controller is loaded with an empty history, which cancels any pending
//! tick and redraws the new problem.

use crate::config::StepwiseConfig;
use crate::error::SessionError;
use serde::Serialize;
use stepwise_algorithms::{run_algorithm, AlgorithmKind, Problem, ProblemGenerator, Run, Snapshot};
use stepwise_playback::{Command, PlaybackController, PlaybackStatus, Renderer, Speed};
use stepwise_trace::History;
use tokio::sync::watch;

/// What the renderer needs besides the step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemContext {
    /// Algorithm being shown
    pub kind: AlgorithmKind,
    /// Problem it runs on
    pub problem: Problem,
}

/// One user's visualizer state
pub struct Session {
    config: StepwiseConfig,
    kind: AlgorithmKind,
    size: usize,
    seed: u64,
    problem: Problem,
    last_run: Option<Run>,
    controller: PlaybackController<Snapshot, ProblemContext>,
}

impl Session {
    /// Create a session and draw its first problem.
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    /// - [`SessionError::Config`] if `config` does not validate
    /// - [`SessionError::Playback`] if no runtime is available or the first
    ///   draw fails
    pub fn new<R>(config: StepwiseConfig, renderer: R) -> Result<Self, SessionError>
    where
        R: Renderer<Snapshot, ProblemContext> + 'static,
    {
        config.validate()?;
        let kind = config.problem.algorithm;
        let size = config.problem.effective_size();
        let seed = config.problem.seed;
        let problem = generate(&config, kind, size, seed);
        let context = ProblemContext {
            kind,
            problem: problem.clone(),
        };
        let controller = PlaybackController::new(renderer, context.clone(), &config.playback)?;
        controller.load(History::empty(), context)?;

        tracing::info!(algorithm = %kind, size, seed, "session created");
        Ok(Self {
            config,
            kind,
            size,
            seed,
            problem,
            last_run: None,
            controller,
        })
    }

    /// Record the selected algorithm on the current problem and start playing.
    ///
    /// # Errors
    /// - [`SessionError::Trace`] if the problem is rejected or the algorithm
    ///   fails; the controller is left idle on an empty history
    /// - [`SessionError::Playback`] if the first draw fails
    pub fn run(&mut self) -> Result<&Run, SessionError> {
        let context = self.context();
        match run_algorithm(self.kind, &self.problem) {
            Ok(run) => {
                tracing::info!(
                    algorithm = %self.kind,
                    steps = run.history.len(),
                    outcome = %run.outcome,
                    "run recorded"
                );
                self.controller.load(run.history.clone(), context)?;
                self.controller.start()?;
                let run: &Run = self.last_run.insert(run);
                Ok(run)
            }
            Err(e) => {
                tracing::warn!(algorithm = %self.kind, error = %e, "run rejected");
                self.last_run = None;
                self.controller.load(History::empty(), context)?;
                Err(e.into())
            }
        }
    }

    /// Pause when running, resume when paused, otherwise start
    ///
    /// # Errors
    /// See [`PlaybackController::pause_or_resume`]
    pub fn pause_or_resume(&self) -> Result<Command, SessionError> {
        Ok(self.controller.pause_or_resume()?)
    }

    /// Advance exactly one step
    ///
    /// # Errors
    /// See [`PlaybackController::step`]
    pub fn step(&self) -> Result<(), SessionError> {
        Ok(self.controller.step()?)
    }

    /// Back to the pre-run view of the current run
    ///
    /// # Errors
    /// See [`PlaybackController::reset`]
    pub fn reset(&self) -> Result<(), SessionError> {
        Ok(self.controller.reset()?)
    }

    /// Change playback speed
    ///
    /// # Errors
    /// [`SessionError::Playback`] if `value` is out of range
    pub fn set_speed(&self, value: u8) -> Result<(), SessionError> {
        Ok(self.controller.set_speed(value)?)
    }

    /// One notch faster
    pub fn faster(&self) -> Speed {
        self.controller.faster()
    }

    /// One notch slower
    pub fn slower(&self) -> Speed {
        self.controller.slower()
    }

    /// Select an algorithm by name and draw a fresh problem for it.
    ///
    /// The current size is pulled into the new algorithm's range.
    ///
    /// # Errors
    /// [`SessionError::UnknownAlgorithm`], or a draw failure
    pub fn set_algorithm(&mut self, name: &str) -> Result<(), SessionError> {
        let kind: AlgorithmKind = name.parse()?;
        self.select(kind)
    }

    /// Select an algorithm and draw a fresh problem for it
    ///
    /// # Errors
    /// A draw failure
    pub fn select(&mut self, kind: AlgorithmKind) -> Result<(), SessionError> {
        self.size = kind.size_limits().clamp(self.size);
        self.kind = kind;
        tracing::debug!(algorithm = %kind, size = self.size, "algorithm selected");
        self.regenerate()
    }

    /// Change the problem size and draw a fresh problem
    ///
    /// # Errors
    /// [`SessionError::SizeOutOfRange`], or a draw failure
    pub fn set_problem_size(&mut self, size: usize) -> Result<(), SessionError> {
        let limits = self.kind.size_limits();
        if !limits.contains(size) {
            return Err(SessionError::SizeOutOfRange {
                algorithm: self.kind,
                size,
                limits,
            });
        }
        self.size = size;
        self.regenerate()
    }

    /// Change the seed and draw a fresh problem
    ///
    /// # Errors
    /// A draw failure
    pub fn set_seed(&mut self, seed: u64) -> Result<(), SessionError> {
        self.seed = seed;
        self.regenerate()
    }

    /// Draw the next problem (advances the seed by one)
    ///
    /// # Errors
    /// A draw failure
    pub fn generate_problem(&mut self) -> Result<(), SessionError> {
        self.seed = self.seed.wrapping_add(1);
        self.regenerate()
    }

    /// Use a user-supplied problem; it is validated when the session runs
    ///
    /// # Errors
    /// A draw failure
    pub fn set_problem(&mut self, problem: Problem) -> Result<(), SessionError> {
        self.problem = problem;
        self.discard_run()
    }

    fn regenerate(&mut self) -> Result<(), SessionError> {
        self.problem = generate(&self.config, self.kind, self.size, self.seed);
        self.discard_run()
    }

    fn discard_run(&mut self) -> Result<(), SessionError> {
        self.last_run = None;
        self.controller.load(History::empty(), self.context())?;
        Ok(())
    }

    fn context(&self) -> ProblemContext {
        ProblemContext {
            kind: self.kind,
            problem: self.problem.clone(),
        }
    }

    /// Selected algorithm
    #[must_use]
    pub fn algorithm(&self) -> AlgorithmKind {
        self.kind
    }

    /// Current problem size
    #[must_use]
    pub fn problem_size(&self) -> usize {
        self.size
    }

    /// Current seed
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current problem
    #[must_use]
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Last successful run, until the problem changes
    #[must_use]
    pub fn last_run(&self) -> Option<&Run> {
        self.last_run.as_ref()
    }

    /// Current playback status
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.controller.status()
    }

    /// Receiver for playback status changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PlaybackStatus> {
        self.controller.subscribe()
    }

    /// Wait until playback stops running
    pub async fn wait_until_settled(&self) -> PlaybackStatus {
        self.controller.wait_until_settled().await
    }
}

fn generate(config: &StepwiseConfig, kind: AlgorithmKind, size: usize, seed: u64) -> Problem {
    let mut generator =
        ProblemGenerator::new(seed).with_value_range(config.problem.value_min..=config.problem.value_max);
    kind.generate(&mut generator, size)
}
