//! Timer-driven playback controller
//!
//! Wraps a [`PlaybackMachine`] and a [`Renderer`] behind one lock and turns
//! the machine's pending ticks into tokio timers:
//! - every command locks, runs one machine transition, then reconciles the
//!   timer with the machine's pending tick
//! - a timer whose token no longer matches is aborted; a timer that fires
//!   anyway is rejected by the machine as stale
//! - status is published on a watch channel after every change
//!
//! The lock is never held across an await, so commands are plain synchronous
//! calls that can be issued from any thread.

use crate::config::PlaybackConfig;
use crate::error::PlaybackError;
use crate::machine::{PlaybackMachine, TickOutcome, TickToken};
use crate::mode::Command;
use crate::renderer::{RenderSink, Renderer};
use crate::speed::Speed;
use crate::status::PlaybackStatus;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use stepwise_trace::History;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

type Sink<'a, S, C> = RenderSink<'a, dyn Renderer<S, C>, C>;

struct ScheduledTick {
    token: TickToken,
    handle: JoinHandle<()>,
}

struct Shared<S, C> {
    machine: PlaybackMachine<S>,
    renderer: Box<dyn Renderer<S, C>>,
    context: C,
    timer: Option<ScheduledTick>,
    runtime: Handle,
    status_tx: watch::Sender<PlaybackStatus>,
    last_error: Option<String>,
}

impl<S, C> Shared<S, C> {
    fn apply<T>(
        &mut self,
        f: impl FnOnce(&mut PlaybackMachine<S>, &mut Sink<'_, S, C>) -> Result<T, PlaybackError>,
    ) -> Result<T, PlaybackError> {
        let Shared {
            machine,
            renderer,
            context,
            ..
        } = &mut *self;
        let mut sink = RenderSink::new(renderer.as_mut(), &*context);
        let result = f(machine, &mut sink);
        self.last_error = result.as_ref().err().map(ToString::to_string);
        result
    }

    fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            history_id: self.machine.history().id(),
            mode: self.machine.mode(),
            cursor: self.machine.cursor(),
            len: self.machine.history().len(),
            speed: self.machine.speed().get(),
            last_error: self.last_error.clone(),
        }
    }

    fn publish(&self) {
        self.status_tx.send_replace(self.status());
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.handle.abort();
        }
    }
}

impl<S, C> Shared<S, C>
where
    S: Send + Sync + 'static,
    C: Send + 'static,
{
    /// Make the live timer match the machine's pending tick
    fn reconcile(&mut self, this: &Arc<Mutex<Self>>) {
        let pending = self.machine.pending();
        if pending.map(|p| p.token) == self.timer.as_ref().map(|t| t.token) {
            return;
        }
        self.cancel_timer();
        if let Some(pending) = pending {
            let weak = Arc::downgrade(this);
            let handle = self.runtime.spawn(async move {
                tokio::time::sleep(pending.delay).await;
                fire(&weak, pending.token);
            });
            self.timer = Some(ScheduledTick {
                token: pending.token,
                handle,
            });
        }
    }
}

fn fire<S, C>(shared: &Weak<Mutex<Shared<S, C>>>, token: TickToken)
where
    S: Send + Sync + 'static,
    C: Send + 'static,
{
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let mut guard = shared.lock();
    if guard.timer.as_ref().is_some_and(|t| t.token == token) {
        // This task is the timer; dropping the handle detaches it.
        guard.timer = None;
    }

    let Shared {
        machine,
        renderer,
        context,
        ..
    } = &mut *guard;
    let result = machine.tick(token, &mut RenderSink::new(renderer.as_mut(), &*context));
    match result {
        Ok(TickOutcome::Stale) => return,
        Ok(_) => guard.last_error = None,
        Err(e) => guard.last_error = Some(e.to_string()),
    }
    guard.reconcile(&shared);
    guard.publish();
}

/// Drives a renderer through a history on a tokio timer
pub struct PlaybackController<S, C> {
    shared: Arc<Mutex<Shared<S, C>>>,
    status_rx: watch::Receiver<PlaybackStatus>,
}

impl<S, C> PlaybackController<S, C>
where
    S: Send + Sync + 'static,
    C: Send + 'static,
{
    /// Create an idle controller over an empty history.
    ///
    /// Must be called from within a tokio runtime; timers are spawned on it.
    ///
    /// # Errors
    /// - [`PlaybackError::InvalidConfig`] if `config` does not validate
    /// - [`PlaybackError::NoRuntime`] outside a tokio runtime
    pub fn new<R>(renderer: R, context: C, config: &PlaybackConfig) -> Result<Self, PlaybackError>
    where
        R: Renderer<S, C> + 'static,
    {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| PlaybackError::NoRuntime)?;
        let machine = PlaybackMachine::new(config.initial_speed()?, config.speed_range()?, config.base_delay());

        let shared = Shared {
            machine,
            renderer: Box::new(renderer),
            context,
            timer: None,
            runtime,
            status_tx: watch::Sender::new(placeholder_status()),
            last_error: None,
        };
        let status_rx = shared.status_tx.subscribe();
        shared.publish();
        tracing::debug!(speed = %shared.machine.speed(), "playback controller created");

        Ok(Self {
            shared: Arc::new(Mutex::new(shared)),
            status_rx,
        })
    }

    fn command<T>(
        &self,
        f: impl FnOnce(&mut PlaybackMachine<S>, &mut Sink<'_, S, C>) -> Result<T, PlaybackError>,
    ) -> Result<T, PlaybackError> {
        let mut shared = self.shared.lock();
        let result = shared.apply(f);
        shared.reconcile(&self.shared);
        shared.publish();
        result
    }

    /// Replace the history and its context; playback returns to idle and the
    /// pre-run view is drawn. Ticks scheduled for the old history are dropped.
    ///
    /// # Errors
    /// [`PlaybackError::Render`] if the pre-run view failed; the history is
    /// loaded regardless
    pub fn load(&self, history: History<S>, context: C) -> Result<(), PlaybackError> {
        let mut shared = self.shared.lock();
        shared.context = context;
        let result = shared.apply(|machine, sink| machine.load(history, sink).map_err(Into::into));
        shared.reconcile(&self.shared);
        shared.publish();
        result
    }

    /// Start playback from the first step (replays when finished)
    ///
    /// # Errors
    /// See [`PlaybackMachine::start`]
    pub fn start(&self) -> Result<(), PlaybackError> {
        self.command(|machine, sink| machine.start(sink))
    }

    /// Pause a running playback
    ///
    /// # Errors
    /// See [`PlaybackMachine::pause`]
    pub fn pause(&self) -> Result<(), PlaybackError> {
        self.command(|machine, _| machine.pause())
    }

    /// Resume a paused playback
    ///
    /// # Errors
    /// See [`PlaybackMachine::resume`]
    pub fn resume(&self) -> Result<(), PlaybackError> {
        self.command(|machine, sink| machine.resume(sink))
    }

    /// Toggle between running and paused, starting when idle or finished.
    /// Returns the command that was applied.
    ///
    /// # Errors
    /// Whatever the applied command returns
    pub fn pause_or_resume(&self) -> Result<Command, PlaybackError> {
        self.command(|machine, sink| machine.pause_or_resume(sink))
    }

    /// Deliver exactly one step
    ///
    /// # Errors
    /// See [`PlaybackMachine::step`]
    pub fn step(&self) -> Result<(), PlaybackError> {
        self.command(|machine, sink| machine.step(sink))
    }

    /// Back to the pre-run state
    ///
    /// # Errors
    /// [`PlaybackError::Render`] if the pre-run view failed
    pub fn reset(&self) -> Result<(), PlaybackError> {
        self.command(|machine, sink| machine.reset(sink).map_err(Into::into))
    }

    /// Change speed; a tick already scheduled keeps its delay
    ///
    /// # Errors
    /// [`PlaybackError::SpeedOutOfRange`]
    pub fn set_speed(&self, value: u8) -> Result<(), PlaybackError> {
        self.command(|machine, _| machine.set_speed(value))
    }

    /// One notch faster, saturating
    pub fn faster(&self) -> Speed {
        self.nudge(|machine| machine.speed_range().faster(machine.speed()))
    }

    /// One notch slower, saturating
    pub fn slower(&self) -> Speed {
        self.nudge(|machine| machine.speed_range().slower(machine.speed()))
    }

    fn nudge(&self, pick: impl FnOnce(&PlaybackMachine<S>) -> Speed) -> Speed {
        let mut shared = self.shared.lock();
        let target = pick(&shared.machine);
        // `pick` stays inside the range, so this cannot fail.
        if shared.machine.set_speed(target.get()).is_ok() {
            shared.publish();
        }
        shared.machine.speed()
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.shared.lock().status()
    }

    /// History being played
    #[must_use]
    pub fn history(&self) -> History<S> {
        self.shared.lock().machine.history().clone()
    }

    /// Receiver that sees every published status
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PlaybackStatus> {
        self.status_rx.clone()
    }

    /// Wait until playback is no longer running and return the status then
    pub async fn wait_until_settled(&self) -> PlaybackStatus {
        let mut rx = self.status_rx.clone();
        loop {
            let status = rx.borrow_and_update().clone();
            if !status.is_running() {
                return status;
            }
            if rx.changed().await.is_err() {
                return self.status();
            }
        }
    }
}

impl<S, C> Drop for PlaybackController<S, C> {
    fn drop(&mut self) {
        self.shared.lock().cancel_timer();
    }
}

fn placeholder_status() -> PlaybackStatus {
    PlaybackStatus {
        history_id: stepwise_trace::HistoryId::new(),
        mode: crate::mode::PlaybackMode::Idle,
        cursor: 0,
        len: 0,
        speed: 0,
        last_error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use stepwise_trace::Step;

    struct Null;

    impl Renderer<u32, ()> for Null {
        fn render(&mut self, _: &Step<u32>, _: &()) -> Result<(), RenderError> {
            Ok(())
        }

        fn render_problem(&mut self, _: &()) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn new_outside_runtime_fails() {
        let result = PlaybackController::<u32, ()>::new(Null, (), &PlaybackConfig::default());
        assert!(matches!(result, Err(PlaybackError::NoRuntime)));
    }

    #[tokio::test]
    async fn fresh_controller_is_idle_and_empty() {
        let controller = PlaybackController::<u32, ()>::new(Null, (), &PlaybackConfig::default()).unwrap();
        let status = controller.status();
        assert_eq!(status.mode, crate::mode::PlaybackMode::Idle);
        assert_eq!(status.len, 0);
        assert_eq!(status.speed, 5);
        assert!(matches!(controller.start(), Err(PlaybackError::NothingToRun)));
        assert_eq!(controller.status().last_error.as_deref(), Some("nothing to run"));
    }
}
