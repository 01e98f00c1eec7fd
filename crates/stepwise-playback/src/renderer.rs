//! Renderer seam between playback and presentation

use crate::error::RenderError;
use crate::machine::StepSink;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use stepwise_trace::Step;

/// Presents steps of a history
///
/// `C` is whatever the renderer needs besides the step itself, such as the
/// problem instance being visualized. The controller calls the renderer from
/// its timer task, so implementations must be `Send`.
pub trait Renderer<S, C>: Send {
    /// Draw one step
    ///
    /// # Errors
    /// Any failure to present the step; playback pauses on it
    fn render(&mut self, step: &Step<S>, context: &C) -> Result<(), RenderError>;

    /// Draw the pre-run view of the problem
    ///
    /// # Errors
    /// Any failure to present the problem
    fn render_problem(&mut self, context: &C) -> Result<(), RenderError>;
}

/// Binds a renderer to its context so the machine can drive it
pub struct RenderSink<'a, R: ?Sized, C> {
    renderer: &'a mut R,
    context: &'a C,
}

impl<'a, R: ?Sized, C> RenderSink<'a, R, C> {
    /// Pair a renderer with a context
    #[inline]
    #[must_use]
    pub fn new(renderer: &'a mut R, context: &'a C) -> Self {
        Self { renderer, context }
    }
}

// A panicking renderer becomes a render error so playback pauses instead of
// losing its timer.
fn guarded(draw: impl FnOnce() -> Result<(), RenderError>) -> Result<(), RenderError> {
    panic::catch_unwind(AssertUnwindSafe(draw)).unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        tracing::error!(%message, "renderer panicked");
        Err(RenderError::Panicked(message))
    })
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

impl<S, C, R: Renderer<S, C> + ?Sized> StepSink<S> for RenderSink<'_, R, C> {
    fn show(&mut self, step: &Step<S>) -> Result<(), RenderError> {
        let context = self.context;
        guarded(|| self.renderer.render(step, context))
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        let context = self.context;
        guarded(|| self.renderer.render_problem(context))
    }
}
