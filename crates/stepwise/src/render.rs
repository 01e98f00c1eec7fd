//! Plain-text renderer for terminals and logs

use crate::session::ProblemContext;
use std::io::Write;
use stepwise_algorithms::Snapshot;
use stepwise_playback::{RenderError, Renderer};
use stepwise_trace::Step;

/// Writes each step as a short text block
///
/// ```text
/// step 3  a[2]=5 < 7, search right half
///   [1 3 (5) 7 9 11]  low=3 high=5
///   > 5 |   if a[mid] < target: low = mid + 1
/// ```
pub struct TextRenderer<W> {
    out: W,
    show_source: bool,
}

impl<W: Write + Send> TextRenderer<W> {
    /// Render into `out`, with highlighted source lines
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out, show_source: true }
    }

    /// Toggle the source listing under each step
    #[must_use]
    pub fn with_source(mut self, show: bool) -> Self {
        self.show_source = show;
        self
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Renderer<Snapshot, ProblemContext> for TextRenderer<W> {
    fn render(&mut self, step: &Step<Snapshot>, context: &ProblemContext) -> Result<(), RenderError> {
        writeln!(self.out, "step {}  {}", step.sequence() + 1, step.explanation())?;
        writeln!(self.out, "  {}", step.snapshot())?;
        if self.show_source {
            let source = context.kind.source();
            for &line in step.highlighted_lines() {
                let text = usize::try_from(line)
                    .ok()
                    .and_then(|l| l.checked_sub(1))
                    .and_then(|i| source.get(i));
                match text {
                    Some(text) => writeln!(self.out, "  > {line:>2} | {text}")?,
                    None => {
                        return Err(RenderError::Failed(format!(
                            "{} has no source line {line}",
                            context.kind
                        )))
                    }
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn render_problem(&mut self, context: &ProblemContext) -> Result<(), RenderError> {
        writeln!(self.out, "{}: {}", context.kind, context.problem)?;
        self.out.flush()?;
        Ok(())
    }
}
