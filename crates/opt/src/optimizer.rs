use crate::errors::Result;
use crate::history::History;
use optbox_sample::Sample;

/// A sequential optimizer driven by an ask-and-tell loop.
///
/// The caller asks for a sample to evaluate with [`Optimizer::suggest`], evaluates the
/// objective function and tells the outcome back with [`Optimizer::update`].
/// Optimizers never call the objective function themselves.
pub trait Optimizer {
    /// Next sample to evaluate. Suggestion does not modify the history.
    fn suggest(&mut self) -> Result<Sample>;

    /// Record the outcome `y` of the sample `x`
    fn update(&mut self, x: Sample, y: f64) -> Result<()> {
        self.update_many(&[x], &[y])
    }

    /// Record outcomes `ys` of samples `xs` in order.
    ///
    /// Either all pairs are recorded or none when an error is returned.
    fn update_many(&mut self, xs: &[Sample], ys: &[f64]) -> Result<()>;

    /// Evaluations recorded so far
    fn history(&self) -> &History;
}
