/// A computation graph that knows how to compute the gradient of its loss.
///
/// The graph owns the flattened parameter vector and its gradient, an optimizer only borrows
/// them for the duration of one update.
pub trait Graph {
    /// The unit of data a gradient is computed for.
    type Batch;

    /// Runs backpropagation for `batch`, populating the gradient buffer.
    ///
    /// With `None` the gradients staged by the caller must be left untouched.
    ///
    /// # Arguments
    /// * `batch` - The batch to compute the gradient for, if any.
    fn backprop(&mut self, batch: Option<&Self::Batch>);

    /// Returns a view over all the trainable parameters and their gradient.
    fn params(&mut self) -> ParamsView<'_>;
}

/// A flat, contiguous view of a graph's parameters and gradient.
#[derive(Debug)]
pub struct ParamsView<'a> {
    vals: &'a mut [f32],
    grads: &'a [f32],
}

impl<'a> ParamsView<'a> {
    /// Creates a new `ParamsView`.
    ///
    /// Both buffers must have the same length, this is only checked in debug builds.
    ///
    /// # Arguments
    /// * `vals` - The parameter values.
    /// * `grads` - The gradient, one value per parameter.
    pub fn new(vals: &'a mut [f32], grads: &'a [f32]) -> Self {
        debug_assert_eq!(
            vals.len(),
            grads.len(),
            "parameters and gradient must have the same length"
        );

        Self { vals, grads }
    }

    /// The total amount of trainable elements.
    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    pub fn vals(&self) -> &[f32] {
        &*self.vals
    }

    pub fn grads(&self) -> &[f32] {
        self.grads
    }

    /// Consumes the view, yielding the mutable values and the gradient.
    pub fn split(self) -> (&'a mut [f32], &'a [f32]) {
        (self.vals, self.grads)
    }
}
