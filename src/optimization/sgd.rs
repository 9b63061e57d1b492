use super::{Optimizer, kernel};
use crate::graph::Graph;

/// Stochastic gradient descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    learning_rate: f32,
}

impl Sgd {
    pub const DEFAULT_LEARNING_RATE: f32 = 0.01;

    /// Creates a new `Sgd`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on each update.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    /// Makes a step in the opposite direction of the gradient.
    ///
    /// # Arguments
    /// * `params` - The parameters that are going to be modified.
    /// * `grad` - The gradient used for taking the step.
    pub fn apply(&mut self, params: &mut [f32], grad: &[f32]) {
        let lr = self.learning_rate;
        kernel::zip2(params, grad, |w, g| *w -= lr * g);
    }
}

impl Default for Sgd {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEARNING_RATE)
    }
}

impl Optimizer for Sgd {
    fn update<G: Graph>(&mut self, graph: &mut G, batch: Option<&G::Batch>) {
        graph.backprop(batch);

        let (params, grad) = graph.params().split();
        self.apply(params, grad);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::StagedGraph;

    #[test]
    fn test_exact_step() {
        const LR: f32 = 0.37;
        let params = [1.5, -2.25, 0.0, 1e-3, 42.0];
        let grad = [0.1, -0.7, 3.0, 0.0, -1e-4];

        let mut graph = StagedGraph::new(&params, &grad);
        Sgd::new(LR).update(&mut graph, None);

        for i in 0..params.len() {
            assert_eq!(graph.vals[i], params[i] - LR * grad[i], "mismatch at index {i}");
        }
    }

    #[test]
    fn test_scenario() {
        let mut graph = StagedGraph::new(&[1.0, 2.0, 3.0], &[0.1, -0.2, 0.0]);
        Sgd::new(0.1).update(&mut graph, None);

        let expected = [0.99, 2.02, 3.0];
        for (w, e) in graph.vals.iter().zip(expected) {
            assert!((w - e).abs() < 1e-6, "got {w}, expected {e}");
        }
    }

    #[test]
    fn test_backprops_the_batch() {
        let mut graph = StagedGraph::new(&[0.0, 0.0], &[0.0, 0.0]);
        let batch = vec![1.0, -1.0];

        Sgd::new(1.0).update(&mut graph, Some(&batch));

        assert_eq!(graph.backprops, 1);
        assert_eq!(graph.vals, [-1.0, 1.0]);
    }

    #[test]
    fn test_default_learning_rate() {
        assert_eq!(Sgd::default().learning_rate(), 0.01);
    }
}
