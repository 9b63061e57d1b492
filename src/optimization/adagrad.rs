use super::{
    Optimizer, kernel,
    lazy::{self, LazyState},
};
use crate::graph::Graph;

/// Adagrad optimization algorithm.
///
/// Every parameter gets its own learning rate, which shrinks as that parameter accumulates
/// squared gradient.
#[derive(Debug)]
pub struct Adagrad {
    learning_rate: f32,
    epsilon: f32,
    acc: LazyState<Box<[f32]>>,
}

impl Adagrad {
    pub const DEFAULT_LEARNING_RATE: f32 = 0.01;
    pub const DEFAULT_EPSILON: f32 = 1e-8;

    /// Creates a new `Adagrad` optimizer.
    ///
    /// The accumulator is not allocated until the first update.
    ///
    /// # Arguments
    /// * `learning_rate` - The base step length.
    /// * `epsilon` - Added to the accumulator's square root before dividing by it.
    pub fn new(learning_rate: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            epsilon,
            acc: LazyState::Uninitialized,
        }
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// The sum of the squared gradients seen so far, `None` before the first update.
    pub fn accumulator(&self) -> Option<&[f32]> {
        self.acc.get().map(|acc| &**acc)
    }

    /// Accumulates the squared gradient and takes a step scaled by the accumulator.
    ///
    /// # Arguments
    /// * `params` - The parameters that are going to be modified.
    /// * `grad` - The gradient used for taking the step.
    ///
    /// # Panics
    /// If the amount of parameters differs from the one seen on the first call.
    pub fn apply(&mut self, params: &mut [f32], grad: &[f32]) {
        let Self {
            learning_rate: lr,
            epsilon: eps,
            ..
        } = *self;

        let acc = self.acc.get_or_alloc(params.len(), lazy::zeroed);

        kernel::zip3(params, acc, grad, |w, acc, g| {
            *acc += g * g;
            *w -= (lr / (acc.sqrt() + eps)) * g;
        });
    }
}

impl Default for Adagrad {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEARNING_RATE, Self::DEFAULT_EPSILON)
    }
}

impl Optimizer for Adagrad {
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

    fn assert_close(got: &[f32], expected: &[f32]) {
        assert_eq!(got.len(), expected.len());
        for (i, (g, e)) in got.iter().zip(expected).enumerate() {
            assert!((g - e).abs() < 1e-6, "index {i}: got {g}, expected {e}");
        }
    }

    #[test]
    fn test_golden_values() {
        let mut graph = StagedGraph::new(&[1.0, 2.0, 3.0], &[0.1, -0.2, 0.0]);
        let mut adagrad = Adagrad::new(0.01, 1e-8);

        adagrad.update(&mut graph, None);

        assert_close(adagrad.accumulator().unwrap(), &[0.01, 0.04, 0.0]);
        let expected = [
            1.0 - 0.01 / (0.1 + 1e-8) * 0.1,
            2.0 - 0.01 / (0.2 + 1e-8) * -0.2,
            3.0,
        ];
        assert_close(&graph.vals, &expected);
    }

    #[test]
    fn test_accumulator_is_the_sum_of_squares() {
        let grads = [[1.0, -2.0], [-3.0, 0.5], [0.0, -0.5]];
        let mut graph = StagedGraph::new(&[0.0, 0.0], &[0.0, 0.0]);
        let mut adagrad = Adagrad::default();
        let mut prev = [0.0; 2];

        for g in grads {
            adagrad.update(&mut graph, Some(&g.to_vec()));

            let acc = adagrad.accumulator().unwrap();
            for i in 0..acc.len() {
                assert!(acc[i] >= prev[i], "accumulator decreased at index {i}");
                prev[i] = acc[i];
            }
        }

        assert_close(&prev, &[1.0 + 9.0, 4.0 + 0.25 + 0.25]);
    }

    #[test]
    fn test_lazy_allocation() {
        let mut adagrad = Adagrad::default();
        assert!(adagrad.accumulator().is_none());

        let mut graph = StagedGraph::new(&[0.0; 5], &[1.0; 5]);
        adagrad.update(&mut graph, None);
        assert_eq!(adagrad.accumulator().unwrap().len(), 5);

        adagrad.update(&mut graph, None);
        assert_close(adagrad.accumulator().unwrap(), &[2.0; 5]);
    }

    #[test]
    fn test_zero_gradient_is_a_no_op() {
        let mut graph = StagedGraph::new(&[1.0, -1.0], &[0.5, 0.25]);
        let mut adagrad = Adagrad::default();
        adagrad.update(&mut graph, None);

        let vals = graph.vals.clone();
        let acc = adagrad.accumulator().unwrap().to_vec();

        adagrad.update(&mut graph, Some(&vec![0.0, 0.0]));

        assert_eq!(graph.vals, vals);
        assert_eq!(adagrad.accumulator().unwrap(), acc.as_slice());
    }

    #[test]
    fn test_zero_gradient_on_fresh_state() {
        let mut graph = StagedGraph::new(&[1.0, 2.0], &[0.0, 0.0]);
        Adagrad::default().update(&mut graph, None);
        assert_eq!(graph.vals, [1.0, 2.0]);
    }

    #[test]
    fn test_effective_step_shrinks() {
        let mut graph = StagedGraph::new(&[0.0], &[1.0]);
        let mut adagrad = Adagrad::new(0.1, 0.0);

        adagrad.update(&mut graph, None);
        let first = -graph.vals[0];
        adagrad.update(&mut graph, None);
        let second = -graph.vals[0] - first;

        assert!(second < first);
    }

    #[test]
    fn test_accumulates_across_parallel_chunks() {
        const LEN: usize = 3 * kernel::MIN_CHUNK + 5;

        let grad: Vec<f32> = (0..LEN).map(|i| (i % 13) as f32 * 0.1 - 0.6).collect();
        let mut graph = StagedGraph::new(&vec![0.0; LEN], &grad);
        let mut adagrad = Adagrad::default();

        adagrad.update(&mut graph, None);
        adagrad.update(&mut graph, None);

        let acc = adagrad.accumulator().unwrap();
        assert_eq!(acc.len(), LEN);
        for (i, (acc, g)) in acc.iter().zip(&grad).enumerate() {
            assert_eq!(*acc, 2.0 * (g * g), "mismatch at index {i}");
        }
    }

    #[test]
    #[should_panic(expected = "parameter count changed")]
    fn test_parameter_count_change() {
        let mut adagrad = Adagrad::default();
        adagrad.apply(&mut [0.0; 2], &[1.0; 2]);
        adagrad.apply(&mut [0.0; 3], &[1.0; 3]);
    }
}
