use log::trace;

use super::{
    Optimizer, kernel,
    lazy::{self, LazyState},
};
use crate::graph::Graph;

/// First and second moment estimates, one value per parameter.
#[derive(Debug)]
struct Moments {
    m: Box<[f32]>,
    v: Box<[f32]>,
}

impl Moments {
    fn zeroed(len: usize) -> Self {
        Self {
            m: lazy::zeroed(len),
            v: lazy::zeroed(len),
        }
    }
}

/// Adam optimization algorithm, see <https://arxiv.org/abs/1412.6980>.
#[derive(Debug)]
pub struct Adam {
    learning_rate: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    t: u64,
    moments: LazyState<Moments>,
}

impl Adam {
    pub const DEFAULT_LEARNING_RATE: f32 = 0.001;
    pub const DEFAULT_BETA1: f32 = 0.9;
    pub const DEFAULT_BETA2: f32 = 0.999;
    pub const DEFAULT_EPSILON: f32 = 1e-8;

    /// Creates a new `Adam` optimizer.
    ///
    /// The moment estimates are not allocated until the first update.
    ///
    /// # Arguments
    /// * `learning_rate` - The base step length.
    /// * `beta1` - Decay rate of the first moment estimate.
    /// * `beta2` - Decay rate of the second moment estimate.
    /// * `epsilon` - Added to the second moment's square root before dividing by it.
    pub fn new(learning_rate: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            beta1,
            beta2,
            epsilon,
            t: 0,
            moments: LazyState::Uninitialized,
        }
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub fn betas(&self) -> (f32, f32) {
        (self.beta1, self.beta2)
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// The amount of updates applied so far.
    pub fn step(&self) -> u64 {
        self.t
    }

    /// The first and second moment estimates, `None` before the first update.
    pub fn moments(&self) -> Option<(&[f32], &[f32])> {
        self.moments.get().map(|Moments { m, v }| (&**m, &**v))
    }

    /// Updates the moment estimates and takes a bias corrected step.
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
            beta1: b1,
            beta2: b2,
            epsilon: eps,
            ..
        } = *self;

        let Moments { m, v } = self.moments.get_or_alloc(params.len(), Moments::zeroed);

        self.t += 1;
        let t = i32::try_from(self.t).unwrap_or(i32::MAX);
        let denom1 = 1. - b1.powi(t);
        let denom2 = 1. - b2.powi(t);
        trace!(t = self.t, denom1 = denom1, denom2 = denom2; "adam step");

        kernel::zip4(params, m, v, grad, |w, m, v, g| {
            *m = b1 * *m + (1. - b1) * g;
            *v = b2 * *v + (1. - b2) * (g * g);
            *w -= lr * (*m / denom1) / ((*v / denom2).sqrt() + eps);
        });
    }
}

impl Default for Adam {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_LEARNING_RATE,
            Self::DEFAULT_BETA1,
            Self::DEFAULT_BETA2,
            Self::DEFAULT_EPSILON,
        )
    }
}

impl Optimizer for Adam {
    fn update<G: Graph>(&mut self, graph: &mut G, batch: Option<&G::Batch>) {
        graph.backprop(batch);

        let (params, grad) = graph.params().split();
        self.apply(params, grad);
    }
}
