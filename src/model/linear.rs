use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use super::Batch;
use crate::{
    OptimErr, Result,
    graph::{Graph, ParamsView},
};

/// A linear regression model `y = x · W + b` trained on the mean squared error.
///
/// Weights and bias are packed in a single flat buffer, the `W` matrix (row major,
/// `x_size × y_size`) followed by `b` (`y_size`).
#[derive(Debug, Clone)]
pub struct LinearRegression {
    x_size: usize,
    y_size: usize,
    params: Vec<f32>,
    grad: Vec<f32>,
}

impl LinearRegression {
    /// Creates a new `LinearRegression` with every parameter set to zero.
    ///
    /// # Arguments
    /// * `x_size` - The amount of input features.
    /// * `y_size` - The amount of outputs.
    pub fn new(x_size: usize, y_size: usize) -> Self {
        let size = Self::size_for(x_size, y_size);

        Self {
            x_size,
            y_size,
            params: vec![0.; size],
            grad: vec![0.; size],
        }
    }

    /// Creates a new `LinearRegression` with the given initial parameters.
    ///
    /// # Returns
    /// The model or an error if `params` doesn't hold exactly `(x_size + 1) * y_size` values.
    pub fn with_params(x_size: usize, y_size: usize, params: Vec<f32>) -> Result<Self> {
        let expected = Self::size_for(x_size, y_size);
        if params.len() != expected {
            return Err(OptimErr::SizeMismatch {
                what: "linear regression parameters",
                got: params.len(),
                expected,
            });
        }

        Ok(Self {
            x_size,
            y_size,
            grad: vec![0.; expected],
            params,
        })
    }

    fn size_for(x_size: usize, y_size: usize) -> usize {
        (x_size + 1) * y_size
    }

    /// Returns the amount of parameters in the model.
    pub fn size(&self) -> usize {
        self.params.len()
    }

    pub fn weights(&self) -> ArrayView2<'_, f32> {
        let (w, _) = self.params.split_at(self.x_size * self.y_size);
        ArrayView2::from_shape((self.x_size, self.y_size), w)
            .expect("the weights are sized on construction")
    }

    pub fn bias(&self) -> ArrayView1<'_, f32> {
        let (_, b) = self.params.split_at(self.x_size * self.y_size);
        ArrayView1::from(b)
    }

    /// Makes a forward pass through the model.
    ///
    /// # Arguments
    /// * `x` - The input, one sample per row.
    pub fn predict(&self, x: ArrayView2<f32>) -> Array2<f32> {
        x.dot(&self.weights()) + &self.bias()
    }

    /// The mean squared error of the model's prediction over `batch`.
    pub fn loss(&self, batch: &Batch) -> f32 {
        (self.predict(batch.x.view()) - &batch.y)
            .mapv(|d| d.powi(2))
            .mean()
            .unwrap_or_default()
    }
}

impl Graph for LinearRegression {
    type Batch = Batch;

    fn backprop(&mut self, batch: Option<&Batch>) {
        let Some(batch) = batch else {
            return;
        };

        let y_pred = self.predict(batch.x.view());
        let delta = (&y_pred - &batch.y) * (2.0 / y_pred.len().max(1) as f32);

        let d_w = batch.x.t().dot(&delta);
        let d_b = delta.sum_axis(Axis(0));

        let (g_w, g_b) = self.grad.split_at_mut(self.x_size * self.y_size);
        g_w.iter_mut().zip(d_w.iter()).for_each(|(g, d)| *g = *d);
        g_b.iter_mut().zip(d_b.iter()).for_each(|(g, d)| *g = *d);
    }

    fn params(&mut self) -> ParamsView<'_> {
        ParamsView::new(&mut self.params, &self.grad)
    }
}
