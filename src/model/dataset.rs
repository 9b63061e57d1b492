use std::num::NonZeroUsize;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use rand::{Rng, seq::SliceRandom};

use crate::{OptimErr, Result};

/// A mini-batch of samples, one per row.
#[derive(Debug, Clone)]
pub struct Batch {
    pub x: Array2<f32>,
    pub y: Array2<f32>,
}

impl Batch {
    /// Creates a new `Batch`.
    ///
    /// # Returns
    /// The batch or an error if `x` and `y` hold a different amount of samples.
    pub fn new(x: Array2<f32>, y: Array2<f32>) -> Result<Self> {
        if x.nrows() != y.nrows() {
            return Err(OptimErr::SizeMismatch {
                what: "batch samples",
                got: y.nrows(),
                expected: x.nrows(),
            });
        }

        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An in-memory dataset that yields shuffled mini-batches.
#[derive(Debug, Clone)]
pub struct Dataset {
    samples: Batch,
}

impl Dataset {
    pub fn new(samples: Batch) -> Self {
        Self { samples }
    }

    /// Generates `len` samples of a noiseless linear relation `y = x · W + b`.
    ///
    /// The inputs are drawn uniformly from `[-1, 1)`.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `len` - The amount of samples.
    /// * `weights` - The `x_size × y_size` weight matrix.
    /// * `bias` - The `y_size` bias vector.
    pub fn linear<R: Rng>(
        rng: &mut R,
        len: usize,
        weights: ArrayView2<f32>,
        bias: ArrayView1<f32>,
    ) -> Self {
        let x = Array2::from_shape_simple_fn((len, weights.nrows()), || {
            rng.random_range(-1.0..1.0)
        });
        let y = x.dot(&weights) + &bias;

        Self::new(Batch { x, y })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The whole dataset as a single batch.
    pub fn full(&self) -> &Batch {
        &self.samples
    }

    /// Shuffles the samples and splits them into batches of at most `batch_size` rows.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `batch_size` - The maximum amount of samples per batch.
    pub fn batches<R: Rng>(&self, rng: &mut R, batch_size: NonZeroUsize) -> Vec<Batch> {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.shuffle(rng);

        indices
            .chunks(batch_size.get())
            .map(|chunk| Batch {
                x: self.samples.x.select(Axis(0), chunk),
                y: self.samples.y.select(Axis(0), chunk),
            })
            .collect()
    }
}
