use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Adagrad, Adam, Algorithm, Sgd};
use crate::{OptimErr, Result};

/// The specification for the `Optimizer` to train with.
///
/// Every omitted hyperparameter takes the algorithm's default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerSpec {
    Sgd {
        #[serde(default)]
        learning_rate: Option<f32>,
    },
    Adagrad {
        #[serde(default)]
        learning_rate: Option<f32>,
        #[serde(default)]
        epsilon: Option<f32>,
    },
    Adam {
        #[serde(default)]
        learning_rate: Option<f32>,
        #[serde(default)]
        beta1: Option<f32>,
        #[serde(default)]
        beta2: Option<f32>,
        #[serde(default)]
        epsilon: Option<f32>,
    },
}

impl OptimizerSpec {
    /// Builds the algorithm this spec describes.
    ///
    /// # Returns
    /// The algorithm or an error if any hyperparameter is out of range.
    pub fn build(&self) -> Result<Algorithm> {
        let algorithm = match *self {
            OptimizerSpec::Sgd { learning_rate } => {
                let lr = learning_rate.unwrap_or(Sgd::DEFAULT_LEARNING_RATE);
                check_learning_rate(lr)?;
                Algorithm::Sgd(Sgd::new(lr))
            }
            OptimizerSpec::Adagrad {
                learning_rate,
                epsilon,
            } => {
                let lr = learning_rate.unwrap_or(Adagrad::DEFAULT_LEARNING_RATE);
                let eps = epsilon.unwrap_or(Adagrad::DEFAULT_EPSILON);
                check_learning_rate(lr)?;
                check_epsilon(eps)?;
                Algorithm::Adagrad(Adagrad::new(lr, eps))
            }
            OptimizerSpec::Adam {
                learning_rate,
                beta1,
                beta2,
                epsilon,
            } => {
                let lr = learning_rate.unwrap_or(Adam::DEFAULT_LEARNING_RATE);
                let b1 = beta1.unwrap_or(Adam::DEFAULT_BETA1);
                let b2 = beta2.unwrap_or(Adam::DEFAULT_BETA2);
                let eps = epsilon.unwrap_or(Adam::DEFAULT_EPSILON);
                check_learning_rate(lr)?;
                check_beta("beta1", b1)?;
                check_beta("beta2", b2)?;
                check_epsilon(eps)?;
                Algorithm::Adam(Adam::new(lr, b1, b2, eps))
            }
        };

        debug!(algorithm = algorithm.name(); "built optimizer from spec");
        Ok(algorithm)
    }
}

impl Default for OptimizerSpec {
    fn default() -> Self {
        Self::Adam {
            learning_rate: None,
            beta1: None,
            beta2: None,
            epsilon: None,
        }
    }
}

impl FromStr for OptimizerSpec {
    type Err = OptimErr;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sgd" => Ok(Self::Sgd {
                learning_rate: None,
            }),
            "adagrad" => Ok(Self::Adagrad {
                learning_rate: None,
                epsilon: None,
            }),
            "adam" => Ok(Self::default()),
            _ => Err(OptimErr::UnknownAlgorithm(s.to_string())),
        }
    }
}

fn check_learning_rate(value: f32) -> Result<()> {
    if value.is_finite() && value > 0. {
        return Ok(());
    }

    Err(OptimErr::InvalidHyperparameter {
        name: "learning_rate",
        value,
        expected: "a finite value > 0",
    })
}

fn check_epsilon(value: f32) -> Result<()> {
    if value.is_finite() && value >= 0. {
        return Ok(());
    }

    Err(OptimErr::InvalidHyperparameter {
        name: "epsilon",
        value,
        expected: "a finite value >= 0",
    })
}

fn check_beta(name: &'static str, value: f32) -> Result<()> {
    if (0. ..1.).contains(&value) {
        return Ok(());
    }

    Err(OptimErr::InvalidHyperparameter {
        name,
        value,
        expected: "a value in [0, 1)",
    })
}
