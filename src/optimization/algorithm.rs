use std::{fmt, str::FromStr};

use log::debug;

use super::{Adagrad, Adam, Optimizer, Sgd};
use crate::{OptimErr, Result, graph::Graph};

/// The closed set of optimization algorithms, chosen once and kept for the whole training.
#[derive(Debug)]
pub enum Algorithm {
    Sgd(Sgd),
    Adagrad(Adagrad),
    Adam(Adam),
}

impl Algorithm {
    /// Creates an algorithm with its default hyperparameters given its name.
    ///
    /// # Arguments
    /// * `name` - One of `sgd`, `adagrad` or `adam`, case insensitive.
    ///
    /// # Returns
    /// The algorithm or an error if the name is unknown.
    pub fn from_name(name: &str) -> Result<Self> {
        let algorithm = match name.trim().to_ascii_lowercase().as_str() {
            "sgd" => Self::Sgd(Sgd::default()),
            "adagrad" => Self::Adagrad(Adagrad::default()),
            "adam" => Self::Adam(Adam::default()),
            _ => return Err(OptimErr::UnknownAlgorithm(name.to_string())),
        };

        debug!(algorithm = algorithm.name(); "selected optimizer by name");
        Ok(algorithm)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Sgd(_) => "sgd",
            Algorithm::Adagrad(_) => "adagrad",
            Algorithm::Adam(_) => "adam",
        }
    }
}

impl Optimizer for Algorithm {
    fn update<G: Graph>(&mut self, graph: &mut G, batch: Option<&G::Batch>) {
        match self {
            Algorithm::Sgd(sgd) => sgd.update(graph, batch),
            Algorithm::Adagrad(adagrad) => adagrad.update(graph, batch),
            Algorithm::Adam(adam) => adam.update(graph, batch),
        }
    }
}

impl FromStr for Algorithm {
    type Err = OptimErr;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Sgd> for Algorithm {
    fn from(value: Sgd) -> Self {
        Self::Sgd(value)
    }
}

impl From<Adagrad> for Algorithm {
    fn from(value: Adagrad) -> Self {
        Self::Adagrad(value)
    }
}

impl From<Adam> for Algorithm {
    fn from(value: Adam) -> Self {
        Self::Adam(value)
    }
}
