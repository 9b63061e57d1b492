//! Parameter-update engine for neural network training.
//!
//! A [`Graph`](graph::Graph) exposes its trainable parameters and their gradient as one flat
//! buffer, an [`Optimizer`](optimization::Optimizer) asks it to backpropagate a batch and then
//! moves every parameter by one step of SGD, Adagrad or Adam.

pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod optimization;

pub use error::{OptimErr, Result};
