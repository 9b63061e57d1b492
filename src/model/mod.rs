mod dataset;
mod linear;

pub use dataset::{Batch, Dataset};
pub use linear::LinearRegression;
