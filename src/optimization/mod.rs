mod adagrad;
mod adam;
mod algorithm;
pub mod kernel;
mod lazy;
mod optimizer;
mod sgd;
mod spec;

pub use adagrad::Adagrad;
pub use adam::Adam;
pub use algorithm::Algorithm;
pub use lazy::LazyState;
pub use optimizer::Optimizer;
pub use sgd::Sgd;
pub use spec::OptimizerSpec;
