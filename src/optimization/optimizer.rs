use crate::graph::Graph;

/// A parameter update rule driven by a graph and an optional batch.
///
/// Implementors own their auxiliary state, the parameters and the gradient stay with the graph.
pub trait Optimizer {
    /// Computes the gradient for `batch` and moves every parameter of `graph` by one step.
    ///
    /// Auxiliary state is allocated on the first call, sized to the graph's parameter count.
    ///
    /// # Arguments
    /// * `graph` - The graph owning the parameters and their gradient.
    /// * `batch` - The batch to backpropagate, `None` uses the gradient already staged.
    fn update<G: Graph>(&mut self, graph: &mut G, batch: Option<&G::Batch>);
}
