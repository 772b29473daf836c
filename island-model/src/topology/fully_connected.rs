#[cfg(test)]
#[path = "../../tests/unit/topology/fully_connected_test.rs"]
mod fully_connected_test;

use super::*;

/// A topology where every vertex is connected in both directions to every other vertex.
#[derive(Clone, Debug, Default)]
pub struct FullyConnected {
    graph: Graph,
}

impl FullyConnected {
    /// Creates a fully connected topology with given amount of vertices.
    pub fn new(num_vertices: usize) -> Self {
        let mut topology = Self::default();
        (0..num_vertices).for_each(|_| topology.add_vertex());

        topology
    }
}

impl Topology for FullyConnected {
    fn name(&self) -> String {
        "Fully connected".to_string()
    }

    fn add_vertex(&mut self) {
        let new_vertex = self.graph.add_vertex();

        (0..new_vertex).for_each(|vertex| {
            let _ = self.graph.add_edge(vertex, new_vertex);
            let _ = self.graph.add_edge(new_vertex, vertex);
        });
    }

    delegate_to_graph!();
}

display_topology!(FullyConnected);

/// A topology without edges: islands evolve in isolation.
#[derive(Clone, Debug, Default)]
pub struct Unconnected {
    graph: Graph,
}

impl Unconnected {
    /// Creates an unconnected topology with given amount of vertices.
    pub fn new(num_vertices: usize) -> Self {
        let mut topology = Self::default();
        (0..num_vertices).for_each(|_| topology.add_vertex());

        topology
    }
}

impl Topology for Unconnected {
    fn name(&self) -> String {
        "Unconnected".to_string()
    }

    fn add_vertex(&mut self) {
        self.graph.add_vertex();
    }

    delegate_to_graph!();
}

display_topology!(Unconnected);
