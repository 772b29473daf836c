#[cfg(test)]
#[path = "../../tests/unit/topology/custom_test.rs"]
mod custom_test;

use super::*;

/// A topology with explicitly managed edges. New vertices are added disconnected.
#[derive(Clone, Debug, Default)]
pub struct CustomTopology {
    graph: Graph,
}

impl CustomTopology {
    /// Creates a custom topology with given amount of disconnected vertices.
    pub fn new(num_vertices: usize) -> Self {
        let mut topology = Self::default();
        (0..num_vertices).for_each(|_| topology.add_vertex());

        topology
    }

    /// Creates a custom topology with given amount of vertices and directed edges.
    pub fn with_edges(num_vertices: usize, edges: &[(usize, usize)]) -> GenericResult<Self> {
        let mut topology = Self::new(num_vertices);
        edges.iter().try_for_each(|&(src, dst)| topology.add_edge(src, dst).map(|_| ()))?;

        Ok(topology)
    }

    /// Adds a directed edge. Returns false if the edge already exists.
    pub fn add_edge(&mut self, src: usize, dst: usize) -> GenericResult<bool> {
        self.graph.add_edge(src, dst)
    }

    /// Removes a directed edge. Returns false if there was no such edge.
    pub fn remove_edge(&mut self, src: usize, dst: usize) -> GenericResult<bool> {
        self.graph.remove_edge(src, dst)
    }
}

impl Topology for CustomTopology {
    fn name(&self) -> String {
        "Custom".to_string()
    }

    fn add_vertex(&mut self) {
        self.graph.add_vertex();
    }

    delegate_to_graph!();
}

display_topology!(CustomTopology);
