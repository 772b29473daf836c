#[cfg(test)]
#[path = "../../tests/unit/topology/ring_test.rs"]
mod ring_test;

use super::*;

/// A bidirectional ring: every vertex is connected in both directions to its predecessor and successor.
#[derive(Clone, Debug, Default)]
pub struct Ring {
    graph: Graph,
}

impl Ring {
    /// Creates a ring with given amount of vertices.
    pub fn new(num_vertices: usize) -> Self {
        let mut ring = Self::default();
        (0..num_vertices).for_each(|_| ring.add_vertex());

        ring
    }

    fn connect(&mut self, a: usize, b: usize) {
        // NOTE vertices are always valid and distinct here
        let _ = self.graph.add_edge(a, b);
        let _ = self.graph.add_edge(b, a);
    }

    fn disconnect(&mut self, a: usize, b: usize) {
        let _ = self.graph.remove_edge(a, b);
        let _ = self.graph.remove_edge(b, a);
    }
}

impl Topology for Ring {
    fn name(&self) -> String {
        "Ring".to_string()
    }

    fn add_vertex(&mut self) {
        let new_vertex = self.graph.add_vertex();

        match new_vertex {
            0 => {}
            1 => self.connect(0, 1),
            _ => {
                let last = new_vertex - 1;
                // NOTE when the third vertex is added, the first and the last vertices stay neighbors
                if last > 1 {
                    self.disconnect(last, 0);
                }
                self.connect(last, new_vertex);
                self.connect(new_vertex, 0);
            }
        }
    }

    delegate_to_graph!();
}

display_topology!(Ring);

/// A directed ring: every vertex sends migrants to its successor only.
#[derive(Clone, Debug, Default)]
pub struct OneWayRing {
    graph: Graph,
}

impl OneWayRing {
    /// Creates a one way ring with given amount of vertices.
    pub fn new(num_vertices: usize) -> Self {
        let mut ring = Self::default();
        (0..num_vertices).for_each(|_| ring.add_vertex());

        ring
    }
}

impl Topology for OneWayRing {
    fn name(&self) -> String {
        "One way ring".to_string()
    }

    fn add_vertex(&mut self) {
        let new_vertex = self.graph.add_vertex();

        if new_vertex > 0 {
            let last = new_vertex - 1;
            let _ = self.graph.remove_edge(last, 0);
            let _ = self.graph.add_edge(last, new_vertex);
            let _ = self.graph.add_edge(new_vertex, 0);
        }
    }

    delegate_to_graph!();
}

display_topology!(OneWayRing);
