//! The topology module defines the communication graph over island indices which is used to
//! route migrants.

use crate::utils::*;
use std::fmt::{Display, Formatter};

/// A graph whose vertices are island indices and whose edges denote allowed migration direction.
pub trait Topology: Display + Send + Sync {
    /// Returns a name of the topology.
    fn name(&self) -> String;

    /// Returns amount of vertices.
    fn num_vertices(&self) -> usize;

    /// Appends one vertex connecting it according to the topology's construction rule.
    fn add_vertex(&mut self);

    /// Returns an ordered sequence of vertices reachable for migration from the given vertex.
    fn get_neighbors(&self, vertex: usize) -> GenericResult<Vec<usize>>;

    /// Returns an ordered sequence of vertices from which migrants can reach the given vertex.
    fn get_inv_neighbors(&self, vertex: usize) -> GenericResult<Vec<usize>>;

    /// Makes a copy of the topology.
    fn clone_box(&self) -> Box<dyn Topology>;

    /// Returns all directed edges ordered by source and then by destination.
    fn edges(&self) -> Vec<(usize, usize)> {
        (0..self.num_vertices())
            .flat_map(|src| self.get_neighbors(src).unwrap_or_default().into_iter().map(move |dst| (src, dst)))
            .collect()
    }

    /// Returns amount of directed edges.
    fn num_edges(&self) -> usize {
        self.edges().len()
    }

    /// Checks whether there is an edge from `src` to `dst`.
    fn are_adjacent(&self, src: usize, dst: usize) -> bool {
        self.get_neighbors(src).is_ok_and(|neighbors| neighbors.contains(&dst))
    }
}

/// A directed graph stored as adjacency lists with sorted destinations.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Returns amount of vertices.
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Adds a disconnected vertex and returns its index.
    pub fn add_vertex(&mut self) -> usize {
        self.adjacency.push(Vec::default());
        self.adjacency.len() - 1
    }

    /// Adds a directed edge, self loops are not allowed. Returns false if edge already exists.
    pub fn add_edge(&mut self, src: usize, dst: usize) -> GenericResult<bool> {
        self.check_vertex(src)?;
        self.check_vertex(dst)?;

        if src == dst {
            return Err(GenericError::configuration(format!("self loop is not allowed for vertex {src}")));
        }

        let neighbors = &mut self.adjacency[src];
        match neighbors.binary_search(&dst) {
            Ok(_) => Ok(false),
            Err(position) => {
                neighbors.insert(position, dst);
                Ok(true)
            }
        }
    }

    /// Removes a directed edge. Returns false if edge does not exist.
    pub fn remove_edge(&mut self, src: usize, dst: usize) -> GenericResult<bool> {
        self.check_vertex(src)?;
        self.check_vertex(dst)?;

        let neighbors = &mut self.adjacency[src];
        match neighbors.binary_search(&dst) {
            Ok(position) => {
                neighbors.remove(position);
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    /// Returns destinations of the vertex.
    pub fn neighbors(&self, vertex: usize) -> GenericResult<Vec<usize>> {
        self.check_vertex(vertex)?;
        Ok(self.adjacency[vertex].clone())
    }

    /// Returns sources of the vertex.
    pub fn inv_neighbors(&self, vertex: usize) -> GenericResult<Vec<usize>> {
        self.check_vertex(vertex)?;

        Ok(self
            .adjacency
            .iter()
            .enumerate()
            .filter(|(_, neighbors)| neighbors.binary_search(&vertex).is_ok())
            .map(|(src, _)| src)
            .collect())
    }

    fn check_vertex(&self, vertex: usize) -> GenericResult<()> {
        if vertex < self.num_vertices() {
            Ok(())
        } else {
            Err(GenericError::out_of_range("vertex", vertex, self.num_vertices()))
        }
    }
}

/// Implements topology methods which are delegated to the inner graph.
macro_rules! delegate_to_graph {
    () => {
        fn num_vertices(&self) -> usize {
            self.graph.num_vertices()
        }

        fn get_neighbors(&self, vertex: usize) -> GenericResult<Vec<usize>> {
            self.graph.neighbors(vertex)
        }

        fn get_inv_neighbors(&self, vertex: usize) -> GenericResult<Vec<usize>> {
            self.graph.inv_neighbors(vertex)
        }

        fn clone_box(&self) -> Box<dyn Topology> {
            Box::new(self.clone())
        }
    };
}

/// Implements `Display` trait using `format_topology` function.
macro_rules! display_topology {
    ($type_: ty) => {
        impl std::fmt::Display for $type_ {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                crate::topology::format_topology(self, f)
            }
        }
    };
}

fn format_topology(topology: &dyn Topology, f: &mut Formatter<'_>) -> std::fmt::Result {
    writeln!(f, "Topology type: {}", topology.name())?;
    writeln!(f, "\tNumber of vertices: {}", topology.num_vertices())?;
    write!(f, "\tNumber of edges: {}", topology.num_edges())?;

    for src in 0..topology.num_vertices() {
        let neighbors = topology.get_neighbors(src).unwrap_or_default();
        if !neighbors.is_empty() {
            let neighbors = neighbors.iter().map(|dst| dst.to_string()).collect::<Vec<_>>().join(",");
            write!(f, "\n\t{src} -> [{neighbors}]")?;
        }
    }

    Ok(())
}

mod custom;
pub use self::custom::CustomTopology;

mod fully_connected;
pub use self::fully_connected::{FullyConnected, Unconnected};

mod ring;
pub use self::ring::{OneWayRing, Ring};
