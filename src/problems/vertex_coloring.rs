//! Vertex colouring over an undirected graph.
//!
//! The conversion is the whole frontend: one variable per vertex, the domain
//! `0..k` of candidate colours, and one binary inequality per edge. Reading
//! graphs from disk (or building them interactively) belongs to the host,
//! not here.

use prettytable::{Cell, Row, Table};

use crate::csp::{
    instance::ConstraintInstance,
    network::{ConstraintNetwork, VariableId},
    predicate::Predicate,
};
use crate::error::Result;

/// Colours are plain indices into whatever palette the host renders with.
pub type Colour = u32;

/// In-memory description of an undirected graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<VariableId>,
    edges: Vec<(VariableId, VariableId)>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, id: VariableId) {
        self.vertices.push(id);
    }

    pub fn add_edge(&mut self, a: VariableId, b: VariableId) {
        self.edges.push((a, b));
    }

    pub fn vertices(&self) -> &[VariableId] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(VariableId, VariableId)] {
        &self.edges
    }

    /// A cycle of `n` vertices, `0 - 1 - ... - (n-1) - 0`.
    pub fn ring(n: u32) -> Self {
        let mut graph = Self::new();
        for id in 0..n {
            graph.add_vertex(id);
        }
        for id in 0..n {
            graph.add_edge(id, (id + 1) % n);
        }
        graph
    }
}

/// Converts a graph and a colour count into the general form the solver
/// accepts. Each edge becomes one `NotEqual` constraint: neighbouring
/// vertices may never share a colour.
pub fn graph_to_network(graph: &Graph, colours: u32) -> Result<ConstraintNetwork<Colour>> {
    let mut network = ConstraintNetwork::new();
    for &vertex in graph.vertices() {
        network.add_variable_with_domain(vertex, 0..colours)?;
    }
    for &(a, b) in graph.edges() {
        network.add_constraint(vec![a, b], Predicate::NotEqual)?;
    }
    Ok(network)
}

/// Renders a solved (or partially solved) colouring as a text table.
pub fn render_colouring_table(instance: &ConstraintInstance<Colour>) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Vertex"), Cell::new("Colour")]));

    let mut vertices: Vec<VariableId> = instance.network().variables().to_vec();
    vertices.sort_unstable();
    for vertex in vertices {
        let colour = instance
            .assignment(vertex)
            .map_or_else(|| "-".to_string(), |colour| colour.to_string());
        table.add_row(Row::new(vec![
            Cell::new(&vertex.to_string()),
            Cell::new(&colour),
        ]));
    }

    table.to_string()
}
