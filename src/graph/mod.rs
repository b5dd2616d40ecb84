//! Floor-plan connectivity graph.
//!
//! Vertices are named points on the integer floor-plan grid; edges are
//! undirected and unweighted (route cost is hop count). The graph is
//! immutable after load: integrity problems reject the whole plan, so a
//! constructed [`NavigationGraph`] is always internally consistent.

mod document;
mod search;

pub use document::{DocumentError, EdgeRecord, FloorPlanDoc, VertexRecord};

use std::collections::HashMap;

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::GridPoint;
use crate::error::{NavError, Result};

/// A named point in the floor-plan grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    /// Unique id, referenced by edges and by the session.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Position on the floor-plan grid.
    pub grid: GridPoint,
}

impl Vertex {
    /// Create a new vertex.
    pub fn new(id: impl Into<String>, name: impl Into<String>, grid: GridPoint) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            grid,
        }
    }
}

/// Undirected connectivity between two vertices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique id.
    pub id: String,
    /// Vertex id of one endpoint.
    pub from: String,
    /// Vertex id of the other endpoint.
    pub to: String,
}

impl Edge {
    /// Create a new edge between two vertex ids.
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Validated floor-plan graph with adjacency prepared for route search.
#[derive(Clone, Debug)]
pub struct NavigationGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    /// Vertex id to index into `vertices`.
    index: HashMap<String, usize>,
    /// Per-vertex neighbor indices, in edge-declaration order.
    adjacency: Vec<Vec<usize>>,
}

impl NavigationGraph {
    /// Build a graph from vertices and edges, validating integrity.
    ///
    /// Fails with [`NavError::GraphIntegrity`] on a duplicate vertex id
    /// or an edge endpoint that names no vertex. On failure nothing is
    /// retained; the plan is rejected wholesale.
    pub fn load(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Result<Self> {
        let mut index = HashMap::with_capacity(vertices.len());
        for (i, vertex) in vertices.iter().enumerate() {
            if index.insert(vertex.id.clone(), i).is_some() {
                return Err(NavError::GraphIntegrity(format!(
                    "duplicate vertex id '{}'",
                    vertex.id
                )));
            }
        }

        let mut adjacency = vec![Vec::new(); vertices.len()];
        for edge in &edges {
            let from = *index.get(&edge.from).ok_or_else(|| {
                NavError::GraphIntegrity(format!(
                    "edge '{}' references unknown vertex '{}'",
                    edge.id, edge.from
                ))
            })?;
            let to = *index.get(&edge.to).ok_or_else(|| {
                NavError::GraphIntegrity(format!(
                    "edge '{}' references unknown vertex '{}'",
                    edge.id, edge.to
                ))
            })?;
            adjacency[from].push(to);
            adjacency[to].push(from);
        }

        info!(
            "floor plan loaded: {} vertices, {} edges",
            vertices.len(),
            edges.len()
        );

        Ok(Self {
            vertices,
            edges,
            index,
            adjacency,
        })
    }

    /// Build a graph from a parsed floor-plan document.
    pub fn from_document(doc: FloorPlanDoc) -> Result<Self> {
        let vertices = doc
            .vertices
            .into_iter()
            .map(|v| Vertex {
                id: v.id,
                name: v.object_name,
                grid: GridPoint::new(v.cx, v.cy),
            })
            .collect();
        let edges = doc
            .edges
            .into_iter()
            .map(|e| Edge {
                id: e.id,
                from: e.from,
                to: e.to,
            })
            .collect();
        Self::load(vertices, edges)
    }

    /// Exact vertex lookup by id.
    pub fn find_vertex(&self, id: &str) -> Result<&Vertex> {
        self.vertex_index(id)
            .map(|i| &self.vertices[i])
            .ok_or_else(|| NavError::VertexNotFound(id.to_string()))
    }

    /// Whether a vertex with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The vertex closest to a grid position (planar distance).
    ///
    /// Ties keep the earliest-declared vertex. `None` on an empty graph.
    pub fn nearest_vertex(&self, grid: GridPoint) -> Option<&Vertex> {
        let mut best: Option<(&Vertex, i64)> = None;
        for vertex in &self.vertices {
            let d = vertex.grid.distance_squared(&grid);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((vertex, d));
            }
        }
        best.map(|(v, _)| v)
    }

    /// All vertices, in declaration order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges, in declaration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub(crate) fn vertex_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn vertex_at(&self, index: usize) -> &Vertex {
        &self.vertices[index]
    }

    pub(crate) fn neighbors(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }
}
