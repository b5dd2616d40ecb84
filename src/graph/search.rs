//! Breadth-first route search.

use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, warn};

use crate::error::{NavError, Result};
use crate::Route;

use super::NavigationGraph;

impl NavigationGraph {
    /// Find the route with the fewest hops from `start_id` to `end_id`.
    ///
    /// Breadth-first search; neighbors expand in edge-declaration order
    /// and each vertex is visited at most once, so the first-discovered
    /// route is returned. All edges cost the same: a route through fewer
    /// vertices wins even when it is geometrically longer.
    ///
    /// `start_id == end_id` yields the single-vertex route. When the two
    /// vertices are not connected the result is the two-vertex route
    /// `[start, end]`: best effort for the caller to render, not a
    /// guarantee that the segment is walkable.
    ///
    /// Fails with [`NavError::VertexNotFound`] when either id is unknown.
    pub fn shortest_path(&self, start_id: &str, end_id: &str) -> Result<Route> {
        let start = self
            .vertex_index(start_id)
            .ok_or_else(|| NavError::VertexNotFound(start_id.to_string()))?;
        let end = self
            .vertex_index(end_id)
            .ok_or_else(|| NavError::VertexNotFound(end_id.to_string()))?;

        if start == end {
            return Ok(Route::new(vec![self.vertex_at(start).clone()]));
        }

        let mut visited = HashSet::new();
        let mut parent: HashMap<usize, usize> = HashMap::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == end {
                let route = self.reconstruct(start, end, &parent);
                debug!(
                    "route '{}' -> '{}': {} hops",
                    start_id,
                    end_id,
                    route.hop_count()
                );
                return Ok(route);
            }
            for &next in self.neighbors(current) {
                if visited.insert(next) {
                    parent.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        warn!(
            "'{}' and '{}' are disconnected, returning direct fallback",
            start_id, end_id
        );
        Ok(Route::new(vec![
            self.vertex_at(start).clone(),
            self.vertex_at(end).clone(),
        ]))
    }

    /// Walk parent links back from `end` and emit the route start-first.
    fn reconstruct(&self, start: usize, end: usize, parent: &HashMap<usize, usize>) -> Route {
        let mut indices = vec![end];
        let mut current = end;
        while current != start {
            // Every non-start entry was recorded when first discovered
            current = parent[&current];
            indices.push(current);
        }
        indices.reverse();
        Route::new(
            indices
                .into_iter()
                .map(|i| self.vertex_at(i).clone())
                .collect(),
        )
    }
}
