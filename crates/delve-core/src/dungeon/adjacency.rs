//! Area connectivity graph

#[cfg(not(feature = "std"))]
use crate::compat::*;
#[cfg(feature = "std")]
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::area::{AreaId, AreaTree};

/// Symmetric boolean matrix over the nodes of an [`AreaTree`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    size: usize,
    links: Vec<bool>,
}

impl AdjacencyMatrix {
    /// Matrix with no edges for `size` nodes
    pub fn new(size: usize) -> Self {
        Self {
            size,
            links: vec![false; size * size],
        }
    }

    /// Matrix holding the structural edges of a finished tree: each street
    /// linked to its parent
    pub fn for_tree(tree: &AreaTree) -> Self {
        let mut matrix = Self::new(tree.len());
        for (id, area) in tree.streets() {
            if let Some(parent) = area.parent {
                matrix.connect(id, parent);
            }
        }
        matrix
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Link two nodes in both directions
    pub fn connect(&mut self, a: AreaId, b: AreaId) {
        debug_assert!(a.0 < self.size && b.0 < self.size);
        if a.0 < self.size && b.0 < self.size {
            self.links[a.0 * self.size + b.0] = true;
            self.links[b.0 * self.size + a.0] = true;
        }
    }

    pub fn is_connected(&self, a: AreaId, b: AreaId) -> bool {
        a.0 < self.size && b.0 < self.size && self.links[a.0 * self.size + b.0]
    }

    /// Nodes linked to `id`, in index order
    pub fn neighbors(&self, id: AreaId) -> impl Iterator<Item = AreaId> + '_ {
        let row: &[bool] = if id.0 < self.size {
            &self.links[id.0 * self.size..(id.0 + 1) * self.size]
        } else {
            &[]
        };
        row.iter()
            .enumerate()
            .filter(|(_, linked)| **linked)
            .map(|(j, _)| AreaId(j))
    }

    pub fn degree(&self, id: AreaId) -> usize {
        self.neighbors(id).count()
    }

    /// Which nodes can be reached from `start` by following edges
    pub fn reachable_from(&self, start: AreaId) -> Vec<bool> {
        let mut seen = vec![false; self.size];
        if start.0 >= self.size {
            return seen;
        }
        let mut queue = VecDeque::new();
        seen[start.0] = true;
        queue.push_back(start);
        while let Some(id) = queue.pop_front() {
            for next in self.neighbors(id) {
                if !seen[next.0] {
                    seen[next.0] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }
}
