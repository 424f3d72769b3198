//! Square boolean reachability matrix produced by the closure.

/// `V × V` reachability relation: `reaches(i, j)` holds iff `j` can be
/// reached from `i` along zero or more directed edges.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReachabilityMatrix {
    vertex_count: usize,
    cells: Vec<bool>,
}

impl ReachabilityMatrix {
    pub(super) fn unreachable(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            cells: vec![false; vertex_count.saturating_mul(vertex_count)],
        }
    }

    /// Marks `to` reachable from `from`, returning `true` if it was not
    /// already marked. Out-of-range coordinates are ignored.
    pub(super) fn mark(&mut self, from: usize, to: usize) -> bool {
        let Some(offset) = self.offset(from, to) else {
            return false;
        };
        match self.cells.get_mut(offset) {
            Some(cell) if !*cell => {
                *cell = true;
                true
            }
            _ => false,
        }
    }

    fn offset(&self, from: usize, to: usize) -> Option<usize> {
        (from < self.vertex_count && to < self.vertex_count)
            .then(|| from * self.vertex_count + to)
    }

    /// Number of vertices on each side of the matrix.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Reports whether `to` is reachable from `from`; `false` for
    /// out-of-range vertices.
    #[must_use]
    pub fn reaches(&self, from: usize, to: usize) -> bool {
        self.offset(from, to)
            .and_then(|offset| self.cells.get(offset))
            .copied()
            .unwrap_or(false)
    }

    /// Returns the reachability row for `from`.
    #[must_use]
    pub fn row(&self, from: usize) -> Option<&[bool]> {
        let start = self.offset(from, 0)?;
        self.cells.get(start..start + self.vertex_count)
    }

    /// Iterates over the vertices reachable from `from`, including `from`
    /// itself, in ascending order.
    pub fn reachable_from(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(from)
            .into_iter()
            .flat_map(|row| row.iter().enumerate())
            .filter_map(|(vertex, &reached)| reached.then_some(vertex))
    }

    /// Renders the matrix as `0`/`1` rows.
    ///
    /// # Examples
    /// ```
    /// use corefcheck_core::TransitiveGraph;
    ///
    /// let mut graph = TransitiveGraph::new(2);
    /// graph.add_edge(0, 1);
    /// assert_eq!(graph.transitive_closure().to_rows(), vec![vec![1, 1], vec![0, 1]]);
    /// ```
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        if self.vertex_count == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.vertex_count)
            .map(|row| row.iter().map(|&reached| u8::from(reached)).collect())
            .collect()
    }
}
