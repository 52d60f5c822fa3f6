//! Enumeration of every topological ordering of a DAG.
//!
//! Backtracking over the set of nodes whose predecessors are all placed.
//! The iterator holds its own search stack, so orderings are produced
//! lazily one at a time and the search cannot be restarted.

use std::iter::FusedIterator;

/// One level of the search: nodes available at this depth and the next one to try
#[derive(Debug)]
struct Frame {
    candidates: Vec<usize>,
    cursor: usize,
}

/// Lazy iterator over all topological orderings of a graph
///
/// An empty graph yields exactly one ordering, the empty one. A graph with
/// a cycle yields none.
#[derive(Debug)]
pub struct TopologicalOrderings {
    labels: Vec<String>,
    successors: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
    placed: Vec<bool>,
    order: Vec<usize>,
    frames: Vec<Frame>,
    empty_pending: bool,
}

impl TopologicalOrderings {
    /// Build from node labels and, for each node, the indices of its successors
    pub fn new(labels: Vec<String>, successors: Vec<Vec<usize>>) -> Self {
        let mut in_degree = vec![0; labels.len()];
        for targets in &successors {
            for &target in targets {
                in_degree[target] += 1;
            }
        }
        let mut orderings = Self {
            placed: vec![false; labels.len()],
            order: Vec::with_capacity(labels.len()),
            frames: Vec::new(),
            empty_pending: labels.is_empty(),
            labels,
            successors,
            in_degree,
        };
        if !orderings.labels.is_empty() {
            let candidates = orderings.candidates();
            orderings.frames.push(Frame {
                candidates,
                cursor: 0,
            });
        }
        orderings
    }

    fn candidates(&self) -> Vec<usize> {
        (0..self.labels.len())
            .filter(|&idx| !self.placed[idx] && self.in_degree[idx] == 0)
            .collect()
    }

    fn place(&mut self, idx: usize) {
        self.placed[idx] = true;
        self.order.push(idx);
        for &target in &self.successors[idx] {
            self.in_degree[target] -= 1;
        }
    }

    fn unplace(&mut self) {
        if let Some(idx) = self.order.pop() {
            self.placed[idx] = false;
            for &target in &self.successors[idx] {
                self.in_degree[target] += 1;
            }
        }
    }
}

impl Iterator for TopologicalOrderings {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.empty_pending {
            self.empty_pending = false;
            return Some(Vec::new());
        }

        while let Some(frame) = self.frames.last_mut() {
            if frame.cursor == frame.candidates.len() {
                self.frames.pop();
                // the frame below placed the node this frame was built on
                if !self.frames.is_empty() {
                    self.unplace();
                }
                continue;
            }

            let idx = frame.candidates[frame.cursor];
            frame.cursor += 1;
            self.place(idx);

            if self.order.len() == self.labels.len() {
                let ordering = self.order.iter().map(|&i| self.labels[i].clone()).collect();
                self.unplace();
                return Some(ordering);
            }

            let candidates = self.candidates();
            self.frames.push(Frame {
                candidates,
                cursor: 0,
            });
        }

        None
    }
}

impl FusedIterator for TopologicalOrderings {}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_graph_yields_single_empty_ordering() {
        let mut orderings = TopologicalOrderings::new(Vec::new(), Vec::new());
        assert_eq!(orderings.next(), Some(Vec::new()));
        assert_eq!(orderings.next(), None);
        assert_eq!(orderings.next(), None);
    }

    #[test]
    fn test_chain_has_one_ordering() {
        let orderings: Vec<_> =
            TopologicalOrderings::new(labels(&["a", "b", "c"]), vec![vec![1], vec![2], vec![]])
                .collect();
        assert_eq!(orderings, vec![labels(&["a", "b", "c"])]);
    }

    #[test]
    fn test_independent_nodes_yield_all_permutations() {
        let orderings: Vec<_> =
            TopologicalOrderings::new(labels(&["a", "b", "c"]), vec![vec![], vec![], vec![]])
                .collect();
        assert_eq!(orderings.len(), 6);
        assert_eq!(orderings[0], labels(&["a", "b", "c"]));
        assert_eq!(orderings[5], labels(&["c", "b", "a"]));
    }

    #[test]
    fn test_diamond() {
        // root -> {x, y} -> z
        let orderings: Vec<_> = TopologicalOrderings::new(
            labels(&["root", "x", "y", "z"]),
            vec![vec![1, 2], vec![3], vec![3], vec![]],
        )
        .collect();
        assert_eq!(
            orderings,
            vec![labels(&["root", "x", "y", "z"]), labels(&["root", "y", "x", "z"])]
        );
    }

    #[test]
    fn test_cycle_yields_nothing() {
        let mut orderings =
            TopologicalOrderings::new(labels(&["a", "b"]), vec![vec![1], vec![0]]);
        assert_eq!(orderings.next(), None);
    }
}
