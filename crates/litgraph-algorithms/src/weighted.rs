//! Weighted multigraph used internally by the modularity optimisers.
//!
//! Louvain and Leiden both contract communities into super-nodes. After the
//! first contraction edges carry integer-valued weights and communities keep
//! their internal edges as self-loops, so the optimisers work on this
//! representation rather than on the unweighted [`GraphView`].

use crate::common::GraphView;
use rustc_hash::FxHashMap;

/// Gains smaller than this are treated as ties.
pub(crate) const GAIN_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone)]
pub(crate) struct WeightedGraph {
    pub n: usize,
    /// node -> [(neighbor, weight)], no self-loops
    pub adj: Vec<Vec<(usize, f64)>>,
    /// weight of the self-loop on each node (collapsed internal edges)
    pub self_loops: Vec<f64>,
    /// weighted degree; a self-loop contributes twice its weight
    pub degrees: Vec<f64>,
    /// m: every edge counted once, self-loops included
    pub total_weight: f64,
}

impl WeightedGraph {
    pub fn from_view(view: &GraphView) -> Self {
        let n = view.node_count;
        let adj: Vec<Vec<(usize, f64)>> = (0..n)
            .map(|i| view.neighbors(i).iter().map(|&j| (j, 1.0)).collect())
            .collect();
        let degrees = (0..n).map(|i| view.degree(i) as f64).collect();

        WeightedGraph {
            n,
            adj,
            self_loops: vec![0.0; n],
            degrees,
            total_weight: view.edge_count() as f64,
        }
    }

    /// Modularity gain of inserting an isolated node of degree `ki` into a
    /// community with total degree `sigma_tot`, given `ki_in` edge weight
    /// between them.
    ///
    /// delta_Q = ki_in / m - gamma * sigma_tot * ki / (2m^2)
    pub fn gain(&self, ki_in: f64, sigma_tot: f64, ki: f64, resolution: f64) -> f64 {
        let m = self.total_weight;
        if m == 0.0 {
            return 0.0;
        }
        ki_in / m - resolution * sigma_tot * ki / (2.0 * m * m)
    }

    /// Edge weight from `node` to each community among its neighbors, in
    /// order of first appearance. Neighbors failing `keep` are ignored.
    pub fn community_weights<F>(&self, node: usize, assignment: &[usize], keep: F) -> Vec<(usize, f64)>
    where
        F: Fn(usize) -> bool,
    {
        let mut position: FxHashMap<usize, usize> = FxHashMap::default();
        let mut weights: Vec<(usize, f64)> = Vec::new();
        for &(neighbor, w) in &self.adj[node] {
            if !keep(neighbor) {
                continue;
            }
            let comm = assignment[neighbor];
            match position.get(&comm) {
                Some(&pos) => weights[pos].1 += w,
                None => {
                    position.insert(comm, weights.len());
                    weights.push((comm, w));
                }
            }
        }
        weights
    }

    /// Modularity of `assignment` (any community labels < n).
    ///
    /// Q = sum_c [ L_c / m - gamma * (d_c / 2m)^2 ]
    pub fn modularity(&self, assignment: &[usize], resolution: f64) -> f64 {
        let m = self.total_weight;
        if m == 0.0 {
            return 0.0;
        }
        let mut internal = vec![0.0; self.n];
        let mut totals = vec![0.0; self.n];
        for i in 0..self.n {
            let c = assignment[i];
            totals[c] += self.degrees[i];
            internal[c] += self.self_loops[i];
            for &(j, w) in &self.adj[i] {
                if i < j && assignment[j] == c {
                    internal[c] += w;
                }
            }
        }
        internal
            .iter()
            .zip(&totals)
            .map(|(&l, &d)| l / m - resolution * (d / (2.0 * m)).powi(2))
            .sum()
    }

    /// Contract each community of `assignment` (labels `0..k`) into one node.
    /// Edges inside a community become that node's self-loop.
    pub fn aggregate(&self, assignment: &[usize], k: usize) -> WeightedGraph {
        let mut self_loops = vec![0.0; k];
        let mut between: FxHashMap<(usize, usize), f64> = FxHashMap::default();

        for i in 0..self.n {
            let ci = assignment[i];
            self_loops[ci] += self.self_loops[i];
            for &(j, w) in &self.adj[i] {
                if i >= j {
                    continue;
                }
                let cj = assignment[j];
                if ci == cj {
                    self_loops[ci] += w;
                } else {
                    let key = if ci < cj { (ci, cj) } else { (cj, ci) };
                    *between.entry(key).or_insert(0.0) += w;
                }
            }
        }

        let mut pairs: Vec<((usize, usize), f64)> = between.into_iter().collect();
        pairs.sort_unstable_by_key(|&(key, _)| key);

        let mut adj = vec![Vec::new(); k];
        let mut degrees: Vec<f64> = self_loops.iter().map(|&sl| 2.0 * sl).collect();
        for ((a, b), w) in pairs {
            adj[a].push((b, w));
            adj[b].push((a, w));
            degrees[a] += w;
            degrees[b] += w;
        }

        WeightedGraph {
            n: k,
            adj,
            self_loops,
            degrees,
            total_weight: self.total_weight,
        }
    }
}

/// Relabel to `0..k` by first appearance; returns the labels and `k`.
pub(crate) fn compact(assignment: &[usize]) -> (Vec<usize>, usize) {
    let relabelled = crate::common::renumber(assignment);
    let k = relabelled.iter().max().map_or(0, |&c| c + 1);
    (relabelled, k)
}

/// Give every connected piece of a community its own label.
///
/// The first piece found (in node order) keeps the original label.
pub(crate) fn split_disconnected(view: &GraphView, assignment: &mut [usize]) {
    let n = view.node_count;
    let mut next_label = assignment.iter().max().map_or(0, |&c| c + 1);
    let mut seen_label = vec![false; next_label];
    let mut visited = vec![false; n];
    let mut stack = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        let label = assignment[start];
        let target = if seen_label[label] {
            let fresh = next_label;
            next_label += 1;
            fresh
        } else {
            seen_label[label] = true;
            label
        };

        visited[start] = true;
        stack.push(start);
        while let Some(node) = stack.pop() {
            assignment[node] = target;
            for &neighbor in view.neighbors(node) {
                if !visited[neighbor] && assignment[neighbor] == label {
                    visited[neighbor] = true;
                    stack.push(neighbor);
                }
            }
        }
    }
}
