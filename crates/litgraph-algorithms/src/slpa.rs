//! Speaker-listener label propagation (SLPA)
//!
//! Every node keeps a memory of labels it has heard, seeded with its own.
//! Each round visits nodes in a shuffled order; the visited node is the
//! listener, each neighbor speaks one label drawn from its memory in
//! proportion to frequency, and the listener memorises the most common label
//! it heard (ties broken at random).
//!
//! A node's mode is its most memorised label. The current mode is kept on a
//! tie and only replaced when another label strictly overtakes it. A round is
//! settled when at most `tolerance * n` nodes changed mode; the run converged
//! if each of its final `stable_rounds` rounds was settled.
//!
//! A node's community is its mode. Labels whose share of the memory reaches
//! `threshold` are reported separately as overlapping memberships.
//!
//! Labels only travel along edges, so nodes in different connected
//! components never share a community.

use crate::common::{renumber, CommunityResult, GraphView};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::debug;

/// SLPA configuration
#[derive(Debug, Clone)]
pub struct SlpaConfig {
    /// Number of propagation rounds (the iteration cap)
    pub rounds: usize,
    /// Trailing rounds that must be settled for the run to count as converged
    pub stable_rounds: usize,
    /// Share of nodes that may change mode in a settled round
    pub tolerance: f64,
    /// Minimum memory share for a label to count as a membership
    pub threshold: f64,
    /// Seed for listener order, speaker draws and tie-breaking
    pub seed: u64,
}

impl Default for SlpaConfig {
    fn default() -> Self {
        Self {
            rounds: 20,
            stable_rounds: 3,
            tolerance: 0.1,
            threshold: 0.1,
            seed: 42,
        }
    }
}

/// Result of SLPA
#[derive(Debug, Clone)]
pub struct SlpaResult {
    /// Single community per node (the memory mode), renumbered from 0
    pub communities: CommunityResult,
    /// Per node, every label meeting the threshold, most frequent first.
    /// A label is the index of the node that originated it.
    pub memberships: Vec<Vec<usize>>,
}

/// A node's label memory with running counts and its current mode
#[derive(Debug, Clone)]
struct Memory {
    labels: Vec<usize>,
    counts: FxHashMap<usize, usize>,
    mode: usize,
}

impl Memory {
    fn new(own: usize) -> Self {
        let mut counts = FxHashMap::default();
        counts.insert(own, 1);
        Self {
            labels: vec![own],
            counts,
            mode: own,
        }
    }

    /// Record a heard label. Returns true if the mode changed.
    fn memorise(&mut self, label: usize) -> bool {
        self.labels.push(label);
        let count = {
            let entry = self.counts.entry(label).or_insert(0);
            *entry += 1;
            *entry
        };
        let incumbent = self.counts.get(&self.mode).copied().unwrap_or(0);
        if label != self.mode && count > incumbent {
            self.mode = label;
            true
        } else {
            false
        }
    }

    /// Labels with at least `threshold` share, most frequent first
    fn frequent_labels(&self, threshold: f64) -> Vec<usize> {
        let total = self.labels.len() as f64;
        let mut labels: Vec<(usize, usize)> = self
            .counts
            .iter()
            .filter(|&(_, &count)| count as f64 / total >= threshold)
            .map(|(&label, &count)| (label, count))
            .collect();
        labels.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        labels.into_iter().map(|(label, _)| label).collect()
    }
}

/// Run SLPA over the view.
///
/// Always runs `rounds` rounds. A graph without edges has nothing to
/// propagate and converges after zero rounds.
pub fn slpa(view: &GraphView, config: &SlpaConfig) -> SlpaResult {
    let n = view.node_count;
    if n == 0 {
        return SlpaResult {
            communities: CommunityResult::empty(),
            memberships: Vec::new(),
        };
    }
    if view.edge_count() == 0 {
        return SlpaResult {
            communities: CommunityResult {
                assignment: (0..n).collect(),
                iterations: 0,
                converged: true,
            },
            memberships: (0..n).map(|i| vec![i]).collect(),
        };
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut memory: Vec<Memory> = (0..n).map(Memory::new).collect();
    let mut order: Vec<usize> = (0..n).collect();
    let allowed_changes = (config.tolerance.max(0.0) * n as f64).floor() as usize;
    let mut settled = 0;

    for round in 0..config.rounds {
        order.shuffle(&mut rng);
        let mut changed = 0;

        for &listener in &order {
            let speakers = view.neighbors(listener);
            if speakers.is_empty() {
                continue;
            }

            let mut heard: FxHashMap<usize, usize> = FxHashMap::default();
            for &speaker in speakers {
                let spoken = &memory[speaker].labels;
                let label = spoken[rng.gen_range(0..spoken.len())];
                *heard.entry(label).or_insert(0) += 1;
            }

            let loudest = heard.values().copied().max().unwrap_or(0);
            let mut candidates: Vec<usize> = heard
                .into_iter()
                .filter(|&(_, count)| count == loudest)
                .map(|(label, _)| label)
                .collect();
            candidates.sort_unstable();
            let chosen = candidates[rng.gen_range(0..candidates.len())];
            if memory[listener].memorise(chosen) {
                changed += 1;
            }
        }

        if changed <= allowed_changes {
            settled += 1;
        } else {
            settled = 0;
        }
        debug!(round, changed, settled, "slpa round complete");
    }

    let modes: Vec<usize> = memory.iter().map(|m| m.mode).collect();
    let memberships = memory.iter().map(|m| m.frequent_labels(config.threshold)).collect();

    SlpaResult {
        communities: CommunityResult {
            assignment: renumber(&modes),
            iterations: config.rounds,
            converged: settled >= config.stable_rounds,
        },
        memberships,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_kept_on_tie() {
        let mut memory = Memory::new(3);
        assert!(!memory.memorise(1));
        assert_eq!(memory.mode, 3);
        assert!(memory.memorise(1));
        assert_eq!(memory.mode, 1);
        assert!(!memory.memorise(3));
        assert_eq!(memory.mode, 1);
    }

    #[test]
    fn test_frequent_labels_threshold() {
        let mut memory = Memory::new(0);
        for label in [0, 0, 0, 0, 0, 0, 0, 1, 2] {
            memory.memorise(label);
        }
        assert_eq!(memory.frequent_labels(0.1), vec![0, 1, 2]);
        assert_eq!(memory.frequent_labels(0.5), vec![0]);
    }

    #[test]
    fn test_slpa_components_never_share_labels() {
        let view = GraphView::from_edges(4, &[(0, 1), (2, 3)]);
        let result = slpa(&view, &SlpaConfig::default());
        let c = &result.communities.assignment;

        assert_eq!(c.len(), 4);
        assert_ne!(c[0], c[2]);
        assert_ne!(c[0], c[3]);
        assert_ne!(c[1], c[2]);
        assert_ne!(c[1], c[3]);
    }

    #[test]
    fn test_slpa_isolated_node_keeps_own_label() {
        let view = GraphView::from_edges(3, &[(0, 1)]);
        let result = slpa(&view, &SlpaConfig::default());

        assert_eq!(result.memberships[2], vec![2]);
        let c = &result.communities.assignment;
        assert_ne!(c[2], c[0]);
        assert_ne!(c[2], c[1]);
    }

    #[test]
    fn test_slpa_is_reproducible_for_a_seed() {
        let view = GraphView::from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)]);
        let config = SlpaConfig::default();
        assert_eq!(slpa(&view, &config).communities, slpa(&view, &config).communities);
    }

    #[test]
    fn test_slpa_zero_rounds() {
        let view = GraphView::from_edges(2, &[(0, 1)]);
        let config = SlpaConfig {
            rounds: 0,
            ..SlpaConfig::default()
        };
        let result = slpa(&view, &config);
        assert_eq!(result.communities.assignment, vec![0, 1]);
        assert_eq!(result.communities.iterations, 0);
        assert!(!result.communities.converged);
    }

    #[test]
    fn test_slpa_without_edges_converges_immediately() {
        let view = GraphView::from_edges(3, &[]);
        let result = slpa(&view, &SlpaConfig::default());
        assert_eq!(result.communities.assignment, vec![0, 1, 2]);
        assert_eq!(result.communities.iterations, 0);
        assert!(result.communities.converged);
        assert_eq!(result.memberships, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_slpa_cap_before_stability_window_is_non_convergence() {
        // two rounds can never show three settled rounds
        let view = GraphView::from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let config = SlpaConfig {
            rounds: 2,
            stable_rounds: 3,
            tolerance: 1.0,
            ..SlpaConfig::default()
        };
        let result = slpa(&view, &config);
        assert!(!result.communities.converged);
        assert_eq!(result.communities.iterations, 2);
        assert_eq!(result.communities.assignment.len(), 3);
    }

    #[test]
    fn test_slpa_full_tolerance_converges() {
        // every round is settled when all nodes may change
        let view = GraphView::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let config = SlpaConfig {
            rounds: 5,
            stable_rounds: 2,
            tolerance: 1.0,
            ..SlpaConfig::default()
        };
        let result = slpa(&view, &config);
        assert!(result.communities.converged);
        assert_eq!(result.communities.iterations, 5);
    }

    #[test]
    fn test_slpa_settles_on_two_cliques() {
        let view = GraphView::from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        let config = SlpaConfig {
            rounds: 200,
            ..SlpaConfig::default()
        };
        let result = slpa(&view, &config);
        assert!(result.communities.converged);
    }
}
