use litgraph::embed::TermFrequencyExtractor;
use litgraph::{
    detect, detect_all, evaluate, CommunityAlgorithm, DetectionConfig, GraphBuilder, PaperGraph,
    PaperRecord, Partition, Relationship,
};
use std::collections::{BTreeSet, VecDeque};

fn two_triangles() -> PaperGraph {
    let mut graph = PaperGraph::new();
    for label in ["a1", "a2", "a3", "b1", "b2", "b3"] {
        graph.upsert_keyword(label).unwrap();
    }
    for (u, v) in [("a1", "a2"), ("a2", "a3"), ("a1", "a3"), ("b1", "b2"), ("b2", "b3"), ("b1", "b3")] {
        graph.add_edge(u, v, Relationship::HasKeyword).unwrap();
    }
    graph
}

fn literature_graph() -> PaperGraph {
    let records = vec![
        PaperRecord::new("From Louvain to Leiden")
            .with_authors(["Traag", "Waltman", "van Eck"])
            .with_summary("Leiden algorithm guarantees connected communities; modularity optimisation."),
        PaperRecord::new("Fast unfolding of communities")
            .with_authors(["Blondel", "Guillaume", "Lambiotte", "Lefebvre"])
            .with_summary("Louvain modularity optimisation for large networks."),
        PaperRecord::new("Resolution limit in community detection")
            .with_authors(["Fortunato", "Barthelemy"])
            .with_summary("Modularity optimisation has a resolution limit."),
        PaperRecord::new("Overlapping community detection with SLPA")
            .with_authors(["Xie", "Szymanski"])
            .with_summary("Speaker listener label propagation finds overlapping communities."),
        PaperRecord::new("Label propagation in social networks")
            .with_authors(["Xie", "Raghavan"])
            .with_summary("Label propagation finds communities in near linear time."),
        PaperRecord::new("Citation analysis of bibliometric networks")
            .with_authors(["Waltman", "van Eck"])
            .with_summary("Bibliometric networks and citation clustering."),
        PaperRecord::new("Isolated note").with_summary(""),
    ];
    GraphBuilder::new(TermFrequencyExtractor::new(5).unwrap())
        .build(&records)
        .graph
}

fn members(partition: &Partition, labels: &[&str]) -> BTreeSet<usize> {
    labels.iter().map(|l| partition.community_of(l).unwrap()).collect()
}

/// True if every community induces a connected subgraph
fn communities_connected(graph: &PaperGraph, partition: &Partition) -> bool {
    partition.communities().values().all(|community| {
        let inside: BTreeSet<&str> = community.iter().copied().collect();
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut queue = VecDeque::from([community[0]]);
        seen.insert(community[0]);
        while let Some(label) = queue.pop_front() {
            for neighbor in graph.neighbors(label).unwrap() {
                let n = neighbor.label.as_str();
                if inside.contains(n) && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen.len() == inside.len()
    })
}

#[test]
fn test_two_triangles_are_never_merged() {
    let graph = two_triangles();
    for algorithm in CommunityAlgorithm::ALL {
        let detection = detect(&graph, algorithm, &DetectionConfig::default());
        let left = members(&detection.partition, &["a1", "a2", "a3"]);
        let right = members(&detection.partition, &["b1", "b2", "b3"]);
        assert!(left.is_disjoint(&right), "{} merged the triangles", algorithm);
    }
}

#[test]
fn test_modularity_methods_find_each_triangle() {
    let graph = two_triangles();
    for algorithm in [CommunityAlgorithm::Louvain, CommunityAlgorithm::Leiden] {
        let detection = detect(&graph, algorithm, &DetectionConfig::default());
        assert_eq!(detection.partition.community_count(), 2, "{}", algorithm);
        assert!(detection.status.is_converged(), "{}", algorithm);

        let report = evaluate(&graph, &detection.partition).unwrap();
        assert_eq!(report.conductance, 0.0);
        assert!((report.modularity.unwrap() - 0.5).abs() < 1e-9);
        assert!((report.internal_edge_density - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_partition_covers_every_node() {
    let graph = literature_graph();
    for algorithm in CommunityAlgorithm::ALL {
        let detection = detect(&graph, algorithm, &DetectionConfig::default());
        assert_eq!(detection.partition.len(), graph.node_count(), "{}", algorithm);
        for node in graph.nodes() {
            assert!(detection.partition.community_of(&node.label).is_some());
        }
    }
}

#[test]
fn test_isolated_node_gets_own_community() {
    let graph = literature_graph();
    for algorithm in CommunityAlgorithm::ALL {
        let detection = detect(&graph, algorithm, &DetectionConfig::default());
        let partition = &detection.partition;
        let own = partition.community_of("Isolated note").unwrap();
        let sharing = partition.iter().filter(|&(_, c)| c == own).count();
        assert_eq!(sharing, 1, "{}", algorithm);
    }
}

#[test]
fn test_leiden_communities_are_connected() {
    let graph = literature_graph();
    let detection = detect(&graph, CommunityAlgorithm::Leiden, &DetectionConfig::default());
    assert!(communities_connected(&graph, &detection.partition));

    let coarse = DetectionConfig {
        resolution: 0.2,
        ..DetectionConfig::default()
    };
    let detection = detect(&graph, CommunityAlgorithm::Leiden, &coarse);
    assert!(communities_connected(&graph, &detection.partition));
}

#[test]
fn test_parallel_runs_match_sequential_runs() {
    let graph = literature_graph();
    let config = DetectionConfig::default();
    let parallel = detect_all(&graph, &CommunityAlgorithm::ALL, &config);

    assert_eq!(parallel.len(), 3);
    for detection in parallel {
        let sequential = detect(&graph, detection.algorithm, &config);
        assert_eq!(detection.partition, sequential.partition);
        assert_eq!(detection.status, sequential.status);
    }
}

#[test]
fn test_community_ids_are_dense_and_ordered() {
    let graph = literature_graph();
    for algorithm in CommunityAlgorithm::ALL {
        let detection = detect(&graph, algorithm, &DetectionConfig::default());
        let mut next = 0;
        for (_, community) in detection.partition.iter() {
            assert!(community <= next, "{}", algorithm);
            if community == next {
                next += 1;
            }
        }
        assert_eq!(next, detection.partition.community_count());
    }
}

#[test]
fn test_empty_graph_gives_empty_partition() {
    let graph = PaperGraph::new();
    for detection in detect_all(&graph, &CommunityAlgorithm::ALL, &DetectionConfig::default()) {
        assert!(detection.partition.is_empty());
        assert!(detection.status.is_converged());
    }
}
