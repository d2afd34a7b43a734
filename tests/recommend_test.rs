use litgraph::embed::{FnExtractor, HashingEmbedder, ProviderResult};
use litgraph::{
    coauthor_recommendations, embed_records, recommend, recommend_for_vector, EmbeddingTable,
    GraphBuilder, GraphError, PaperRecord, VectorError,
};

fn scenario_table() -> EmbeddingTable {
    EmbeddingTable::from_entries([("A", vec![1.0, 0.0]), ("B", vec![1.0, 0.0]), ("C", vec![0.0, 1.0])]).unwrap()
}

#[test]
fn test_two_dimensional_scenario() {
    let recs = recommend(&scenario_table(), "A", 2).unwrap();
    let pairs: Vec<(&str, f32)> = recs.iter().map(|r| (r.paper.as_str(), r.score)).collect();
    assert_eq!(pairs, vec![("B", 1.0), ("C", 0.0)]);
}

#[test]
fn test_top_n_bounds() {
    let table = EmbeddingTable::from_entries([
        ("P0", vec![1.0, 0.0, 0.0]),
        ("P1", vec![0.9, 0.1, 0.0]),
        ("P2", vec![0.5, 0.5, 0.0]),
        ("P3", vec![0.0, 1.0, 0.0]),
        ("P4", vec![0.0, 0.0, 1.0]),
    ])
    .unwrap();

    for top_n in 0..7 {
        let recs = recommend(&table, "P0", top_n).unwrap();
        assert!(recs.len() <= top_n);
        assert!(recs.iter().all(|r| r.paper != "P0"));
    }

    let all = recommend(&table, "P0", 10).unwrap();
    let papers: Vec<&str> = all.iter().map(|r| r.paper.as_str()).collect();
    assert_eq!(papers, vec!["P1", "P2", "P3", "P4"]);
    assert!(all.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_unknown_target_is_an_error() {
    assert_eq!(
        recommend(&scenario_table(), "Missing", 3),
        Err(VectorError::UnknownEntity("Missing".to_string()))
    );
    assert!(recommend(&EmbeddingTable::new(), "A", 3).is_err());
}

#[test]
fn test_query_vector_ranks_everything() {
    let recs = recommend_for_vector(&scenario_table(), &[1.0, 1.0], 5).unwrap();
    let papers: Vec<&str> = recs.iter().map(|r| r.paper.as_str()).collect();
    // all three tie; table order is kept
    assert_eq!(papers, vec!["A", "B", "C"]);
}

#[test]
fn test_embedding_pass_feeds_recommender() {
    let records = vec![
        PaperRecord::new("Spectral clustering").with_summary("eigenvectors of the graph laplacian"),
        PaperRecord::new("Spectral clustering").with_summary("normalised cuts and the graph laplacian"),
        PaperRecord::new("Protein folding").with_summary("amino acid structure prediction"),
        PaperRecord::new("").with_summary("no title"),
    ];
    let embedder = HashingEmbedder::new(128).unwrap();
    let pass = embed_records(&records, &embedder);

    assert_eq!(pass.table.len(), 2);
    assert_eq!(pass.diagnostics.len(), 1);

    let recs = recommend(&pass.table, "Spectral clustering", 5).unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].paper, "Protein folding");
}

#[test]
fn test_coauthor_recommendations() {
    let no_keywords = FnExtractor(|_: &str| -> ProviderResult<Vec<String>> { Ok(Vec::new()) });
    let records = vec![
        PaperRecord::new("P1").with_authors(["Alice", "Bob"]),
        PaperRecord::new("P2").with_authors(["Carol"]),
        PaperRecord::new("P3").with_authors(["Bob"]),
        PaperRecord::new("P4").with_authors(["Alice", "Carol"]),
        PaperRecord::new("P5").with_authors(["Dave"]),
    ];
    let graph = GraphBuilder::new(no_keywords).build(&records).graph;

    assert_eq!(coauthor_recommendations(&graph, "P1", 10), Ok(vec!["P3".to_string(), "P4".to_string()]));
    assert_eq!(coauthor_recommendations(&graph, "P1", 1), Ok(vec!["P3".to_string()]));
    assert_eq!(coauthor_recommendations(&graph, "P5", 10), Ok(vec![]));
    assert_eq!(
        coauthor_recommendations(&graph, "Alice", 10),
        Err(GraphError::UnknownEntity("Alice".to_string()))
    );
    assert!(coauthor_recommendations(&graph, "P9", 10).is_err());
}
