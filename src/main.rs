use anyhow::{Context, Result};
use litgraph::embed::{HashingEmbedder, TermFrequencyExtractor};
use litgraph::{
    coauthor_recommendations, detect_all, embed_records, evaluate, graph_statistics, most_connected,
    recommend, CommunityAlgorithm, GraphBuilder, LitGraphConfig, NodeKind, PaperRecord,
};
use std::path::Path;

/// Dimension of the built-in hashing embedder used by the demo
const DEMO_EMBEDDING_DIM: usize = 64;

/// Nodes listed under "Most connected"
const TOP_CONNECTED: usize = 10;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Litgraph v{}", litgraph::version());
    println!("==========================================");
    println!();

    let config = match std::env::var("LITGRAPH_CONFIG") {
        Ok(path) => LitGraphConfig::load(&path).with_context(|| format!("loading config {}", path))?,
        Err(_) => LitGraphConfig::default(),
    };

    let records = match std::env::args().nth(1) {
        Some(path) => load_records(Path::new(&path))?,
        None => sample_records(),
    };

    // Build
    let extractor = TermFrequencyExtractor::new(config.ingest.max_keyphrases)?;
    let builder = GraphBuilder::from_config(extractor, &config.ingest);
    let outcome = builder.build(&records);
    let graph = outcome.graph;

    println!("=== Graph ===");
    println!("{}", serde_json::to_string_pretty(&graph_statistics(&graph))?);
    for diagnostic in &outcome.report.diagnostics {
        println!("  ! {}", diagnostic);
    }

    println!("\nMost connected:");
    for node in most_connected(&graph, TOP_CONNECTED) {
        println!("  {:>3}  {:<8} {}", node.degree, node.kind, node.label);
    }

    // Detect and evaluate
    println!("\n=== Communities ===");
    for detection in detect_all(&graph, &CommunityAlgorithm::ALL, &config.detection) {
        let report = evaluate(&graph, &detection.partition)?;
        let modularity = report
            .modularity
            .map_or_else(|| "n/a".to_string(), |q| format!("{:.4}", q));
        println!(
            "{:<8} communities={:<3} modularity={} density={:.4} conductance={:.4} ({:?})",
            detection.algorithm,
            detection.partition.community_count(),
            modularity,
            report.internal_edge_density,
            report.conductance,
            detection.status
        );
    }

    // Recommend
    println!("\n=== Recommendations ===");
    let embedder = HashingEmbedder::new(DEMO_EMBEDDING_DIM)?;
    let pass = embed_records(&records, &embedder);
    let top_n = config.recommendation.top_n;

    if let Some(target) = graph.nodes_of_kind(NodeKind::Paper).first() {
        println!("Similar to \"{}\":", target.label);
        for rec in recommend(&pass.table, &target.label, top_n)? {
            println!("  {:.3}  {}", rec.score, rec.paper);
        }

        println!("Sharing an author with \"{}\":", target.label);
        for paper in coauthor_recommendations(&graph, &target.label, top_n)? {
            println!("  {}", paper);
        }
    }

    Ok(())
}

fn load_records(path: &Path) -> Result<Vec<PaperRecord>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let records = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(records)
}

fn sample_records() -> Vec<PaperRecord> {
    vec![
        PaperRecord::new("From Louvain to Leiden: guaranteeing well-connected communities")
            .with_authors(["V. A. Traag", "L. Waltman", "N. J. van Eck"])
            .with_summary("Community detection is often used to understand the structure of large and complex networks. The Louvain algorithm may yield badly connected communities; the Leiden algorithm guarantees connected communities.")
            .with_link("https://arxiv.org/abs/1810.08473")
            .with_published("2018-10-19")
            .with_source("arXiv"),
        PaperRecord::new("Fast unfolding of communities in large networks")
            .with_authors(["V. D. Blondel", "J.-L. Guillaume", "R. Lambiotte", "E. Lefebvre"])
            .with_summary("A heuristic method based on modularity optimization extracts the community structure of large networks.")
            .with_link("https://arxiv.org/abs/0803.0476")
            .with_published("2008-03-04")
            .with_source("arXiv"),
        PaperRecord::new("Towards linear time overlapping community detection in social networks")
            .with_authors(["J. Xie", "B. K. Szymanski"])
            .with_summary("Speaker-listener label propagation detects overlapping communities in social networks in linear time.")
            .with_published("2012")
            .with_source("Semantic Scholar"),
        PaperRecord::new("Modularity and community structure in networks")
            .with_authors(["M. E. J. Newman"])
            .with_summary("Modularity measures the quality of a division of a network into communities.")
            .with_published("2006")
            .with_source("OpenAlex"),
        PaperRecord::new("Scalable community detection with the Leiden algorithm")
            .with_authors(["V. A. Traag"])
            .with_summary("Leiden community detection on large citation networks.")
            .with_published("2019")
            .with_source("OpenAlex"),
    ]
}
