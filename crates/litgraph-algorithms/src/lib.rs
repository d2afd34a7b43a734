pub mod common;
pub mod community;
pub mod leiden;
pub mod louvain;
pub mod quality;
pub mod slpa;
pub mod topology;
mod weighted;

pub use common::{renumber, CommunityId, CommunityResult, GraphView, NodeId};
pub use community::{weakly_connected_components, WccResult};
pub use leiden::{leiden, LeidenConfig};
pub use louvain::{louvain, LouvainConfig};
pub use quality::{conductance, internal_edge_density, modularity, partition_quality, PartitionQuality};
pub use slpa::{slpa, SlpaConfig, SlpaResult};
pub use topology::{
    bfs_distances, degree_centrality, degree_distribution, density, path_lengths, PathLengths,
};
