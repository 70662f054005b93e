//! Generalized search algorithms over implicitly defined graphs.
//!
//! Graphs are never materialized up front. A search starts from a
//! [Node], asks a [NeighborProvider] for the neighbors of each node it
//! expands, and stops when it dequeues a node whose value equals the
//! goal's. Nodes are identified by value alone, so a provider is free
//! to build fresh nodes on every call.
//!
//! Four strategies share one open/closed skeleton:
//! [bfs], [dfs], [dijkstra::run] and [astar]. For graphs which should
//! be expanded whole, a [FrontierTree] records who discovered whom and
//! [AllPaths] picks the shortest or longest route through it.
//!
//! A search that exhausts the graph without meeting its goal returns
//! `None`. A provider that produces new values forever never exhausts,
//! and the search will not return.

#![deny(clippy::all)]

pub mod algorithm;
pub mod allpaths;
mod errors;
pub mod frontier;
pub mod node;
pub mod path;
mod traits;

pub use errors::Result as SearchResult;
pub use errors::SearchError;
pub use traits::{lineage, Lineage, NeighborProvider};

pub use algorithm::astar::{astar, AStarQueue, AStarSearcher};
pub use algorithm::basic::{
    bfs, dfs, BreadthFirstSearcher, BreadthQueue, DepthFirstSearcher, DepthQueue,
};
pub use algorithm::dijkstra;
pub use algorithm::{
    search, SearchAlgorithm, SearchBuilder, SearchOptions, SearchQueue, Searcher, Strategy,
};
pub use allpaths::AllPaths;
pub use frontier::{Env, EnvBuilder, Environment, FrontierTree};
pub use node::{Cost, Node, NodeArena, NodeId, NodeValue};
pub use path::PathResult;
