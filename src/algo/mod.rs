//! Cut-graph algorithms.
//!
//! The stages of the pipeline, leaf first:
//!
//! - **Feature cut**: duplicate vertices along feature curves ([`feature_cut`])
//! - **Distances**: multi-source Dijkstra from features and singularities ([`geodesic`])
//! - **Cut graph**: dual spanning forest and leaf trimming ([`cut_graph`])
//! - **Darboux frames**: orthonormal frames on feature vertices ([`darboux`])
//!
//! [`pipeline`] chains them; [`inspect`] lets callers observe intermediate
//! results.

pub mod cut_graph;
pub mod darboux;
pub mod feature_cut;
pub mod geodesic;
pub mod inspect;
pub mod pipeline;
