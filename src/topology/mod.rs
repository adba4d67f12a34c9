//! Board topology: which points connect, and which lines a capture may use.
//!
//! The board alternates connectivity: points whose `row + col` is even
//! connect in all eight directions, the others only orthogonally. Both graphs
//! are a pure function of the board side length and are built once.

mod builder;

pub use builder::{edge_midpoints, Jump, Topology};
