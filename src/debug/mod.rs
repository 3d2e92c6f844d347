//! Debug and inspection helpers
//!
//! Serializable snapshots of layout results, for golden tests and for
//! dumping a laid-out tree while debugging.

pub mod inspect;

pub use inspect::{inspect, inspect_box, BoxSnapshot, PointSnapshot, SizeSnapshot, TreeSnapshot};
