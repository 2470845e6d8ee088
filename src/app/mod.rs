//! Fetch-boundary state: owns the latest dataset per resource and hands
//! snapshots to the pure computations in `core`.

pub mod engine;

pub use engine::InsightsEngine;
