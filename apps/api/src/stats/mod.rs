// Placement statistics, recomputed from a store snapshot on every request —
// there are no cached counters to drift.

pub mod aggregate;
pub mod handlers;
