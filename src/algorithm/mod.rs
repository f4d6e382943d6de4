/// Tile compatibility predicate and precomputed adjacency table
pub mod adjacency;
/// Fixed-width candidate sets over tile ids
pub mod bitset;
/// Snapshot and restore of solver state around decision steps
pub mod checkpoint;
/// Engine, driver state machine and the collapse event stream
pub mod executor;
/// Candidate reduction and the forced-collapse work queue
pub mod propagation;
/// Frontier bookkeeping, tie-breaking and seeded random choice
pub mod selection;
