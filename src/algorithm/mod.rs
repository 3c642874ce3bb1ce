/// Fixed-width bitset backing candidate and socket sets
pub mod bitset;
/// Cooperative cancellation of running attempts
pub mod cancellation;
/// Socket compatibility table and its validation
pub mod connections;
/// Solver state machine driving select, collapse and propagate
pub mod executor;
/// Worklist propagation of exclusions between adjacent cells
pub mod propagation;
/// Lowest-entropy cell selection and seeded random choice
pub mod selection;
/// Per-cell candidate sets over the grid
pub mod superposition;
