/// Per-rank wall-clock accumulators for one sort call, in seconds.
///
/// Values are read from a monotonic clock behind a group barrier, so each
/// phase reflects the slowest participant of that phase on this rank's
/// timeline. Timings are not synchronized across ranks; readers expect
/// per-rank values.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SortTimings {
    /// Alternating-direction seed sort of the local partition.
    pub seed_sort: f64,
    /// Pairwise partner exchange, summed over every stage and step.
    pub exchange: f64,
    /// Elbow merges closing each stage.
    pub elbow_merge: f64,
    /// The whole sort call.
    pub total: f64,
}
