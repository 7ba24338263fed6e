use std::time::Duration;

use crate::domain::solution::AcceptedPool;

/// Sum of accepted-pool costs, for a quick one-number read on a run.
pub fn total_cost(pools: &[AcceptedPool]) -> i32 {
    pools.iter().map(|p| p.cost).sum()
}

/// Total passengers carried across all accepted pools (each pool's action
/// list holds one `In` and one `Out` per rider, so divide by two).
pub fn total_riders(pools: &[AcceptedPool]) -> usize {
    pools.iter().map(|p| p.actions.len() / 2).sum()
}

/// Milliseconds as a float, for compact CSV/log output.
pub fn elapsed_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
