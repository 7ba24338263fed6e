use std::time::{Duration, Instant};

use tracing::{info, info_span};

use crate::config::{constant, Limits, SolverConfig};
use crate::domain::solution::AcceptedPool;
use crate::domain::types::{Cab, DistanceMatrix, Order, Stop};
use crate::phases::diver::dive;
use crate::setup::init::{ActiveSet, LevelBuffers, SolverContext};
use crate::solver::pool_engine::dedup::rm_duplicates_and_find_cab;

/// Result of a full `dynapool` call: every accepted pool across all
/// attempted sizes, plus the wall time each pool-size pass took.
#[derive(Debug, Default)]
pub struct DynapoolReport {
    pub accepted: Vec<AcceptedPool>,
    pub pool_times: Vec<(usize, Duration)>,
}

/// Build and dedup/assign every feasible pool of exactly `pool_size`
/// passengers, appending accepted pools to `ret`.
#[allow(clippy::too_many_arguments)]
pub fn find_pool(
    pool_size: usize,
    numb_threads: usize,
    orders: &mut [Order],
    cabs: &mut [Cab],
    active: &mut ActiveSet,
    dist: &DistanceMatrix,
    stops: &[Stop],
    limits: &Limits,
    ret: &mut Vec<AcceptedPool>,
    ret_numb: usize,
) {
    let span = info_span!("find_pool", pool_size, active_orders = active.num_active_orders());
    let _enter = span.enter();

    let mut buffers = LevelBuffers::for_pool_size(pool_size);
    dive(&mut buffers, 0, pool_size, numb_threads, orders, active, dist, stops, limits);

    let level_zero_count = buffers.levels[0].len();
    rm_duplicates_and_find_cab(orders, cabs, active, dist, limits, pool_size, &mut buffers.levels[0], ret, ret_numb);
    info!(pool_size, candidates = level_zero_count, accepted_total = ret.len(), "pool size pass complete");
}

/// The external entry point. Owns every array a run touches through a single
/// [`SolverContext`], constructed here and dropped at the end of the call,
/// then for each configured pool size from `MAX_IN_POOL` down to 2 --
/// skipping sizes whose threshold the current demand count exceeds -- runs
/// [`find_pool`]. Orders and cabs consumed by an earlier (larger) pool size
/// are hidden from later passes via the context's shared [`ActiveSet`].
#[allow(clippy::too_many_arguments)]
pub fn dynapool(
    dist: &DistanceMatrix,
    stops: &[Stop],
    orders: &mut [Order],
    cabs: &mut [Cab],
    cfg: &SolverConfig,
    pool_size_thresholds: &[usize; constant::MAX_IN_POOL - 1],
    ret_numb: usize,
) -> DynapoolReport {
    let span = info_span!("dynapool", stops = stops.len(), orders = orders.len(), cabs = cabs.len());
    let _enter = span.enter();

    let mut ctx = SolverContext::new(dist, stops, orders, cabs, cfg);
    let mut report = DynapoolReport::default();

    for i in 0..constant::MAX_IN_POOL - 1 {
        let pool_size = constant::MAX_IN_POOL - i;
        if ctx.orders.len() >= pool_size_thresholds[i] {
            continue;
        }
        let started = Instant::now();
        find_pool(
            pool_size,
            ctx.numb_threads,
            &mut *ctx.orders,
            &mut *ctx.cabs,
            &mut ctx.active,
            ctx.dist,
            ctx.stops,
            &ctx.limits,
            &mut report.accepted,
            ret_numb,
        );
        report.pool_times.push((pool_size, started.elapsed()));
    }

    info!(total_accepted = report.accepted.len(), "dynapool run complete");
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64, from: usize, to: usize, max_wait: i32, max_loss: i32, distance: i32) -> Order {
        Order { id, from_stand: from, to_stand: to, max_wait, max_loss, distance }
    }

    fn cab(id: i64, location: usize, seats: u32) -> Cab {
        Cab { id, location, seats, leg_remaining: None }
    }

    #[test]
    fn find_pool_accepts_trivial_pair() {
        let mut orders = vec![order(0, 0, 1, 20, 70, 5), order(1, 1, 2, 20, 70, 5)];
        let mut cabs = vec![cab(0, 0, 4)];
        let mut active = ActiveSet::new(2, 1);
        let stops = vec![
            Stop { id: 0, bearing: 0, lat: 0.0, lon: 0.0 },
            Stop { id: 1, bearing: 5, lat: 0.0, lon: 0.0 },
            Stop { id: 2, bearing: 10, lat: 0.0, lon: 0.0 },
        ];
        let dist = DistanceMatrix::new(3, vec![0, 1, 2, 1, 0, 1, 2, 1, 0]);
        let limits = Limits { max_angle: 120, max_angle_dist: 3, stop_wait: 1 };
        let mut ret = Vec::new();

        find_pool(2, 2, &mut orders, &mut cabs, &mut active, &dist, &stops, &limits, &mut ret, 10);

        assert_eq!(ret.len(), 1);
        let pool = &ret[0];
        assert_eq!(pool.actions.len(), 4);
        assert_eq!(pool.cab, 0);
    }
}
