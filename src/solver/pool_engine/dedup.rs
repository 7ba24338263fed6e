use tracing::{debug, warn};

use crate::config::Limits;
use crate::domain::solution::{is_found, peak_passengers, AcceptedPool};
use crate::domain::types::{Branch, Cab, DistanceMatrix, Order};
use crate::evaluation::eval_funcs::wait_time_exceeded;
use crate::setup::init::ActiveSet;

/// Outcome of searching for a cab able to serve a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearestCab {
    /// No active cab remains at all.
    None,
    /// Active cabs remain, but none seats enough passengers.
    NoSeats,
    Found(usize),
}

/// Nearest active cab whose seat count covers `pass_count`, by straight-line
/// travel time to `from`.
pub fn find_nearest_cab(cabs: &[Cab], active: &ActiveSet, dist: &DistanceMatrix, from: usize, pass_count: u32) -> NearestCab {
    let mut found_any = false;
    let mut best: Option<(usize, i32)> = None;
    for i in active.active_cab_indices() {
        found_any = true;
        if cabs[i].seats >= pass_count {
            let d = dist.get(cabs[i].location, from);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
    }
    if !found_any {
        NearestCab::None
    } else {
        match best {
            Some((i, _)) => NearestCab::Found(i),
            None => NearestCab::NoSeats,
        }
    }
}

/// Re-verify full wait-time feasibility of an already-built branch once the
/// cab's leg to the first stop is added to the accumulated wait.
pub fn constraints_met(orders: &[Order], dist: &DistanceMatrix, limits: &Limits, start_wait: i32, branch: &Branch) -> bool {
    !wait_time_exceeded(orders, dist, limits, start_wait, branch)
}

/// Sorts level-0 branches by cost, greedily assigns the nearest capable cab
/// to each surviving one, and tombstones every later branch that overlaps in
/// pickups. Accepted pools are appended to `ret`, capped at `ret_numb`.
#[allow(clippy::too_many_arguments)]
pub fn rm_duplicates_and_find_cab(
    orders: &mut [Order],
    cabs: &mut [Cab],
    active: &mut ActiveSet,
    dist: &DistanceMatrix,
    limits: &Limits,
    pool_size: usize,
    branches: &mut [Branch],
    ret: &mut Vec<AcceptedPool>,
    ret_numb: usize,
) {
    if branches.is_empty() {
        return;
    }

    // Preprocessing: fold the cab's leg to the first stop into cost where a
    // cab is currently findable; tombstone branches that already blow a
    // pickup's wait limit once that leg is added.
    for b in branches.iter_mut() {
        if !b.alive {
            continue;
        }
        let from = b.first_stop(orders);
        let pass_count = peak_passengers(b);
        if let NearestCab::Found(idx) = find_nearest_cab(cabs, active, dist, from, pass_count) {
            let dist_cab = dist.get(cabs[idx].location, from);
            if dist_cab > 0 && wait_time_exceeded(orders, dist, limits, dist_cab, b) {
                b.alive = false;
                continue;
            }
            b.cost += dist_cab;
        }
    }

    let mut order_idx: Vec<usize> = (0..branches.len()).collect();
    order_idx.sort_by_key(|&i| branches[i].cost);

    for pos in 0..order_idx.len() {
        let i = order_idx[pos];
        if !branches[i].alive {
            continue;
        }
        let from = branches[i].first_stop(orders);
        let pass_count = peak_passengers(&branches[i]);

        match find_nearest_cab(cabs, active, dist, from, pass_count) {
            NearestCab::None => {
                debug!("no cabs remain, tombstoning rest of level 0");
                for &j in &order_idx[pos..] {
                    branches[j].alive = false;
                }
                break;
            }
            NearestCab::NoSeats => {
                branches[i].alive = false;
            }
            NearestCab::Found(cab_idx) => {
                let dist_cab = dist.get(cabs[cab_idx].location, from);
                let accepted = dist_cab == 0 || constraints_met(orders, dist, limits, dist_cab + limits.stop_wait, &branches[i]);
                if !accepted {
                    branches[i].alive = false;
                    continue;
                }

                branches[i].cab = Some(cab_idx);
                active.deactivate_cab(cab_idx);
                for &(order_id, _) in &branches[i].actions {
                    active.deactivate_order(order_id);
                }

                if ret.len() < ret_numb {
                    ret.push(AcceptedPool::from(&branches[i]));
                } else {
                    warn!(ret_numb, "output buffer full, dropping accepted pool");
                }

                for &j in &order_idx[pos + 1..] {
                    if branches[j].alive && is_found(&branches[i], &branches[j]) {
                        branches[j].alive = false;
                    }
                }
            }
        }
    }
    let _ = pool_size;
}
