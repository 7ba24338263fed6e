use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::Limits;
use crate::domain::types::{Action, Branch, DistanceMatrix, Order, Stop};
use crate::evaluation::eval_funcs::{bearing_ok, is_too_long};
use crate::evaluation::fitness::leg_cost;
use crate::phases::leaves::store_leaves;
use crate::setup::init::{ActiveSet, LevelBuffers};

/// Grows branches upward from the leaf level one tree level at a time.
/// Recurses to the deeper level first (building it completely), then
/// extends every surviving branch there by one action at this level.
pub fn dive(
    buffers: &mut LevelBuffers,
    lev: usize,
    pool_size: usize,
    numb_threads: usize,
    orders: &[Order],
    active: &ActiveSet,
    dist: &DistanceMatrix,
    stops: &[Stop],
    limits: &Limits,
) {
    if lev == buffers.deepest_level() {
        buffers.levels[lev] = store_leaves(orders, active, dist, stops, limits);
        debug!(level = lev, count = buffers.levels[lev].len(), "leaf level populated");
        return;
    }

    dive(buffers, lev + 1, pool_size, numb_threads, orders, active, dist, stops, limits);
    extend_level(buffers, lev, pool_size, numb_threads, orders, active, dist, stops, limits);
}

/// Fan out over contiguous chunks of the full order range, each worker
/// extending every branch at `lev+1` by zero or more actions involving its
/// own chunk's orders. Workers see an immutable snapshot of `lev+1`; their
/// scratch output is merged back in worker-index order, so the result is
/// deterministic for a fixed `(numb_threads, orders.len())` regardless of
/// scheduling.
fn extend_level(
    buffers: &mut LevelBuffers,
    lev: usize,
    pool_size: usize,
    numb_threads: usize,
    orders: &[Order],
    active: &ActiveSet,
    dist: &DistanceMatrix,
    stops: &[Stop],
    limits: &Limits,
) {
    let demand_numb = orders.len();
    let chunk = ((demand_numb as f64) / (numb_threads.max(1) as f64)).ceil().max(1.0) as usize;
    let num_chunks = numb_threads.max(1);
    let deeper = &buffers.levels[lev + 1];

    let merged: Vec<Vec<Branch>> = (0..num_chunks)
        .into_par_iter()
        .map(|worker| {
            let start = worker * chunk;
            let stop = ((worker + 1) * chunk).min(demand_numb);
            let mut scratch = Vec::new();
            if start >= stop {
                return scratch;
            }
            'orders: for order_id in start..stop {
                if !active.order_active(order_id) {
                    continue;
                }
                for ptr in deeper.iter() {
                    if let Some(branch) = extend_branch(order_id, lev, pool_size, ptr, orders, dist, stops, limits) {
                        if scratch.len() >= crate::config::constant::MAX_THREAD_MEM {
                            warn!(level = lev, worker, "thread scratch capacity exceeded, dropping branch");
                            break 'orders;
                        }
                        scratch.push(branch);
                    }
                }
            }
            scratch
        })
        .collect();

    buffers.levels[lev] = merged.into_iter().flatten().collect();
    debug!(level = lev, count = buffers.levels[lev].len(), "level extended");
}

/// The extension rule (`store_branch_if_not_found_deeper_and_not_too_long`):
/// decide whether `order_id` can prepend an `In` or `Out` action onto `ptr`.
fn extend_branch(
    order_id: usize,
    lev: usize,
    pool_size: usize,
    ptr: &Branch,
    orders: &[Order],
    dist: &DistanceMatrix,
    stops: &[Stop],
    limits: &Limits,
) -> Option<Branch> {
    let mut out_found = false;
    for &(id, action) in &ptr.actions {
        if id == order_id {
            if action == Action::In {
                return None;
            }
            out_found = true;
            break;
        }
    }

    let next_stop = ptr.first_stop(orders);

    if out_found {
        let from = orders[order_id].from_stand;
        let start_wait = leg_cost(dist, from, next_stop, limits.stop_wait);
        if !is_too_long(orders, dist, limits, order_id, Action::In, start_wait, ptr) && bearing_ok(dist, stops, limits, from, next_stop) {
            return Some(store_branch(Action::In, order_id, ptr, orders, dist, limits));
        }
    } else if lev > 0 && (ptr.outs as usize) < pool_size {
        let to = orders[order_id].to_stand;
        let start_wait = leg_cost(dist, to, next_stop, limits.stop_wait);
        if !is_too_long(orders, dist, limits, order_id, Action::Out, start_wait, ptr) && bearing_ok(dist, stops, limits, to, next_stop) {
            return Some(store_branch(Action::Out, order_id, ptr, orders, dist, limits));
        }
    }
    None
}

/// Prepend `(order_id, action)` to `b`, charging the new leg's cost.
fn store_branch(action: Action, order_id: usize, b: &Branch, orders: &[Order], dist: &DistanceMatrix, limits: &Limits) -> Branch {
    let new_stop = match action {
        Action::In => orders[order_id].from_stand,
        Action::Out => orders[order_id].to_stand,
    };
    let first_stop = b.first_stop(orders);
    let cost = leg_cost(dist, new_stop, first_stop, limits.stop_wait) + b.cost;
    let outs = b.outs + if action == Action::Out { 1 } else { 0 };

    let mut actions = Vec::with_capacity(b.actions.len() + 1);
    actions.push((order_id, action));
    actions.extend_from_slice(&b.actions);

    Branch {
        cost,
        outs,
        actions,
        cab: None,
        alive: true,
    }
}
