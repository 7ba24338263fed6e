use crate::config::Limits;
use crate::domain::types::{Action, Branch, DistanceMatrix, Order, Stop};
use crate::evaluation::fitness::action_stop;

/// Smallest signed-then-absolute difference between two compass bearings, in `[0, 180]`.
pub fn bearing_diff(a: u16, b: u16) -> i32 {
    let mut r = (a as i32) - (b as i32);
    r %= 360;
    if r < -180 {
        r += 360;
    } else if r >= 180 {
        r -= 360;
    }
    r.abs()
}

/// A newly introduced adjacent stop pair is acceptable if the leg is long
/// enough that a direction change is unremarkable, or if the two stops
/// actually point the same way.
pub fn bearing_ok(dist: &DistanceMatrix, stops: &[Stop], limits: &Limits, s1: usize, s2: usize) -> bool {
    dist.get(s1, s2) > limits.max_angle_dist
        || bearing_diff(stops[s1].bearing, stops[s2].bearing) < limits.max_angle
}

/// Simulate cumulative wait along an existing branch with a candidate prefix
/// action `(order_id, action)` about to be inserted in front of it. Returns
/// true on the first constraint violation: a passenger already in the branch
/// missing their `max_wait`, or the order being inserted missing its own
/// `max_loss` budget between its `In` and `Out`.
pub fn is_too_long(
    orders: &[Order],
    dist: &DistanceMatrix,
    limits: &Limits,
    order_id: usize,
    action: Action,
    start_wait: i32,
    branch: &Branch,
) -> bool {
    let mut wait = start_wait;
    let n = branch.actions.len();

    for i in 0..n.saturating_sub(1) {
        let (id_i, action_i) = branch.actions[i];

        if id_i == order_id && action_i == Action::Out && action == Action::In && wait > orders[order_id].max_in_pool_time() {
            return true;
        }
        if action_i == Action::In && wait > orders[id_i].max_wait {
            return true;
        }

        let (id_next, action_next) = branch.actions[i + 1];
        let from = action_stop(orders, id_i, action_i);
        let to = action_stop(orders, id_next, action_next);
        if from != to {
            wait += dist.get(from, to) + limits.stop_wait;
        }
    }

    if let Some(&(last_id, last_action)) = branch.actions.last() {
        if last_id == order_id
            && last_action == Action::Out
            && action == Action::In
            && wait > orders[order_id].max_in_pool_time()
        {
            return true;
        }
    }
    false
}

/// Same simulation as the first pass of [`is_too_long`], minus the max-loss
/// branch -- no candidate order is being inserted. Used by dedup/assign to
/// re-check the cab's leg to the first stop against every pickup already
/// present in an accepted branch.
pub fn wait_time_exceeded(orders: &[Order], dist: &DistanceMatrix, limits: &Limits, start_wait: i32, branch: &Branch) -> bool {
    let mut wait = start_wait;
    let n = branch.actions.len();
    for i in 0..n.saturating_sub(1) {
        let (id_i, action_i) = branch.actions[i];
        if action_i == Action::In && wait > orders[id_i].max_wait {
            return true;
        }
        let (id_next, action_next) = branch.actions[i + 1];
        let from = action_stop(orders, id_i, action_i);
        let to = action_stop(orders, id_next, action_next);
        if from != to {
            wait += dist.get(from, to) + limits.stop_wait;
        }
    }
    false
}
