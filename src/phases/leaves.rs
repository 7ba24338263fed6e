use crate::config::Limits;
use crate::domain::types::{Action, Branch, DistanceMatrix, Order, Stop};
use crate::evaluation::eval_funcs::bearing_ok;
use crate::evaluation::fitness::leg_cost;
use crate::setup::init::ActiveSet;

/// Populate the deepest tree level with every feasible length-2 branch: the
/// two-step terminal of growing pools upward from the bottom.
///
/// Two shapes are produced:
/// - `(c, In), (c, Out)` — a single order ridden alone, when its own pickup
///   and drop-off stops don't violate the bearing check.
/// - `(c, Out), (d, Out)` — two distinct orders both already picked up
///   earlier in the (not-yet-built) pool, dropped off back to back, accepted
///   only if detouring to `d`'s drop-off doesn't blow `d`'s own loss budget.
///
/// No `In/In` or `Out/In` leaves: pickups are grown upward one at a time by
/// the diver, never paired directly at the leaf level.
pub fn store_leaves(orders: &[Order], active: &ActiveSet, dist: &DistanceMatrix, stops: &[Stop], limits: &Limits) -> Vec<Branch> {
    let mut out = Vec::new();
    for c in active.active_order_indices() {
        for d in active.active_order_indices() {
            if c == d {
                if bearing_ok(dist, stops, limits, orders[c].from_stand, orders[d].to_stand) {
                    let cost = leg_cost(dist, orders[c].from_stand, orders[d].to_stand, limits.stop_wait);
                    out.push(Branch::leaf((c, Action::In), (d, Action::Out), cost, 1));
                }
            } else if dist.get(orders[c].to_stand, orders[d].to_stand) < orders[d].max_in_pool_time()
                && bearing_ok(dist, stops, limits, orders[c].to_stand, orders[d].to_stand)
            {
                let cost = leg_cost(dist, orders[c].to_stand, orders[d].to_stand, limits.stop_wait);
                out.push(Branch::leaf((c, Action::Out), (d, Action::Out), cost, 2));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> Limits {
        Limits { max_angle: 120, max_angle_dist: 3, stop_wait: 1 }
    }

    fn order(id: i64, from: usize, to: usize, max_wait: i32, max_loss: i32, distance: i32) -> Order {
        Order { id, from_stand: from, to_stand: to, max_wait, max_loss, distance }
    }

    #[test]
    fn single_order_leaf_emitted_when_bearing_ok() {
        let orders = vec![order(0, 0, 1, 15, 70, 5)];
        let stops = vec![
            Stop { id: 0, bearing: 0, lat: 0.0, lon: 0.0 },
            Stop { id: 1, bearing: 10, lat: 0.0, lon: 0.0 },
        ];
        let dist = DistanceMatrix::new(2, vec![0, 5, 5, 0]);
        let active = ActiveSet::new(1, 0);
        let leaves = store_leaves(&orders, &active, &dist, &stops, &limits());
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].actions, vec![(0, Action::In), (0, Action::Out)]);
        assert_eq!(leaves[0].cost, 5);
    }

    #[test]
    fn pair_leaf_requires_loss_budget_and_bearing() {
        let orders = vec![
            order(0, 0, 1, 15, 70, 5),
            order(1, 2, 3, 15, 70, 5),
        ];
        let stops = vec![
            Stop { id: 0, bearing: 0, lat: 0.0, lon: 0.0 },
            Stop { id: 1, bearing: 10, lat: 0.0, lon: 0.0 },
            Stop { id: 2, bearing: 5, lat: 0.0, lon: 0.0 },
            Stop { id: 3, bearing: 8, lat: 0.0, lon: 0.0 },
        ];
        // d=1 to_stand=3, c=0 to_stand=1; dist(1,3) must be < dist(2,3)*1.7
        let mut data = vec![0; 16];
        data[1 * 4 + 3] = 4; // dist(c.to=1, d.to=3)
        data[2 * 4 + 3] = 5; // dist(d.from=2, d.to=3)
        let dist = DistanceMatrix::new(4, data);
        let active = ActiveSet::new(2, 0);
        let leaves = store_leaves(&orders, &active, &dist, &stops, &limits());
        assert!(leaves.iter().any(|b| b.actions == vec![(0, Action::Out), (1, Action::Out)]));
    }

    #[test]
    fn inactive_orders_excluded() {
        let orders = vec![order(0, 0, 1, 15, 70, 5)];
        let stops = vec![
            Stop { id: 0, bearing: 0, lat: 0.0, lon: 0.0 },
            Stop { id: 1, bearing: 10, lat: 0.0, lon: 0.0 },
        ];
        let dist = DistanceMatrix::new(2, vec![0, 5, 5, 0]);
        let mut active = ActiveSet::new(1, 0);
        active.deactivate_order(0);
        let leaves = store_leaves(&orders, &active, &dist, &stops, &limits());
        assert!(leaves.is_empty());
    }
}
