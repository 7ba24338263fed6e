use crate::domain::types::{Cab, DistanceMatrix, Order};
use crate::setup::init::ActiveSet;

/// Outcome of a [`fast_lcm`] call.
#[derive(Debug, Clone, Default)]
pub struct LcmReport {
    /// `(cab_idx, order_idx)` pairs, in acceptance order.
    pub pairs: Vec<(usize, usize)>,
}

impl LcmReport {
    pub fn count(&self) -> usize {
        self.pairs.len()
    }
}

/// Low-cost greedy nearest-neighbor matching used outside the pooling loop --
/// e.g. to pair stray singleton orders with idle cabs once pooling has run.
///
/// Repeatedly scans the full active orders x active cabs matrix for the
/// globally cheapest `(cab, order)` pair (`D[cab.location, order.from] +
/// cab.leg_remaining`). If the winner is within the order's `max_wait` it is
/// accepted and both sides are marked inactive; otherwise the order alone is
/// discarded without consuming a `how_many` slot, since no other cab in the
/// matrix can beat the current minimum for it. Stops after `how_many`
/// accepted pairs or when no candidate pair remains.
pub fn fast_lcm(dist: &DistanceMatrix, orders: &[Order], cabs: &[Cab], active: &mut ActiveSet, how_many: usize) -> LcmReport {
    let mut report = LcmReport::default();
    let big_cost = i32::MAX;

    for _ in 0..orders.len() {
        let mut best: Option<(usize, usize, i32)> = None;

        for s in active.active_cab_indices() {
            for d in active.active_order_indices() {
                let leg = cabs[s].leg_remaining.unwrap_or(0);
                let cost = dist.get(cabs[s].location, orders[d].from_stand) + leg;
                if best.map_or(true, |(_, _, bc)| cost < bc) {
                    best = Some((s, d, cost));
                }
            }
        }

        let (smin, dmin, cost) = match best {
            Some(b) => b,
            None => break,
        };
        if cost >= big_cost {
            break;
        }

        if orders[dmin].max_wait >= cost {
            report.pairs.push((smin, dmin));
            active.deactivate_cab(smin);
            active.deactivate_order(dmin);
        } else {
            // no other cab beats this minimum for dmin; it cannot be served.
            active.deactivate_order(dmin);
        }

        if report.count() >= how_many {
            break;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64, from: usize, to: usize, max_wait: i32) -> Order {
        Order { id, from_stand: from, to_stand: to, max_wait, max_loss: 50, distance: 5 }
    }

    fn cab(id: i64, location: usize) -> Cab {
        Cab { id, location, seats: 4, leg_remaining: None }
    }

    #[test]
    fn fast_lcm_matches_nearest_pair_within_wait() {
        let orders = vec![order(0, 2, 3, 5), order(1, 5, 6, 5)];
        let cabs = vec![cab(0, 0), cab(1, 2)];
        let dist = DistanceMatrix::new(7, vec![
            0, 1, 2, 3, 4, 5, 6,
            1, 0, 1, 2, 3, 4, 5,
            2, 1, 0, 1, 2, 3, 4,
            3, 2, 1, 0, 1, 2, 3,
            4, 3, 2, 1, 0, 1, 2,
            5, 4, 3, 2, 1, 0, 1,
            6, 5, 4, 3, 2, 1, 0,
        ]);
        let mut active = ActiveSet::new(2, 2);
        let report = fast_lcm(&dist, &orders, &cabs, &mut active, 2);
        assert_eq!(report.count(), 2);
        assert!(report.pairs.contains(&(1, 0)));
    }

    #[test]
    fn fast_lcm_discards_order_without_consuming_slot_when_wait_violated() {
        let orders = vec![order(0, 5, 6, 1)];
        let cabs = vec![cab(0, 0)];
        let dist = DistanceMatrix::new(7, vec![
            0, 1, 2, 3, 4, 5, 6,
            1, 0, 1, 2, 3, 4, 5,
            2, 1, 0, 1, 2, 3, 4,
            3, 2, 1, 0, 1, 2, 3,
            4, 3, 2, 1, 0, 1, 2,
            5, 4, 3, 2, 1, 0, 1,
            6, 5, 4, 3, 2, 1, 0,
        ]);
        let mut active = ActiveSet::new(1, 1);
        let report = fast_lcm(&dist, &orders, &cabs, &mut active, 5);
        assert_eq!(report.count(), 0);
        assert!(!active.order_active(0));
    }
}
