use crate::domain::types::{Action, DistanceMatrix, Order};

/// Cost of moving from `from` to `to`: the table lookup plus a dwell charge
/// if the stops actually differ. Charging `STOP_WAIT` on a zero-length leg
/// would double-count a stop a passenger is already standing at.
#[inline]
pub fn leg_cost(dist: &DistanceMatrix, from: usize, to: usize, stop_wait: i32) -> i32 {
    let wait = if from == to { 0 } else { stop_wait };
    dist.get(from, to) + wait
}

/// Resolve the stop an action actually happens at.
#[inline]
pub fn action_stop(orders: &[Order], idx: usize, action: Action) -> usize {
    match action {
        Action::In => orders[idx].from_stand,
        Action::Out => orders[idx].to_stand,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dm() -> DistanceMatrix {
        DistanceMatrix::new(3, vec![0, 4, 9, 4, 0, 3, 9, 3, 0])
    }

    #[test]
    fn leg_cost_skips_dwell_on_same_stop() {
        assert_eq!(leg_cost(&dm(), 1, 1, 2), 0);
    }

    #[test]
    fn leg_cost_adds_dwell_on_moving_leg() {
        assert_eq!(leg_cost(&dm(), 0, 1, 2), 4 + 2);
    }
}
