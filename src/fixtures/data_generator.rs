use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::domain::types::{Cab, DistanceMatrix, Order, Stop};

/// A fully synthetic problem instance: a distance matrix plus matching stop,
/// order, and cab arrays, all addressed through the same stop indices.
#[derive(Debug, Clone)]
pub struct Instance {
    pub dist: DistanceMatrix,
    pub stops: Vec<Stop>,
    pub orders: Vec<Order>,
    pub cabs: Vec<Cab>,
}

/// Deterministically generates `num_stops` stops scattered on a small grid,
/// each with a plausible compass bearing.
fn generate_stops(num_stops: usize, rng: &mut ChaCha8Rng) -> Vec<Stop> {
    (0..num_stops)
        .map(|id| Stop {
            id: id as i64,
            bearing: rng.gen_range(0..360),
            lat: rng.gen_range(-1.0..1.0),
            lon: rng.gen_range(-1.0..1.0),
        })
        .collect()
}

/// Builds a dense travel-time matrix (minutes) from pairwise stop distance,
/// scaled and jittered slightly so it isn't perfectly symmetric-trivial.
fn generate_distance_matrix(stops: &[Stop], rng: &mut ChaCha8Rng) -> DistanceMatrix {
    let n = stops.len();
    let mut data = vec![0; n * n];
    for row in 0..n {
        for col in 0..n {
            if row == col {
                continue;
            }
            let dx = stops[row].lat - stops[col].lat;
            let dy = stops[row].lon - stops[col].lon;
            let base = ((dx * dx + dy * dy).sqrt() * 30.0) as i32;
            data[row * n + col] = (base + rng.gen_range(0..3)).max(1);
        }
    }
    DistanceMatrix::new(n, data)
}

/// Generates `num_orders` open passenger requests, each riding between two
/// distinct random stops with a generous but bounded wait/loss budget.
fn generate_orders(num_orders: usize, num_stops: usize, dist: &DistanceMatrix, rng: &mut ChaCha8Rng) -> Vec<Order> {
    (0..num_orders)
        .map(|id| {
            let from_stand = rng.gen_range(0..num_stops);
            let mut to_stand = rng.gen_range(0..num_stops);
            while to_stand == from_stand {
                to_stand = rng.gen_range(0..num_stops);
            }
            Order {
                id: id as i64,
                from_stand,
                to_stand,
                max_wait: rng.gen_range(10..25),
                max_loss: rng.gen_range(40..90),
                distance: dist.get(from_stand, to_stand),
            }
        })
        .collect()
}

/// Generates `num_cabs` available vehicles parked at random stops.
fn generate_cabs(num_cabs: usize, num_stops: usize, rng: &mut ChaCha8Rng) -> Vec<Cab> {
    (0..num_cabs)
        .map(|id| Cab {
            id: id as i64,
            location: rng.gen_range(0..num_stops),
            seats: rng.gen_range(1..5),
            leg_remaining: None,
        })
        .collect()
}

/// Generates a complete, reproducible synthetic instance from a single seed.
pub fn generate_instance(num_stops: usize, num_orders: usize, num_cabs: usize, seed: u64) -> Instance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let stops = generate_stops(num_stops, &mut rng);
    let dist = generate_distance_matrix(&stops, &mut rng);
    let orders = generate_orders(num_orders, num_stops, &dist, &mut rng);
    let cabs = generate_cabs(num_cabs, num_stops, &mut rng);

    info!(num_stops, num_orders, num_cabs, seed, "generated synthetic instance");
    Instance { dist, stops, orders, cabs }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_produces_identical_instance() {
        let a = generate_instance(10, 6, 3, 42);
        let b = generate_instance(10, 6, 3, 42);
        assert_eq!(a.orders, b.orders);
        assert_eq!(a.cabs, b.cabs);
        assert_eq!(a.stops, b.stops);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let a = generate_instance(10, 6, 3, 1);
        let b = generate_instance(10, 6, 3, 2);
        assert_ne!(a.orders, b.orders);
    }

    #[test]
    fn orders_never_pick_up_and_drop_at_same_stop() {
        let instance = generate_instance(20, 15, 4, 7);
        for order in &instance.orders {
            assert_ne!(order.from_stand, order.to_stand);
        }
    }
}
