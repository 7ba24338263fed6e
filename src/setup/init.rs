use tracing::info;

use crate::config::{Limits, SolverConfig};
use crate::domain::types::{Branch, Cab, DistanceMatrix, Order, Stop};

/// Per-pass liveness side table. Re-expresses the `id == -1` sentinel from
/// the original order/cab arrays as a flag decoupled from caller data, so a
/// `find_pool` pass can hide orders/cabs consumed by an earlier pool-size
/// pass without mutating the arrays themselves.
#[derive(Debug, Clone)]
pub struct ActiveSet {
    orders: Vec<bool>,
    cabs: Vec<bool>,
}

impl ActiveSet {
    pub fn new(num_orders: usize, num_cabs: usize) -> Self {
        ActiveSet {
            orders: vec![true; num_orders],
            cabs: vec![true; num_cabs],
        }
    }

    pub fn order_active(&self, idx: usize) -> bool {
        self.orders[idx]
    }

    pub fn cab_active(&self, idx: usize) -> bool {
        self.cabs[idx]
    }

    pub fn deactivate_order(&mut self, idx: usize) {
        self.orders[idx] = false;
    }

    pub fn deactivate_cab(&mut self, idx: usize) {
        self.cabs[idx] = false;
    }

    pub fn active_order_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.orders.iter().enumerate().filter(|(_, &a)| a).map(|(i, _)| i)
    }

    pub fn active_cab_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cabs.iter().enumerate().filter(|(_, &a)| a).map(|(i, _)| i)
    }

    pub fn num_active_orders(&self) -> usize {
        self.orders.iter().filter(|&&a| a).count()
    }
}

/// Level buffers for one `find_pool(pool_size)` call: `levels[lev]` holds the
/// branches at tree depth `lev`, with `lev == levels.len() - 1` the deepest
/// (leaf) level and `lev == 0` the complete pools.
pub struct LevelBuffers {
    pub levels: Vec<Vec<Branch>>,
}

impl LevelBuffers {
    /// Tree depth for a pool of `pool_size` passengers is `2 * pool_size - 2`;
    /// `levels.len()` is that depth plus one so level 0 is addressable.
    pub fn for_pool_size(pool_size: usize) -> Self {
        assert!(pool_size >= 2, "pool_size must allow at least one IN and one OUT pair");
        let depth = 2 * pool_size - 2;
        LevelBuffers {
            levels: (0..=depth).map(|_| Vec::new()).collect(),
        }
    }

    pub fn deepest_level(&self) -> usize {
        self.levels.len() - 1
    }
}

/// Owns every array a single `dynapool` call touches: the read-only snapshot
/// (distance matrix, stops), the caller-owned demand/supply arrays (borrowed
/// mutably so allocation can flip liveness in place), the active-set side
/// table, and the tunables threaded through the constraint evaluator. Scoped
/// to one call; nothing here outlives the borrow of the caller's arrays.
pub struct SolverContext<'a> {
    pub dist: &'a DistanceMatrix,
    pub stops: &'a [Stop],
    pub orders: &'a mut [Order],
    pub cabs: &'a mut [Cab],
    pub active: ActiveSet,
    pub limits: Limits,
    pub numb_threads: usize,
}

impl<'a> SolverContext<'a> {
    pub fn new(
        dist: &'a DistanceMatrix,
        stops: &'a [Stop],
        orders: &'a mut [Order],
        cabs: &'a mut [Cab],
        cfg: &SolverConfig,
    ) -> Self {
        let active = ActiveSet::new(orders.len(), cabs.len());
        info!(
            demand = orders.len(),
            supply = cabs.len(),
            stops = stops.len(),
            "solver context initialized"
        );
        SolverContext {
            dist,
            stops,
            orders,
            cabs,
            active,
            limits: Limits::from(cfg),
            numb_threads: cfg.numb_threads,
        }
    }
}
