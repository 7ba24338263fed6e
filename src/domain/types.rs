use serde::{Deserialize, Serialize};

/// A pickup/drop-off point. Bearing is a compass heading in whole degrees,
/// used to reject pools that double back on short legs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: i64,
    pub bearing: u16,
    pub lat: f64,
    pub lon: f64,
}

/// An open passenger request. `id == -1` is never produced here: liveness is
/// tracked out-of-band by `ActiveSet` (see setup::init) rather than by mutating
/// this sentinel, but the field is kept so callers can still recognise their
/// own orders in accepted pools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub from_stand: usize,
    pub to_stand: usize,
    pub max_wait: i32,
    pub max_loss: i32,
    pub distance: i32,
}

impl Order {
    /// Longest acceptable in-pool travel time between this order's `In` and `Out`.
    pub fn max_in_pool_time(&self) -> i32 {
        (self.distance as f64 * (100.0 + self.max_loss as f64) / 100.0) as i32
    }
}

/// An available vehicle. `leg_remaining` is the time left on whatever leg the
/// cab is currently driving, if any (used by the LCM auxiliary).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cab {
    pub id: i64,
    pub location: usize,
    pub seats: u32,
    pub leg_remaining: Option<i32>,
}

/// A pickup or a drop-off action within a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    In,
    Out,
}

/// One step of a branch: which order, and whether we pick it up or drop it off.
pub type Step = (usize, Action);

/// A candidate (possibly partial) ride pool growing in the permutation tree.
///
/// `actions` is stored in visit order (the order a cab would actually drive
/// it); `cost` excludes the cab's leg to the first stop until the dedup/assign
/// pass adds it in. `alive` is the tombstone flag used during dedup: once
/// cleared, the branch is skipped but never physically removed from its level
/// buffer, so indices stay stable for the rest of that pass.
#[derive(Debug, Clone)]
pub struct Branch {
    pub cost: i32,
    pub outs: u8,
    pub actions: Vec<Step>,
    pub cab: Option<usize>,
    pub alive: bool,
}

impl Branch {
    pub fn leaf(first: Step, second: Step, cost: i32, outs: u8) -> Self {
        Branch {
            cost,
            outs,
            actions: vec![first, second],
            cab: None,
            alive: true,
        }
    }

    /// The stop a cab would be at before taking its first action.
    pub fn first_stop(&self, orders: &[Order]) -> usize {
        let (idx, action) = self.actions[0];
        match action {
            Action::In => orders[idx].from_stand,
            Action::Out => orders[idx].to_stand,
        }
    }

    /// Number of distinct orders carried in this branch.
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

/// A dense, row-major travel-time matrix addressed through `get`, never raw
/// pointer arithmetic. Values are minutes; the matrix need not be symmetric.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<i32>,
}

impl DistanceMatrix {
    pub fn new(n: usize, data: Vec<i32>) -> Self {
        assert_eq!(data.len(), n * n, "distance matrix must be N x N");
        DistanceMatrix { n, data }
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> i32 {
        self.data[from * self.n + to]
    }

    pub fn size(&self) -> usize {
        self.n
    }
}
