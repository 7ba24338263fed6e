//! Constants mirroring the tunables a dispatcher would hand-tune per deployment,
//! plus [`SolverConfig`] for the values a caller may want to vary per invocation.

pub mod constant {
    /// Maximum passengers sharable in one pool. Tree depth is `2 * MAX_IN_POOL - 2`.
    pub const MAX_IN_POOL: usize = 5;
    /// Upper bound on worker fan-out per recursion level.
    pub const NUMB_THREAD: usize = 11;
    /// Per-thread scratch capacity, in branches, for one level.
    pub const MAX_THREAD_MEM: usize = 50_000;
    /// Direction tolerance in degrees: adjacent-stop bearing differences at or
    /// above this, on legs short enough to matter, are rejected.
    pub const MAX_ANGLE: i32 = 120;
    /// Legs longer than this (minutes) bypass the bearing check entirely.
    pub const MAX_ANGLE_DIST: i32 = 3;
    /// Fixed per-stop dwell time charged on every non-zero-length leg.
    pub const STOP_WAIT: i32 = 1;

    /// Demand-count ceiling below which a given pool size is attempted at all,
    /// indexed by `MAX_IN_POOL - pool_size` (index 0 is the largest pool size,
    /// `MAX_IN_POOL`; the last index is pool size 2).
    pub const POOL_SIZE_THRESHOLDS: [usize; MAX_IN_POOL - 1] = [2000, 1500, 1000, 600];
}

/// The subset of tunables a caller plausibly wants to vary per `dynapool` call,
/// without reaching into `constant` or recompiling.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    pub numb_threads: usize,
    pub max_angle: i32,
    pub max_angle_dist: i32,
    pub stop_wait: i32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            numb_threads: constant::NUMB_THREAD,
            max_angle: constant::MAX_ANGLE,
            max_angle_dist: constant::MAX_ANGLE_DIST,
            stop_wait: constant::STOP_WAIT,
        }
    }
}

/// The three constraint-evaluator knobs, bundled so they can be threaded
/// through `eval_funcs`/`fitness` without a four-argument sprawl.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_angle: i32,
    pub max_angle_dist: i32,
    pub stop_wait: i32,
}

impl From<&SolverConfig> for Limits {
    fn from(cfg: &SolverConfig) -> Self {
        Limits {
            max_angle: cfg.max_angle,
            max_angle_dist: cfg.max_angle_dist,
            stop_wait: cfg.stop_wait,
        }
    }
}
