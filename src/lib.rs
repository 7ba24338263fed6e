//! Branch-and-bound ride pooling: given open orders, idle cabs, and a travel
//! time matrix, enumerate feasible passenger pools from largest to smallest
//! and greedily assign each accepted pool its nearest capable cab.

pub mod config;
pub mod domain;
pub mod evaluation;
pub mod fixtures;
pub mod phases;
pub mod setup;
pub mod solver;
pub mod utils;

pub use config::SolverConfig;
pub use domain::solution::AcceptedPool;
pub use domain::types::{Action, Branch, Cab, DistanceMatrix, Order, Stop};
pub use solver::pool_engine::driver::{dynapool, find_pool, DynapoolReport};
pub use solver::pool_engine::lcm::{fast_lcm, LcmReport};
