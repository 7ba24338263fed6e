use std::error::Error;

use colored::*;
use csv::Writer;
use tracing::{info, span, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ridepool::config::{constant, SolverConfig};
use ridepool::fixtures::data_generator::generate_instance;
use ridepool::solver::pool_engine::lcm::fast_lcm;
use ridepool::{dynapool, AcceptedPool};

const NUM_STOPS: usize = 40;
const NUM_ORDERS: usize = 25;
const NUM_CABS: usize = 8;
const SEED: u64 = 20260727;
const RET_NUMB: usize = 10_000;

#[tracing::instrument(name = "ridepool demo", level = "info")]
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE).compact())
        .init();

    info!(NUM_STOPS, NUM_ORDERS, NUM_CABS, SEED, "generating synthetic instance");
    let mut instance = generate_instance(NUM_STOPS, NUM_ORDERS, NUM_CABS, SEED);

    let cfg = SolverConfig::default();
    let report = {
        let span = span!(Level::INFO, "dynapool_run");
        let _guard = span.enter();
        dynapool(
            &instance.dist,
            &instance.stops,
            &mut instance.orders,
            &mut instance.cabs,
            &cfg,
            &constant::POOL_SIZE_THRESHOLDS,
            RET_NUMB,
        )
    };

    print_summary(&report.accepted);
    for (pool_size, elapsed) in &report.pool_times {
        info!(pool_size, ms = ridepool::utils::elapsed_ms(*elapsed), "pool size pass timing");
    }

    let mut active = ridepool_active_set(&instance, &report.accepted);
    let lcm_report = fast_lcm(&instance.dist, &instance.orders, &instance.cabs, &mut active, instance.orders.len());
    info!(leftover_pairs = lcm_report.count(), "fallback nearest-neighbor matching complete");

    save_to_csv(&report.accepted, "accepted_pools.csv")?;
    Ok(())
}

/// Rebuilds a fresh liveness table and marks every order/cab already consumed
/// by an accepted pool as inactive, so the LCM fallback only sees leftovers.
fn ridepool_active_set(
    instance: &ridepool::fixtures::data_generator::Instance,
    accepted: &[AcceptedPool],
) -> ridepool::setup::init::ActiveSet {
    let mut active = ridepool::setup::init::ActiveSet::new(instance.orders.len(), instance.cabs.len());
    for pool in accepted {
        active.deactivate_cab(pool.cab);
        for &(order_id, _) in &pool.actions {
            active.deactivate_order(order_id);
        }
    }
    active
}

fn print_summary(accepted: &[AcceptedPool]) {
    let cost = ridepool::utils::total_cost(accepted);
    let riders = ridepool::utils::total_riders(accepted);
    if accepted.is_empty() {
        println!("{}", "No pools accepted".red());
    } else {
        println!(
            "{} ({} riders, total cost {})",
            format!("{} pools accepted", accepted.len()).green(),
            riders,
            cost
        );
    }
    for pool in accepted {
        println!("  cab {} <- {:?} (cost {})", pool.cab, pool.actions, pool.cost);
    }
}

fn save_to_csv(accepted: &[AcceptedPool], filename: &str) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;
    wtr.write_record(["cab", "riders", "cost"])?;
    for pool in accepted {
        wtr.write_record([pool.cab.to_string(), (pool.actions.len() / 2).to_string(), pool.cost.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
