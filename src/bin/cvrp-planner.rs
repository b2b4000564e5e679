use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cvrp_milp::config::constant::{
    CLIENTS_CSV_PATH, DEPOTS_CSV_PATH, LP_OUTPUT_PATH, PARAMS_CSV_PATH, VEHICLES_CSV_PATH,
};
use cvrp_milp::domain::Instance;
use cvrp_milp::fixtures::generate_random_instance;
use cvrp_milp::ingest::{load_instance, InstanceFiles};
use cvrp_milp::model::{build_model, lp};

const FIXTURE_CLIENTS: usize = 8;
const FIXTURE_VEHICLES: usize = 3;
const FIXTURE_SEED: u64 = 207_224;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}

fn load_or_generate() -> Result<Instance> {
    let files = InstanceFiles {
        clients: CLIENTS_CSV_PATH,
        vehicles: VEHICLES_CSV_PATH,
        depots: DEPOTS_CSV_PATH,
        parameters: PARAMS_CSV_PATH,
    };

    let all_present = [
        files.clients,
        files.vehicles,
        files.depots,
        files.parameters,
    ]
    .iter()
    .all(|p| Path::new(p).exists());

    if all_present {
        load_instance(&files)
    } else {
        warn!(
            "Input CSVs not found under data/, generating a seeded fixture instance \
             ({} clients, {} vehicles)",
            FIXTURE_CLIENTS, FIXTURE_VEHICLES
        );
        Ok(generate_random_instance(
            FIXTURE_CLIENTS,
            FIXTURE_VEHICLES,
            FIXTURE_SEED,
        ))
    }
}

fn main() -> Result<()> {
    init_tracing();

    let instance = load_or_generate()?;
    let cvrp = build_model(&instance)?;
    let model = cvrp.model();

    info!(
        "CVRP model ready: {} variables, {} constraints ({} MTZ)",
        model.num_variables(),
        model.num_constraints(),
        model.count_constraints_with_prefix("mtz_")
    );

    if let Some(dir) = Path::new(LP_OUTPUT_PATH).parent() {
        fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    }
    let mut file = fs::File::create(LP_OUTPUT_PATH)
        .with_context(|| format!("cannot create {}", LP_OUTPUT_PATH))?;
    lp::write_lp(&mut file, model, "CVRP with range limits and composite cost")?;
    info!("Wrote LP file to {}", LP_OUTPUT_PATH);

    println!(
        "Model written to {} — hand it to an MILP solver; infeasible and \
         timed-out runs are distinct outcomes, check the solver status.",
        LP_OUTPUT_PATH
    );
    Ok(())
}
