use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::info;

use crate::distance::DistanceMatrix;
use crate::domain::{Instance, InstanceError, Vehicle};
use crate::ingest::records::{ClientRecord, DepotRecord, ParamRecord, VehicleRecord};

const FUEL_PRICE_KEY: &str = "fuel_price";
const FUEL_EFFICIENCY_KEY: &str = "fuel_efficiency_typical";

/// Paths of the four tabular sources that describe one instance.
#[derive(Debug, Clone)]
pub struct InstanceFiles<P: AsRef<Path>> {
    pub clients: P,
    pub vehicles: P,
    pub depots: P,
    pub parameters: P,
}

pub fn read_clients<R: Read>(reader: R) -> Result<Vec<ClientRecord>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row.context("malformed client row")?);
    }
    Ok(rows)
}

pub fn read_vehicles<R: Read>(reader: R) -> Result<Vec<VehicleRecord>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row.context("malformed vehicle row")?);
    }
    Ok(rows)
}

pub fn read_depot<R: Read>(reader: R) -> Result<DepotRecord> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let depot = rdr
        .deserialize()
        .next()
        .context("depot file has no rows")?
        .context("malformed depot row")?;
    Ok(depot)
}

pub fn read_params<R: Read>(reader: R) -> Result<Vec<ParamRecord>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row.context("malformed parameter row")?);
    }
    Ok(rows)
}

fn lookup_param(params: &[ParamRecord], key: &'static str) -> Result<f64> {
    params
        .iter()
        .find(|p| p.parameter == key)
        .map(|p| p.value)
        .ok_or_else(|| InstanceError::MissingParameter { name: key }.into())
}

/// Assembles an instance from already-parsed records.
///
/// Coordinates are ordered depot-first, so node ids line up with the
/// depot-is-node-0 convention. The returned instance is validated; any
/// configuration error aborts here.
pub fn build_instance(
    clients: &[ClientRecord],
    vehicles: &[VehicleRecord],
    depot: &DepotRecord,
    params: &[ParamRecord],
) -> Result<Instance> {
    let fuel_price = lookup_param(params, FUEL_PRICE_KEY)?;
    let fuel_efficiency = lookup_param(params, FUEL_EFFICIENCY_KEY)?;

    let mut points = Vec::with_capacity(clients.len() + 1);
    points.push((depot.latitude, depot.longitude));
    points.extend(clients.iter().map(|c| (c.latitude, c.longitude)));

    let distances = DistanceMatrix::from_coordinates(&points);
    let demands: Vec<f64> = clients.iter().map(|c| c.demand).collect();
    let fleet: Vec<Vehicle> = vehicles
        .iter()
        .map(|v| Vehicle {
            id: v.vehicle_id,
            capacity: v.capacity,
            range: v.range,
        })
        .collect();

    let instance = Instance::new(distances, demands, fleet, fuel_efficiency, fuel_price);
    instance.validate()?;

    info!(
        "Loaded instance: {} clients, {} vehicles, fuel {} per unit at efficiency {}",
        instance.num_clients(),
        instance.vehicles().len(),
        fuel_price,
        fuel_efficiency
    );
    Ok(instance)
}

/// Loads and assembles an instance from the four CSV files.
pub fn load_instance<P: AsRef<Path>>(files: &InstanceFiles<P>) -> Result<Instance> {
    let clients = read_clients(open(&files.clients)?)?;
    let vehicles = read_vehicles(open(&files.vehicles)?)?;
    let depot = read_depot(open(&files.depots)?)?;
    let params = read_params(open(&files.parameters)?)?;

    build_instance(&clients, &vehicles, &depot, &params)
}

fn open<P: AsRef<Path>>(path: &P) -> Result<std::fs::File> {
    std::fs::File::open(path.as_ref())
        .with_context(|| format!("cannot open {}", path.as_ref().display()))
}
