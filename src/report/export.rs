use std::io::Write;

use anyhow::Result;
use colored::*;
use itertools::Itertools;
use tracing::info;

use crate::domain::Instance;
use crate::model::arc_cost;
use crate::report::VehicleRoute;

fn route_string(route: &VehicleRoute) -> String {
    route.nodes.iter().join("-")
}

fn route_cost(instance: &Instance, route: &VehicleRoute) -> f64 {
    route
        .nodes
        .windows(2)
        .map(|leg| arc_cost(instance, leg[0], leg[1]))
        .sum()
}

/// Writes the verification export: one row per vehicle, node sequence plus
/// load/distance/cost, all reals in 4-decimal fixed point.
pub fn write_verification_csv<W: Write>(
    writer: W,
    instance: &Instance,
    routes: &[VehicleRoute],
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "VehicleID", "Route", "Load", "Capacity", "Distance", "Range", "Cost",
    ])?;

    for route in routes {
        let vehicle = instance
            .vehicles()
            .iter()
            .find(|v| v.id == route.vehicle)
            .ok_or_else(|| anyhow::anyhow!("route references unknown vehicle {}", route.vehicle))?;
        wtr.write_record([
            route.vehicle.to_string(),
            route_string(route),
            format!("{:.4}", route.total_load(instance)),
            format!("{:.4}", vehicle.capacity),
            format!("{:.4}", route.total_distance(instance)),
            format!("{:.4}", vehicle.range),
            format!("{:.4}", route_cost(instance, route)),
        ])?;
    }

    wtr.flush()?;
    info!("Wrote verification export for {} vehicles", routes.len());
    Ok(())
}

/// Console report in the style of the solver log: one line per vehicle,
/// green when within capacity and range, red otherwise.
pub fn print_route_report(instance: &Instance, routes: &[VehicleRoute]) {
    for route in routes {
        let Some(vehicle) = instance.vehicles().iter().find(|v| v.id == route.vehicle) else {
            continue;
        };

        if !route.is_used() {
            println!("Vehicle {}: {}", vehicle.id, "unused".dimmed());
            continue;
        }

        let load = route.total_load(instance);
        let dist = route.total_distance(instance);
        let line = format!(
            "Vehicle {}: {}  load {:.2}/{:.2}  dist {:.2}/{:.2}  cost {:.2}",
            vehicle.id,
            route_string(route),
            load,
            vehicle.capacity,
            dist,
            vehicle.range,
            route_cost(instance, route),
        );

        if load <= vehicle.capacity && dist <= vehicle.range {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }
}
