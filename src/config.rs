pub mod constant {
    /// Node id of the depot. Clients are 1..=num_clients.
    pub const DEPOT: usize = 0;

    /// Fixed travel speed (km/h) used to convert arc distance into the
    /// time-in-minutes term of the objective.
    pub const SPEED_KMH: f64 = 40.0;

    /// Mean Earth radius (km) for the haversine distance.
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Tolerance when evaluating constraints against a solver assignment.
    pub const FEASIBILITY_EPS: f64 = 1e-6;

    pub const CLIENTS_CSV_PATH: &str = "data/clients.csv";
    pub const VEHICLES_CSV_PATH: &str = "data/vehicles.csv";
    pub const DEPOTS_CSV_PATH: &str = "data/depots.csv";
    pub const PARAMS_CSV_PATH: &str = "data/parameters.csv";

    pub const LP_OUTPUT_PATH: &str = "output/cvrp_model.lp";
    pub const VERIFICATION_CSV_PATH: &str = "output/verification.csv";
}
