use serde::Deserialize;

/// One client row: coordinates plus demand.
#[derive(Debug, Deserialize)]
pub struct ClientRecord {
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Demand")]
    pub demand: f64,
}

/// One vehicle row.
#[derive(Debug, Deserialize)]
pub struct VehicleRecord {
    #[serde(rename = "VehicleID")]
    pub vehicle_id: usize,
    #[serde(rename = "Capacity")]
    pub capacity: f64,
    #[serde(rename = "Range")]
    pub range: f64,
}

/// The single depot row.
#[derive(Debug, Deserialize)]
pub struct DepotRecord {
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

/// One scalar parameter row, keyed by name.
#[derive(Debug, Deserialize)]
pub struct ParamRecord {
    #[serde(rename = "Parameter")]
    pub parameter: String,
    #[serde(rename = "Value")]
    pub value: f64,
}
