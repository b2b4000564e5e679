use tracing::debug;

use crate::distance::haversine_km;

/// Dense n×n distance table in row-major order, total over every ordered
/// node pair. The diagonal is always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// A matrix of the given size with all distances zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Builds the full pairwise haversine matrix over `(lat, lon)` points.
    /// Index 0 is expected to be the depot, 1..n the clients.
    pub fn from_coordinates(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let (lat1, lon1) = points[i];
                    let (lat2, lon2) = points[j];
                    dm.set(i, j, haversine_km(lat1, lon1, lat2, lon2));
                }
            }
        }
        debug!("Built {}x{} haversine distance matrix", n, n);
        dm
    }

    /// Builds a matrix from an explicit row-major grid.
    /// Returns `None` when the data length is not `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of nodes covered by the matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}
