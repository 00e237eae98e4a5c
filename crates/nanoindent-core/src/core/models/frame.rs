use super::simbox::SimulationBox;
use nalgebra::Point3;

/// A single trajectory snapshot.
///
/// Particle data is stored column-wise; `ids`, `types` and `positions` always have the same
/// length.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The simulation timestep this snapshot was written at.
    pub timestep: u64,
    /// The simulation cell.
    pub simulation_box: SimulationBox,
    /// Particle identifiers as written by the simulation code.
    pub ids: Vec<u64>,
    /// Particle types.
    pub types: Vec<u32>,
    /// Cartesian particle positions in Angstroms.
    pub positions: Vec<Point3<f64>>,
}

impl Frame {
    /// Builds a frame from positions alone, numbering particles from 1 with type 1.
    pub fn from_positions(
        timestep: u64,
        simulation_box: SimulationBox,
        positions: Vec<Point3<f64>>,
    ) -> Self {
        let n = positions.len();
        Self {
            timestep,
            simulation_box,
            ids: (1..=n as u64).collect(),
            types: vec![1; n],
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
