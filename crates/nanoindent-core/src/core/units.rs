//! Unit conversions for LAMMPS `metal` units.

/// Converts stress from eV/Å³ to GPa.
pub const EV_PER_A3_TO_GPA: f64 = 160.2176;

/// Converts force from eV/Å to nN.
pub const EV_PER_A_TO_NN: f64 = 1.60218;

/// Converts length from Å to nm.
pub const ANGSTROM_TO_NM: f64 = 0.1;

/// Distance between the indenter plane and the particle surface at first contact (Å).
pub const DEFAULT_INDENTER_OFFSET: f64 = 4.0725;

/// Coordination cutoff radius for silicon (Å).
pub const DEFAULT_COORDINATION_CUTOFF: f64 = 2.60;

/// Projected area assigned to each contact atom, π r² for silicon (Å²).
pub const DEFAULT_ATOMIC_AREA: f64 = 17.35;

/// Half-thickness of the slab around the indenter plane used for the elliptical area (Å).
pub const DEFAULT_PLANE_TOLERANCE: f64 = 0.2;

/// Largest coordination number reported as a column.
pub const MAX_TRACKED_COORDINATION: u8 = 7;
