use crate::core::models::frame::Frame;
use nalgebra::Point3;
use std::collections::HashMap;

type CellKey = [i64; 3];

/// Uniform binning of particles into cells at least `cutoff` wide.
///
/// Cells are stored sparsely so that dilute systems in large boxes stay cheap. Along periodic
/// axes the grid spans the box exactly and wraps around; along open axes it spans the particles.
struct CellGrid {
    origin: Point3<f64>,
    cell_size: [f64; 3],
    counts: [i64; 3],
    periodic: [bool; 3],
    cells: HashMap<CellKey, Vec<usize>>,
}

impl CellGrid {
    fn build(frame: &Frame, positions: &[Point3<f64>], cutoff: f64) -> Self {
        let simulation_box = &frame.simulation_box;
        let mut origin = Point3::origin();
        let mut cell_size = [0.0; 3];
        let mut counts = [1i64; 3];
        let periodic = [0, 1, 2].map(|axis| simulation_box.is_periodic(axis));

        for axis in 0..3 {
            let (lo, hi) = if periodic[axis] {
                (simulation_box.lo[axis], simulation_box.hi[axis])
            } else {
                positions.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                    (lo.min(p[axis]), hi.max(p[axis]))
                })
            };
            let extent = hi - lo;
            origin[axis] = if lo.is_finite() { lo } else { 0.0 };
            if extent.is_finite() && extent > 0.0 {
                counts[axis] = ((extent / cutoff).floor() as i64).max(1);
                cell_size[axis] = extent / counts[axis] as f64;
            }
        }

        let mut grid = Self {
            origin,
            cell_size,
            counts,
            periodic,
            cells: HashMap::new(),
        };
        for (i, p) in positions.iter().enumerate() {
            let key = grid.key_of(p);
            grid.cells.entry(key).or_default().push(i);
        }
        grid
    }

    fn key_of(&self, p: &Point3<f64>) -> CellKey {
        let mut key = [0i64; 3];
        for axis in 0..3 {
            if self.counts[axis] > 1 {
                let idx = ((p[axis] - self.origin[axis]) / self.cell_size[axis]).floor() as i64;
                key[axis] = idx.clamp(0, self.counts[axis] - 1);
            }
        }
        key
    }

    /// The distinct cells adjacent to (and including) `key`.
    fn neighbor_cells(&self, key: CellKey) -> Vec<CellKey> {
        let mut out = Vec::with_capacity(27);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(neighbor) = self.offset(key, [dx, dy, dz]) {
                        out.push(neighbor);
                    }
                }
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    fn offset(&self, key: CellKey, delta: [i64; 3]) -> Option<CellKey> {
        let mut out = [0i64; 3];
        for axis in 0..3 {
            let n = self.counts[axis];
            let idx = key[axis] + delta[axis];
            out[axis] = if self.periodic[axis] {
                idx.rem_euclid(n)
            } else if (0..n).contains(&idx) {
                idx
            } else {
                return None;
            };
        }
        Some(out)
    }
}

/// Number of neighbours within `cutoff` (inclusive) for every particle of the frame.
///
/// Separations follow the minimum-image convention along periodic axes, so periodic box edges
/// are expected to be longer than twice the cutoff.
pub fn coordination_numbers(frame: &Frame, cutoff: f64) -> Vec<u32> {
    let simulation_box = &frame.simulation_box;
    let positions: Vec<Point3<f64>> = frame
        .positions
        .iter()
        .map(|p| simulation_box.wrap(*p))
        .collect();
    let grid = CellGrid::build(frame, &positions, cutoff);
    let cutoff_sq = cutoff * cutoff;

    let mut numbers = vec![0u32; positions.len()];
    for (key, members) in &grid.cells {
        let candidates: Vec<usize> = grid
            .neighbor_cells(*key)
            .iter()
            .filter_map(|k| grid.cells.get(k))
            .flatten()
            .copied()
            .collect();

        for &i in members {
            numbers[i] = candidates
                .iter()
                .filter(|&&j| j != i)
                .filter(|&&j| {
                    let delta = simulation_box.minimum_image(positions[j] - positions[i]);
                    delta.norm_squared() <= cutoff_sq
                })
                .count() as u32;
        }
    }
    numbers
}

/// Fraction of particles with coordination number `n`, for `n` in `1..=max_cn`.
///
/// Element `n - 1` of the result holds the fraction for `n`. An empty frame yields zeros.
pub fn coordination_fractions(numbers: &[u32], max_cn: u8) -> Vec<f64> {
    let mut histogram = vec![0usize; max_cn as usize];
    for &cn in numbers {
        if (1..=max_cn as u32).contains(&cn) {
            histogram[cn as usize - 1] += 1;
        }
    }
    if numbers.is_empty() {
        return vec![0.0; max_cn as usize];
    }
    let total = numbers.len() as f64;
    histogram.into_iter().map(|c| c as f64 / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::simbox::SimulationBox;

    fn brute_force(frame: &Frame, cutoff: f64) -> Vec<u32> {
        let b = &frame.simulation_box;
        (0..frame.len())
            .map(|i| {
                (0..frame.len())
                    .filter(|&j| j != i)
                    .filter(|&j| {
                        b.minimum_image(frame.positions[j] - frame.positions[i])
                            .norm()
                            <= cutoff
                    })
                    .count() as u32
            })
            .collect()
    }

    /// Diamond-cubic lattice with the silicon lattice constant; every site has four neighbours
    /// at 2.35 Å.
    fn diamond(cells: usize, periodic: bool) -> Frame {
        let a = 5.431;
        let basis = [
            [0.0, 0.0, 0.0],
            [0.0, 0.5, 0.5],
            [0.5, 0.0, 0.5],
            [0.5, 0.5, 0.0],
            [0.25, 0.25, 0.25],
            [0.25, 0.75, 0.75],
            [0.75, 0.25, 0.75],
            [0.75, 0.75, 0.25],
        ];
        let mut positions = Vec::new();
        for i in 0..cells {
            for j in 0..cells {
                for k in 0..cells {
                    for b in &basis {
                        positions.push(Point3::new(
                            (i as f64 + b[0]) * a,
                            (j as f64 + b[1]) * a,
                            (k as f64 + b[2]) * a,
                        ));
                    }
                }
            }
        }
        let length = cells as f64 * a;
        let simulation_box = SimulationBox::new(
            Point3::origin(),
            Point3::new(length, length, length),
            [periodic; 3],
        );
        Frame::from_positions(0, simulation_box, positions)
    }

    #[test]
    fn periodic_diamond_lattice_is_fourfold_coordinated() {
        let frame = diamond(3, true);
        let numbers = coordination_numbers(&frame, 2.6);
        assert_eq!(numbers.len(), 216);
        assert!(numbers.iter().all(|&cn| cn == 4));

        let fractions = coordination_fractions(&numbers, 7);
        assert_eq!(fractions, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn open_diamond_cluster_matches_brute_force() {
        let frame = diamond(2, false);
        let numbers = coordination_numbers(&frame, 2.6);
        assert_eq!(numbers, brute_force(&frame, 2.6));
        assert!(numbers.iter().any(|&cn| cn < 4));
    }

    #[test]
    fn larger_cutoff_matches_brute_force_with_periodicity() {
        let frame = diamond(3, true);
        let numbers = coordination_numbers(&frame, 4.0);
        assert_eq!(numbers, brute_force(&frame, 4.0));
        // second shell of diamond: 12 atoms at a/sqrt(2) = 3.84 Å
        assert!(numbers.iter().all(|&cn| cn == 16));
    }

    #[test]
    fn pair_across_periodic_boundary_is_bonded() {
        let b = SimulationBox::new(
            Point3::origin(),
            Point3::new(20.0, 20.0, 20.0),
            [true, false, false],
        );
        let frame = Frame::from_positions(
            0,
            b,
            vec![Point3::new(0.5, 5.0, 5.0), Point3::new(19.5, 5.0, 5.0)],
        );
        assert_eq!(coordination_numbers(&frame, 2.6), vec![1, 1]);
    }

    #[test]
    fn pair_across_open_boundary_is_not_bonded() {
        let b = SimulationBox::open(Point3::origin(), Point3::new(20.0, 20.0, 20.0));
        let frame = Frame::from_positions(
            0,
            b,
            vec![Point3::new(0.5, 5.0, 5.0), Point3::new(19.5, 5.0, 5.0)],
        );
        assert_eq!(coordination_numbers(&frame, 2.6), vec![0, 0]);
    }

    #[test]
    fn coplanar_particles_do_not_break_binning() {
        let b = SimulationBox::open(Point3::origin(), Point3::new(10.0, 10.0, 10.0));
        let frame = Frame::from_positions(
            0,
            b,
            vec![
                Point3::new(1.0, 1.0, 5.0),
                Point3::new(3.0, 1.0, 5.0),
                Point3::new(8.0, 1.0, 5.0),
            ],
        );
        assert_eq!(coordination_numbers(&frame, 2.6), vec![1, 1, 0]);
    }

    #[test]
    fn fractions_ignore_isolated_and_overcoordinated_atoms() {
        let fractions = coordination_fractions(&[0, 1, 4, 4, 9], 7);
        assert_eq!(fractions, vec![0.2, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0]);
        assert_eq!(coordination_fractions(&[], 3), vec![0.0; 3]);
    }
}
