use super::walk_frames;
use crate::core::analysis::contact::elliptical_contact_area;
use crate::core::io::traits::TrajectoryFile;
use crate::core::models::table::IndentationTable;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Elliptical contact area for every frame, from the particles within `tolerance` of the
/// indenter plane.
///
/// Frames where no particle touches the plane contribute `0.0`.
#[instrument(skip(path, table, reporter), name = "elliptical_area_task")]
pub fn run<T>(
    path: &Path,
    table: &IndentationTable,
    tolerance: f64,
    reporter: &ProgressReporter,
) -> Result<Vec<f64>, EngineError>
where
    T: TrajectoryFile,
    EngineError: From<T::Error>,
{
    let mut values = vec![f64::NAN; table.len()];
    let mut untouched = 0usize;

    let frames = walk_frames::<T, _>(path, reporter, |frame| {
        let row = table
            .row_of(frame.timestep)
            .ok_or(EngineError::TimestepNotFound {
                timestep: frame.timestep,
            })?;
        let area = elliptical_contact_area(&frame, table.xeta()[row], tolerance);
        if area == 0.0 {
            untouched += 1;
        }
        debug!(timestep = frame.timestep, area, "Elliptical contact area.");
        values[row] = area;
        Ok(())
    })?;

    info!(frames, untouched, "Computed elliptical contact areas.");
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::dump::LammpsDump;
    use crate::core::models::table::TimeseriesRow;
    use crate::engine::tasks::fixtures::write_dump;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn area_spans_atoms_touching_the_plane() {
        let dir = tempfile::tempdir().unwrap();
        let touching = vec![
            [-3.0, 0.0, 10.0],
            [3.0, 0.0, 10.1],
            [0.0, -1.0, 9.9],
            [0.0, 1.0, 10.0],
            [20.0, 20.0, 0.0],
        ];
        let path = write_dump(&dir, &[(0, touching.clone()), (5, touching)]);
        let rows = [(0, 10.0), (5, 30.0)].map(|(timestep, xeta)| TimeseriesRow {
            timestep,
            initdiam: 40.0,
            xeta,
            force: 1.0,
            pote: 0.0,
        });
        let table = IndentationTable::from_rows(&rows);

        let values = run::<LammpsDump>(&path, &table, 0.2, &ProgressReporter::new()).unwrap();
        assert!((values[0] - FRAC_PI_4 * 6.0 * 2.0).abs() < 1e-9);
        assert_eq!(values[1], 0.0);
    }
}
