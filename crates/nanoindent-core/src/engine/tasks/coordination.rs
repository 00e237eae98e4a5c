use super::walk_frames;
use crate::core::analysis::coordination::{coordination_fractions, coordination_numbers};
use crate::core::io::traits::TrajectoryFile;
use crate::core::models::table::IndentationTable;
use crate::core::units::MAX_TRACKED_COORDINATION;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Fractions of particles with coordination number 1 to 7, one column per number.
///
/// Element `n - 1` of the result is the column for coordination number `n`. Frames whose
/// timestep is not in the table are skipped, and their count is reported as a progress message.
#[instrument(skip(path, table, reporter), name = "coordination_task")]
pub fn run<T>(
    path: &Path,
    table: &IndentationTable,
    cutoff: f64,
    reporter: &ProgressReporter,
) -> Result<Vec<Vec<f64>>, EngineError>
where
    T: TrajectoryFile,
    EngineError: From<T::Error>,
{
    let mut columns = vec![vec![f64::NAN; table.len()]; MAX_TRACKED_COORDINATION as usize];
    let mut skipped = 0usize;

    let frames = walk_frames::<T, _>(path, reporter, |frame| {
        let Some(row) = table.row_of(frame.timestep) else {
            warn!(
                timestep = frame.timestep,
                "Frame has no matching timeseries row; skipping."
            );
            skipped += 1;
            return Ok(());
        };
        let numbers = coordination_numbers(&frame, cutoff);
        let fractions = coordination_fractions(&numbers, MAX_TRACKED_COORDINATION);
        for (column, fraction) in columns.iter_mut().zip(fractions) {
            column[row] = fraction;
        }
        Ok(())
    })?;

    if skipped > 0 {
        reporter.report(Progress::Message(format!(
            "{skipped} frame(s) without a timeseries row were skipped"
        )));
    }
    info!(frames, skipped, "Computed coordination histograms.");
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::dump::LammpsDump;
    use crate::core::models::table::TimeseriesRow;
    use crate::engine::tasks::fixtures::write_dump;

    #[test]
    fn chain_of_atoms_has_ends_and_middles() {
        let dir = tempfile::tempdir().unwrap();
        let chain: Vec<[f64; 3]> = (0..4).map(|i| [i as f64 * 2.0, 0.0, 0.0]).collect();
        let path = write_dump(&dir, &[(0, chain.clone()), (99, chain)]);
        let rows = [0u64, 10].map(|timestep| TimeseriesRow {
            timestep,
            initdiam: 40.0,
            xeta: 50.0,
            force: 0.0,
            pote: 0.0,
        });
        let table = IndentationTable::from_rows(&rows);

        let columns = run::<LammpsDump>(&path, &table, 2.6, &ProgressReporter::new()).unwrap();
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[0][0], 0.5);
        assert_eq!(columns[1][0], 0.5);
        assert_eq!(columns[2][0], 0.0);
        assert_eq!(columns[6][0], 0.0);
        // row 10 has no frame, frame 99 has no row
        assert!(columns.iter().all(|c| c[1].is_nan()));
    }

    #[test]
    fn skipped_frames_are_reported_once() {
        use std::sync::{Arc, Mutex};

        let dir = tempfile::tempdir().unwrap();
        let atoms = vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        let path = write_dump(&dir, &[(0, atoms.clone()), (5, atoms.clone()), (7, atoms)]);
        let table = IndentationTable::from_rows(&[TimeseriesRow {
            timestep: 0,
            initdiam: 40.0,
            xeta: 50.0,
            force: 0.0,
            pote: 0.0,
        }]);
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            if let Progress::Message(msg) = event {
                sink.lock().unwrap().push(msg);
            }
        }));

        let columns = run::<LammpsDump>(&path, &table, 2.6, &reporter).unwrap();
        assert_eq!(columns[0][0], 1.0);
        assert_eq!(
            *messages.lock().unwrap(),
            vec!["2 frame(s) without a timeseries row were skipped".to_string()]
        );
    }
}
