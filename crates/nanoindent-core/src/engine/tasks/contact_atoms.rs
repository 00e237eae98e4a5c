use super::walk_frames;
use crate::core::analysis::contact::count_above_plane;
use crate::core::io::traits::TrajectoryFile;
use crate::core::models::table::IndentationTable;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use std::path::Path;
use tracing::{info, instrument};

/// Counts, for every frame, the particles above the indenter plane at that timestep.
///
/// # Errors
///
/// Returns [`EngineError::TimestepNotFound`] if a frame's timestep is absent from the table,
/// since its indenter position is then unknown.
#[instrument(skip_all, name = "contact_atoms_task")]
pub fn run<T>(
    path: &Path,
    table: &IndentationTable,
    reporter: &ProgressReporter,
) -> Result<Vec<f64>, EngineError>
where
    T: TrajectoryFile,
    EngineError: From<T::Error>,
{
    let mut values = vec![f64::NAN; table.len()];

    let frames = walk_frames::<T, _>(path, reporter, |frame| {
        let row = table
            .row_of(frame.timestep)
            .ok_or(EngineError::TimestepNotFound {
                timestep: frame.timestep,
            })?;
        let plane_z = table.xeta()[row];
        values[row] = count_above_plane(&frame, plane_z) as f64;
        Ok(())
    })?;

    info!(frames, "Counted contact atoms.");
    Ok(values)
}
