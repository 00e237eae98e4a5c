//! Per-frame trajectory tasks.
//!
//! Each task streams the trajectory once, computes one scalar (or a small histogram) per frame
//! and places it on the table row carrying the frame's timestep. Rows without a frame keep NaN.

use crate::core::io::traits::TrajectoryFile;
use crate::core::models::frame::Frame;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::debug;

pub mod contact_atoms;
pub mod coordination;
pub mod elliptical_area;

/// Streams every frame of `path` through `visit`, reporting one task step per frame.
///
/// Returns the number of frames visited.
pub(crate) fn walk_frames<T, F>(
    path: &Path,
    reporter: &ProgressReporter,
    mut visit: F,
) -> Result<usize, EngineError>
where
    T: TrajectoryFile,
    EngineError: From<T::Error>,
    F: FnMut(Frame) -> Result<(), EngineError>,
{
    let total = T::count_frames(path)?;
    reporter.report(Progress::TaskStart {
        total_steps: total as u64,
    });

    let mut visited = 0;
    for frame in T::open(path)? {
        let frame = frame?;
        debug!(
            timestep = frame.timestep,
            atoms = frame.len(),
            "Processing frame."
        );
        visit(frame)?;
        visited += 1;
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    Ok(visited)
}

/// Particle count of the first frame of the trajectory.
pub fn first_frame_atoms<T>(path: &Path) -> Result<usize, EngineError>
where
    T: TrajectoryFile,
    EngineError: From<T::Error>,
{
    match T::open(path)?.next() {
        Some(frame) => Ok(frame?.len()),
        None => Err(EngineError::EmptyTrajectory),
    }
}
