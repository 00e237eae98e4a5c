use crate::core::models::frame::Frame;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading multi-frame trajectory formats.
///
/// Implementors parse frames lazily: the iterator returned by [`frames_from`](Self::frames_from)
/// yields one [`Frame`] at a time so that only a single snapshot is held in memory.
pub trait TrajectoryFile {
    /// The error type for parsing and I/O failures.
    type Error: Error + From<io::Error>;

    /// The frame iterator over a buffered reader.
    type Frames<R: BufRead>: Iterator<Item = Result<Frame, Self::Error>>;

    /// Wraps a buffered reader in a frame iterator.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader positioned at the start of the first frame.
    fn frames_from<R: BufRead>(reader: R) -> Self::Frames<R>;

    /// Counts the frames in a reader without parsing particle data.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    fn count_frames_in(reader: impl BufRead) -> Result<usize, Self::Error>;

    /// Opens a trajectory file and returns its frame iterator.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    fn open<P: AsRef<Path>>(path: P) -> Result<Self::Frames<BufReader<File>>, Self::Error> {
        let file = File::open(path)?;
        Ok(Self::frames_from(BufReader::new(file)))
    }

    /// Counts the frames stored in a trajectory file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    fn count_frames<P: AsRef<Path>>(path: P) -> Result<usize, Self::Error> {
        let file = File::open(path)?;
        Self::count_frames_in(BufReader::new(file))
    }
}
