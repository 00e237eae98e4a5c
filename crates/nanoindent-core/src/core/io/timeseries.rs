use crate::core::models::table::{IndentationTable, TimeseriesRow};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

const REQUIRED_FIELDS: usize = 5;

#[derive(Debug, Error)]
pub enum TimeseriesError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: TimeseriesParseErrorKind,
    },
    #[error("Timeseries contains no data rows")]
    Empty,
}

#[derive(Debug, Error)]
pub enum TimeseriesParseErrorKind {
    #[error("Expected at least 5 fields (timestep initdiam xeta force pote) but found {0}")]
    TooFewFields(usize),
    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Reader for the whitespace-separated indenter timeseries.
///
/// The first non-empty line is a header and is discarded whatever it contains. Later lines
/// starting with `#` are comments.
pub struct IndentFile;

impl IndentFile {
    pub fn read_from(reader: &mut impl BufRead) -> Result<IndentationTable, TimeseriesError> {
        let mut rows = Vec::new();
        let mut header_seen = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                continue;
            }
            if !header_seen {
                header_seen = true;
                continue;
            }
            if trimmed.starts_with('#') {
                continue;
            }

            rows.push(parse_row(trimmed, line_num)?);
        }

        if rows.is_empty() {
            return Err(TimeseriesError::Empty);
        }
        Ok(IndentationTable::from_rows(&rows))
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<IndentationTable, TimeseriesError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

fn parse_row(line: &str, line_num: usize) -> Result<TimeseriesRow, TimeseriesError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < REQUIRED_FIELDS {
        return Err(TimeseriesError::Parse {
            line: line_num,
            kind: TimeseriesParseErrorKind::TooFewFields(fields.len()),
        });
    }

    let float = |idx: usize, field: &'static str| -> Result<f64, TimeseriesError> {
        fields[idx].parse().map_err(|_| TimeseriesError::Parse {
            line: line_num,
            kind: TimeseriesParseErrorKind::InvalidNumber {
                field,
                value: fields[idx].to_string(),
            },
        })
    };

    Ok(TimeseriesRow {
        timestep: parse_timestep(fields[0]).ok_or_else(|| TimeseriesError::Parse {
            line: line_num,
            kind: TimeseriesParseErrorKind::InvalidNumber {
                field: "timestep",
                value: fields[0].to_string(),
            },
        })?,
        initdiam: float(1, "initdiam")?,
        xeta: float(2, "xeta")?,
        force: float(3, "force")?,
        pote: float(4, "pote")?,
    })
}

/// Timesteps are integers, but `fix print` may format them as floats (`1000.0`, `1e+06`).
fn parse_timestep(value: &str) -> Option<u64> {
    if let Ok(step) = value.parse::<u64>() {
        return Some(step);
    }
    let step = value.parse::<f64>().ok()?;
    // `u64::MAX as f64` rounds up to 2^64, which is already out of range.
    (step >= 0.0 && step < u64::MAX as f64 && step.fract() == 0.0).then_some(step as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(text: &str) -> Result<IndentationTable, TimeseriesError> {
        IndentFile::read_from(&mut Cursor::new(text))
    }

    #[test]
    fn header_line_is_discarded_and_rows_are_read() {
        let table = read(
            "# Fix print output for fix indenter\n\
             0 50.0 80.0 0.0 -1000.0\n\
             1000 50.0 79.5 0.25 -999.5\n",
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.timesteps(), &[0, 1000]);
        assert_eq!(table.xeta(), &[80.0, 79.5]);
        assert_eq!(table.force(), &[0.0, 0.25]);
        assert_eq!(table.pote(), &[-1000.0, -999.5]);
    }

    #[test]
    fn header_is_dropped_even_when_numeric() {
        let table = read("0 1 2 3 4\n10 1 2 3 4\n").unwrap();
        assert_eq!(table.timesteps(), &[10]);
    }

    #[test]
    fn comments_blank_lines_and_extra_fields_are_tolerated() {
        let table = read("step d z f e\n\n# restart\n5   50.0\t70.0 1.0 -5.0 extra\n").unwrap();
        assert_eq!(table.timesteps(), &[5]);
        assert_eq!(table.initdiam(), &[50.0]);
    }

    #[test]
    fn float_formatted_timesteps_are_accepted() {
        let table = read("header\n1000.0 50 70 1 -5\n1e+06 50 69 2 -4\n").unwrap();
        assert_eq!(table.timesteps(), &[1000, 1_000_000]);
    }

    #[test]
    fn fractional_timestep_is_rejected() {
        let err = read("header\n10.5 50 70 1 -5\n").unwrap_err();
        assert!(matches!(
            err,
            TimeseriesError::Parse {
                line: 2,
                kind: TimeseriesParseErrorKind::InvalidNumber {
                    field: "timestep",
                    ..
                }
            }
        ));
    }

    #[test]
    fn timestep_beyond_u64_range_is_rejected() {
        for value in ["1e20", "18446744073709551616.0", "inf"] {
            let err = read(&format!("header\n{value} 50 70 1 -5\n")).unwrap_err();
            assert!(
                matches!(
                    err,
                    TimeseriesError::Parse {
                        kind: TimeseriesParseErrorKind::InvalidNumber {
                            field: "timestep",
                            ..
                        },
                        ..
                    }
                ),
                "{value}"
            );
        }
    }

    #[test]
    fn short_row_reports_line_number() {
        let err = read("header\n0 50 70 1 -5\n10 50 70\n").unwrap_err();
        assert!(matches!(
            err,
            TimeseriesError::Parse {
                line: 3,
                kind: TimeseriesParseErrorKind::TooFewFields(3)
            }
        ));
    }

    #[test]
    fn non_numeric_force_is_rejected() {
        let err = read("header\n0 50 70 nan? -5\n").unwrap_err();
        assert!(matches!(
            err,
            TimeseriesError::Parse {
                kind: TimeseriesParseErrorKind::InvalidNumber { field: "force", .. },
                ..
            }
        ));
    }

    #[test]
    fn header_only_file_is_empty() {
        assert!(matches!(read("timestep initdiam xeta force pote\n"), Err(TimeseriesError::Empty)));
    }

    #[test]
    fn read_from_path_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = IndentFile::read_from_path(dir.path().join("missing.txt"));
        assert!(matches!(result, Err(TimeseriesError::Io(_))));
    }
}
