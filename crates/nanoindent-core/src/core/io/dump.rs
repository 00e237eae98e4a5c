use crate::core::io::traits::TrajectoryFile;
use crate::core::models::frame::Frame;
use crate::core::models::simbox::SimulationBox;
use nalgebra::Point3;
use std::io::{self, BufRead, Lines};
use std::str::FromStr;
use thiserror::Error;

const TIMESTEP_ITEM: &str = "TIMESTEP";
const NUMBER_ITEM: &str = "NUMBER OF ATOMS";
const BOX_ITEM: &str = "BOX BOUNDS";
const ATOMS_ITEM: &str = "ATOMS";

/// Upper bound on the per-frame reservation taken from the `NUMBER OF ATOMS` header.
const MAX_RESERVED_ATOMS: usize = 1 << 20;

/// Position column triplets in order of preference, with whether they are scaled.
const POSITION_COLUMNS: [([&str; 3], bool); 4] = [
    (["x", "y", "z"], false),
    (["xu", "yu", "zu"], false),
    (["xs", "ys", "zs"], true),
    (["xsu", "ysu", "zsu"], true),
];

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: DumpParseErrorKind,
    },
    #[error("Unexpected end of file while reading {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("Triclinic simulation box on line {line} is not supported")]
    UnsupportedBox { line: usize },
    #[error("ATOMS header on line {line} has no position columns (x y z, xu yu zu or xs ys zs)")]
    MissingPositionColumns { line: usize },
}

#[derive(Debug, Error)]
pub enum DumpParseErrorKind {
    #[error("Expected 'ITEM: {expected}' but found '{found}'")]
    UnexpectedItem {
        expected: &'static str,
        found: String,
    },
    #[error("Invalid integer value '{0}'")]
    InvalidInt(String),
    #[error("Invalid float value '{0}'")]
    InvalidFloat(String),
    #[error("Expected at least {expected} fields but found {found}")]
    TooFewFields { expected: usize, found: usize },
}

/// Column positions of the per-atom fields we need.
#[derive(Debug, Clone, Copy)]
struct AtomLayout {
    id: Option<usize>,
    atom_type: Option<usize>,
    xyz: [usize; 3],
    scaled: bool,
    width: usize,
}

impl AtomLayout {
    fn from_header(columns: &[&str], line: usize) -> Result<Self, DumpError> {
        let find = |name: &str| columns.iter().position(|c| *c == name);

        let (xyz, scaled) = POSITION_COLUMNS
            .iter()
            .find_map(|(names, scaled)| {
                Some(([find(names[0])?, find(names[1])?, find(names[2])?], *scaled))
            })
            .ok_or(DumpError::MissingPositionColumns { line })?;
        let id = find("id");
        let atom_type = find("type");

        let width = xyz
            .iter()
            .chain(id.iter())
            .chain(atom_type.iter())
            .max()
            .map_or(0, |&max| max + 1);

        Ok(Self {
            id,
            atom_type,
            xyz,
            scaled,
            width,
        })
    }
}

fn parse_int<T: FromStr>(value: &str, line: usize) -> Result<T, DumpError> {
    value.parse().map_err(|_| DumpError::Parse {
        line,
        kind: DumpParseErrorKind::InvalidInt(value.to_string()),
    })
}

fn parse_float(value: &str, line: usize) -> Result<f64, DumpError> {
    value.parse().map_err(|_| DumpError::Parse {
        line,
        kind: DumpParseErrorKind::InvalidFloat(value.to_string()),
    })
}

/// Returns the text following `ITEM: <item>` on a header line.
fn parse_item(content: &str, item: &'static str, line: usize) -> Result<String, DumpError> {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("ITEM:")
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix(item))
        .map(|rest| rest.trim().to_string())
        .ok_or_else(|| DumpError::Parse {
            line,
            kind: DumpParseErrorKind::UnexpectedItem {
                expected: item,
                found: trimmed.to_string(),
            },
        })
}

/// Streaming frame iterator over a LAMMPS text dump.
pub struct DumpFrames<R> {
    lines: Lines<R>,
    line_num: usize,
    done: bool,
}

impl<R: BufRead> DumpFrames<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
            done: false,
        }
    }

    fn next_line(&mut self) -> Option<io::Result<String>> {
        let line = self.lines.next()?;
        self.line_num += 1;
        Some(line)
    }

    fn expect_line(&mut self, expected: &'static str) -> Result<String, DumpError> {
        match self.next_line() {
            Some(line) => Ok(line?),
            None => Err(DumpError::UnexpectedEof { expected }),
        }
    }

    fn expect_item(&mut self, item: &'static str) -> Result<String, DumpError> {
        let line = self.expect_line(item)?;
        parse_item(&line, item, self.line_num)
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, DumpError> {
        let header = loop {
            match self.next_line() {
                None => return Ok(None),
                Some(line) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line;
                    }
                }
            }
        };
        parse_item(&header, TIMESTEP_ITEM, self.line_num)?;

        let line = self.expect_line("timestep value")?;
        let timestep: u64 = parse_int(line.trim(), self.line_num)?;

        self.expect_item(NUMBER_ITEM)?;
        let line = self.expect_line("number of atoms")?;
        let natoms: usize = parse_int(line.trim(), self.line_num)?;

        let simulation_box = self.read_box()?;

        let columns_line = self.expect_item(ATOMS_ITEM)?;
        let columns: Vec<&str> = columns_line.split_whitespace().collect();
        let layout = AtomLayout::from_header(&columns, self.line_num)?;

        let reserved = natoms.min(MAX_RESERVED_ATOMS);
        let mut ids = Vec::with_capacity(reserved);
        let mut types = Vec::with_capacity(reserved);
        let mut positions = Vec::with_capacity(reserved);

        for i in 0..natoms {
            let line = self.expect_line("atom records")?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < layout.width {
                return Err(DumpError::Parse {
                    line: self.line_num,
                    kind: DumpParseErrorKind::TooFewFields {
                        expected: layout.width,
                        found: fields.len(),
                    },
                });
            }

            let id = match layout.id {
                Some(col) => parse_int(fields[col], self.line_num)?,
                None => i as u64 + 1,
            };
            let atom_type = match layout.atom_type {
                Some(col) => parse_int(fields[col], self.line_num)?,
                None => 1,
            };
            let [cx, cy, cz] = layout.xyz;
            let point = Point3::new(
                parse_float(fields[cx], self.line_num)?,
                parse_float(fields[cy], self.line_num)?,
                parse_float(fields[cz], self.line_num)?,
            );
            let position = if layout.scaled {
                simulation_box.from_fractional(point)
            } else {
                point
            };

            ids.push(id);
            types.push(atom_type);
            positions.push(position);
        }

        Ok(Some(Frame {
            timestep,
            simulation_box,
            ids,
            types,
            positions,
        }))
    }

    fn read_box(&mut self) -> Result<SimulationBox, DumpError> {
        let flags_line = self.expect_item(BOX_ITEM)?;
        let flags: Vec<&str> = flags_line.split_whitespace().collect();
        if flags.iter().any(|f| matches!(*f, "xy" | "xz" | "yz")) {
            return Err(DumpError::UnsupportedBox {
                line: self.line_num,
            });
        }
        // Dumps without boundary flags predate them; LAMMPS defaults to fully periodic.
        let periodic = [0, 1, 2].map(|axis| flags.get(axis).is_none_or(|f| f.starts_with('p')));

        let mut lo = [0.0; 3];
        let mut hi = [0.0; 3];
        for axis in 0..3 {
            let line = self.expect_line("box bounds")?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 2 {
                return Err(DumpError::Parse {
                    line: self.line_num,
                    kind: DumpParseErrorKind::TooFewFields {
                        expected: 2,
                        found: fields.len(),
                    },
                });
            }
            lo[axis] = parse_float(fields[0], self.line_num)?;
            hi[axis] = parse_float(fields[1], self.line_num)?;
        }

        Ok(SimulationBox::new(
            Point3::from(lo),
            Point3::from(hi),
            periodic,
        ))
    }
}

impl<R: BufRead> Iterator for DumpFrames<R> {
    type Item = Result<Frame, DumpError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// The LAMMPS text dump format (`dump atom` / `dump custom`).
pub struct LammpsDump;

impl TrajectoryFile for LammpsDump {
    type Error = DumpError;
    type Frames<R: BufRead> = DumpFrames<R>;

    fn frames_from<R: BufRead>(reader: R) -> Self::Frames<R> {
        DumpFrames::new(reader)
    }

    fn count_frames_in(reader: impl BufRead) -> Result<usize, Self::Error> {
        let mut count = 0;
        for line in reader.lines() {
            let line = line?;
            if parse_item(&line, TIMESTEP_ITEM, 0).is_ok() {
                count += 1;
            }
        }
        Ok(count)
    }
}
