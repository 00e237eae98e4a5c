use crate::core::units::MAX_TRACKED_COORDINATION;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Names of the columns read from the indenter timeseries, in file order.
pub const BASE_COLUMN_NAMES: [&str; 5] = ["timestep", "initdiam", "xeta", "force", "pote"];

/// A derived column of the indentation table.
///
/// The declaration order is the order used when exporting the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    /// Indenter displacement in nm.
    Displacement,
    /// Engineering strain relative to the initial diameter.
    Strain,
    /// Number of particles above the indenter plane.
    ContactAtoms,
    /// Fraction of particles above the indenter plane.
    PercentageContactAtoms,
    /// Contact area from the per-atom projected area, in Å².
    ContactArea,
    /// Contact area from the ellipse spanned by atoms touching the plane, in Å².
    EllipticalContactArea,
    /// Stress from `ContactArea`, in GPa.
    Stress,
    /// Stress from `EllipticalContactArea`, in GPa.
    EllipticalStress,
    /// Fraction of particles with the given coordination number.
    PercentCn(u8),
}

impl Column {
    /// Every column the library can compute, in export order.
    pub fn all() -> Vec<Column> {
        let mut columns = vec![
            Column::Displacement,
            Column::Strain,
            Column::ContactAtoms,
            Column::PercentageContactAtoms,
            Column::ContactArea,
            Column::EllipticalContactArea,
            Column::Stress,
            Column::EllipticalStress,
        ];
        columns.extend((1..=MAX_TRACKED_COORDINATION).map(Column::PercentCn));
        columns
    }

    pub fn name(&self) -> String {
        match self {
            Column::Displacement => "displacement".to_string(),
            Column::Strain => "strain".to_string(),
            Column::ContactAtoms => "contact-atoms".to_string(),
            Column::PercentageContactAtoms => "percentage-contact-atoms".to_string(),
            Column::ContactArea => "contact-area".to_string(),
            Column::EllipticalContactArea => "contact-elliptical-area".to_string(),
            Column::Stress => "stress".to_string(),
            Column::EllipticalStress => "elliptical-stress".to_string(),
            Column::PercentCn(n) => format!("percent-cn-{}", n),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown column name: '{0}'")]
pub struct ParseColumnError(pub String);

impl FromStr for Column {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let column = match s {
            "displacement" => Column::Displacement,
            "strain" => Column::Strain,
            "contact-atoms" => Column::ContactAtoms,
            "percentage-contact-atoms" => Column::PercentageContactAtoms,
            "contact-area" => Column::ContactArea,
            "contact-elliptical-area" => Column::EllipticalContactArea,
            "stress" => Column::Stress,
            "elliptical-stress" => Column::EllipticalStress,
            _ => {
                let n = s
                    .strip_prefix("percent-cn-")
                    .and_then(|n| n.parse::<u8>().ok())
                    .filter(|n| (1..=MAX_TRACKED_COORDINATION).contains(n))
                    .ok_or_else(|| ParseColumnError(s.to_string()))?;
                Column::PercentCn(n)
            }
        };
        Ok(column)
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Column '{column}' has {found} values but the table has {expected} rows")]
    LengthMismatch {
        column: Column,
        expected: usize,
        found: usize,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One line of the indenter timeseries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeseriesRow {
    pub timestep: u64,
    /// Initial particle diameter (Å).
    pub initdiam: f64,
    /// z position of the indenter plane (Å).
    pub xeta: f64,
    /// Indenter force (eV/Å).
    pub force: f64,
    /// Potential energy (eV).
    pub pote: f64,
}

/// The indentation timeseries with derived columns attached on demand.
#[derive(Debug, Clone, Default)]
pub struct IndentationTable {
    timesteps: Vec<u64>,
    initdiam: Vec<f64>,
    xeta: Vec<f64>,
    force: Vec<f64>,
    pote: Vec<f64>,
    derived: BTreeMap<Column, Vec<f64>>,
    row_index: HashMap<u64, usize>,
}

impl IndentationTable {
    pub fn from_rows(rows: &[TimeseriesRow]) -> Self {
        let mut table = Self::default();
        for (i, row) in rows.iter().enumerate() {
            table.timesteps.push(row.timestep);
            table.initdiam.push(row.initdiam);
            table.xeta.push(row.xeta);
            table.force.push(row.force);
            table.pote.push(row.pote);
            table.row_index.entry(row.timestep).or_insert(i);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.timesteps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timesteps.is_empty()
    }

    pub fn timesteps(&self) -> &[u64] {
        &self.timesteps
    }

    pub fn initdiam(&self) -> &[f64] {
        &self.initdiam
    }

    pub fn xeta(&self) -> &[f64] {
        &self.xeta
    }

    pub fn force(&self) -> &[f64] {
        &self.force
    }

    pub fn pote(&self) -> &[f64] {
        &self.pote
    }

    /// Index of the first row written at `timestep`.
    pub fn row_of(&self, timestep: u64) -> Option<usize> {
        self.row_index.get(&timestep).copied()
    }

    /// Indenter position at `timestep`, taken from the first matching row.
    pub fn xeta_at(&self, timestep: u64) -> Option<f64> {
        self.row_of(timestep).map(|i| self.xeta[i])
    }

    pub fn contains(&self, column: Column) -> bool {
        self.derived.contains_key(&column)
    }

    pub fn get(&self, column: Column) -> Option<&[f64]> {
        self.derived.get(&column).map(Vec::as_slice)
    }

    /// Inserts or replaces a derived column.
    pub fn set(&mut self, column: Column, values: Vec<f64>) -> Result<(), TableError> {
        if values.len() != self.len() {
            return Err(TableError::LengthMismatch {
                column,
                expected: self.len(),
                found: values.len(),
            });
        }
        self.derived.insert(column, values);
        Ok(())
    }

    /// Derived columns currently present, in export order.
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.derived.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<TimeseriesRow> {
        vec![
            TimeseriesRow {
                timestep: 0,
                initdiam: 50.0,
                xeta: 30.0,
                force: 0.0,
                pote: -100.0,
            },
            TimeseriesRow {
                timestep: 100,
                initdiam: 50.0,
                xeta: 29.0,
                force: 1.0,
                pote: -99.0,
            },
            TimeseriesRow {
                timestep: 100,
                initdiam: 50.0,
                xeta: 28.0,
                force: 2.0,
                pote: -98.0,
            },
        ]
    }

    #[test]
    fn timestep_lookup_returns_first_matching_row() {
        let table = IndentationTable::from_rows(&rows());
        assert_eq!(table.len(), 3);
        assert_eq!(table.row_of(100), Some(1));
        assert_eq!(table.xeta_at(100), Some(29.0));
        assert_eq!(table.xeta_at(42), None);
    }

    #[test]
    fn set_rejects_columns_of_wrong_length() {
        let mut table = IndentationTable::from_rows(&rows());
        let err = table.set(Column::Strain, vec![0.0; 2]).unwrap_err();
        assert!(matches!(
            err,
            TableError::LengthMismatch {
                expected: 3,
                found: 2,
                ..
            }
        ));
        assert!(!table.contains(Column::Strain));
    }

    #[test]
    fn set_replaces_existing_column() {
        let mut table = IndentationTable::from_rows(&rows());
        table.set(Column::Strain, vec![1.0; 3]).unwrap();
        table.set(Column::Strain, vec![2.0; 3]).unwrap();
        assert_eq!(table.get(Column::Strain), Some(&[2.0, 2.0, 2.0][..]));
    }

    #[test]
    fn columns_iterate_in_declaration_order() {
        let mut table = IndentationTable::from_rows(&rows());
        table.set(Column::PercentCn(4), vec![0.0; 3]).unwrap();
        table.set(Column::Stress, vec![0.0; 3]).unwrap();
        table.set(Column::Displacement, vec![0.0; 3]).unwrap();
        let order: Vec<_> = table.columns().collect();
        assert_eq!(
            order,
            vec![Column::Displacement, Column::Stress, Column::PercentCn(4)]
        );
    }

    #[test]
    fn coordination_columns_parse_from_their_names() {
        assert_eq!("percent-cn-4".parse::<Column>(), Ok(Column::PercentCn(4)));
        assert_eq!(
            " contact-elliptical-area ".parse::<Column>(),
            Ok(Column::EllipticalContactArea)
        );
        assert_eq!(Column::all().len(), 15);
    }

    #[test]
    fn unknown_or_out_of_range_column_names_are_rejected() {
        assert!("percent-cn-0".parse::<Column>().is_err());
        assert!("percent-cn-8".parse::<Column>().is_err());
        assert!("volume".parse::<Column>().is_err());
    }
}
