use crate::core::models::table::{BASE_COLUMN_NAMES, IndentationTable, TableError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

impl IndentationTable {
    /// Writes the table as CSV: base columns first, then every derived column present.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let derived: Vec<_> = self.columns().collect();

        let header = BASE_COLUMN_NAMES
            .iter()
            .map(|name| name.to_string())
            .chain(derived.iter().map(|c| c.name()));
        csv_writer.write_record(header)?;

        for row in 0..self.len() {
            let mut record = vec![
                self.timesteps()[row].to_string(),
                self.initdiam()[row].to_string(),
                self.xeta()[row].to_string(),
                self.force()[row].to_string(),
                self.pote()[row].to_string(),
            ];
            for column in &derived {
                let values = self.get(*column).unwrap_or_default();
                record.push(values.get(row).map_or_else(String::new, f64::to_string));
            }
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::models::table::{Column, IndentationTable, TimeseriesRow};

    fn table() -> IndentationTable {
        IndentationTable::from_rows(&[
            TimeseriesRow {
                timestep: 0,
                initdiam: 50.0,
                xeta: 80.0,
                force: 0.0,
                pote: -10.0,
            },
            TimeseriesRow {
                timestep: 10,
                initdiam: 50.0,
                xeta: 79.5,
                force: 1.5,
                pote: -9.5,
            },
        ])
    }

    #[test]
    fn writes_base_columns_only_for_fresh_table() {
        let mut out = Vec::new();
        table().write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "timestep,initdiam,xeta,force,pote\n0,50,80,0,-10\n10,50,79.5,1.5,-9.5\n"
        );
    }

    #[test]
    fn derived_columns_follow_in_declaration_order_with_nan_preserved() {
        let mut t = table();
        t.set(Column::PercentCn(4), vec![0.5, f64::NAN]).unwrap();
        t.set(Column::Strain, vec![0.0, 0.01]).unwrap();

        let mut out = Vec::new();
        t.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "timestep,initdiam,xeta,force,pote,strain,percent-cn-4");
        assert_eq!(lines[1], "0,50,80,0,-10,0,0.5");
        assert_eq!(lines[2], "10,50,79.5,1.5,-9.5,0.01,NaN");
    }

    #[test]
    fn write_csv_path_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        table().write_csv_path(&path).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("timestep,initdiam"));
    }
}
