use crate::core::analysis::mechanics;
use crate::core::io::dump::LammpsDump;
use crate::core::io::timeseries::IndentFile;
use crate::core::io::traits::TrajectoryFile;
use crate::core::models::table::{Column, IndentationTable};
use crate::core::units::MAX_TRACKED_COORDINATION;
use crate::engine::config::{AnalysisConfig, positive};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// One indentation simulation: the trajectory on disk and the timeseries table in memory.
///
/// The timeseries is loaded on construction. Every `set_*` method computes one derived column
/// and replaces it if it already exists; methods that depend on another column compute it first
/// when it is missing. Trajectory passes re-read the dump file each time.
///
/// The type parameter selects the trajectory format and defaults to LAMMPS text dumps.
pub struct Indentation<'a, T = LammpsDump> {
    dump_path: PathBuf,
    table: IndentationTable,
    config: AnalysisConfig,
    reporter: ProgressReporter<'a>,
    _format: PhantomData<T>,
}

impl<'a> Indentation<'a, LammpsDump> {
    /// Opens a session over a LAMMPS dump and its indenter timeseries.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Timeseries`] if the timeseries cannot be read. The dump is not
    /// touched until a trajectory column is requested.
    pub fn new(
        dump_path: impl Into<PathBuf>,
        indent_path: impl AsRef<Path>,
        config: AnalysisConfig,
    ) -> Result<Self, EngineError> {
        Self::with_format(dump_path, indent_path, config)
    }
}

impl<'a, T> Indentation<'a, T>
where
    T: TrajectoryFile,
    EngineError: From<T::Error>,
{
    pub fn with_format(
        dump_path: impl Into<PathBuf>,
        indent_path: impl AsRef<Path>,
        config: AnalysisConfig,
    ) -> Result<Self, EngineError> {
        let indent_path = indent_path.as_ref();
        let table = IndentFile::read_from_path(indent_path)?;
        info!(
            rows = table.len(),
            path = %indent_path.display(),
            "Loaded indenter timeseries."
        );
        Ok(Self {
            dump_path: dump_path.into(),
            table,
            config,
            reporter: ProgressReporter::new(),
            _format: PhantomData,
        })
    }

    pub fn with_reporter(mut self, reporter: ProgressReporter<'a>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn table(&self) -> &IndentationTable {
        &self.table
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn dump_path(&self) -> &Path {
        &self.dump_path
    }

    pub fn set_displacement(&mut self) -> Result<(), EngineError> {
        let values = mechanics::displacement(
            self.table.initdiam(),
            self.table.xeta(),
            self.config.indenter_offset,
        );
        self.table.set(Column::Displacement, values)?;
        info!("Displacement computed (nm).");
        Ok(())
    }

    pub fn set_strain(&mut self) -> Result<(), EngineError> {
        let values = mechanics::strain(
            self.table.initdiam(),
            self.table.xeta(),
            self.config.indenter_offset,
        );
        self.table.set(Column::Strain, values)?;
        info!("Strain computed.");
        Ok(())
    }

    /// Adds `percent-cn-1` to `percent-cn-7`, the fraction of particles with each coordination
    /// number, using neighbours within `cutoff` Å.
    #[instrument(skip(self), name = "coordination_analysis")]
    pub fn set_coordination_analysis(&mut self, cutoff: f64) -> Result<(), EngineError> {
        let cutoff = positive("cutoff", cutoff)?;
        info!("Running coordination analysis; this may take a few minutes.");
        self.reporter.report(Progress::PhaseStart {
            name: "Coordination analysis",
        });
        let columns =
            tasks::coordination::run::<T>(&self.dump_path, &self.table, cutoff, &self.reporter)?;
        for (n, values) in (1..=MAX_TRACKED_COORDINATION).zip(columns) {
            self.table.set(Column::PercentCn(n), values)?;
        }
        self.reporter.report(Progress::PhaseFinish);
        info!("Coordination analysis finished.");
        Ok(())
    }

    #[instrument(skip(self), name = "contact_atoms")]
    pub fn set_contact_atoms(&mut self) -> Result<(), EngineError> {
        info!("Counting contact atoms; this may take a few minutes.");
        self.reporter.report(Progress::PhaseStart {
            name: "Contact atoms",
        });
        let values = tasks::contact_atoms::run::<T>(&self.dump_path, &self.table, &self.reporter)?;
        self.table.set(Column::ContactAtoms, values)?;
        self.reporter.report(Progress::PhaseFinish);
        info!("Contact atom count finished.");
        Ok(())
    }

    /// Adds the contact-atom count as a fraction of the particles in the first frame.
    pub fn set_percentage_contact_atoms(&mut self) -> Result<(), EngineError> {
        self.ensure_contact_atoms()?;
        info!("Computing percentage of contact atoms.");
        let total = tasks::first_frame_atoms::<T>(&self.dump_path)? as f64;
        let values = self
            .column(Column::ContactAtoms)
            .iter()
            .map(|n| n / total)
            .collect();
        self.table.set(Column::PercentageContactAtoms, values)?;
        info!(atoms = total, "Percentage of contact atoms finished.");
        Ok(())
    }

    /// Adds the contact area, `atomic_area` Å² per contact atom.
    pub fn set_contact_area(&mut self, atomic_area: f64) -> Result<(), EngineError> {
        let atomic_area = positive("atomic_area", atomic_area)?;
        self.ensure_contact_atoms()?;
        let values = mechanics::contact_area(self.column(Column::ContactAtoms), atomic_area);
        self.table.set(Column::ContactArea, values)?;
        info!(atomic_area, "Contact area computed (Å²).");
        Ok(())
    }

    /// Adds the elliptical contact area spanned by the particles touching the indenter plane.
    #[instrument(skip(self), name = "elliptical_contact_area")]
    pub fn set_elliptical_contact_area(&mut self) -> Result<(), EngineError> {
        info!("Computing elliptical contact area.");
        self.reporter.report(Progress::PhaseStart {
            name: "Elliptical contact area",
        });
        let values = tasks::elliptical_area::run::<T>(
            &self.dump_path,
            &self.table,
            self.config.plane_tolerance,
            &self.reporter,
        )?;
        self.table.set(Column::EllipticalContactArea, values)?;
        self.reporter.report(Progress::PhaseFinish);
        info!("Elliptical contact area finished (Å²).");
        Ok(())
    }

    /// Adds the stress over the atom-count contact area, computing that area with
    /// `atomic_area` if it is missing.
    pub fn set_stress(&mut self, atomic_area: f64) -> Result<(), EngineError> {
        if !self.table.contains(Column::ContactArea) {
            self.set_contact_area(atomic_area)?;
        }
        let values = mechanics::stress(self.table.force(), self.column(Column::ContactArea));
        self.table.set(Column::Stress, values)?;
        info!("Stress computed (GPa).");
        Ok(())
    }

    pub fn set_elliptical_stress(&mut self) -> Result<(), EngineError> {
        if !self.table.contains(Column::EllipticalContactArea) {
            self.set_elliptical_contact_area()?;
        }
        let values = mechanics::stress(
            self.table.force(),
            self.column(Column::EllipticalContactArea),
        );
        self.table.set(Column::EllipticalStress, values)?;
        info!("Elliptical stress computed (GPa).");
        Ok(())
    }

    /// Computes `column` with the session configuration, replacing any previous values.
    pub fn compute(&mut self, column: Column) -> Result<(), EngineError> {
        match column {
            Column::Displacement => self.set_displacement(),
            Column::Strain => self.set_strain(),
            Column::ContactAtoms => self.set_contact_atoms(),
            Column::PercentageContactAtoms => self.set_percentage_contact_atoms(),
            Column::ContactArea => self.set_contact_area(self.config.atomic_area),
            Column::EllipticalContactArea => self.set_elliptical_contact_area(),
            Column::Stress => self.set_stress(self.config.atomic_area),
            Column::EllipticalStress => self.set_elliptical_stress(),
            Column::PercentCn(_) => self.set_coordination_analysis(self.config.coordination_cutoff),
        }
    }

    /// Computes `column` only if the table does not have it yet.
    pub fn ensure(&mut self, column: Column) -> Result<(), EngineError> {
        if self.table.contains(column) {
            Ok(())
        } else {
            self.compute(column)
        }
    }

    /// Ensures every listed column, in the given order.
    pub fn ensure_all(&mut self, columns: &[Column]) -> Result<(), EngineError> {
        columns.iter().try_for_each(|c| self.ensure(*c))
    }

    /// Writes the table, with every column computed so far, as CSV.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), EngineError> {
        self.table.write_csv_path(path)?;
        Ok(())
    }

    fn ensure_contact_atoms(&mut self) -> Result<(), EngineError> {
        self.ensure(Column::ContactAtoms)
    }

    /// Values of a column known to be present.
    fn column(&self, column: Column) -> &[f64] {
        self.table.get(column).unwrap_or_default()
    }
}
