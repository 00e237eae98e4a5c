use super::indentation::Indentation;
use crate::core::analysis::mechanics;
use crate::core::io::traits::TrajectoryFile;
use crate::core::models::table::Column;
use crate::core::plot::{LineChart, Series};
use crate::engine::error::EngineError;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

const DISPLACEMENT_LABEL: &str = "Displacement [nm]";
const STRAIN_LABEL: &str = "Strain";
const PERCENT_LABEL: &str = "Atom percentage %";

/// Coordination numbers drawn by the coordination plots.
const PLOTTED_COORDINATION: [u8; 4] = [3, 4, 5, 6];

/// The indentation curves the library knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlotKind {
    ForceDisplacement,
    ContactAtomsStrain,
    PercentageContactAtomsStrain,
    StressStrain,
    EllipticalStressStrain,
    CoordinationDisplacement,
    CoordinationStrain,
    PoteStrain,
}

impl PlotKind {
    pub const ALL: [PlotKind; 8] = [
        PlotKind::ForceDisplacement,
        PlotKind::ContactAtomsStrain,
        PlotKind::PercentageContactAtomsStrain,
        PlotKind::StressStrain,
        PlotKind::EllipticalStressStrain,
        PlotKind::CoordinationDisplacement,
        PlotKind::CoordinationStrain,
        PlotKind::PoteStrain,
    ];

    /// Kebab-case name, also used as the file stem by reports.
    pub fn name(&self) -> &'static str {
        match self {
            PlotKind::ForceDisplacement => "force-displacement",
            PlotKind::ContactAtomsStrain => "contact-atoms-strain",
            PlotKind::PercentageContactAtomsStrain => "percentage-contact-atoms-strain",
            PlotKind::StressStrain => "stress-strain",
            PlotKind::EllipticalStressStrain => "elliptical-stress-strain",
            PlotKind::CoordinationDisplacement => "coordination-displacement",
            PlotKind::CoordinationStrain => "coordination-strain",
            PlotKind::PoteStrain => "pote-strain",
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            PlotKind::ForceDisplacement => "Force vs displacement",
            PlotKind::ContactAtomsStrain => "Contact atoms vs strain",
            PlotKind::PercentageContactAtomsStrain => "Percentage of contact atoms vs strain",
            PlotKind::StressStrain => "Stress vs strain",
            PlotKind::EllipticalStressStrain => "Stress (elliptical contact area) vs strain",
            PlotKind::CoordinationDisplacement => "Coordination vs displacement",
            PlotKind::CoordinationStrain => "Coordination vs strain",
            PlotKind::PoteStrain => "Potential energy vs strain",
        }
    }

    /// The columns that must be present before the chart can be drawn.
    pub fn required_columns(&self) -> Vec<Column> {
        let coordination = PLOTTED_COORDINATION.iter().map(|n| Column::PercentCn(*n));
        match self {
            PlotKind::ForceDisplacement => vec![Column::Displacement],
            PlotKind::ContactAtomsStrain => vec![Column::Strain, Column::ContactAtoms],
            PlotKind::PercentageContactAtomsStrain => {
                vec![Column::Strain, Column::PercentageContactAtoms]
            }
            PlotKind::StressStrain => vec![Column::Strain, Column::Stress],
            PlotKind::EllipticalStressStrain => vec![Column::Strain, Column::EllipticalStress],
            PlotKind::CoordinationDisplacement => {
                std::iter::once(Column::Displacement).chain(coordination).collect()
            }
            PlotKind::CoordinationStrain => {
                std::iter::once(Column::Strain).chain(coordination).collect()
            }
            PlotKind::PoteStrain => vec![Column::Strain],
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown plot kind: '{0}'")]
pub struct ParsePlotKindError(pub String);

impl FromStr for PlotKind {
    type Err = ParsePlotKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PlotKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePlotKindError(s.to_string()))
    }
}

impl<T> Indentation<'_, T>
where
    T: TrajectoryFile,
    EngineError: From<T::Error>,
{
    /// Builds the chart for `kind`, computing any missing column first.
    pub fn chart(&mut self, kind: PlotKind, title: Option<&str>) -> Result<LineChart, EngineError> {
        self.ensure_all(&kind.required_columns())?;

        let table = self.table();
        let column = move |c: Column| table.get(c).unwrap_or_default();
        let title = title.unwrap_or(kind.default_title());

        let chart = match kind {
            PlotKind::ForceDisplacement => LineChart::new(title, DISPLACEMENT_LABEL, "Force [nN]")
                .with_series(Series::from_columns(
                    "force",
                    column(Column::Displacement),
                    &mechanics::force_nn(table.force()),
                )),
            PlotKind::ContactAtomsStrain => {
                LineChart::new(title, STRAIN_LABEL, "Atoms in contact").with_series(
                    Series::from_columns(
                        "contact-atoms",
                        column(Column::Strain),
                        column(Column::ContactAtoms),
                    ),
                )
            }
            PlotKind::PercentageContactAtomsStrain => {
                LineChart::new(title, STRAIN_LABEL, "Percentage of atoms in contact %")
                    .with_series(Series::from_columns(
                        "percentage-contact-atoms",
                        column(Column::Strain),
                        column(Column::PercentageContactAtoms),
                    ))
            }
            PlotKind::StressStrain => LineChart::new(title, STRAIN_LABEL, "Stress [GPa]")
                .with_series(Series::from_columns(
                    "stress",
                    column(Column::Strain),
                    column(Column::Stress),
                )),
            PlotKind::EllipticalStressStrain => LineChart::new(title, STRAIN_LABEL, "Stress [GPa]")
                .with_series(Series::from_columns(
                    "elliptical-stress",
                    column(Column::Strain),
                    column(Column::EllipticalStress),
                )),
            PlotKind::CoordinationDisplacement => coordination_chart(
                LineChart::new(title, DISPLACEMENT_LABEL, PERCENT_LABEL),
                column(Column::Displacement),
                column,
            ),
            PlotKind::CoordinationStrain => coordination_chart(
                LineChart::new(title, STRAIN_LABEL, PERCENT_LABEL),
                column(Column::Strain),
                column,
            ),
            PlotKind::PoteStrain => LineChart::new(title, STRAIN_LABEL, "Potential energy [eV]")
                .with_series(Series::from_columns(
                    "pote",
                    column(Column::Strain),
                    table.pote(),
                )),
        };
        Ok(chart)
    }

    /// Draws `kind` into the SVG file at `path`.
    pub fn plot<P: AsRef<Path>>(
        &mut self,
        kind: PlotKind,
        path: P,
        title: Option<&str>,
    ) -> Result<(), EngineError> {
        let path = path.as_ref();
        let chart = self.chart(kind, title)?;
        chart.save(path)?;
        info!(kind = %kind, path = %path.display(), "Plot written.");
        Ok(())
    }
}

fn coordination_chart<'t>(
    chart: LineChart,
    x: &[f64],
    column: impl Fn(Column) -> &'t [f64],
) -> LineChart {
    PLOTTED_COORDINATION.iter().fold(chart, |chart, n| {
        chart.with_series(Series::from_columns(
            format!("CN={n}"),
            x,
            column(Column::PercentCn(*n)),
        ))
    })
}
