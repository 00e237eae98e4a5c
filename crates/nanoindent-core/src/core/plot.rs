//! Line charts rendered to SVG in the ggplot look: grey panel, white grid, muted palette.

use plotters::prelude::*;
use std::fmt::Display;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

const PANEL: RGBColor = RGBColor(229, 229, 229);
const MINOR_GRID: RGBColor = RGBColor(242, 242, 242);
const TEXT: RGBColor = RGBColor(77, 77, 77);
const PALETTE: [RGBColor; 5] = [
    RGBColor(226, 74, 51),
    RGBColor(52, 138, 189),
    RGBColor(152, 142, 213),
    RGBColor(119, 119, 119),
    RGBColor(251, 193, 94),
];
const CHART_SIZE: (u32, u32) = (800, 600);
const FONT: &str = "sans-serif";

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Unsupported plot format for '{path}': only .svg output is supported")]
    UnsupportedPlotFormat { path: String },
    #[error("Series '{label}' has no finite points to draw")]
    EmptySeries { label: String },
    #[error("Chart has no series")]
    NoSeries,
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn render_err<E: Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

/// A named polyline. Points with a non-finite coordinate are dropped on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points: points
                .into_iter()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .collect(),
        }
    }

    /// Pairs two columns row by row.
    pub fn from_columns(label: impl Into<String>, x: &[f64], y: &[f64]) -> Self {
        Self::new(label, x.iter().copied().zip(y.iter().copied()))
    }
}

#[derive(Debug, Clone)]
pub struct LineChart {
    title: String,
    x_label: String,
    y_label: String,
    series: Vec<Series>,
}

impl LineChart {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series: Vec::new(),
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Renders the chart and writes it to `path`, which must carry an `.svg` extension.
    ///
    /// # Errors
    ///
    /// Returns [`PlotError::UnsupportedPlotFormat`] for any other extension, and propagates
    /// rendering and I/O failures.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PlotError> {
        let path = path.as_ref();
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if !is_svg {
            return Err(PlotError::UnsupportedPlotFormat {
                path: path.display().to_string(),
            });
        }
        let svg = self.render_svg()?;
        std::fs::write(path, svg)?;
        Ok(())
    }

    /// Renders the chart into an SVG document.
    pub fn render_svg(&self) -> Result<String, PlotError> {
        if self.series.is_empty() {
            return Err(PlotError::NoSeries);
        }
        if let Some(empty) = self.series.iter().find(|s| s.points.is_empty()) {
            return Err(PlotError::EmptySeries {
                label: empty.label.clone(),
            });
        }

        let (x_range, y_range) = self.ranges();
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, CHART_SIZE).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&self.title, (FONT, 22).into_font().color(&BLACK))
                .margin(16)
                .x_label_area_size(48)
                .y_label_area_size(72)
                .build_cartesian_2d(x_range, y_range)
                .map_err(render_err)?;

            chart.plotting_area().fill(&PANEL).map_err(render_err)?;
            chart
                .configure_mesh()
                .bold_line_style(WHITE.stroke_width(1))
                .light_line_style(MINOR_GRID.stroke_width(1))
                .axis_style(TEXT.stroke_width(1))
                .x_desc(self.x_label.as_str())
                .y_desc(self.y_label.as_str())
                .label_style((FONT, 13).into_font().color(&TEXT))
                .axis_desc_style((FONT, 15).into_font().color(&BLACK))
                .draw()
                .map_err(render_err)?;

            let with_legend = self.series.len() > 1;
            for (i, series) in self.series.iter().enumerate() {
                let color = PALETTE[i % PALETTE.len()];
                let annotation = chart
                    .draw_series(LineSeries::new(
                        series.points.iter().copied(),
                        color.stroke_width(2),
                    ))
                    .map_err(render_err)?;
                if with_legend {
                    annotation.label(series.label.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }

            if with_legend {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperLeft)
                    .background_style(WHITE.mix(0.85))
                    .border_style(TEXT)
                    .label_font((FONT, 13).into_font().color(&BLACK))
                    .draw()
                    .map_err(render_err)?;
            }

            root.present().map_err(render_err)?;
        }
        Ok(buffer)
    }

    fn ranges(&self) -> (Range<f64>, Range<f64>) {
        let points = self.series.iter().flat_map(|s| s.points.iter());
        let (mut x_min, mut x_max, mut y_min, mut y_max) = (
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        );
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        (padded(x_min, x_max), padded(y_min, y_max))
    }
}

/// Expands a data range by 5% on each side; a degenerate range is opened around its value.
fn padded(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    if span > 0.0 {
        let pad = span * 0.05;
        (min - pad)..(max + pad)
    } else {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.05 };
        (min - pad)..(max + pad)
    }
}
