#![warn(missing_docs)]
//! Rendering of sampled curves and irradiance maps to image files
use std::path::Path;

use log::info;
use plotters::{
    coord::Shift,
    prelude::{
        BitMapBackend, ChartBuilder, Color, DrawingArea, DrawingBackend, IntoDrawingArea,
        LineSeries, Palette, Palette99, PathElement, RGBColor, Rectangle, SVGBackend, BLACK, WHITE,
    },
};
use uom::si::length::meter;

use crate::{
    error::{BeamError, BeamResult},
    intensity_grid::IntensityGrid,
    sampling::SampledCurve,
    utils::unit_format::format_with_prefix,
};

/// Size of the created figures in pixels (width, height).
const FIG_SIZE: (u32, u32) = (800, 600);
/// Width of the color bar area of a color mesh plot in pixels.
const COLOR_BAR_WIDTH: u32 = 170;

/// Enum to describe which type of plotting backend should be used
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PltBackEnd {
    /// `BitmapBackend`. Used to create .png, .bmp
    Bitmap,
    /// `SVGBackend`. Used to create .svg
    SVG,
}
impl PltBackEnd {
    /// Determine the backend from the extension of the given file path.
    ///
    /// # Errors
    /// This function returns a [`BeamError::Plot`] if the extension is missing or not supported.
    pub fn from_path(path: &Path) -> BeamResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("svg") => Ok(Self::SVG),
            Some("png" | "bmp") => Ok(Self::Bitmap),
            _ => Err(BeamError::Plot(format!(
                "unsupported file extension of {}, use svg, png or bmp",
                path.display()
            ))),
        }
    }
}

fn plot_error<E: std::fmt::Display>(err: E) -> BeamError {
    BeamError::Plot(err.to_string())
}

fn data_range<'a, I: Iterator<Item = &'a f64>>(values: I) -> BeamResult<(f64, f64)> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(*v), max.max(*v))
        });
    if min > max {
        return Err(BeamError::Plot("no finite data to plot".into()));
    }
    if min < max {
        Ok((min, max))
    } else {
        let margin = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        Ok((min - margin, max + margin))
    }
}

/// Trait for everything that can be rendered into a figure.
pub trait Plottable {
    /// Check that there is something to plot.
    ///
    /// # Errors
    /// This function returns a [`BeamError::Plot`] if the data is empty or unusable.
    fn check_plot_data(&self) -> BeamResult<()>;
    /// Draw onto the given drawing area.
    ///
    /// # Errors
    /// This function returns a [`BeamError::Plot`] if the drawing backend fails.
    fn draw<B: DrawingBackend>(&self, root: &DrawingArea<B, Shift>) -> BeamResult<()>;
    /// Render into a file. The backend is chosen from the file extension (see [`PltBackEnd::from_path`]).
    ///
    /// # Errors
    /// This function returns a [`BeamError::Plot`] if
    ///   - the file extension is not supported
    ///   - there is no data to plot
    ///   - drawing or writing the file fails
    fn to_plot(&self, path: &Path) -> BeamResult<()> {
        let backend = PltBackEnd::from_path(path)?;
        self.check_plot_data()?;
        match backend {
            PltBackEnd::Bitmap => {
                let root = BitMapBackend::new(path, FIG_SIZE).into_drawing_area();
                self.draw(&root)?;
            }
            PltBackEnd::SVG => {
                let root = SVGBackend::new(path, FIG_SIZE).into_drawing_area();
                self.draw(&root)?;
            }
        }
        info!("plot written to {}", path.display());
        Ok(())
    }
}

impl Plottable for SampledCurve {
    fn check_plot_data(&self) -> BeamResult<()> {
        if self.x.is_empty() || self.series.is_empty() {
            return Err(BeamError::Plot("curve contains no data".into()));
        }
        if self.series.iter().any(|s| s.values.len() != self.x.len()) {
            return Err(BeamError::Plot(
                "series length does not match the abscissa".into(),
            ));
        }
        Ok(())
    }
    fn draw<B: DrawingBackend>(&self, root: &DrawingArea<B, Shift>) -> BeamResult<()> {
        root.fill(&WHITE).map_err(plot_error)?;
        let (x_min, x_max) = data_range(self.x.iter())?;
        let (y_min, y_max) = data_range(self.series.iter().flat_map(|s| s.values.iter()))?;
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(plot_error)?;
        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .x_label_formatter(&|v| format!("{v:.3e}"))
            .y_label_formatter(&|v| format!("{v:.2e}"))
            .draw()
            .map_err(plot_error)?;
        for (idx, series) in self.series.iter().enumerate() {
            let style = Palette99::pick(idx).stroke_width(2);
            chart
                .draw_series(LineSeries::new(
                    self.x.iter().copied().zip(series.values.iter().copied()),
                    style,
                ))
                .map_err(plot_error)?
                .label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_error)?;
        root.present().map_err(plot_error)
    }
}

fn pixel_rectangles(
    x: &[f64],
    y: &[f64],
    color_at: impl Fn(usize, usize) -> RGBColor,
) -> Vec<Rectangle<(f64, f64)>> {
    let half_step = |axis: &[f64], idx: usize| {
        if idx + 1 < axis.len() {
            (axis[idx + 1] - axis[idx]) / 2.0
        } else {
            (axis[idx] - axis[idx - 1]) / 2.0
        }
    };
    let mut rectangles = Vec::with_capacity(x.len() * y.len());
    for (row, y_center) in y.iter().enumerate() {
        let dy = half_step(y, row);
        for (col, x_center) in x.iter().enumerate() {
            let dx = half_step(x, col);
            rectangles.push(Rectangle::new(
                [
                    (x_center - dx, y_center + dy),
                    (x_center + dx, y_center - dy),
                ],
                color_at(row, col).filled(),
            ));
        }
    }
    rectangles
}

fn plasma(value: f64) -> RGBColor {
    let c = colorous::PLASMA.eval_continuous(value.clamp(0.0, 1.0));
    RGBColor(c.r, c.g, c.b)
}

impl Plottable for IntensityGrid {
    fn check_plot_data(&self) -> BeamResult<()> {
        let (rows, cols) = self.shape();
        if rows < 2 || cols < 2 {
            return Err(BeamError::Plot("irradiance grid contains no data".into()));
        }
        if self.max().is_nan() || self.max() <= 0.0 {
            return Err(BeamError::Plot(
                "irradiance grid contains no positive values".into(),
            ));
        }
        Ok(())
    }
    fn draw<B: DrawingBackend>(&self, root: &DrawingArea<B, Shift>) -> BeamResult<()> {
        root.fill(&WHITE).map_err(plot_error)?;
        let max = self.max();
        let (main_root, cbar_root) = root.split_horizontally(FIG_SIZE.0 - COLOR_BAR_WIDTH);

        // color bar first, otherwise the x label of the main plot is cropped
        let levels: Vec<f64> = (0..=100).map(|step| max * f64::from(step) / 100.0).collect();
        let mut cbar = ChartBuilder::on(&cbar_root)
            .margin(15)
            .margin_top(50)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(0.0..1.0, 0.0..max)
            .map_err(plot_error)?;
        cbar.configure_mesh()
            .disable_mesh()
            .x_labels(0)
            .y_desc("irradiance (W/m²)")
            .y_label_formatter(&|v| format!("{v:.1e}"))
            .draw()
            .map_err(plot_error)?;
        cbar.draw_series(pixel_rectangles(&[0.25, 0.75], &levels, |row, _| {
            plasma(levels[row] / max)
        }))
        .map_err(plot_error)?;

        let x_cm: Vec<f64> = self.x().iter().map(|x| x * 100.0).collect();
        let y_cm: Vec<f64> = self.y().iter().map(|y| y * 100.0).collect();
        let mut chart = ChartBuilder::on(&main_root)
            .caption(
                format!(
                    "irradiance at z = {}",
                    format_with_prefix(self.z().get::<meter>(), "m")
                ),
                ("sans-serif", 24),
            )
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(
                x_cm[0]..x_cm[x_cm.len() - 1],
                y_cm[0]..y_cm[y_cm.len() - 1],
            )
            .map_err(plot_error)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("x (cm)")
            .y_desc("y (cm)")
            .x_label_formatter(&|v| format!("{v:.2e}"))
            .y_label_formatter(&|v| format!("{v:.2e}"))
            .draw()
            .map_err(plot_error)?;
        let values = self.values();
        chart
            .draw_series(pixel_rectangles(&x_cm, &y_cm, |row, col| {
                plasma(values[(row, col)] / max)
            }))
            .map_err(plot_error)?;
        root.present().map_err(plot_error)
    }
}
