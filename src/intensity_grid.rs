#![warn(missing_docs)]
//! Sampling of the irradiance in a transverse plane on a rectangular grid
use kahan::KahanSum;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use uom::num_traits::Zero;
use uom::si::{
    f64::{Length, Power},
    heat_flux_density::watt_per_square_meter,
    length::meter,
    power::watt,
};

use crate::{
    error::{BeamError, BeamResult},
    profile::BeamProfile,
    utils::griddata::centered_axis,
};

/// Default full width of a grid in multiples of the beam radius W(z).
const DEFAULT_WIDTH_FACTOR: f64 = 4.0;

/// Check that an (aperture or grid) width is positive and finite.
///
/// # Errors
/// This function returns an [`BeamError::InvalidParameter`] naming the width otherwise.
pub fn check_width(name: &str, width: Length) -> BeamResult<()> {
    if !width.is_finite() || width <= Length::zero() {
        return Err(BeamError::InvalidParameter(format!(
            "{name} must be positive and finite"
        )));
    }
    Ok(())
}

/// Configuration of an [`IntensityGrid`].
///
/// The grid is always centered on the optical axis. Widths which are not given default to four times the
/// beam radius in the sampled plane. Both axes are sampled with 100 points by default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    x_width: Option<Length>,
    y_width: Option<Length>,
    samples_x: usize,
    samples_y: usize,
}
impl Default for GridConfig {
    fn default() -> Self {
        Self {
            x_width: None,
            y_width: None,
            samples_x: 100,
            samples_y: 100,
        }
    }
}
impl GridConfig {
    /// Set the full width of the grid along the x axis.
    ///
    /// # Errors
    /// This function returns an error if the width is not positive and finite.
    pub fn with_x_width(mut self, width: Length) -> BeamResult<Self> {
        check_width("x width", width)?;
        self.x_width = Some(width);
        Ok(self)
    }
    /// Set the full width of the grid along the y axis.
    ///
    /// # Errors
    /// This function returns an error if the width is not positive and finite.
    pub fn with_y_width(mut self, width: Length) -> BeamResult<Self> {
        check_width("y width", width)?;
        self.y_width = Some(width);
        Ok(self)
    }
    /// Set the (optional) full widths along both axes. `None` falls back to the beam-radius based default.
    ///
    /// # Errors
    /// This function returns an error if a given width is not positive and finite.
    pub fn with_widths(self, x_width: Option<Length>, y_width: Option<Length>) -> BeamResult<Self> {
        let config = match x_width {
            Some(width) => self.with_x_width(width)?,
            None => Self {
                x_width: None,
                ..self
            },
        };
        match y_width {
            Some(width) => config.with_y_width(width),
            None => Ok(Self {
                y_width: None,
                ..config
            }),
        }
    }
    /// Set the number of sampling points along the x and y axis.
    ///
    /// # Errors
    /// This function returns an error if less than two points are requested for an axis.
    pub fn with_samples(mut self, samples_x: usize, samples_y: usize) -> BeamResult<Self> {
        if samples_x < 2 || samples_y < 2 {
            return Err(BeamError::InvalidParameter(
                "at least two samples per axis are needed".into(),
            ));
        }
        self.samples_x = samples_x;
        self.samples_y = samples_y;
        Ok(self)
    }
    /// Returns the configured full width along the x axis (if any).
    #[must_use]
    pub const fn x_width(&self) -> Option<Length> {
        self.x_width
    }
    /// Returns the configured full width along the y axis (if any).
    #[must_use]
    pub const fn y_width(&self) -> Option<Length> {
        self.y_width
    }
    /// Returns the number of samples along the x and y axis.
    #[must_use]
    pub const fn samples(&self) -> (usize, usize) {
        (self.samples_x, self.samples_y)
    }
    /// Check the consistency of this configuration (e.g. after deserialization).
    ///
    /// # Errors
    /// This function returns an error if a width is not positive and finite or less than two samples are
    /// configured for an axis.
    pub fn validate(&self) -> BeamResult<()> {
        if let Some(width) = self.x_width {
            check_width("x width", width)?;
        }
        if let Some(width) = self.y_width {
            check_width("y width", width)?;
        }
        self.with_samples(self.samples_x, self.samples_y).map(|_| ())
    }
    fn widths(&self, beam_radius: Length) -> (Length, Length) {
        let default = beam_radius * DEFAULT_WIDTH_FACTOR;
        (
            self.x_width.unwrap_or(default),
            self.y_width.unwrap_or(default),
        )
    }
}

/// Irradiance values sampled on a rectangular grid in a plane perpendicular to the optical axis.
///
/// The value matrix is indexed as `values[(row, column)]` with rows along the y axis and columns along the
/// x axis. Coordinates are stored in meters and irradiances in W/m².
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityGrid {
    z: Length,
    x: DVector<f64>,
    y: DVector<f64>,
    values: DMatrix<f64>,
}
impl IntensityGrid {
    /// Sample the irradiance of a beam profile in the plane at `z`.
    ///
    /// # Errors
    /// This function returns an error if
    ///   - `z` is not finite
    ///   - the [`GridConfig`] is invalid
    ///   - the beam radius at `z` is not usable as default grid width
    pub fn sample<P: BeamProfile + ?Sized>(
        profile: &P,
        z: Length,
        config: &GridConfig,
    ) -> BeamResult<Self> {
        if !z.is_finite() {
            return Err(BeamError::InvalidParameter(
                "axial position must be finite".into(),
            ));
        }
        config.validate()?;
        let (x_width, y_width) = config.widths(profile.beam_radius(z));
        check_width("x width", x_width)?;
        check_width("y width", y_width)?;
        let (samples_x, samples_y) = config.samples();
        let x = centered_axis(x_width.get::<meter>(), samples_x)?;
        let y = centered_axis(y_width.get::<meter>(), samples_y)?;
        let values = DMatrix::from_fn(samples_y, samples_x, |row, col| {
            let rho = Length::new::<meter>(x[col].hypot(y[row]));
            profile.intensity(z, rho).get::<watt_per_square_meter>()
        });
        Ok(Self { z, x, y, values })
    }
    /// Returns the axial position of the sampled plane.
    #[must_use]
    pub const fn z(&self) -> Length {
        self.z
    }
    /// Returns the x coordinates (in m) of the grid columns.
    #[must_use]
    pub const fn x(&self) -> &DVector<f64> {
        &self.x
    }
    /// Returns the y coordinates (in m) of the grid rows.
    #[must_use]
    pub const fn y(&self) -> &DVector<f64> {
        &self.y
    }
    /// Returns the sampled irradiance values (in W/m²).
    #[must_use]
    pub const fn values(&self) -> &DMatrix<f64> {
        &self.values
    }
    /// Returns the (rows, columns) of the value matrix.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }
    /// Returns the maximum sampled irradiance (in W/m²).
    #[must_use]
    pub fn max(&self) -> f64 {
        self.values.max()
    }
    /// Integrate the irradiance over the grid area (trapezoidal rule).
    #[must_use]
    pub fn total_power(&self) -> Power {
        let x_weights = trapezoid_weights(&self.x);
        let y_weights = trapezoid_weights(&self.y);
        let mut sum = KahanSum::new_with_value(0.0);
        for (row, y_weight) in y_weights.iter().enumerate() {
            for (col, x_weight) in x_weights.iter().enumerate() {
                sum += self.values[(row, col)] * x_weight * y_weight;
            }
        }
        Power::new::<watt>(sum.sum())
    }
}

fn trapezoid_weights(axis: &DVector<f64>) -> DVector<f64> {
    let len = axis.len();
    DVector::from_fn(len, |idx, _| {
        let left = if idx > 0 { axis[idx] - axis[idx - 1] } else { 0.0 };
        let right = if idx + 1 < len {
            axis[idx + 1] - axis[idx]
        } else {
            0.0
        };
        (left + right) / 2.0
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        centimeter, degree, gaussian_beam::GaussianBeam, meter, micrometer, milliwatt, nanometer,
    };
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    fn test_beam() -> GaussianBeam {
        GaussianBeam::new(nanometer!(850.0), milliwatt!(1.5), degree!(4.0)).unwrap()
    }
    #[test]
    fn config_default() {
        let config = GridConfig::default();
        assert_eq!(config.x_width(), None);
        assert_eq!(config.y_width(), None);
        assert_eq!(config.samples(), (100, 100));
        assert!(config.validate().is_ok());
    }
    #[test]
    fn config_builder() {
        let config = GridConfig::default()
            .with_x_width(centimeter!(1.0))
            .unwrap()
            .with_samples(10, 20)
            .unwrap();
        assert_eq!(config.x_width(), Some(centimeter!(1.0)));
        assert_eq!(config.samples(), (10, 20));
        let config = config
            .with_widths(None, Some(centimeter!(2.0)))
            .unwrap();
        assert_eq!(config.x_width(), None);
        assert_eq!(config.y_width(), Some(centimeter!(2.0)));
    }
    #[test]
    fn config_wrong_params() {
        assert_matches!(
            GridConfig::default().with_x_width(meter!(0.0)),
            Err(BeamError::InvalidParameter(_))
        );
        assert!(GridConfig::default().with_y_width(meter!(-1.0)).is_err());
        assert!(GridConfig::default().with_y_width(meter!(f64::NAN)).is_err());
        assert!(GridConfig::default()
            .with_widths(Some(meter!(f64::INFINITY)), None)
            .is_err());
        assert!(GridConfig::default().with_samples(1, 10).is_err());
        assert!(GridConfig::default().with_samples(10, 0).is_err());
    }
    #[test]
    fn config_serde() {
        let config: GridConfig = serde_yaml::from_str("samples_x: 11").unwrap();
        assert_eq!(config.samples(), (11, 100));
        assert_eq!(config.x_width(), None);
        let config: GridConfig = serde_yaml::from_str("samples_y: 1").unwrap();
        assert!(config.validate().is_err());
    }
    #[test]
    fn check_width_message() {
        assert_eq!(
            check_width("x width", meter!(0.0)).unwrap_err().to_string(),
            "InvalidParameter:x width must be positive and finite"
        );
        assert!(check_width("x width", micrometer!(1.0)).is_ok());
    }
    #[test]
    fn sample() {
        let beam = test_beam();
        let config = GridConfig::default().with_samples(11, 21).unwrap();
        let grid = IntensityGrid::sample(&beam, meter!(0.0), &config).unwrap();
        assert_eq!(grid.shape(), (21, 11));
        assert_eq!(grid.x().len(), 11);
        assert_eq!(grid.y().len(), 21);
        assert_eq!(grid.z(), meter!(0.0));
        let w0 = beam.waist_radius().get::<meter>();
        assert_relative_eq!(grid.x()[0], -2.0 * w0, max_relative = 1e-12);
        assert_relative_eq!(grid.y()[20], 2.0 * w0, max_relative = 1e-12);
        // odd sample counts contain the axis
        assert_relative_eq!(
            grid.max(),
            beam.peak_intensity().get::<watt_per_square_meter>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(grid.values()[(10, 5)], grid.max());
    }
    #[test]
    fn sample_max_at_center() {
        let beam = test_beam();
        let config = GridConfig::default().with_samples(31, 31).unwrap();
        let grid = beam.intensity_grid(meter!(0.01), &config).unwrap();
        let (row, col) = grid.values().iamax_full();
        assert_eq!((row, col), (15, 15));
    }
    #[test]
    fn sample_wrong_params() {
        let beam = test_beam();
        assert!(IntensityGrid::sample(&beam, meter!(f64::NAN), &GridConfig::default()).is_err());
        let config: GridConfig = serde_yaml::from_str("samples_x: 0").unwrap();
        assert!(IntensityGrid::sample(&beam, meter!(0.0), &config).is_err());
    }
    #[test]
    fn total_power() {
        let beam = test_beam();
        for z in [0.0, 1e-5, 1e-3, 0.1, -0.5] {
            let grid = beam
                .intensity_grid(meter!(z), &GridConfig::default())
                .unwrap();
            assert_relative_eq!(grid.total_power().get::<watt>(), 1.5e-3, max_relative = 1e-2);
        }
    }
    #[test]
    fn trapezoid() {
        let axis = DVector::from_vec(vec![0.0, 1.0, 2.0, 4.0]);
        let weights = trapezoid_weights(&axis);
        assert_eq!(weights.as_slice(), &[0.5, 1.0, 1.5, 1.0]);
    }
    #[test]
    fn aperture_power() {
        let beam = test_beam();
        let w = beam.beam_radius(meter!(0.02));
        // whole beam
        assert_relative_eq!(
            beam.aperture_power(meter!(0.02), centimeter!(100.0), centimeter!(100.0))
                .unwrap()
                .get::<watt>(),
            1.5e-3,
            max_relative = 1e-3
        );
        // square aperture of ±W: erf(√2)² of the power
        let erf_sqrt2 = 0.954_499_736_103_641_6;
        assert_relative_eq!(
            beam.aperture_power(meter!(0.02), w * 2.0, w * 2.0)
                .unwrap()
                .get::<watt>(),
            1.5e-3 * erf_sqrt2 * erf_sqrt2,
            max_relative = 1e-3
        );
        // slit: only one direction clipped
        assert_relative_eq!(
            beam.aperture_power(meter!(0.02), w * 2.0, centimeter!(100.0))
                .unwrap()
                .get::<watt>(),
            1.5e-3 * erf_sqrt2,
            max_relative = 1e-3
        );
        assert!(beam
            .aperture_power(meter!(0.02), meter!(0.0), centimeter!(1.0))
            .is_err());
    }
}
