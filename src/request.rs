#![warn(missing_docs)]
//! Calculation requests and their reports
//!
//! A request bundles all input values of a calculation (as entered on the command line or read from a YAML
//! file). Evaluating a request yields a report which can be printed or serialized to JSON.
use std::{fmt::Display, fs, path::Path};

use serde::{Deserialize, Serialize};
use uom::si::{
    angle::degree,
    f64::{Angle, Length, Power},
    heat_flux_density::watt_per_square_meter,
    length::meter,
    power::watt,
};

use crate::{
    error::{BeamError, BeamResult},
    gaussian_beam::{BeamParameters, GaussianBeam},
    intensity_grid::{check_width, GridConfig, IntensityGrid},
    lens_system::{BeamTrain, LensOrdering, LensSystem},
    profile::{BeamProfile, Irradiance},
    utils::unit_format::format_with_prefix,
};

/// Default aperture width in multiples of the beam radius at the measurement plane.
const DEFAULT_APERTURE_FACTOR: f64 = 4.0;

/// Irradiance of a single beam in a plane at a given distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityRequest {
    /// beam parameters
    pub beam: BeamParameters,
    /// axial position of the observation plane
    pub distance: Length,
    /// grid used for the irradiance map
    #[serde(default)]
    pub grid: GridConfig,
}
impl IntensityRequest {
    /// Create the [`GaussianBeam`] of this request.
    ///
    /// # Errors
    /// This function returns an error if the beam parameters are invalid.
    pub fn beam(&self) -> BeamResult<GaussianBeam> {
        GaussianBeam::try_from(self.beam)
    }
    /// Sample the irradiance map in the observation plane.
    ///
    /// # Errors
    /// This function returns an error if the beam parameters, the distance or the grid are invalid.
    pub fn intensity_grid(&self) -> BeamResult<IntensityGrid> {
        self.beam()?.intensity_grid(self.distance, &self.grid)
    }
    /// Evaluate this request.
    ///
    /// # Errors
    /// This function returns an error if the beam parameters or the distance are invalid.
    pub fn evaluate(&self) -> BeamResult<IntensityReport> {
        let beam = self.beam()?;
        check_distance(self.distance)?;
        Ok(IntensityReport {
            distance: self.distance,
            waist_radius: beam.waist_radius(),
            rayleigh_range: beam.rayleigh_range(),
            beam_radius: beam.beam_radius(self.distance),
            max_intensity: beam.on_axis_intensity(self.distance),
        })
    }
}

/// Result of an [`IntensityRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntensityReport {
    /// axial position of the observation plane
    pub distance: Length,
    /// waist radius w0 of the beam
    pub waist_radius: Length,
    /// Rayleigh range z0 of the beam
    pub rayleigh_range: Length,
    /// beam radius W at the observation plane
    pub beam_radius: Length,
    /// maximum (on-axis) irradiance at the observation plane
    pub max_intensity: Irradiance,
}
impl Display for IntensityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "distance:          {}", fmt_length(self.distance))?;
        writeln!(f, "waist radius:      {}", fmt_length(self.waist_radius))?;
        writeln!(f, "Rayleigh range:    {}", fmt_length(self.rayleigh_range))?;
        writeln!(f, "beam radius:       {}", fmt_length(self.beam_radius))?;
        write!(
            f,
            "maximum intensity: {}",
            fmt_irradiance(self.max_intensity)
        )
    }
}

/// Propagation of a beam through a system of thin lenses, observed at a given distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LensSystemRequest {
    /// beam parameters of the incoming beam
    pub beam: BeamParameters,
    /// axial positions of the lenses
    pub lens_distances: Vec<Length>,
    /// focal lengths of the lenses (same order as the positions)
    pub focal_lengths: Vec<Length>,
    /// handling of unsorted lens positions
    #[serde(default)]
    pub ordering: LensOrdering,
    /// axial position of the observation plane
    pub distance: Length,
    /// full aperture width along x (defaults to four times the beam radius)
    #[serde(default)]
    pub x_width: Option<Length>,
    /// full aperture width along y (defaults to four times the beam radius)
    #[serde(default)]
    pub y_width: Option<Length>,
}
impl LensSystemRequest {
    /// Create the [`LensSystem`] of this request.
    ///
    /// # Errors
    /// This function returns an error if the lens lists are inconsistent or a lens is invalid.
    pub fn lens_system(&self) -> BeamResult<LensSystem> {
        LensSystem::from_lists(&self.lens_distances, &self.focal_lengths, self.ordering)
    }
    /// Propagate the beam of this request through its lens system.
    ///
    /// # Errors
    /// This function returns an error if the beam parameters or the lens system are invalid.
    pub fn beam_train(&self) -> BeamResult<BeamTrain> {
        let beam = GaussianBeam::try_from(self.beam)?;
        self.lens_system()?.propagate(&beam)
    }
    /// Evaluate this request.
    ///
    /// # Errors
    /// This function returns an error if
    ///   - the beam parameters or the lens system are invalid
    ///   - the distance is not finite
    ///   - a given aperture width is not positive and finite
    pub fn evaluate(&self) -> BeamResult<LensSystemReport> {
        check_distance(self.distance)?;
        let train = self.beam_train()?;
        let beam_radius = train.beam_radius(self.distance);
        let default_width = beam_radius * DEFAULT_APERTURE_FACTOR;
        let x_width = self.x_width.unwrap_or(default_width);
        let y_width = self.y_width.unwrap_or(default_width);
        check_width("x width", x_width)?;
        check_width("y width", y_width)?;
        let received_power = train.aperture_power(self.distance, x_width, y_width)?;
        let output = train.output_beam();
        Ok(LensSystemReport {
            distance: self.distance,
            lens_count: train.len() - 1,
            beam_diameter: beam_radius * 2.0,
            output_divergence: output.divergence(),
            output_waist_radius: output.waist_radius(),
            output_waist_position: output.waist_position(),
            x_width,
            y_width,
            received_power,
        })
    }
}

/// Result of a [`LensSystemRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LensSystemReport {
    /// axial position of the observation plane
    pub distance: Length,
    /// number of lenses
    pub lens_count: usize,
    /// beam diameter (2·W) at the observation plane
    pub beam_diameter: Length,
    /// divergence (half angle) of the beam behind the last lens
    pub output_divergence: Angle,
    /// waist radius of the beam behind the last lens
    pub output_waist_radius: Length,
    /// waist position of the beam behind the last lens
    pub output_waist_position: Length,
    /// full aperture width along x
    pub x_width: Length,
    /// full aperture width along y
    pub y_width: Length,
    /// power transmitted through the centered x · y aperture
    pub received_power: Power,
}
impl Display for LensSystemReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "distance:              {}", fmt_length(self.distance))?;
        writeln!(f, "number of lenses:      {}", self.lens_count)?;
        writeln!(f, "beam diameter:         {}", fmt_length(self.beam_diameter))?;
        writeln!(
            f,
            "output divergence:     {:.4} deg",
            self.output_divergence.get::<degree>()
        )?;
        writeln!(
            f,
            "output waist radius:   {}",
            fmt_length(self.output_waist_radius)
        )?;
        writeln!(
            f,
            "output waist position: {}",
            fmt_length(self.output_waist_position)
        )?;
        writeln!(
            f,
            "aperture:              {} x {}",
            fmt_length(self.x_width),
            fmt_length(self.y_width)
        )?;
        write!(
            f,
            "received power:        {}",
            format_with_prefix(self.received_power.get::<watt>(), "W")
        )
    }
}

/// A calculation request as stored in a YAML file.
///
/// The kind of request is selected by the `type` field:
/// ```yaml
/// type: lens_system
/// beam:
///   wavelength: 0.00000085
///   power: 0.0015
///   divergence: 0.0698
/// lens_distances: [0.1]
/// focal_lengths: [0.05]
/// distance: 0.2
/// ```
/// All quantities are given in SI base units (m, W, rad).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// see [`IntensityRequest`]
    Intensity(IntensityRequest),
    /// see [`LensSystemRequest`]
    LensSystem(LensSystemRequest),
}
impl Request {
    /// Read a [`Request`] from a YAML string.
    ///
    /// # Errors
    /// This function returns a [`BeamError::Parse`] if the string is not a valid request.
    pub fn from_yaml(yaml: &str) -> BeamResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| BeamError::Parse(format!("request: {e}")))
    }
    /// Read a [`Request`] from a YAML file.
    ///
    /// # Errors
    /// This function returns an error if the file cannot be read or does not contain a valid request.
    pub fn from_file(path: &Path) -> BeamResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| BeamError::Io(format!("cannot read {}: {e}", path.display())))?;
        Self::from_yaml(&contents)
    }
    /// Evaluate this request.
    ///
    /// # Errors
    /// This function returns an error if the evaluation of the request fails.
    pub fn evaluate(&self) -> BeamResult<Report> {
        match self {
            Self::Intensity(request) => request.evaluate().map(Report::Intensity),
            Self::LensSystem(request) => request.evaluate().map(Report::LensSystem),
        }
    }
}

/// The report of an evaluated [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Report {
    /// see [`IntensityReport`]
    Intensity(IntensityReport),
    /// see [`LensSystemReport`]
    LensSystem(LensSystemReport),
}
impl Report {
    /// Serialize this report as pretty printed JSON (SI base units).
    ///
    /// # Errors
    /// This function returns an error if the serialization fails.
    pub fn to_json(&self) -> BeamResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BeamError::Other(e.to_string()))
    }
}
impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Intensity(report) => report.fmt(f),
            Self::LensSystem(report) => report.fmt(f),
        }
    }
}

fn check_distance(distance: Length) -> BeamResult<()> {
    if !distance.is_finite() {
        return Err(BeamError::InvalidParameter(
            "distance must be finite".into(),
        ));
    }
    Ok(())
}
fn fmt_length(length: Length) -> String {
    format_with_prefix(length.get::<meter>(), "m")
}
fn fmt_irradiance(irradiance: Irradiance) -> String {
    format_with_prefix(irradiance.get::<watt_per_square_meter>(), "W/m\u{b2}")
}
