#![warn(missing_docs)]
//! Linear sweeps of beam quantities (irradiance, beam radius) along one coordinate
use std::{fs::File, io::Write, path::Path};

use csv::WriterBuilder;
use log::{info, warn};
use uom::si::{
    f64::Length,
    heat_flux_density::watt_per_square_meter,
    length::{centimeter, meter},
};

use crate::{
    error::{BeamError, BeamResult},
    profile::BeamProfile,
    utils::{griddata::linspace, unit_format::format_with_prefix},
};

/// A named series of values belonging to a [`SampledCurve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// label of this series (used for the csv header and the plot legend)
    pub label: String,
    /// sampled values (same length as the abscissa of the curve)
    pub values: Vec<f64>,
}

/// One or more series of values sampled at common abscissa values.
///
/// The units of the values are given by the axis labels.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledCurve {
    /// title of the curve
    pub title: String,
    /// label of the abscissa (including the unit)
    pub x_label: String,
    /// label of the ordinate (including the unit)
    pub y_label: String,
    /// abscissa values
    pub x: Vec<f64>,
    /// sampled series
    pub series: Vec<Series>,
}

fn check_sweep(start: Length, end: Length, num: usize) -> BeamResult<Vec<f64>> {
    if num < 2 {
        return Err(BeamError::InvalidParameter(
            "a sweep needs at least two points".into(),
        ));
    }
    if start == end {
        warn!("sweep start and end are identical, all points coincide");
    }
    Ok(linspace(start.get::<meter>(), end.get::<meter>(), num)?
        .iter()
        .copied()
        .collect())
}

/// Axial range spanning the origin (z = 0) and all given positions.
#[must_use]
pub fn axial_range(positions: &[Length]) -> (Length, Length) {
    let origin = Length::new::<meter>(0.0);
    positions
        .iter()
        .fold((origin, origin), |(min, max), z| {
            (
                if *z < min { *z } else { min },
                if *z > max { *z } else { max },
            )
        })
}

/// Sample the radial irradiance profile in one or more planes.
///
/// The lateral coordinate ρ runs over [−2W, 2W] where W is the largest beam radius of all requested planes.
/// One [`Series`] is created per plane.
///
/// # Errors
///
/// This function returns an error if
///   - no plane is given or a plane position is not finite
///   - less than two points are requested
pub fn radial_sweep<P: BeamProfile + ?Sized>(
    profile: &P,
    planes: &[Length],
    num: usize,
) -> BeamResult<SampledCurve> {
    if planes.is_empty() {
        return Err(BeamError::InvalidParameter(
            "at least one plane is needed for a radial sweep".into(),
        ));
    }
    if planes.iter().any(|z| !z.is_finite()) {
        return Err(BeamError::InvalidParameter(
            "plane positions must be finite".into(),
        ));
    }
    let max_radius = planes
        .iter()
        .map(|z| profile.beam_radius(*z))
        .fold(Length::new::<meter>(0.0), |acc, w| if w > acc { w } else { acc });
    let x = check_sweep(max_radius * -2.0, max_radius * 2.0, num)?;
    let series = planes
        .iter()
        .map(|z| Series {
            label: format!("z = {}", format_with_prefix(z.get::<meter>(), "m")),
            values: x
                .iter()
                .map(|rho| {
                    profile
                        .intensity(*z, Length::new::<meter>(*rho))
                        .get::<watt_per_square_meter>()
                })
                .collect(),
        })
        .collect();
    Ok(SampledCurve {
        title: "radial irradiance profile".into(),
        x_label: "radius (m)".into(),
        y_label: "irradiance (W/m²)".into(),
        x,
        series,
    })
}

/// Sample the maximum (on-axis) irradiance between the axial positions `start` and `end`.
///
/// # Errors
///
/// This function returns an error if the positions are not finite or less than two points are requested.
pub fn on_axis_sweep<P: BeamProfile + ?Sized>(
    profile: &P,
    start: Length,
    end: Length,
    num: usize,
) -> BeamResult<SampledCurve> {
    let x = check_sweep(start, end, num)?;
    let values = x
        .iter()
        .map(|z| {
            profile
                .on_axis_intensity(Length::new::<meter>(*z))
                .get::<watt_per_square_meter>()
        })
        .collect();
    Ok(SampledCurve {
        title: "on-axis irradiance".into(),
        x_label: "z (m)".into(),
        y_label: "irradiance (W/m²)".into(),
        x,
        series: vec![Series {
            label: "on axis".into(),
            values,
        }],
    })
}

/// Sample the beam radius W(z) in cm between the axial positions `start` and `end`.
///
/// # Errors
///
/// This function returns an error if the positions are not finite or less than two points are requested.
pub fn width_sweep<P: BeamProfile + ?Sized>(
    profile: &P,
    start: Length,
    end: Length,
    num: usize,
) -> BeamResult<SampledCurve> {
    let x = check_sweep(start, end, num)?;
    let values = x
        .iter()
        .map(|z| {
            profile
                .beam_radius(Length::new::<meter>(*z))
                .get::<centimeter>()
        })
        .collect();
    Ok(SampledCurve {
        title: "beam radius".into(),
        x_label: "z (m)".into(),
        y_label: "beam radius (cm)".into(),
        x,
        series: vec![Series {
            label: "W(z)".into(),
            values,
        }],
    })
}

impl SampledCurve {
    /// Write this curve as semicolon separated values with a header row.
    ///
    /// # Errors
    ///
    /// This function returns an [`BeamError::Io`] if writing fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> BeamResult<()> {
        let mut wtr = WriterBuilder::new().delimiter(b';').from_writer(writer);
        let header = std::iter::once(self.x_label.as_str())
            .chain(self.series.iter().map(|s| s.label.as_str()));
        wtr.write_record(header)
            .map_err(|e| BeamError::Io(e.to_string()))?;
        for (idx, x) in self.x.iter().enumerate() {
            let record = std::iter::once(*x)
                .chain(self.series.iter().map(|s| s.values.get(idx).copied().unwrap_or(f64::NAN)))
                .map(|value| value.to_string());
            wtr.write_record(record)
                .map_err(|e| BeamError::Io(e.to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }
    /// Write this curve as csv file to the given path.
    ///
    /// # Errors
    ///
    /// This function returns an [`BeamError::Io`] if the file cannot be created or written.
    pub fn save_csv(&self, path: &Path) -> BeamResult<()> {
        let file = File::create(path)?;
        self.write_csv(file)?;
        info!("{} written to {}", self.title, path.display());
        Ok(())
    }
}
