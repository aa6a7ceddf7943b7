#![warn(missing_docs)]
//! The paraxial Gaussian beam model
//!
//! A [`GaussianBeam`] is fully described by its wavelength, power, far-field divergence (half-angle) and the
//! axial position of its waist. All other quantities (waist radius, Rayleigh range and peak irradiance) are
//! derived once during construction.
use std::f64::consts::PI;
use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};
use uom::num_traits::Zero;
use uom::si::{
    angle::{degree, radian},
    f64::{Angle, Length, Power},
    heat_flux_density::watt_per_square_meter,
    length::meter,
    power::watt,
};

use crate::{
    error::{BeamError, BeamResult},
    profile::{BeamProfile, Irradiance},
    thin_lens::ThinLens,
    utils::unit_format::format_with_prefix,
};

/// The defining (input) parameters of a [`GaussianBeam`].
///
/// This is the serialized form of a beam. The derived quantities are always recalculated (and the
/// parameters validated) when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamParameters {
    /// wavelength of the laser
    pub wavelength: Length,
    /// (continuous wave) power of the laser
    pub power: Power,
    /// far-field divergence half-angle
    pub divergence: Angle,
    /// axial position of the beam waist
    #[serde(default)]
    pub waist_position: Length,
}
impl BeamParameters {
    /// Create the parameter set of a beam with its waist located at z = 0.
    #[must_use]
    pub fn new(wavelength: Length, power: Power, divergence: Angle) -> Self {
        Self {
            wavelength,
            power,
            divergence,
            waist_position: Length::zero(),
        }
    }
}

/// An (immutable) paraxial Gaussian beam.
///
/// ## Formulas
///   - waist radius: w0 = λ / (π·tan θ)
///   - Rayleigh range: z0 = π·w0² / λ
///   - peak irradiance (at the waist, on axis): I0 = 2P / (π·w0²)
///   - beam radius: W(z) = w0·√(1 + ((z − z_w) / z0)²)
///   - irradiance: I(z, ρ) = I0·(w0 / W(z))²·exp(−2ρ² / W(z)²)
///
/// A beam is transformed by a [`ThinLens`] into a new, independent beam. The original beam is never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "BeamParameters", try_from = "BeamParameters")]
pub struct GaussianBeam {
    wavelength: Length,
    power: Power,
    divergence: Angle,
    waist_position: Length,
    waist_radius: Length,
    rayleigh_range: Length,
    peak_intensity: Irradiance,
}

fn check_wavelength(wavelength: Length) -> BeamResult<()> {
    if !wavelength.is_finite() || wavelength <= Length::zero() {
        return Err(BeamError::InvalidParameter(
            "wavelength must be positive and finite".into(),
        ));
    }
    Ok(())
}
fn check_power(power: Power) -> BeamResult<()> {
    if !power.is_finite() || power < Power::zero() {
        return Err(BeamError::InvalidParameter(
            "power must be finite and >= 0".into(),
        ));
    }
    Ok(())
}
fn check_waist_position(waist_position: Length) -> BeamResult<()> {
    if !waist_position.is_finite() {
        return Err(BeamError::InvalidParameter(
            "waist position must be finite".into(),
        ));
    }
    Ok(())
}

impl GaussianBeam {
    /// Creates a new [`GaussianBeam`] with its waist located at z = 0.
    ///
    /// # Errors
    ///
    /// This function returns an [`BeamError::InvalidParameter`] if
    ///   - the wavelength is not positive and finite
    ///   - the power is negative or not finite
    ///   - the divergence is not within the open interval (0°, 90°)
    ///   - the divergence is so small that the waist radius is not representable
    pub fn new(wavelength: Length, power: Power, divergence: Angle) -> BeamResult<Self> {
        check_wavelength(wavelength)?;
        check_power(power)?;
        let theta = divergence.get::<radian>();
        if !theta.is_finite() || theta <= 0.0 || theta >= PI / 2.0 {
            return Err(BeamError::InvalidParameter(
                "divergence must be within (0, 90) degrees".into(),
            ));
        }
        let waist_radius = wavelength.get::<meter>() / (PI * theta.tan());
        if !waist_radius.is_normal() {
            return Err(BeamError::InvalidParameter(
                "divergence too small, waist radius is not finite".into(),
            ));
        }
        Ok(Self::from_parts(
            wavelength,
            power,
            divergence,
            Length::zero(),
            Length::new::<meter>(waist_radius),
        ))
    }
    /// Creates a new [`GaussianBeam`] from a given waist radius at a given axial position.
    ///
    /// The divergence is derived from the waist radius: θ = arctan(λ / (π·w0)).
    ///
    /// # Errors
    ///
    /// This function returns an [`BeamError::InvalidParameter`] if
    ///   - the wavelength is not positive and finite
    ///   - the power is negative or not finite
    ///   - the waist radius is not positive and finite
    ///   - the waist position is not finite
    pub fn from_waist(
        wavelength: Length,
        power: Power,
        waist_radius: Length,
        waist_position: Length,
    ) -> BeamResult<Self> {
        check_wavelength(wavelength)?;
        check_power(power)?;
        check_waist_position(waist_position)?;
        if !waist_radius.is_normal() || waist_radius.is_sign_negative() {
            return Err(BeamError::InvalidParameter(
                "waist radius must be positive and finite".into(),
            ));
        }
        let divergence = Angle::new::<radian>(
            (wavelength.get::<meter>() / (PI * waist_radius.get::<meter>())).atan(),
        );
        Ok(Self::from_parts(
            wavelength,
            power,
            divergence,
            waist_position,
            waist_radius,
        ))
    }
    fn from_parts(
        wavelength: Length,
        power: Power,
        divergence: Angle,
        waist_position: Length,
        waist_radius: Length,
    ) -> Self {
        let w0 = waist_radius.get::<meter>();
        let rayleigh_range = Length::new::<meter>(PI * w0 * w0 / wavelength.get::<meter>());
        let peak_intensity = Irradiance::new::<watt_per_square_meter>(
            2.0 * power.get::<watt>() / (PI * w0 * w0),
        );
        debug!(
            "gaussian beam: waist radius {w0:e} m at {:e} m, Rayleigh range {:e} m",
            waist_position.get::<meter>(),
            rayleigh_range.get::<meter>()
        );
        Self {
            wavelength,
            power,
            divergence,
            waist_position,
            waist_radius,
            rayleigh_range,
            peak_intensity,
        }
    }
    /// Returns a copy of this beam with its waist moved to the given axial position.
    ///
    /// # Errors
    ///
    /// This function returns an error if the given position is not finite.
    pub fn with_waist_position(mut self, waist_position: Length) -> BeamResult<Self> {
        check_waist_position(waist_position)?;
        self.waist_position = waist_position;
        Ok(self)
    }
    /// Returns the wavelength of this [`GaussianBeam`].
    #[must_use]
    pub const fn wavelength(&self) -> Length {
        self.wavelength
    }
    /// Returns the power of this [`GaussianBeam`].
    #[must_use]
    pub const fn power(&self) -> Power {
        self.power
    }
    /// Returns the far-field divergence half-angle of this [`GaussianBeam`].
    #[must_use]
    pub const fn divergence(&self) -> Angle {
        self.divergence
    }
    /// Returns the axial position of the waist of this [`GaussianBeam`].
    #[must_use]
    pub const fn waist_position(&self) -> Length {
        self.waist_position
    }
    /// Returns the waist radius w0 of this [`GaussianBeam`].
    #[must_use]
    pub const fn waist_radius(&self) -> Length {
        self.waist_radius
    }
    /// Returns the Rayleigh range z0 of this [`GaussianBeam`].
    #[must_use]
    pub const fn rayleigh_range(&self) -> Length {
        self.rayleigh_range
    }
    /// Returns the peak (on-axis) irradiance I0 at the waist of this [`GaussianBeam`].
    ///
    /// This is the power-normalised form I0 = 2P/(π·w0²), so that the irradiance integrated over a plane
    /// equals the beam power.
    #[must_use]
    pub const fn peak_intensity(&self) -> Irradiance {
        self.peak_intensity
    }
    /// Returns the radial irradiance profile in the plane at the axial position `z` as a function of the
    /// lateral distance ρ from the axis.
    pub fn intensity_at_plane(&self, z: Length) -> impl Fn(Length) -> Irradiance + '_ {
        let w = self.beam_radius(z).get::<meter>();
        let w0 = self.waist_radius.get::<meter>();
        let scale = self.peak_intensity.get::<watt_per_square_meter>() * (w0 / w).powi(2);
        move |rho: Length| {
            let rho = rho.get::<meter>();
            Irradiance::new::<watt_per_square_meter>(scale * (-2.0 * rho * rho / (w * w)).exp())
        }
    }
    /// Returns the beam behind the given [`ThinLens`].
    ///
    /// This is a pure transformation. See [`ThinLens::transform`] for details.
    ///
    /// # Errors
    ///
    /// This function returns an error if the transformed beam parameters are not representable.
    pub fn through_lens(&self, lens: &ThinLens) -> BeamResult<Self> {
        lens.transform(self)
    }
}

impl BeamProfile for GaussianBeam {
    fn beam_radius(&self, z: Length) -> Length {
        let dz = (z - self.waist_position).get::<meter>();
        self.waist_radius * 1.0_f64.hypot(dz / self.rayleigh_range.get::<meter>())
    }
    fn intensity(&self, z: Length, rho: Length) -> Irradiance {
        self.intensity_at_plane(z)(rho)
    }
}

impl From<GaussianBeam> for BeamParameters {
    fn from(beam: GaussianBeam) -> Self {
        Self {
            wavelength: beam.wavelength,
            power: beam.power,
            divergence: beam.divergence,
            waist_position: beam.waist_position,
        }
    }
}
impl TryFrom<BeamParameters> for GaussianBeam {
    type Error = BeamError;

    fn try_from(params: BeamParameters) -> BeamResult<Self> {
        Self::new(params.wavelength, params.power, params.divergence)?
            .with_waist_position(params.waist_position)
    }
}

impl Display for GaussianBeam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "wavelength:      {}",
            format_with_prefix(self.wavelength.get::<meter>(), "m")
        )?;
        writeln!(
            f,
            "power:           {}",
            format_with_prefix(self.power.get::<watt>(), "W")
        )?;
        writeln!(
            f,
            "divergence:      {:.4} deg",
            self.divergence.get::<degree>()
        )?;
        writeln!(
            f,
            "waist position:  {}",
            format_with_prefix(self.waist_position.get::<meter>(), "m")
        )?;
        writeln!(
            f,
            "waist radius:    {}",
            format_with_prefix(self.waist_radius.get::<meter>(), "m")
        )?;
        writeln!(
            f,
            "Rayleigh range:  {}",
            format_with_prefix(self.rayleigh_range.get::<meter>(), "m")
        )?;
        write!(
            f,
            "peak irradiance: {}",
            format_with_prefix(
                self.peak_intensity.get::<watt_per_square_meter>(),
                "W/m\u{b2}"
            )
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{degree, meter, micrometer, milliwatt, nanometer, radian};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use assert_matches::assert_matches;

    fn test_beam() -> GaussianBeam {
        GaussianBeam::new(nanometer!(850.0), milliwatt!(1.5), degree!(4.0)).unwrap()
    }
    #[test]
    fn new() {
        let beam = test_beam();
        assert_relative_eq!(beam.wavelength().get::<meter>(), 850e-9);
        assert_relative_eq!(beam.power().get::<watt>(), 1.5e-3);
        assert_relative_eq!(beam.divergence().get::<degree>(), 4.0, max_relative = 1e-12);
        assert_eq!(beam.waist_position(), Length::zero());
        assert_relative_eq!(
            beam.waist_radius().get::<meter>(),
            3.875e-6,
            max_relative = 5e-3
        );
        assert_relative_eq!(
            beam.rayleigh_range().get::<meter>(),
            5.55e-5,
            max_relative = 1e-2
        );
    }
    #[test]
    fn derived_values_exact() {
        let beam = test_beam();
        let w0 = 850e-9 / (PI * 4.0_f64.to_radians().tan());
        assert_relative_eq!(beam.waist_radius().get::<meter>(), w0, max_relative = 1e-12);
        assert_relative_eq!(
            beam.rayleigh_range().get::<meter>(),
            PI * w0 * w0 / 850e-9,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            beam.peak_intensity().get::<watt_per_square_meter>(),
            2.0 * 1.5e-3 / (PI * w0 * w0),
            max_relative = 1e-12
        );
    }
    #[test]
    fn new_wrong_params() {
        assert_matches!(
            GaussianBeam::new(nanometer!(0.0), milliwatt!(1.0), degree!(1.0)),
            Err(BeamError::InvalidParameter(_))
        );
        assert!(GaussianBeam::new(nanometer!(-850.0), milliwatt!(1.0), degree!(1.0)).is_err());
        assert!(GaussianBeam::new(nanometer!(f64::NAN), milliwatt!(1.0), degree!(1.0)).is_err());
        assert!(
            GaussianBeam::new(nanometer!(f64::INFINITY), milliwatt!(1.0), degree!(1.0)).is_err()
        );
        assert!(GaussianBeam::new(nanometer!(850.0), milliwatt!(-1.0), degree!(1.0)).is_err());
        assert!(
            GaussianBeam::new(nanometer!(850.0), milliwatt!(f64::NAN), degree!(1.0)).is_err()
        );
        assert!(GaussianBeam::new(nanometer!(850.0), milliwatt!(1.0), degree!(0.0)).is_err());
        assert!(GaussianBeam::new(nanometer!(850.0), milliwatt!(1.0), degree!(-4.0)).is_err());
        assert!(GaussianBeam::new(nanometer!(850.0), milliwatt!(1.0), degree!(90.0)).is_err());
        assert!(GaussianBeam::new(nanometer!(850.0), milliwatt!(1.0), degree!(f64::NAN)).is_err());
        assert!(GaussianBeam::new(nanometer!(850.0), milliwatt!(1.0), radian!(1e-320)).is_err());
        assert!(GaussianBeam::new(nanometer!(850.0), milliwatt!(0.0), degree!(1.0)).is_ok());
    }
    #[test]
    fn waist_decreases_with_divergence() {
        let divergences = [1e-6, 1e-3, 0.01, 0.1, 1.0, 4.0, 10.0, 45.0, 89.0];
        let waists: Vec<f64> = divergences
            .iter()
            .map(|d| {
                GaussianBeam::new(nanometer!(850.0), milliwatt!(1.0), degree!(*d))
                    .unwrap()
                    .waist_radius()
                    .get::<meter>()
            })
            .collect();
        for pair in waists.windows(2) {
            assert!(pair[0] > pair[1]);
        }
        // θ → 0⁺ lets the waist grow without bound
        assert!(waists[0] > 10.0);
    }
    #[test]
    fn with_waist_position() {
        let beam = test_beam().with_waist_position(meter!(0.2)).unwrap();
        assert_eq!(beam.waist_position(), meter!(0.2));
        assert_eq!(beam.waist_radius(), test_beam().waist_radius());
        assert_relative_eq!(
            beam.beam_radius(meter!(0.2)).get::<meter>(),
            beam.waist_radius().get::<meter>()
        );
        assert!(test_beam().with_waist_position(meter!(f64::NAN)).is_err());
        assert!(test_beam()
            .with_waist_position(meter!(f64::NEG_INFINITY))
            .is_err());
    }
    #[test]
    fn from_waist() {
        let beam = test_beam();
        let copy = GaussianBeam::from_waist(
            beam.wavelength(),
            beam.power(),
            beam.waist_radius(),
            meter!(0.0),
        )
        .unwrap();
        assert_relative_eq!(
            copy.divergence().get::<degree>(),
            4.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            copy.rayleigh_range().get::<meter>(),
            beam.rayleigh_range().get::<meter>(),
            max_relative = 1e-12
        );
        assert!(GaussianBeam::from_waist(
            nanometer!(850.0),
            milliwatt!(1.0),
            micrometer!(0.0),
            meter!(0.0)
        )
        .is_err());
        assert!(GaussianBeam::from_waist(
            nanometer!(850.0),
            milliwatt!(1.0),
            micrometer!(-3.0),
            meter!(0.0)
        )
        .is_err());
        assert!(GaussianBeam::from_waist(
            nanometer!(850.0),
            milliwatt!(1.0),
            micrometer!(3.0),
            meter!(f64::INFINITY)
        )
        .is_err());
    }
    #[test]
    fn beam_radius() {
        let beam = test_beam();
        let w0 = beam.waist_radius().get::<meter>();
        assert_relative_eq!(beam.beam_radius(meter!(0.0)).get::<meter>(), w0);
        assert_relative_eq!(
            beam.beam_radius(beam.rayleigh_range()).get::<meter>(),
            w0 * 2.0_f64.sqrt(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            beam.beam_radius(-beam.rayleigh_range()).get::<meter>(),
            w0 * 2.0_f64.sqrt(),
            max_relative = 1e-12
        );
        // far field: W(z) ≈ z·tan θ
        assert_relative_eq!(
            beam.beam_radius(meter!(1.0)).get::<meter>(),
            4.0_f64.to_radians().tan(),
            max_relative = 1e-6
        );
    }
    #[test]
    fn intensity_maximal_on_axis() {
        let beam = test_beam();
        for z in [0.0, 1e-5, 1e-3, 0.5] {
            let on_axis = beam.on_axis_intensity(meter!(z)).get::<watt_per_square_meter>();
            for rho in [1e-7, 1e-6, 1e-4, 1e-2] {
                assert!(beam.intensity(meter!(z), meter!(rho)).get::<watt_per_square_meter>() < on_axis);
                assert!(beam.intensity(meter!(z), meter!(-rho)).get::<watt_per_square_meter>() < on_axis);
            }
        }
    }
    #[test]
    fn on_axis_intensity_non_increasing() {
        let beam = test_beam().with_waist_position(meter!(0.1)).unwrap();
        let mut last = f64::INFINITY;
        for step in 0..50 {
            let dz = f64::from(step) * 2e-5;
            let ahead = beam
                .on_axis_intensity(meter!(0.1 + dz))
                .get::<watt_per_square_meter>();
            let behind = beam
                .on_axis_intensity(meter!(0.1 - dz))
                .get::<watt_per_square_meter>();
            assert!(ahead <= last);
            assert_relative_eq!(ahead, behind, max_relative = 1e-6);
            last = ahead;
        }
        assert_relative_eq!(
            beam.on_axis_intensity(meter!(0.1)).get::<watt_per_square_meter>(),
            beam.peak_intensity().get::<watt_per_square_meter>()
        );
    }
    #[test]
    fn intensity_at_plane() {
        let beam = test_beam();
        let profile = beam.intensity_at_plane(meter!(0.0));
        let w0 = beam.waist_radius();
        let i0 = beam.peak_intensity().get::<watt_per_square_meter>();
        assert_relative_eq!(profile(Length::zero()).get::<watt_per_square_meter>(), i0);
        // 1/e² radius
        assert_relative_eq!(
            profile(w0).get::<watt_per_square_meter>(),
            i0 * (-2.0_f64).exp(),
            max_relative = 1e-12
        );
        assert_abs_diff_eq!(
            profile(meter!(1.0)).get::<watt_per_square_meter>(),
            0.0
        );
    }
    #[test]
    fn serde() {
        let beam = test_beam().with_waist_position(meter!(0.5)).unwrap();
        let serialized = serde_json::to_string(&beam).unwrap();
        let deserialized: GaussianBeam = serde_json::from_str(&serialized).unwrap();
        assert_relative_eq!(
            deserialized.waist_radius().get::<meter>(),
            beam.waist_radius().get::<meter>(),
            max_relative = 1e-12
        );
        assert_eq!(deserialized.waist_position(), meter!(0.5));
        let invalid = r#"{"wavelength":-1.0,"power":0.001,"divergence":0.01}"#;
        assert!(serde_json::from_str::<GaussianBeam>(invalid).is_err());
    }
    #[test]
    fn display() {
        let output = format!("{}", test_beam());
        assert!(output.contains("wavelength:      850.000 nm"));
        assert!(output.contains("power:           1.500 mW"));
        assert!(output.contains("divergence:      4.0000 deg"));
        assert!(output.contains("waist radius:    3.869 \u{03BC}m"));
    }
}
