#![warn(missing_docs)]
//! Ideal (paraxial, aberration-free) thin lens acting on a [`GaussianBeam`]
use log::debug;
use serde::{Deserialize, Serialize};
use uom::num_traits::Zero;
use uom::si::{f64::Length, length::meter};

use crate::{
    error::{BeamError, BeamResult},
    gaussian_beam::GaussianBeam,
};

/// An ideal thin lens located at an axial position with a given focal length.
///
/// Only converging lenses (f > 0) are supported. A focal length of `+∞` represents a plane without any
/// refractive power and leaves a beam unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThinLens")]
pub struct ThinLens {
    position: Length,
    focal_length: Length,
}

#[derive(Deserialize)]
struct RawThinLens {
    position: Length,
    focal_length: Length,
}
impl TryFrom<RawThinLens> for ThinLens {
    type Error = BeamError;

    fn try_from(raw: RawThinLens) -> BeamResult<Self> {
        Self::new(raw.position, raw.focal_length)
    }
}

impl ThinLens {
    /// Creates a new [`ThinLens`].
    ///
    /// # Errors
    ///
    /// This function returns an [`BeamError::InvalidParameter`] if
    ///   - the position is not finite
    ///   - the focal length is NaN, zero or negative
    pub fn new(position: Length, focal_length: Length) -> BeamResult<Self> {
        if !position.is_finite() {
            return Err(BeamError::InvalidParameter(
                "lens position must be finite".into(),
            ));
        }
        if focal_length.is_nan() || focal_length <= Length::zero() {
            return Err(BeamError::InvalidParameter(
                "focal length must be > 0 or +inf".into(),
            ));
        }
        Ok(Self {
            position,
            focal_length,
        })
    }
    /// Returns the axial position of this [`ThinLens`].
    #[must_use]
    pub const fn position(&self) -> Length {
        self.position
    }
    /// Returns the focal length of this [`ThinLens`].
    #[must_use]
    pub const fn focal_length(&self) -> Length {
        self.focal_length
    }
    /// Returns the beam emerging from this lens for a given incoming beam.
    ///
    /// With the distance s = d − z_w between the waist of the incoming beam and the lens, the magnification
    /// m = 1/√((1 − s/f)² + (z0/f)²) yields the new waist radius w0' = m·w0 located at
    /// d + m²·(−s + (s² + z0²)/f). Wavelength and power are unchanged.
    ///
    /// # Errors
    ///
    /// This function returns an error if the resulting beam parameters are not representable (e.g. a vanishing
    /// waist radius).
    pub fn transform(&self, beam: &GaussianBeam) -> BeamResult<GaussianBeam> {
        if self.focal_length.is_infinite() {
            return Ok(beam.clone());
        }
        let f = self.focal_length.get::<meter>();
        let d = self.position.get::<meter>();
        let s = d - beam.waist_position().get::<meter>();
        let z0 = beam.rayleigh_range().get::<meter>();
        let m_squared = 1.0 / ((1.0 - s / f).powi(2) + (z0 / f).powi(2));
        let image_distance = m_squared * (-s + s.mul_add(s, z0 * z0) / f);
        debug!("thin lens at {d:e} m: magnification {:e}, waist {image_distance:e} m behind the lens", m_squared.sqrt());
        GaussianBeam::from_waist(
            beam.wavelength(),
            beam.power(),
            beam.waist_radius() * m_squared.sqrt(),
            Length::new::<meter>(d + image_distance),
        )
    }
}
