#![warn(missing_docs)]
//! Common interface of everything that describes a (piecewise) Gaussian beam along the optical axis.
use crate::{
    error::BeamResult,
    intensity_grid::{check_width, GridConfig, IntensityGrid},
};
use uom::num_traits::Zero;
use uom::si::f64::{HeatFluxDensity, Length, Power};

/// Irradiance (power per area) in W/m².
pub type Irradiance = HeatFluxDensity;

/// Number of samples per axis used for integrating the power through an aperture.
pub const APERTURE_SAMPLES: usize = 201;

/// Outside of this multiple of the beam radius the transmitted power is negligible (< exp(-72) of the peak).
const APERTURE_CUTOFF: f64 = 6.0;

/// Evaluation of a beam at arbitrary points (z, ρ), where `z` is the absolute axial position and
/// `ρ` the lateral distance from the optical axis.
///
/// This trait is implemented by a single [`GaussianBeam`](crate::GaussianBeam) as well as by a
/// [`BeamTrain`](crate::BeamTrain) resulting from the propagation through a lens system.
pub trait BeamProfile {
    /// Returns the beam radius W(z) (1/e² intensity radius) at the axial position `z`.
    fn beam_radius(&self, z: Length) -> Length;
    /// Returns the irradiance at the axial position `z` and the lateral distance `rho` from the axis.
    fn intensity(&self, z: Length, rho: Length) -> Irradiance;
    /// Returns the (maximum) irradiance on the optical axis at the axial position `z`.
    fn on_axis_intensity(&self, z: Length) -> Irradiance {
        self.intensity(z, Length::zero())
    }
    /// Sample the irradiance in the plane at `z` over a rectangular grid.
    ///
    /// # Errors
    /// This function returns an error if the given [`GridConfig`] is invalid or `z` is not finite.
    fn intensity_grid(&self, z: Length, config: &GridConfig) -> BeamResult<IntensityGrid> {
        IntensityGrid::sample(self, z, config)
    }
    /// Returns the power transmitted through a centered rectangular aperture of size `x_width` × `y_width`
    /// located at the axial position `z`.
    ///
    /// # Errors
    /// This function returns an error if the aperture widths are not positive and finite or `z` is not finite.
    fn aperture_power(&self, z: Length, x_width: Length, y_width: Length) -> BeamResult<Power> {
        check_width("x width", x_width)?;
        check_width("y width", y_width)?;
        let cutoff = self.beam_radius(z) * (2.0 * APERTURE_CUTOFF);
        let config = GridConfig::default()
            .with_x_width(if x_width < cutoff { x_width } else { cutoff })?
            .with_y_width(if y_width < cutoff { y_width } else { cutoff })?
            .with_samples(APERTURE_SAMPLES, APERTURE_SAMPLES)?;
        Ok(self.intensity_grid(z, &config)?.total_power())
    }
}
