//! This is the documentation for the **beamprop** package.
//!
//! **beamprop** calculates the irradiance profile and the beam width of a paraxial Gaussian laser beam
//! propagating through free space and a system of ideal thin lenses.
//!
//! ```
//! use beamprop::{degree, meter, milliwatt, nanometer, BeamProfile, GaussianBeam, LensSystem, ThinLens};
//! use uom::si::length::micrometer;
//!
//! let beam = GaussianBeam::new(nanometer!(850.0), milliwatt!(1.5), degree!(4.0)).unwrap();
//! assert_eq!(beam.waist_radius().get::<micrometer>().round(), 4.0);
//!
//! let lenses = LensSystem::new(vec![ThinLens::new(meter!(0.1), meter!(0.05)).unwrap()]).unwrap();
//! let train = lenses.propagate(&beam).unwrap();
//! let width = train.beam_radius(meter!(0.2));
//! assert!(width < beam.beam_radius(meter!(0.2)));
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod console;
pub mod error;
pub mod gaussian_beam;
pub mod intensity_grid;
pub mod lens_system;
pub mod parse;
pub mod plottable;
pub mod profile;
pub mod request;
pub mod sampling;
pub mod thin_lens;
pub mod utils;

pub use gaussian_beam::{BeamParameters, GaussianBeam};
pub use intensity_grid::{GridConfig, IntensityGrid};
pub use lens_system::{width_at, BeamSegment, BeamTrain, LensOrdering, LensSystem};
pub use profile::{BeamProfile, Irradiance};
pub use thin_lens::ThinLens;
