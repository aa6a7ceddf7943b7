#![warn(missing_docs)]
//! Propagation of a [`GaussianBeam`] through a sequence of thin lenses
//!
//! Each lens turns the incoming beam into a new, independent Gaussian beam. The result of the propagation is a
//! [`BeamTrain`]: a list of beam segments, each valid from the position of the lens that created it up to the
//! next lens.
use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uom::si::{f64::Length, length::meter};

use crate::{
    error::{BeamError, BeamResult},
    gaussian_beam::GaussianBeam,
    profile::{BeamProfile, Irradiance},
    thin_lens::ThinLens,
};

/// Handling of lens positions which are not given in ascending order.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LensOrdering {
    /// Lens positions must be non-decreasing, otherwise the lens system is rejected.
    #[default]
    Strict,
    /// Lenses are (stably) sorted by their position. A warning is logged if the order changed.
    Sorted,
}

/// An ordered sequence of [`ThinLens`]es along the optical axis.
///
/// The lenses are guaranteed to be sorted by their (non-decreasing) position. Several lenses at the same
/// position are applied in the given order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LensSystem {
    lenses: Vec<ThinLens>,
}

fn is_ascending(lenses: &[ThinLens]) -> bool {
    lenses
        .iter()
        .tuple_windows()
        .all(|(first, second)| first.position() <= second.position())
}

impl LensSystem {
    /// Creates a new [`LensSystem`] from lenses given in ascending order of their positions.
    ///
    /// # Errors
    ///
    /// This function returns an [`BeamError::InvalidParameter`] if the lens positions are not non-decreasing.
    pub fn new(lenses: Vec<ThinLens>) -> BeamResult<Self> {
        Self::with_ordering(lenses, LensOrdering::Strict)
    }
    /// Creates a new [`LensSystem`] from lenses in arbitrary order.
    ///
    /// The lenses are sorted by their position. Lenses with equal positions keep their relative order.
    #[must_use]
    pub fn from_unsorted(mut lenses: Vec<ThinLens>) -> Self {
        if !is_ascending(&lenses) {
            warn!("lens positions are not in ascending order, lenses have been sorted by position");
            lenses.sort_by(|a, b| {
                a.position()
                    .get::<meter>()
                    .total_cmp(&b.position().get::<meter>())
            });
        }
        Self { lenses }
    }
    /// Creates a new [`LensSystem`] with the given handling of the lens order.
    ///
    /// # Errors
    ///
    /// This function returns an error if the lenses are not in ascending order and [`LensOrdering::Strict`] was
    /// given.
    pub fn with_ordering(lenses: Vec<ThinLens>, ordering: LensOrdering) -> BeamResult<Self> {
        match ordering {
            LensOrdering::Strict => {
                if !is_ascending(&lenses) {
                    return Err(BeamError::InvalidParameter(
                        "lens positions must be in ascending order".into(),
                    ));
                }
                Ok(Self { lenses })
            }
            LensOrdering::Sorted => Ok(Self::from_unsorted(lenses)),
        }
    }
    /// Creates a new [`LensSystem`] from separate lists of lens positions and focal lengths.
    ///
    /// # Errors
    ///
    /// This function returns an error if
    ///   - the lists differ in length ([`BeamError::LengthMismatch`])
    ///   - a lens is invalid (see [`ThinLens::new`])
    ///   - the lens order is not acceptable for the given [`LensOrdering`]
    pub fn from_lists(
        distances: &[Length],
        focal_lengths: &[Length],
        ordering: LensOrdering,
    ) -> BeamResult<Self> {
        if distances.len() != focal_lengths.len() {
            return Err(BeamError::LengthMismatch(format!(
                "got {} lens distances but {} focal lengths",
                distances.len(),
                focal_lengths.len()
            )));
        }
        let lenses = distances
            .iter()
            .zip(focal_lengths)
            .map(|(distance, focal_length)| ThinLens::new(*distance, *focal_length))
            .collect::<BeamResult<Vec<_>>>()?;
        Self::with_ordering(lenses, ordering)
    }
    /// Returns the lenses of this [`LensSystem`] in order of their positions.
    #[must_use]
    pub fn lenses(&self) -> &[ThinLens] {
        &self.lenses
    }
    /// Propagate a beam through all lenses of this [`LensSystem`].
    ///
    /// # Errors
    ///
    /// This function returns an error if a lens transformation fails.
    pub fn propagate(&self, beam: &GaussianBeam) -> BeamResult<BeamTrain> {
        let mut segments = Vec::with_capacity(self.lenses.len() + 1);
        segments.push(BeamSegment {
            start: None,
            beam: beam.clone(),
        });
        let mut current = beam.clone();
        for lens in &self.lenses {
            current = lens.transform(&current)?;
            segments.push(BeamSegment {
                start: Some(lens.position()),
                beam: current.clone(),
            });
        }
        Ok(BeamTrain { segments })
    }
}

/// A part of a [`BeamTrain`] described by a single [`GaussianBeam`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeamSegment {
    start: Option<Length>,
    beam: GaussianBeam,
}
impl BeamSegment {
    /// Returns the axial position from which this segment is valid. `None` denotes the incoming beam (−∞).
    #[must_use]
    pub const fn start(&self) -> Option<Length> {
        self.start
    }
    /// Returns the beam of this segment.
    #[must_use]
    pub const fn beam(&self) -> &GaussianBeam {
        &self.beam
    }
}

/// The piecewise beam resulting from [`LensSystem::propagate`].
///
/// The first segment is the incoming beam, segment `i + 1` is the beam behind lens `i`. The beam at a position
/// z is given by the last segment starting at or before z. In particular, at the exact position of a lens the
/// beam behind the lens is used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeamTrain {
    segments: Vec<BeamSegment>,
}
impl BeamTrain {
    /// Returns the segment describing the beam at the axial position `z`.
    #[must_use]
    pub fn segment_at(&self, z: Length) -> &BeamSegment {
        let count = self
            .segments
            .partition_point(|segment| segment.start.map_or(true, |start| start <= z));
        &self.segments[count.saturating_sub(1)]
    }
    /// Returns the beam radius W(z) at the axial position `z`.
    #[must_use]
    pub fn width_at(&self, z: Length) -> Length {
        self.beam_radius(z)
    }
    /// Returns all segments of this [`BeamTrain`].
    #[must_use]
    pub fn segments(&self) -> &[BeamSegment] {
        &self.segments
    }
    /// Returns the incoming beam.
    #[must_use]
    pub fn input_beam(&self) -> &GaussianBeam {
        &self.segments[0].beam
    }
    /// Returns the beam behind the last lens.
    #[must_use]
    pub fn output_beam(&self) -> &GaussianBeam {
        &self.segments[self.segments.len() - 1].beam
    }
    /// Returns the number of segments (number of lenses + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }
    /// A [`BeamTrain`] always contains at least the incoming beam.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}
impl BeamProfile for BeamTrain {
    fn beam_radius(&self, z: Length) -> Length {
        self.segment_at(z).beam.beam_radius(z)
    }
    fn intensity(&self, z: Length, rho: Length) -> Irradiance {
        self.segment_at(z).beam.intensity(z, rho)
    }
}

/// Returns the beam radius at the axial position `z` of a beam sent through a system of thin lenses given as
/// lists of positions and focal lengths (in ascending order of the positions).
///
/// # Errors
///
/// This function returns an error if
///   - the lists differ in length
///   - a lens is invalid or the lenses are not in ascending order
pub fn width_at(
    beam: &GaussianBeam,
    distances: &[Length],
    focal_lengths: &[Length],
    z: Length,
) -> BeamResult<Length> {
    let system = LensSystem::from_lists(distances, focal_lengths, LensOrdering::Strict)?;
    Ok(system.propagate(beam)?.width_at(z))
}
