//! Helpers for creating equally spaced sampling axes
use crate::error::{BeamError, BeamResult};
use crate::utils::usize_to_f64;
use log::warn;
use nalgebra::DVector;

/// Creates a linearly spaced Vector (Matrix with 1 column and `num` rows) from `start` to `end`
/// # Attributes
/// - `start`:  Start value of the array
/// - `end`:    end value of the array (included)
/// - `num`:    number of elements
///
/// # Errors
/// This function returns an error if `start` or `end` are not finite.
pub fn linspace(start: f64, end: f64, num: usize) -> BeamResult<DVector<f64>> {
    if !start.is_finite() || !end.is_finite() {
        return Err(BeamError::InvalidParameter(
            "start and end values must be finite!".into(),
        ));
    }
    if num < 2 {
        warn!("Using linspace with less than two elements results in an empty Vector for num=0 or a Vector with one entry being num=start");
        return Ok(DVector::from_element(num, start));
    }
    let bin_size = (end - start) / usize_to_f64(num - 1);
    let mut linspace = DVector::from_fn(num, |step, _| start + usize_to_f64(step) * bin_size);
    // avoid accumulated rounding at the upper boundary
    linspace[num - 1] = end;
    Ok(linspace)
}

/// Creates a linearly spaced axis of `num` points symmetric around zero with total `width`.
///
/// # Errors
/// This function returns an error if `width` is not finite.
pub fn centered_axis(width: f64, num: usize) -> BeamResult<DVector<f64>> {
    linspace(-width / 2.0, width / 2.0, num)
}
