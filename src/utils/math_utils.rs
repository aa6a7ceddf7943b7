//! Numeric casts with the lossy conversions made explicit in one place.
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let newval = value as f64;
    newval
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    #[test]
    fn usize_to_f64_test() {
        assert_relative_eq!(usize_to_f64(0), 0.0);
        assert_relative_eq!(usize_to_f64(100), 100.0);
    }
}
