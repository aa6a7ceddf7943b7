//! various functions for dealing with SI notation of (physical) values (e.g. prefix, etc.)

/// Get the SI prefix exponent (a multiple of 3) of a given value.
///
/// # Example
/// ```
/// use beamprop::utils::unit_format::si_exponent;
///
/// assert_eq!(si_exponent(0.0), 0);
/// assert_eq!(si_exponent(0.1), -3); // could be written as 100e-3
/// assert_eq!(si_exponent(1010.0), 3); // could be written as 1.01e3
/// ```
#[must_use]
pub fn si_exponent(base_unit_value: f64) -> i32 {
    if base_unit_value == 0.0 || !base_unit_value.is_finite() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation)]
    let exponent = f64::log10(base_unit_value.abs()).floor() as i32;
    exponent.div_euclid(3) * 3
}

/// Return an SI unit prefix for a given exponent (a multiple of 3).
#[must_use]
pub const fn si_prefix(exponent: i32) -> &'static str {
    match exponent {
        -18 => "a",
        -15 => "f",
        -12 => "p",
        -9 => "n",
        -6 => "\u{03BC}", // greek mu as unicode code point
        -3 => "m",
        0 => "",
        3 => "k",
        6 => "M",
        9 => "G",
        12 => "T",
        _ => "?",
    }
}

/// Format a value given in base units with a matching SI prefix and three decimals.
///
/// Values outside the range of known prefixes fall back to scientific notation.
/// # Example
/// ```
/// use beamprop::utils::unit_format::format_with_prefix;
///
/// assert_eq!(format_with_prefix(3.869e-6, "m"), "3.869 \u{03BC}m");
/// assert_eq!(format_with_prefix(0.0015, "W"), "1.500 mW");
/// ```
#[must_use]
pub fn format_with_prefix(base_unit_value: f64, unit: &str) -> String {
    let exponent = si_exponent(base_unit_value);
    let prefix = si_prefix(exponent);
    if prefix == "?" {
        format!("{base_unit_value:.3e} {unit}")
    } else {
        let scaled = base_unit_value / 10.0_f64.powi(exponent);
        format!("{scaled:.3} {prefix}{unit}")
    }
}
