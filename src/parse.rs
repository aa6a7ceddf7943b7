#![warn(missing_docs)]
//! Parsing of numeric user input (console arguments and prompts)
use crate::error::{BeamError, BeamResult};

/// Parse a single floating point value of the input field `field`.
///
/// Leading and trailing whitespace is ignored.
///
/// # Errors
/// This function returns a [`BeamError::Parse`] naming the field and the offending text.
pub fn parse_value(field: &str, text: &str) -> BeamResult<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|e| BeamError::Parse(format!("{field}: cannot parse '{text}' as number ({e})")))
}

/// Parse a single floating point value of the input field `field` which must be positive and finite.
///
/// # Errors
/// This function returns a [`BeamError::Parse`] if the text is not a number or the number is not positive and
/// finite.
pub fn parse_positive(field: &str, text: &str) -> BeamResult<f64> {
    let value = parse_value(field, text)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(BeamError::Parse(format!(
            "{field}: value must be positive and finite, got {value}"
        )));
    }
    Ok(value)
}

/// Parse a comma separated list of floating point values of the input field `field`.
///
/// # Errors
/// This function returns a [`BeamError::Parse`] if the list is empty, contains an empty entry or an entry is
/// not a number.
pub fn parse_list(field: &str, text: &str) -> BeamResult<Vec<f64>> {
    if text.trim().is_empty() {
        return Err(BeamError::Parse(format!("{field}: list is empty")));
    }
    text.split(',')
        .enumerate()
        .map(|(idx, entry)| {
            if entry.trim().is_empty() {
                Err(BeamError::Parse(format!(
                    "{field}: entry {} of '{text}' is empty",
                    idx + 1
                )))
            } else {
                parse_value(field, entry)
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;
    #[test]
    fn value() {
        assert_eq!(parse_value("wavelength", "850").unwrap(), 850.0);
        assert_eq!(parse_value("wavelength", " 1.5e-3 ").unwrap(), 1.5e-3);
        assert_eq!(parse_value("power", "-2").unwrap(), -2.0);
        assert_eq!(parse_value("power", "inf").unwrap(), f64::INFINITY);
    }
    #[test]
    fn value_invalid() {
        assert_matches!(parse_value("wavelength", "abc"), Err(BeamError::Parse(_)));
        assert_eq!(
            parse_value("wavelength", "").unwrap_err().to_string(),
            "Parse:wavelength: cannot parse '' as number (cannot parse float from empty string)"
        );
        assert!(parse_value("power", "1,5").is_err());
    }
    #[test]
    fn positive() {
        assert_eq!(parse_positive("divergence", "4").unwrap(), 4.0);
        assert_eq!(
            parse_positive("divergence", "0").unwrap_err().to_string(),
            "Parse:divergence: value must be positive and finite, got 0"
        );
        assert!(parse_positive("divergence", "-1").is_err());
        assert!(parse_positive("divergence", "inf").is_err());
        assert!(parse_positive("divergence", "NaN").is_err());
        assert!(parse_positive("divergence", "x").is_err());
    }
    #[test]
    fn list() {
        assert_eq!(parse_list("distances", "0.1").unwrap(), vec![0.1]);
        assert_eq!(
            parse_list("distances", "0.1, 0.2 ,0.3").unwrap(),
            vec![0.1, 0.2, 0.3]
        );
    }
    #[test]
    fn list_invalid() {
        assert_matches!(parse_list("distances", ""), Err(BeamError::Parse(_)));
        assert!(parse_list("distances", "  ").is_err());
        assert_eq!(
            parse_list("distances", "0.1,,0.3").unwrap_err().to_string(),
            "Parse:distances: entry 2 of '0.1,,0.3' is empty"
        );
        assert!(parse_list("distances", "0.1,").is_err());
        assert!(parse_list("distances", "0.1;0.2").is_err());
    }
}
