//! Linear scaling of a test segment against a reference of known length.
//!
//! The proportion itself is trivial; what this module pins down is the error
//! behavior. The interaction deliberately does not clamp or default: a
//! non-numeric reference length or a zero-length reference segment yields an
//! explicit error that the readout displays in place of a number.

use thiserror::Error;

/// Why a scaled length could not be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// The reference-length field does not parse as a number.
    #[error("reference length {0:?} is not a number")]
    InvalidReference(String),
    /// The reference segment has zero pixel length, so the scale is undefined.
    #[error("reference segment has zero length")]
    ZeroReference,
}

/// Parse the user-entered reference length. Leading/trailing whitespace is
/// accepted; anything else that `f64` rejects is an error.
pub fn parse_reference(text: &str) -> Result<f64, CalibrationError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| CalibrationError::InvalidReference(text.to_string()))
}

/// Compute the test segment's real-world length by proportion:
/// `reference_length * test_px / reference_px`.
pub fn scaled_length(
    reference_text: &str,
    reference_px: f64,
    test_px: f64,
) -> Result<f64, CalibrationError> {
    let reference_length = parse_reference(reference_text)?;
    if reference_px == 0.0 {
        return Err(CalibrationError::ZeroReference);
    }
    Ok(reference_length * test_px / reference_px)
}

/// Format a computed length for the readout: two decimal places, with an
/// optional unit suffix.
pub fn format_length(value: f64, unit: Option<&str>) -> String {
    match unit {
        Some(u) => format!("{:.2} {}", value, u),
        None => format!("{:.2}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn craigslist_couch_scenario() {
        // Reference spans 26 px and is declared 26 units long, so the scale
        // is 1:1 and a 13 px test segment measures 13.00.
        let value = scaled_length("26", 26.0, 13.0).unwrap();
        assert_eq!(format_length(value, None), "13.00");
    }

    #[test]
    fn unit_suffix_is_appended() {
        assert_eq!(format_length(13.0, Some("in")), "13.00 in");
    }

    #[test]
    fn non_numeric_reference_is_an_explicit_error() {
        assert_eq!(
            scaled_length("???", 26.0, 13.0),
            Err(CalibrationError::InvalidReference("???".to_string()))
        );
    }

    #[test]
    fn whitespace_around_the_number_is_tolerated() {
        assert_eq!(parse_reference(" 26.5 ").unwrap(), 26.5);
    }

    #[test]
    fn zero_reference_segment_is_an_explicit_error() {
        assert_eq!(
            scaled_length("26", 0.0, 13.0),
            Err(CalibrationError::ZeroReference)
        );
    }
}
